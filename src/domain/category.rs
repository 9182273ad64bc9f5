//! Service categories and their sub-type rules.

use super::errors::UnknownCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A service category in the directory.
///
/// Doctors and maids carry a mandatory sub-type (specialisation or kind of
/// work) that is folded into the stored description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Doctor,
    Maid,
    Food,
    Salon,
    Electrician,
    Plumber,
    Grocery,
    Others,
}

impl Category {
    /// All categories, in the order the home grid shows them.
    pub const ALL: [Category; 8] = [
        Category::Doctor,
        Category::Maid,
        Category::Food,
        Category::Salon,
        Category::Electrician,
        Category::Plumber,
        Category::Grocery,
        Category::Others,
    ];

    /// Name stored in the contacts table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Doctor => "Doctor",
            Self::Maid => "Maid",
            Self::Food => "Food",
            Self::Salon => "Salon",
            Self::Electrician => "Electrician",
            Self::Plumber => "Plumber",
            Self::Grocery => "Grocery",
            Self::Others => "Others",
        }
    }

    /// Human-facing label for pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food / Tiffin",
            other => other.as_str(),
        }
    }

    /// Whether a submission in this category must name a sub-type.
    pub fn requires_sub_type(&self) -> bool {
        matches!(self, Self::Doctor | Self::Maid)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts stored names and labels, ignoring case and surrounding spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.as_str().eq_ignore_ascii_case(wanted) || c.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Merge a category's sub-type into the free-text description.
///
/// For a doctor with a `doctor_type` (or a maid with a `maid_type`) the result
/// is the sub-type, followed by `" - "` and the description when the
/// description is non-empty. Every other category keeps the description as
/// given. Callers must have checked that the required sub-type is present.
pub fn resolve_description(
    category: Category,
    doctor_type: Option<&str>,
    maid_type: Option<&str>,
    description: &str,
) -> String {
    let sub_type = match category {
        Category::Doctor => doctor_type,
        Category::Maid => maid_type,
        _ => None,
    };

    match sub_type {
        Some(sub_type) if description.is_empty() => sub_type.to_string(),
        Some(sub_type) => format!("{} - {}", sub_type, description),
        None => description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doctor_type_alone() {
        let merged = resolve_description(Category::Doctor, Some("Cardiologist"), None, "");
        assert_eq!(merged, "Cardiologist");
    }

    #[test]
    fn test_doctor_type_with_description() {
        let merged = resolve_description(
            Category::Doctor,
            Some("Cardiologist"),
            None,
            "mornings only",
        );
        assert_eq!(merged, "Cardiologist - mornings only");
    }

    #[test]
    fn test_maid_type_is_symmetric() {
        assert_eq!(
            resolve_description(Category::Maid, None, Some("Cook"), ""),
            "Cook"
        );
        assert_eq!(
            resolve_description(Category::Maid, None, Some("Cook"), "veg only"),
            "Cook - veg only"
        );
    }

    #[test]
    fn test_sub_type_of_other_category_is_ignored() {
        // A leftover doctor type must not leak into a maid record
        assert_eq!(
            resolve_description(Category::Maid, Some("Dentist"), Some("Cleaning"), ""),
            "Cleaning"
        );
        assert_eq!(
            resolve_description(Category::Food, Some("Dentist"), Some("Cook"), "tiffin"),
            "tiffin"
        );
    }

    #[test]
    fn test_plain_categories_keep_description() {
        for category in [
            Category::Food,
            Category::Salon,
            Category::Electrician,
            Category::Plumber,
            Category::Grocery,
            Category::Others,
        ] {
            assert_eq!(resolve_description(category, None, None, ""), "");
            assert_eq!(resolve_description(category, None, None, "24x7"), "24x7");
        }
    }

    #[test]
    fn test_requires_sub_type() {
        let required: Vec<_> = Category::ALL
            .into_iter()
            .filter(Category::requires_sub_type)
            .collect();
        assert_eq!(required, vec![Category::Doctor, Category::Maid]);
    }

    #[test]
    fn test_parse_category() {
        assert_eq!("Doctor".parse::<Category>(), Ok(Category::Doctor));
        assert_eq!(" plumber ".parse::<Category>(), Ok(Category::Plumber));
        assert_eq!("Food / Tiffin".parse::<Category>(), Ok(Category::Food));
        assert_eq!(
            "Carpenter".parse::<Category>(),
            Err(UnknownCategory("Carpenter".to_string()))
        );
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::Electrician).unwrap();
        assert_eq!(json, "\"Electrician\"");
        let parsed: Category = serde_json::from_str("\"Grocery\"").unwrap();
        assert_eq!(parsed, Category::Grocery);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Food.label(), "Food / Tiffin");
        assert_eq!(Category::Salon.label(), "Salon");
        assert_eq!(Category::Others.to_string(), "Others");
    }
}
