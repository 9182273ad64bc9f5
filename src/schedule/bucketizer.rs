//! Grouping of 24-hour departure times into parts of the day.
//!
//! Each "H:MM" string lands in exactly one bucket by its hour:
//!
//! | bucket    | hours           |
//! |-----------|-----------------|
//! | morning   | 5:00 – 11:59    |
//! | afternoon | 12:00 – 16:59   |
//! | evening   | 17:00 – 20:59   |
//! | night     | 21:00 – 4:59    |
//!
//! Buckets are sorted by time of day with a stable sort, so repeated trips
//! keep their input order and bucketizing the output again changes nothing.

use crate::error::{ScheduleError, ScheduleResult};
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("Failed to compile time pattern"));

/// Part of the day a departure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Period {
    /// Display order.
    pub const ALL: [Period; 4] = [
        Period::Morning,
        Period::Afternoon,
        Period::Evening,
        Period::Night,
    ];

    pub fn for_hour(hour24: u32) -> Self {
        match hour24 {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    /// Heading shown above the bucket.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning (5 AM - 11:59 AM)",
            Self::Afternoon => "Afternoon (12 PM - 4:59 PM)",
            Self::Evening => "Evening (5 PM - 8:59 PM)",
            Self::Night => "Night (9 PM - 4:59 AM)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        })
    }
}

/// One departure, parsed from its 24-hour form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ScheduleEntry {
    pub original: String,
    pub hour24: u32,
    pub minutes: u32,
    /// AM or PM half of the clock; named apart from the bucket [`Period`]
    pub meridiem: Meridiem,
    /// 12-hour form, e.g. "5:00 PM"
    pub display_time: String,
}

impl ScheduleEntry {
    /// Parse an "H:MM" string (hour 0-23, no leading zero needed).
    pub fn parse(raw: &str) -> ScheduleResult<Self> {
        let invalid = || ScheduleError::InvalidTime(raw.to_string());

        let caps = TIME_PATTERN.captures(raw.trim()).ok_or_else(invalid)?;
        let hour24: u32 = caps[1].parse().map_err(|_| invalid())?;
        let minute_digits = &caps[2];
        let minutes: u32 = minute_digits.parse().map_err(|_| invalid())?;

        // Range check for both fields
        NaiveTime::from_hms_opt(hour24, minutes, 0).ok_or_else(invalid)?;

        let meridiem = if hour24 < 12 { Meridiem::Am } else { Meridiem::Pm };
        let hour12 = match hour24 {
            0 => 12,
            1..=12 => hour24,
            _ => hour24 - 12,
        };

        Ok(Self {
            original: raw.to_string(),
            hour24,
            minutes,
            meridiem,
            display_time: format!("{}:{} {}", hour12, minute_digits, meridiem),
        })
    }

    pub fn period(&self) -> Period {
        Period::for_hour(self.hour24)
    }

    fn sort_key(&self) -> (u32, u32) {
        (self.hour24, self.minutes)
    }
}

/// Departures grouped by part of the day, each group in time order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleBuckets {
    pub morning: Vec<ScheduleEntry>,
    pub afternoon: Vec<ScheduleEntry>,
    pub evening: Vec<ScheduleEntry>,
    pub night: Vec<ScheduleEntry>,
}

impl ScheduleBuckets {
    pub fn get(&self, period: Period) -> &[ScheduleEntry] {
        match period {
            Period::Morning => &self.morning,
            Period::Afternoon => &self.afternoon,
            Period::Evening => &self.evening,
            Period::Night => &self.night,
        }
    }

    fn get_mut(&mut self, period: Period) -> &mut Vec<ScheduleEntry> {
        match period {
            Period::Morning => &mut self.morning,
            Period::Afternoon => &mut self.afternoon,
            Period::Evening => &mut self.evening,
            Period::Night => &mut self.night,
        }
    }

    /// All four buckets in display order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Period, &[ScheduleEntry])> {
        Period::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Buckets that have at least one departure.
    pub fn non_empty(&self) -> impl Iterator<Item = (Period, &[ScheduleEntry])> {
        self.iter().filter(|(_, entries)| !entries.is_empty())
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, entries)| entries.len()).sum()
    }
}

/// Parse and group departure times.
///
/// # Errors
///
/// Fails with `ScheduleError::InvalidTime` on the first string that is not
/// a valid "H:MM" time.
pub fn bucketize<I, S>(times: I) -> ScheduleResult<ScheduleBuckets>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buckets = ScheduleBuckets::default();

    for raw in times {
        let entry = ScheduleEntry::parse(raw.as_ref())?;
        buckets.get_mut(entry.period()).push(entry);
    }

    for period in Period::ALL {
        buckets.get_mut(period).sort_by_key(ScheduleEntry::sort_key);
    }

    Ok(buckets)
}
