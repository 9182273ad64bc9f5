//! Domain value objects and types.
//!
//! This module contains the validated building blocks of a contact
//! submission: the normalized phone number used as the duplicate key and the
//! service categories with their sub-type rules.

pub mod category;
pub mod errors;
pub mod phone;

pub use category::{resolve_description, Category};
pub use errors::{PhoneError, UnknownCategory};
pub use phone::{NormalizedPhone, PhoneInput};
