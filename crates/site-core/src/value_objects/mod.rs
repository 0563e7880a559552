//! Value objects - immutable types that represent domain concepts

mod contact_status;
pub mod phone;
mod slug;

pub use contact_status::{ContactStatus, ContactStatusParseError};
pub use phone::{format_phone, format_phone_or_raw, phone_digits, Phone, PhoneError};
pub use slug::{slugify, with_suffix};
