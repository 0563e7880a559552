//! Data Transfer Objects
//!
//! Request types deserialize and validate input; response types are what
//! templates and the admin API serialize.

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
