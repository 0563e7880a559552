//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects.
//! Contact messages go through `TryFrom` because the stored status is text.

mod contact_message;
mod content;
mod service;
