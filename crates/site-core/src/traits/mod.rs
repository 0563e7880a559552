//! Ports implemented by the infrastructure crates

mod notifier;
mod repositories;

pub use notifier::{DeliveryReport, NoopNotifier, Notifier};
pub use repositories::*;
