//! # site-telegram
//!
//! Notification channel over the Telegram Bot API.
//!
//! - [`BotClient`]: thin `sendMessage` / `getUpdates` wrapper
//! - [`TelegramNotifier`]: fans a new lead out to every active chat
//! - [`Listener`]: long-poll loop that turns `/start` into a subscription
//! - [`Supervisor`]: restarts the listener with bounded exponential backoff
//!
//! ## Example
//!
//! ```ignore
//! let client = BotClient::new(token, &config.telegram.api_base)?;
//! let notifier = TelegramNotifier::new(Some(client.clone()), chats.clone());
//!
//! let report = notifier.notify_contact(&message.notice(false)).await;
//! ```

pub mod client;
pub mod error;
pub mod format;
pub mod listener;
pub mod notifier;
pub mod supervisor;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::BotClient;
pub use error::{TelegramError, TelegramResult};
pub use format::{escape_html, format_contact_notice};
pub use listener::{Listener, ListenerTimings, HINT_TEXT, SUBSCRIBED_TEXT};
pub use notifier::TelegramNotifier;
pub use supervisor::{Backoff, ListenerGuard, Supervisor, LISTENER_RUNNING};
pub use types::{Chat, Message, Update};
