//! Contact form submission (lead)

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::{ContactStatus, Phone};

/// A lead left by a visitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub is_read: bool,
    pub admin_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactMessage {
    /// A fresh, unread submission
    pub fn new(name: String, phone: &Phone, email: Option<String>, message: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            phone: phone.as_str().to_string(),
            email,
            message,
            status: ContactStatus::New,
            is_read: false,
            admin_notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
        self.updated_at = Utc::now();
    }

    /// Moving a message forward also counts as reading it
    pub fn set_status(&mut self, status: ContactStatus) {
        self.status = status;
        if status != ContactStatus::New {
            self.is_read = true;
        }
        self.updated_at = Utc::now();
    }

    /// Summary passed to notifiers
    pub fn notice(&self, is_callback: bool) -> ContactNotice {
        ContactNotice {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            is_callback,
        }
    }
}

/// What the notification channel needs to announce a lead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNotice {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: String,
    /// Submitted through the "call me back" modal
    pub is_callback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContactMessage {
        let phone = Phone::parse("+7 (914) 123-45-67").unwrap();
        ContactMessage::new("Иван".to_string(), &phone, None, "Нужна вывеска".to_string())
    }

    #[test]
    fn test_new_message_is_unread() {
        let msg = sample();
        assert_eq!(msg.status, ContactStatus::New);
        assert!(!msg.is_read);
        assert!(msg.admin_notes.is_empty());
    }

    #[test]
    fn test_status_change_marks_read() {
        let mut msg = sample();
        msg.set_status(ContactStatus::InProgress);
        assert!(msg.is_read);
        assert_eq!(msg.status, ContactStatus::InProgress);
    }

    #[test]
    fn test_notice_copies_fields() {
        let notice = sample().notice(true);
        assert_eq!(notice.name, "Иван");
        assert_eq!(notice.phone, "+7 (914) 123-45-67");
        assert!(notice.is_callback);
    }
}
