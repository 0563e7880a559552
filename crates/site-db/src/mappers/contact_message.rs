//! Contact message model -> entity mapper

use site_core::entities::ContactMessage;
use site_core::error::DomainError;

use crate::models::ContactMessageModel;

impl TryFrom<ContactMessageModel> for ContactMessage {
    type Error = DomainError;

    fn try_from(model: ContactMessageModel) -> Result<Self, Self::Error> {
        Ok(ContactMessage {
            id: model.id,
            name: model.name,
            phone: model.phone,
            email: model.email,
            message: model.message,
            status: model.status.parse()?,
            is_read: model.is_read,
            admin_notes: model.admin_notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use site_core::value_objects::ContactStatus;
    use uuid::Uuid;

    use super::*;

    fn row(status: &str) -> ContactMessageModel {
        ContactMessageModel {
            id: Uuid::new_v4(),
            name: "Анна".to_string(),
            phone: "+79141234567".to_string(),
            email: None,
            message: "Перезвоните".to_string(),
            status: status.to_string(),
            is_read: false,
            admin_notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_known_status() {
        let msg = ContactMessage::try_from(row("in_progress")).unwrap();
        assert_eq!(msg.status, ContactStatus::InProgress);
    }

    #[test]
    fn test_unknown_status_is_error() {
        let err = ContactMessage::try_from(row("archived")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatus(_)));
    }
}
