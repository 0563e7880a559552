//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use site_core::{
    AboutUs, AdminUser, ContactMessage, PortfolioItem, Service, ServiceCategory, SiteSettings,
    Slide, Statistic, TelegramChat, Testimonial,
};

use super::responses::{
    AboutResponse, AdminUserResponse, CategoryResponse, ContactMessageResponse,
    PortfolioItemResponse, ServiceResponse, SiteSettingsResponse, SlideResponse,
    StatisticResponse, TelegramChatResponse, TestimonialResponse,
};
use crate::services::media::media_url;

fn optional_media(path: Option<&String>) -> Option<String> {
    path.filter(|p| !p.is_empty()).map(|p| media_url(p))
}

impl From<&SiteSettings> for SiteSettingsResponse {
    fn from(s: &SiteSettings) -> Self {
        Self {
            id: s.id.to_string(),
            site_name: s.site_name.clone(),
            phone: s.phone.clone(),
            phone_formatted: s.phone_formatted(),
            phone_href: s.phone_href(),
            email: s.email.clone(),
            address: s.address.clone(),
            working_hours: s.working_hours.clone(),
            vk_link: s.vk_link.clone(),
            instagram_link: s.instagram_link.clone(),
            telegram_link: s.telegram_link.clone(),
            telegram_bot_token_set: s
                .telegram_bot_token
                .as_deref()
                .is_some_and(|t| !t.is_empty()),
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<&Slide> for SlideResponse {
    fn from(s: &Slide) -> Self {
        Self {
            id: s.id.to_string(),
            title: s.title.clone(),
            subtitle: s.subtitle.clone(),
            image: s.image.clone(),
            image_url: media_url(&s.image),
            button_text: s.button_text.clone(),
            button_link: s.button_link.clone(),
            order: s.order,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<&AboutUs> for AboutResponse {
    fn from(a: &AboutUs) -> Self {
        Self {
            id: a.id.to_string(),
            title: a.title.clone(),
            subtitle: a.subtitle.clone(),
            description: a.description.clone(),
            image: a.image.clone(),
            image_url: optional_media(a.image.as_ref()),
            subtitle_margin_bottom: a.subtitle_margin_bottom,
            paragraph_margin_bottom: a.paragraph_margin_bottom,
            is_active: a.is_active,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<&ServiceCategory> for CategoryResponse {
    fn from(c: &ServiceCategory) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            slug: c.slug.clone(),
            order: c.order,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<&Service> for ServiceResponse {
    fn from(s: &Service) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            slug: s.slug.clone(),
            url: s.url(),
            category_id: s.category_id.map(|id| id.to_string()),
            icon: s.icon.clone(),
            icon_url: optional_media(s.icon.as_ref()),
            image: s.image.clone(),
            image_url: optional_media(s.image.as_ref()),
            description: s.description.clone(),
            price_from: s.price_text(),
            price_unit: s.price_unit.clone(),
            price_label: s.price_label(),
            order: s.order,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<&PortfolioItem> for PortfolioItemResponse {
    fn from(p: &PortfolioItem) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title.clone(),
            service_id: p.service_id.map(|id| id.to_string()),
            description: p.description.clone(),
            image: p.image.clone(),
            image_url: optional_media(p.image.as_ref()),
            client: p.client.clone(),
            date_completed: p.date_completed,
            is_featured: p.is_featured,
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<&Testimonial> for TestimonialResponse {
    fn from(t: &Testimonial) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name.clone(),
            position: t.position.clone(),
            avatar: t.avatar.clone(),
            avatar_url: optional_media(t.avatar.as_ref()),
            rating: t.rating,
            stars: vec![1; t.stars()],
            text: t.text.clone(),
            order: t.order,
            is_active: t.is_active,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

impl From<&Statistic> for StatisticResponse {
    fn from(s: &Statistic) -> Self {
        Self {
            id: s.id.to_string(),
            icon_class: s.icon_class.clone(),
            number: s.number,
            suffix: s.suffix.clone(),
            display: s.display(),
            label: s.label.clone(),
            order: s.order,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<&TelegramChat> for TelegramChatResponse {
    fn from(c: &TelegramChat) -> Self {
        Self {
            id: c.id.to_string(),
            chat_id: c.chat_id,
            username: c.username.clone(),
            first_name: c.first_name.clone(),
            display_name: c.display_name(),
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<&ContactMessage> for ContactMessageResponse {
    fn from(m: &ContactMessage) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name.clone(),
            phone: m.phone.clone(),
            email: m.email.clone(),
            message: m.message.clone(),
            status: m.status.as_str().to_string(),
            status_label: m.status.label().to_string(),
            is_read: m.is_read,
            admin_notes: m.admin_notes.clone(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<&AdminUser> for AdminUserResponse {
    fn from(u: &AdminUser) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            is_active: u.is_active,
            last_login_at: u.last_login_at,
            created_at: u.created_at,
        }
    }
}

/// Owned-entity conversions delegate to the borrowed ones
macro_rules! from_owned {
    ($($entity:ty => $response:ty),* $(,)?) => {
        $(
            impl From<$entity> for $response {
                fn from(value: $entity) -> Self {
                    Self::from(&value)
                }
            }
        )*
    };
}

from_owned! {
    SiteSettings => SiteSettingsResponse,
    Slide => SlideResponse,
    AboutUs => AboutResponse,
    ServiceCategory => CategoryResponse,
    Service => ServiceResponse,
    PortfolioItem => PortfolioItemResponse,
    Testimonial => TestimonialResponse,
    Statistic => StatisticResponse,
    TelegramChat => TelegramChatResponse,
    ContactMessage => ContactMessageResponse,
    AdminUser => AdminUserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use site_core::Phone;

    #[test]
    fn test_service_response_derived_fields() {
        let mut service = Service::new(
            "Объемные буквы".to_string(),
            "obemnye-bukvy".to_string(),
            String::new(),
        );
        service.price_from = Some(Decimal::new(1500, 0));
        service.image = Some("services/2024/05/a.jpg".to_string());

        let response = ServiceResponse::from(&service);
        assert_eq!(response.url, "/services/catalog/obemnye-bukvy/");
        assert_eq!(response.price_from.as_deref(), Some("1500.00"));
        assert_eq!(response.price_label.as_deref(), Some("от 1500.00 ₽"));
        assert_eq!(
            response.image_url.as_deref(),
            Some("/media/services/2024/05/a.jpg")
        );
        assert!(response.icon_url.is_none());
    }

    #[test]
    fn test_settings_response_hides_token() {
        let mut settings = SiteSettings::new(
            "+78142280903".to_string(),
            "info@example.com".to_string(),
            "Петрозаводск".to_string(),
        );
        settings.telegram_bot_token = Some("123:secret".to_string());

        let response = SiteSettingsResponse::from(&settings);
        assert!(response.telegram_bot_token_set);
        assert_eq!(response.phone_formatted, "+7 (8142) 28-09-03");
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_contact_status_label() {
        let phone = Phone::parse("+7 (914) 123-45-67").unwrap();
        let message = ContactMessage::new("Иван".to_string(), &phone, None, String::new());
        let response = ContactMessageResponse::from(message);
        assert_eq!(response.status, "new");
        assert_eq!(response.status_label, "Новое");
        assert!(!response.is_read);
    }

    #[test]
    fn test_testimonial_stars() {
        let mut testimonial = Testimonial::new("Анна".to_string(), "Отлично".to_string());
        testimonial.rating = 4;
        assert_eq!(TestimonialResponse::from(&testimonial).stars.len(), 4);
    }
}
