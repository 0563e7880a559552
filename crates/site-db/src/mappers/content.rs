//! Page content model -> entity mappers

use site_core::entities::{
    AboutUs, AdminUser, SiteSettings, Slide, Statistic, TelegramChat, Testimonial,
};

use crate::models::{
    AboutModel, AdminUserModel, SiteSettingsModel, SlideModel, StatisticModel, TelegramChatModel,
    TestimonialModel,
};

impl From<SiteSettingsModel> for SiteSettings {
    fn from(model: SiteSettingsModel) -> Self {
        SiteSettings {
            id: model.id,
            site_name: model.site_name,
            phone: model.phone,
            email: model.email,
            address: model.address,
            working_hours: model.working_hours,
            vk_link: model.vk_link,
            instagram_link: model.instagram_link,
            telegram_link: model.telegram_link,
            telegram_bot_token: model.telegram_bot_token,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<SlideModel> for Slide {
    fn from(model: SlideModel) -> Self {
        Slide {
            id: model.id,
            title: model.title,
            subtitle: model.subtitle,
            image: model.image,
            button_text: model.button_text,
            button_link: model.button_link,
            order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AboutModel> for AboutUs {
    fn from(model: AboutModel) -> Self {
        AboutUs {
            id: model.id,
            title: model.title,
            subtitle: model.subtitle,
            description: model.description,
            image: model.image,
            subtitle_margin_bottom: model.subtitle_margin_bottom,
            paragraph_margin_bottom: model.paragraph_margin_bottom,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<TestimonialModel> for Testimonial {
    fn from(model: TestimonialModel) -> Self {
        Testimonial {
            id: model.id,
            name: model.name,
            position: model.position,
            avatar: model.avatar,
            rating: model.rating,
            text: model.text,
            order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<StatisticModel> for Statistic {
    fn from(model: StatisticModel) -> Self {
        Statistic {
            id: model.id,
            icon_class: model.icon_class,
            number: model.number,
            suffix: model.suffix,
            label: model.label,
            order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<TelegramChatModel> for TelegramChat {
    fn from(model: TelegramChatModel) -> Self {
        TelegramChat {
            id: model.id,
            chat_id: model.chat_id,
            username: model.username,
            first_name: model.first_name,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// The password hash stays in the row; it never reaches the entity
impl From<AdminUserModel> for AdminUser {
    fn from(model: AdminUserModel) -> Self {
        AdminUser {
            id: model.id,
            username: model.username,
            is_active: model.is_active,
            last_login_at: model.last_login_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
