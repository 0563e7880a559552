//! Catalog model -> entity mappers

use site_core::entities::{PortfolioItem, Service, ServiceCategory};

use crate::models::{CategoryModel, PortfolioItemModel, ServiceModel};

impl From<CategoryModel> for ServiceCategory {
    fn from(model: CategoryModel) -> Self {
        ServiceCategory {
            id: model.id,
            name: model.name,
            slug: model.slug,
            order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ServiceModel> for Service {
    fn from(model: ServiceModel) -> Self {
        Service {
            id: model.id,
            name: model.name,
            slug: model.slug,
            category_id: model.category_id,
            icon: model.icon,
            image: model.image,
            description: model.description,
            price_from: model.price_from,
            price_unit: model.price_unit,
            order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<PortfolioItemModel> for PortfolioItem {
    fn from(model: PortfolioItemModel) -> Self {
        PortfolioItem {
            id: model.id,
            title: model.title,
            service_id: model.service_id,
            description: model.description,
            image: model.image,
            client: model.client,
            date_completed: model.date_completed,
            is_featured: model.is_featured,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
