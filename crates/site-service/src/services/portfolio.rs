//! Portfolio gallery with per-service albums

use site_core::{PortfolioQuery, Service};
use tracing::instrument;

use crate::dto::{
    page_number, PortfolioAlbum, PortfolioPage, PortfolioParams, ServiceResponse, PUBLIC_PAGE_SIZE,
};

use super::catalog::{offset, public_page_meta};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::pages::{section, PageService};

/// Works shown per album
pub const ALBUM_WORKS: i64 = 6;

fn album_description(service: &Service) -> String {
    let plain = service.description.trim();
    if plain.is_empty() {
        format!("Примеры наших работ в категории \"{}\"", service.name)
    } else {
        plain.to_string()
    }
}

pub struct PortfolioService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PortfolioService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn page(&self, params: PortfolioParams) -> ServiceResult<PortfolioPage> {
        let page = page_number(params.page.as_deref());
        let query = PortfolioQuery {
            service_slug: params.service.clone(),
            search: params.search.clone(),
            limit: i64::from(PUBLIC_PAGE_SIZE),
            offset: offset(page, PUBLIC_PAGE_SIZE),
        };
        let found = section("portfolio", self.ctx.portfolio_repo().search_active(&query).await);
        let pagination = public_page_meta(page, found.total)?;

        let services = section(
            "portfolio_services",
            self.ctx.service_repo().list_active_by_name().await,
        );

        let current_service = match params.service.as_deref() {
            Some(slug) => section(
                "current_service",
                self.ctx.service_repo().find_active_by_slug(slug).await,
            ),
            None => None,
        };

        let portfolio_albums = if current_service.is_none() {
            self.albums().await
        } else {
            Vec::new()
        };

        Ok(PortfolioPage {
            site: PageService::new(self.ctx).site_context().await,
            portfolio_items: found.items.into_iter().map(Into::into).collect(),
            services: services.into_iter().map(Into::into).collect(),
            search_query: params.search.unwrap_or_default(),
            current_service: current_service.map(ServiceResponse::from),
            portfolio_albums,
            pagination,
        })
    }

    /// One album per active service that has active works
    async fn albums(&self) -> Vec<PortfolioAlbum> {
        let services = section(
            "portfolio_albums",
            self.ctx.service_repo().list_with_active_works().await,
        );

        let mut albums = Vec::with_capacity(services.len());
        for service in services {
            let works = section(
                "album_works",
                self.ctx
                    .portfolio_repo()
                    .list_active_by_service(service.id, ALBUM_WORKS)
                    .await,
            );
            if works.is_empty() {
                continue;
            }
            let count = section(
                "album_count",
                self.ctx
                    .portfolio_repo()
                    .count_active_by_service(service.id)
                    .await,
            )
            .max(works.len() as i64);

            albums.push(PortfolioAlbum {
                title: service.name.clone(),
                slug: service.slug.clone(),
                description: album_description(&service),
                works: works.into_iter().map(Into::into).collect(),
                count,
                service: service.into(),
            });
        }
        albums
    }
}
