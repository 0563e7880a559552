//! Services catalog and service detail pages

use site_core::CatalogQuery;
use tracing::instrument;

use crate::dto::{
    page_number, CatalogPage, CatalogParams, PageMeta, ServiceDetailPage, PUBLIC_PAGE_SIZE,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::pages::{section, PageService};

pub const DETAIL_WORKS: i64 = 6;
pub const RELATED_SERVICES: i64 = 3;

/// Offset for a 1-based page number
pub(crate) fn offset(page: u32, per_page: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(per_page)
}

/// Pagination for a public listing; a page past the last one is a 404
pub(crate) fn public_page_meta(page: u32, total: i64) -> ServiceResult<PageMeta> {
    let meta = PageMeta::new(page, PUBLIC_PAGE_SIZE, total);
    if page > meta.total_pages {
        return Err(ServiceError::not_found("Page", page.to_string()));
    }
    Ok(meta)
}

pub struct CatalogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CatalogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, params: CatalogParams) -> ServiceResult<CatalogPage> {
        let page = page_number(params.page.as_deref());
        let query = CatalogQuery {
            search: params.search.clone(),
            limit: i64::from(PUBLIC_PAGE_SIZE),
            offset: offset(page, PUBLIC_PAGE_SIZE),
        };
        let found = section("catalog", self.ctx.service_repo().search_active(&query).await);
        let pagination = public_page_meta(page, found.total)?;

        Ok(CatalogPage {
            site: PageService::new(self.ctx).site_context().await,
            services: found.items.into_iter().map(Into::into).collect(),
            search_query: params.search.unwrap_or_default(),
            pagination,
        })
    }

    #[instrument(skip(self))]
    pub async fn detail(&self, slug: &str) -> ServiceResult<ServiceDetailPage> {
        let service = self
            .ctx
            .service_repo()
            .find_active_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::not_found("Service", slug))?;

        let works = section(
            "service_works",
            self.ctx
                .portfolio_repo()
                .list_active_by_service(service.id, DETAIL_WORKS)
                .await,
        );
        let related = section(
            "related_services",
            self.ctx
                .service_repo()
                .find_related(&service, RELATED_SERVICES)
                .await,
        );

        Ok(ServiceDetailPage {
            site: PageService::new(self.ctx).site_context().await,
            service: service.into(),
            portfolio_items: works.into_iter().map(Into::into).collect(),
            related_services: related.into_iter().map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use site_core::{NoopNotifier, PortfolioItem, Service};
    use uuid::Uuid;

    use super::*;
    use crate::testing::{memory_context, MemoryStores};

    fn add_service(stores: &MemoryStores, name: &str, slug: &str, category: Option<Uuid>) -> Service {
        let mut service = Service::new(name.to_string(), slug.to_string(), String::new());
        service.category_id = category;
        stores.catalog.services.lock().push(service.clone());
        service
    }

    #[tokio::test]
    async fn test_list_paginates_by_twelve() {
        let (ctx, stores) = memory_context(Arc::new(NoopNotifier));
        for i in 0..14 {
            add_service(&stores, &format!("Услуга {i:02}"), &format!("usluga-{i}"), None);
        }

        let service = CatalogService::new(&ctx);
        let first = service.list(CatalogParams::default()).await.unwrap();
        assert_eq!(first.services.len(), 12);
        assert_eq!(first.pagination.total_pages, 2);
        assert!(first.pagination.has_next);

        let second = service
            .list(CatalogParams {
                page: Some("2".to_string()),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(second.services.len(), 2);
    }

    #[tokio::test]
    async fn test_list_past_last_page_is_not_found() {
        let (ctx, stores) = memory_context(Arc::new(NoopNotifier));
        add_service(&stores, "Полиграфия", "poligrafiia", None);

        let err = CatalogService::new(&ctx)
            .list(CatalogParams {
                page: Some("5".to_string()),
                search: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_empty_catalog_renders_first_page() {
        let (ctx, _) = memory_context(Arc::new(NoopNotifier));
        let page = CatalogService::new(&ctx)
            .list(CatalogParams::default())
            .await
            .unwrap();
        assert!(page.services.is_empty());
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_search_matches_name() {
        let (ctx, stores) = memory_context(Arc::new(NoopNotifier));
        add_service(&stores, "Объемные буквы", "obemnye-bukvy", None);
        add_service(&stores, "Полиграфия", "poligrafiia", None);

        let page = CatalogService::new(&ctx)
            .list(CatalogParams {
                page: None,
                search: Some("буквы".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(page.services.len(), 1);
        assert_eq!(page.search_query, "буквы");
    }

    #[tokio::test]
    async fn test_detail_unknown_slug() {
        let (ctx, _) = memory_context(Arc::new(NoopNotifier));
        let err = CatalogService::new(&ctx).detail("net-takoi").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_detail_hides_inactive_service() {
        let (ctx, stores) = memory_context(Arc::new(NoopNotifier));
        add_service(&stores, "Наклейки", "nakleiki", None);
        stores.catalog.services.lock()[0].is_active = false;

        assert!(CatalogService::new(&ctx).detail("nakleiki").await.is_err());
    }

    #[tokio::test]
    async fn test_detail_related_prefers_same_category() {
        let (ctx, stores) = memory_context(Arc::new(NoopNotifier));
        let signage = Uuid::new_v4();
        let target = add_service(&stores, "Объемные буквы", "obemnye-bukvy", Some(signage));
        add_service(&stores, "Аа другое", "drugoe", None);
        add_service(&stores, "Короба", "koroba", Some(signage));
        add_service(&stores, "Бб еще", "eshche", None);
        add_service(&stores, "Вв третье", "trete", None);

        let mut work = PortfolioItem::new("Вывеска".to_string(), String::new());
        work.service_id = Some(target.id);
        stores.catalog.portfolio.lock().push(work);

        let page = CatalogService::new(&ctx).detail("obemnye-bukvy").await.unwrap();
        assert_eq!(page.related_services.len(), 3);
        assert_eq!(page.related_services[0].slug, "koroba");
        assert!(page.related_services.iter().all(|s| s.slug != "obemnye-bukvy"));
        assert_eq!(page.portfolio_items.len(), 1);
    }
}
