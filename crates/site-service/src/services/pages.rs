//! Home, about and privacy pages
//!
//! Page assembly never fails: a section whose query errors is logged and
//! rendered as absent.

use site_core::entities::site_settings::DEFAULT_SITE_NAME;
use site_core::RepoResult;
use tracing::{error, instrument};

use crate::dto::{AboutPage, HomePage, PrivacyPage, SiteContext};

use super::context::ServiceContext;

pub const HOME_SLIDES: i64 = 5;
pub const HOME_SERVICES: i64 = 8;
pub const HOME_FEATURED_WORKS: i64 = 6;
pub const ABOUT_TESTIMONIALS: i64 = 6;

/// Value of a page section, or its empty form when the query failed
pub(crate) fn section<T: Default>(name: &'static str, result: RepoResult<T>) -> T {
    result.unwrap_or_else(|e| {
        error!(section = name, error = %e, "Failed to load page section");
        T::default()
    })
}

pub struct PageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Settings shared by every public page
    #[instrument(skip(self))]
    pub async fn site_context(&self) -> SiteContext {
        let settings = section("settings", self.ctx.settings_repo().find_active().await);
        match settings {
            Some(settings) => SiteContext {
                site_name: settings.site_name.clone(),
                phone_formatted: settings.phone_formatted(),
                settings: Some((&settings).into()),
            },
            None => SiteContext {
                site_name: DEFAULT_SITE_NAME.to_string(),
                settings: None,
                phone_formatted: String::new(),
            },
        }
    }

    #[instrument(skip(self))]
    pub async fn home(&self) -> HomePage {
        let slides = section("slides", self.ctx.slide_repo().list_active(HOME_SLIDES).await);
        let services = section(
            "services",
            self.ctx.service_repo().list_active(Some(HOME_SERVICES)).await,
        );
        let about = section("about", self.ctx.about_repo().find_active().await);
        let featured = section(
            "featured_works",
            self.ctx
                .portfolio_repo()
                .list_featured(HOME_FEATURED_WORKS)
                .await,
        );
        let statistics = section("statistics", self.ctx.statistic_repo().list_active().await);

        HomePage {
            site: self.site_context().await,
            slides: slides.into_iter().map(Into::into).collect(),
            services: services.into_iter().map(Into::into).collect(),
            about: about.map(Into::into),
            featured_works: featured.into_iter().map(Into::into).collect(),
            statistics: statistics.into_iter().map(Into::into).collect(),
        }
    }

    #[instrument(skip(self))]
    pub async fn about(&self) -> AboutPage {
        let about = section("about", self.ctx.about_repo().find_active().await);
        let testimonials = section(
            "testimonials",
            self.ctx
                .testimonial_repo()
                .list_active(ABOUT_TESTIMONIALS)
                .await,
        );

        AboutPage {
            site: self.site_context().await,
            about: about.map(Into::into),
            testimonials: testimonials.into_iter().map(Into::into).collect(),
        }
    }

    pub async fn privacy(&self) -> PrivacyPage {
        PrivacyPage {
            site: self.site_context().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use site_core::{AboutUs, NoopNotifier, SiteSettings, Slide, Statistic, Testimonial};

    use super::*;
    use crate::testing::memory_context;

    #[tokio::test]
    async fn test_site_context_without_settings() {
        let (ctx, _) = memory_context(Arc::new(NoopNotifier));
        let site = PageService::new(&ctx).site_context().await;
        assert_eq!(site.site_name, "Яркий Город");
        assert!(site.settings.is_none());
        assert!(site.phone_formatted.is_empty());
    }

    #[tokio::test]
    async fn test_site_context_formats_phone() {
        let (ctx, stores) = memory_context(Arc::new(NoopNotifier));
        stores.settings.0.lock().push(SiteSettings::new(
            "+78142280903".to_string(),
            "yarko_ptz@mail.ru".to_string(),
            "Петрозаводск".to_string(),
        ));

        let site = PageService::new(&ctx).site_context().await;
        assert!(site.settings.is_some());
        assert_eq!(site.phone_formatted, "+7 (8142) 28-09-03");
    }

    #[tokio::test]
    async fn test_home_shows_only_active_rows() {
        let (ctx, stores) = memory_context(Arc::new(NoopNotifier));
        {
            let mut slides = stores.slides.0.lock();
            for i in 0..7 {
                let mut slide = Slide::new(format!("Слайд {i}"), format!("slides/{i}.jpg"));
                slide.order = i;
                slide.is_active = i != 0;
                slides.push(slide);
            }
        }
        let mut hidden = Statistic::new(1, String::new(), "Скрыто".to_string());
        hidden.is_active = false;
        stores.statistics.0.lock().push(hidden);
        stores
            .statistics
            .0
            .lock()
            .push(Statistic::new(1500, "+".to_string(), "Проектов".to_string()));

        let home = PageService::new(&ctx).home().await;
        assert_eq!(home.slides.len(), 5);
        assert_eq!(home.slides[0].title, "Слайд 1");
        assert_eq!(home.statistics.len(), 1);
        assert_eq!(home.statistics[0].display, "1500+");
        assert!(home.about.is_none());
    }

    #[tokio::test]
    async fn test_about_caps_testimonials() {
        let (ctx, stores) = memory_context(Arc::new(NoopNotifier));
        stores
            .about
            .0
            .lock()
            .push(AboutUs::new("<p>Мы делаем рекламу</p>".to_string()));
        for i in 0..8 {
            stores
                .testimonials
                .0
                .lock()
                .push(Testimonial::new(format!("Клиент {i}"), "Спасибо".to_string()));
        }

        let page = PageService::new(&ctx).about().await;
        assert_eq!(page.testimonials.len(), 6);
        assert_eq!(page.about.map(|a| a.title), Some("О нас".to_string()));
    }
}
