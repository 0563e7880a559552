//! Demo content for a fresh installation
//!
//! Seeding is idempotent: rows are matched by their natural key (title,
//! name, label) and left alone when present. Statistics are the exception
//! and are replaced wholesale.

use site_core::{
    AboutUs, ListQuery, PortfolioItem, SiteSettings, Slide, Statistic, Testimonial,
};
use tracing::{info, instrument};

use crate::dto::ServiceInput;

use super::admin::AdminService;
use super::context::ServiceContext;
use super::error::ServiceResult;

const ABOUT_HTML: &str = "<p>Привет! Мы — Максим и Анастасия Булмырины, создатели \"Яркого города\".</p>\n\
<p>С 2015 года мы делаем Петрозаводск чуточку ярче, помогая малому бизнесу зазвать к себе.</p>\n\
<p>Мы — небольшое агентство полного цикла, и это наш осознанный выбор. Мы ценим душевный подход и внимание к деталям.</p>\n\
<p>Каждый проект для нас — личная история, и мы всегда радуемся, когда ваш бизнес расцветает.</p>";

/// (title, subtitle, button text, button link)
const SLIDES: &[(&str, &str, &str, &str)] = &[
    (
        "Реклама, которая выделяется!",
        "Изготовление и монтаж наружной рекламы в Петрозаводске",
        "Наши услуги",
        "#services",
    ),
    (
        "Световые вывески",
        "Яркие и запоминающиеся решения для вашего бизнеса",
        "Смотреть работы",
        "#portfolio",
    ),
    (
        "Брендирование автомобилей",
        "Превратите ваш транспорт в движущуюся рекламу",
        "Узнать больше",
        "#contacts",
    ),
];

const SERVICES: &[&str] = &[
    "Объемные буквы",
    "Короба консоли",
    "Брендирование авто",
    "Полиграфия",
    "Наклейки, этикетки",
    "Широкоформатная печать",
    "Стенды, таблички",
    "Нанесение на одежду",
];

/// (title, description, client, service name)
const WORKS: &[(&str, &str, Option<&str>, &str)] = &[
    (
        "Световая вывеска для пиццерии",
        "<p>Яркая неоновая вывеска с пиццей</p>",
        None,
        "Объемные буквы",
    ),
    (
        "Брендирование автомобиля",
        "<p>Полное брендирование служебного автомобиля</p>",
        Some("ООО \"Визовый центр\""),
        "Брендирование авто",
    ),
    (
        "Короб для магазина",
        "<p>Световой короб с объемными буквами</p>",
        None,
        "Короба консоли",
    ),
];

/// (name, position, rating, text)
const TESTIMONIALS: &[(&str, &str, i16, &str)] = &[
    (
        "Дарья Петрова",
        "директор кафе \"Оберіг\"",
        5,
        "Неоднократно обращалась в \"Яркий город\" для вывесок и оформления кафе. Всегда довольна качеством, сроками и результатом!",
    ),
    (
        "Сергей Волков",
        "менеджер сети казино",
        5,
        "Великолепное агентство! Брендировали наши фуры и делали наклейки для маршруток. Всё чётко, оперативно, на высоком уровне.",
    ),
    (
        "Анна Смирнова",
        "владелец магазина одежды",
        5,
        "Заказывала вывеску и наклейки на витрины. Работой очень довольна! Профессиональный подход, красивый дизайн.",
    ),
    (
        "Михаил Иванов",
        "директор автосервиса",
        4,
        "Сделали брендирование служебных автомобилей. Качество отличное, цены адекватные. Рекомендую!",
    ),
];

/// (icon, number, suffix, label)
const STATISTICS: &[(&str, i32, &str, &str)] = &[
    ("bi-check-circle-fill", 1500, "+", "Проектов реализовано"),
    ("bi-people-fill", 800, "+", "Довольных клиентов"),
    ("bi-award-fill", 10, "+", "Лет на рынке"),
    ("bi-lightning-charge-fill", 99, "%", "В срок"),
];

/// Rows created per entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub settings: usize,
    pub slides: usize,
    pub about: usize,
    pub services: usize,
    pub portfolio: usize,
    pub testimonials: usize,
    pub statistics: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.settings
            + self.slides
            + self.about
            + self.services
            + self.portfolio
            + self.testimonials
            + self.statistics
    }
}

fn exact_search(text: &str) -> ListQuery {
    ListQuery {
        search: Some(text.to_string()),
        is_active: None,
        limit: 100,
        offset: 0,
    }
}

pub struct SeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SeedService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Settings, slides, about block, services, portfolio and testimonials
    #[instrument(skip(self))]
    pub async fn seed_demo(&self) -> ServiceResult<SeedReport> {
        let mut report = SeedReport::default();

        if self.ctx.settings_repo().find_active().await?.is_none() {
            let mut settings = SiteSettings::new(
                "+78142280903".to_string(),
                "yarko_ptz@mail.ru".to_string(),
                "г. Петрозаводск, Муезерская улица, 15Ак8".to_string(),
            );
            settings.telegram_link = Some("https://t.me/yarkogorod".to_string());
            settings.instagram_link = Some("https://instagram.com/yarkogorod".to_string());
            self.ctx.settings_repo().create(&settings).await?;
            report.settings += 1;
        }

        for (i, (title, subtitle, button_text, button_link)) in SLIDES.iter().enumerate() {
            let existing = self.ctx.slide_repo().list(&exact_search(title)).await?;
            if existing.items.iter().any(|s| s.title == *title) {
                continue;
            }
            let order = i as i32 + 1;
            let mut slide = Slide::new((*title).to_string(), format!("/static/images/slide-{order}.jpg"));
            slide.subtitle = Some((*subtitle).to_string());
            slide.button_text = (*button_text).to_string();
            slide.button_link = (*button_link).to_string();
            slide.order = order;
            self.ctx.slide_repo().create(&slide).await?;
            report.slides += 1;
        }

        let about_exists = self
            .ctx
            .about_repo()
            .list()
            .await?
            .iter()
            .any(|a| a.title == site_core::entities::about::DEFAULT_TITLE);
        if !about_exists {
            self.ctx
                .about_repo()
                .create(&AboutUs::new(ABOUT_HTML.to_string()))
                .await?;
            report.about += 1;
        }

        let admin = AdminService::new(self.ctx);
        for (i, name) in SERVICES.iter().enumerate() {
            if self.ctx.service_repo().find_by_name(name).await?.is_some() {
                continue;
            }
            admin
                .create_service(ServiceInput {
                    name: (*name).to_string(),
                    slug: None,
                    category_id: None,
                    icon: None,
                    image: None,
                    description: format!("<p>Качественное изготовление услуги \"{name}\"</p>"),
                    price_from: None,
                    price_unit: None,
                    order: i as i32 + 1,
                    is_active: true,
                })
                .await?;
            report.services += 1;
        }

        for (title, description, client, service_name) in WORKS {
            if self.ctx.portfolio_repo().find_by_title(title).await?.is_some() {
                continue;
            }
            let service = self.ctx.service_repo().find_by_name(service_name).await?;
            let mut item = PortfolioItem::new((*title).to_string(), (*description).to_string());
            item.client = client.map(str::to_string);
            item.service_id = service.map(|s| s.id);
            item.is_featured = true;
            self.ctx.portfolio_repo().create(&item).await?;
            report.portfolio += 1;
        }

        for (i, (name, position, rating, text)) in TESTIMONIALS.iter().enumerate() {
            let existing = self.ctx.testimonial_repo().list(&exact_search(name)).await?;
            if existing.items.iter().any(|t| t.name == *name) {
                continue;
            }
            let mut testimonial = Testimonial::new((*name).to_string(), (*text).to_string());
            testimonial.position = Some((*position).to_string());
            testimonial.rating = *rating;
            testimonial.order = i as i32 + 1;
            self.ctx.testimonial_repo().create(&testimonial).await?;
            report.testimonials += 1;
        }

        info!(created = report.total(), "Demo content seeded");
        Ok(report)
    }

    /// Replace all statistics with the default four
    #[instrument(skip(self))]
    pub async fn seed_statistics(&self) -> ServiceResult<SeedReport> {
        for existing in self.ctx.statistic_repo().list().await? {
            self.ctx.statistic_repo().delete(existing.id).await?;
        }

        let mut report = SeedReport::default();
        for (i, (icon, number, suffix, label)) in STATISTICS.iter().enumerate() {
            let mut statistic = Statistic::new(*number, (*suffix).to_string(), (*label).to_string());
            statistic.icon_class = (*icon).to_string();
            statistic.order = i as i32 + 1;
            self.ctx.statistic_repo().create(&statistic).await?;
            report.statistics += 1;
        }

        info!(created = report.statistics, "Default statistics created");
        Ok(report)
    }
}
