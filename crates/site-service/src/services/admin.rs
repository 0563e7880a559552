//! Admin use cases: content CRUD, the contact inbox, subscribers and uploads
//!
//! Inputs are validated here; repositories only see well-formed entities.

use rust_decimal::Decimal;
use site_core::entities::{about, slide, statistic, testimonial};
use site_core::{
    slugify, with_suffix, AboutUs, ContactQuery, ContactStatus, DomainError, ListQuery, Page,
    PortfolioItem, Service, ServiceCategory, SiteSettings, Slide, Statistic, Testimonial,
};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{
    AboutInput, AboutResponse, BulkAction, BulkResult, CategoryInput, CategoryResponse,
    ContactBulkRequest, ContactListParams, ContactMessageResponse, ContactUpdateInput, ListParams,
    PageMeta, PaginatedResponse, Paging, PortfolioItemInput, PortfolioItemResponse,
    ServiceInput, ServiceResponse, SiteSettingsInput, SiteSettingsResponse, SlideInput,
    SlideResponse, StatisticInput, StatisticResponse, TelegramChatResponse, TelegramChatUpdate,
    TestimonialInput, TestimonialResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::media::StoredFile;

/// Upper bound on `-N` suffixes tried for a derived slug
const MAX_SLUG_ATTEMPTS: u32 = 1000;

#[derive(Debug, Clone, Copy)]
enum SlugOwner {
    Category,
    Service,
}

impl SlugOwner {
    /// Used when a name has nothing transliterable
    fn fallback(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Service => "service",
        }
    }
}

fn list_query(params: &ListParams) -> (ListQuery, u32, u32) {
    let (page, per_page) = params.paging();
    let query = ListQuery {
        search: params.search.clone(),
        is_active: params.is_active,
        limit: i64::from(per_page),
        offset: i64::from(page - 1) * i64::from(per_page),
    };
    (query, page, per_page)
}

fn paginated<T, R>(page: Page<T>, number: u32, per_page: u32) -> PaginatedResponse<R>
where
    R: From<T>,
{
    let meta = PageMeta::new(number, per_page, page.total);
    PaginatedResponse::new(page.items.into_iter().map(R::from).collect(), meta)
}

/// `price_from` must fit `NUMERIC(10, 2)`: non-negative, at most two decimals
fn parse_price(raw: Option<&str>) -> ServiceResult<Option<Decimal>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let invalid = |msg: &str| ServiceError::field("price_from", msg);
    let price: Decimal = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| invalid("Введите число, например 1500 или 1500.50"))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(invalid("Цена не может быть отрицательной"));
    }
    if price.normalize().scale() > 2 {
        return Err(invalid("Не более двух знаков после запятой"));
    }
    if price >= Decimal::new(100_000_000, 0) {
        return Err(invalid("Слишком большая цена"));
    }
    Ok(Some(price))
}

fn apply_settings(settings: &mut SiteSettings, input: SiteSettingsInput) {
    if let Some(site_name) = input.site_name {
        settings.site_name = site_name;
    }
    settings.phone = input.phone;
    settings.email = input.email;
    settings.address = input.address;
    if let Some(hours) = input.working_hours {
        settings.working_hours = hours;
    }
    settings.vk_link = input.vk_link;
    settings.instagram_link = input.instagram_link;
    settings.telegram_link = input.telegram_link;
    match input.telegram_bot_token.map(|t| t.trim().to_string()) {
        Some(token) if token.is_empty() => settings.telegram_bot_token = None,
        Some(token) => settings.telegram_bot_token = Some(token),
        None => {}
    }
    settings.is_active = input.is_active;
}

fn apply_slide(target: &mut Slide, input: SlideInput) {
    target.title = input.title;
    target.subtitle = input.subtitle;
    target.image = input.image;
    target.button_text = input
        .button_text
        .unwrap_or_else(|| slide::DEFAULT_BUTTON_TEXT.to_string());
    target.button_link = input
        .button_link
        .unwrap_or_else(|| slide::DEFAULT_BUTTON_LINK.to_string());
    target.order = input.order;
    target.is_active = input.is_active;
}

fn apply_about(target: &mut AboutUs, input: AboutInput) {
    target.title = input
        .title
        .unwrap_or_else(|| about::DEFAULT_TITLE.to_string());
    target.subtitle = input.subtitle;
    target.description = input.description;
    target.image = input.image;
    target.subtitle_margin_bottom = input
        .subtitle_margin_bottom
        .unwrap_or(about::DEFAULT_SUBTITLE_MARGIN);
    target.paragraph_margin_bottom = input
        .paragraph_margin_bottom
        .unwrap_or(about::DEFAULT_PARAGRAPH_MARGIN);
    target.is_active = input.is_active;
}

fn apply_portfolio(item: &mut PortfolioItem, input: PortfolioItemInput) {
    item.title = input.title;
    item.service_id = input.service_id;
    item.description = input.description;
    item.image = input.image;
    item.client = input.client;
    item.date_completed = input.date_completed;
    item.is_featured = input.is_featured;
    item.is_active = input.is_active;
}

fn apply_testimonial(t: &mut Testimonial, input: TestimonialInput) {
    t.name = input.name;
    t.position = input.position;
    t.avatar = input.avatar;
    t.rating = input.rating.unwrap_or(testimonial::MAX_RATING);
    t.text = input.text;
    t.order = input.order;
    t.is_active = input.is_active;
}

fn apply_statistic(s: &mut Statistic, input: StatisticInput) {
    s.icon_class = input
        .icon_class
        .unwrap_or_else(|| statistic::DEFAULT_ICON_CLASS.to_string());
    s.number = input.number;
    s.suffix = input.suffix;
    s.label = input.label;
    s.order = input.order;
    s.is_active = input.is_active;
}

pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn slug_taken(&self, owner: SlugOwner, slug: &str, exclude: Option<Uuid>) -> ServiceResult<bool> {
        let taken = match owner {
            SlugOwner::Category => self.ctx.category_repo().slug_exists(slug, exclude).await?,
            SlugOwner::Service => self.ctx.service_repo().slug_exists(slug, exclude).await?,
        };
        Ok(taken)
    }

    /// An explicit slug must be free; a derived one gets `-2`, `-3`, ... until it is
    async fn assign_slug(
        &self,
        owner: SlugOwner,
        explicit: Option<&str>,
        name: &str,
        exclude: Option<Uuid>,
    ) -> ServiceResult<String> {
        if let Some(raw) = explicit {
            let slug = slugify(raw);
            if slug.is_empty() {
                return Err(ServiceError::field("slug", "Недопустимый адрес"));
            }
            if self.slug_taken(owner, &slug, exclude).await? {
                return Err(DomainError::SlugTaken(slug).into());
            }
            return Ok(slug);
        }

        let mut base = slugify(name);
        if base.is_empty() {
            base = owner.fallback().to_string();
        }
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let candidate = with_suffix(&base, attempt);
            if !self.slug_taken(owner, &candidate, exclude).await? {
                return Ok(candidate);
            }
        }
        Err(DomainError::SlugTaken(base).into())
    }

    async fn ensure_category(&self, id: Option<Uuid>) -> ServiceResult<()> {
        if let Some(id) = id {
            if self.ctx.category_repo().find_by_id(id).await?.is_none() {
                return Err(ServiceError::field("category_id", "Категория не найдена"));
            }
        }
        Ok(())
    }

    async fn ensure_service(&self, id: Option<Uuid>) -> ServiceResult<()> {
        if let Some(id) = id {
            if self.ctx.service_repo().find_by_id(id).await?.is_none() {
                return Err(ServiceError::field("service_id", "Услуга не найдена"));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Site settings
    // ========================================================================

    pub async fn list_settings(&self) -> ServiceResult<Vec<SiteSettingsResponse>> {
        let rows = self.ctx.settings_repo().list().await?;
        Ok(rows.iter().map(Into::into).collect())
    }

    pub async fn get_settings(&self, id: Uuid) -> ServiceResult<SiteSettingsResponse> {
        let settings = self
            .ctx
            .settings_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("SiteSettings", id.to_string()))?;
        Ok(settings.into())
    }

    #[instrument(skip(self, input))]
    pub async fn create_settings(&self, input: SiteSettingsInput) -> ServiceResult<SiteSettingsResponse> {
        input.validate()?;
        let mut settings = SiteSettings::new(String::new(), String::new(), String::new());
        apply_settings(&mut settings, input);
        self.ctx.settings_repo().create(&settings).await?;
        info!(settings_id = %settings.id, active = settings.is_active, "Site settings created");
        Ok(settings.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_settings(
        &self,
        id: Uuid,
        input: SiteSettingsInput,
    ) -> ServiceResult<SiteSettingsResponse> {
        input.validate()?;
        let mut settings = self
            .ctx
            .settings_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("SiteSettings", id.to_string()))?;
        apply_settings(&mut settings, input);
        settings.touch();
        self.ctx.settings_repo().update(&settings).await?;
        Ok(settings.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_settings(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.settings_repo().delete(id).await? {
            return Err(ServiceError::not_found("SiteSettings", id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Slides
    // ========================================================================

    pub async fn list_slides(&self, params: &ListParams) -> ServiceResult<PaginatedResponse<SlideResponse>> {
        let (query, page, per_page) = list_query(params);
        let rows = self.ctx.slide_repo().list(&query).await?;
        Ok(paginated(rows, page, per_page))
    }

    pub async fn get_slide(&self, id: Uuid) -> ServiceResult<SlideResponse> {
        let slide = self
            .ctx
            .slide_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Slide", id.to_string()))?;
        Ok(slide.into())
    }

    #[instrument(skip(self, input))]
    pub async fn create_slide(&self, input: SlideInput) -> ServiceResult<SlideResponse> {
        input.validate()?;
        let mut slide = Slide::new(String::new(), String::new());
        apply_slide(&mut slide, input);
        self.ctx.slide_repo().create(&slide).await?;
        info!(slide_id = %slide.id, "Slide created");
        Ok(slide.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_slide(&self, id: Uuid, input: SlideInput) -> ServiceResult<SlideResponse> {
        input.validate()?;
        let mut slide = self
            .ctx
            .slide_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Slide", id.to_string()))?;
        apply_slide(&mut slide, input);
        slide.touch();
        self.ctx.slide_repo().update(&slide).await?;
        Ok(slide.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_slide(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.slide_repo().delete(id).await? {
            return Err(ServiceError::not_found("Slide", id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // About us
    // ========================================================================

    pub async fn list_about(&self) -> ServiceResult<Vec<AboutResponse>> {
        let rows = self.ctx.about_repo().list().await?;
        Ok(rows.iter().map(Into::into).collect())
    }

    pub async fn get_about(&self, id: Uuid) -> ServiceResult<AboutResponse> {
        let about = self
            .ctx
            .about_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("AboutUs", id.to_string()))?;
        Ok(about.into())
    }

    #[instrument(skip(self, input))]
    pub async fn create_about(&self, input: AboutInput) -> ServiceResult<AboutResponse> {
        input.validate()?;
        let mut about = AboutUs::new(String::new());
        apply_about(&mut about, input);
        self.ctx.about_repo().create(&about).await?;
        info!(about_id = %about.id, active = about.is_active, "About block created");
        Ok(about.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_about(&self, id: Uuid, input: AboutInput) -> ServiceResult<AboutResponse> {
        input.validate()?;
        let mut about = self
            .ctx
            .about_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("AboutUs", id.to_string()))?;
        apply_about(&mut about, input);
        about.touch();
        self.ctx.about_repo().update(&about).await?;
        Ok(about.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_about(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.about_repo().delete(id).await? {
            return Err(ServiceError::not_found("AboutUs", id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Service categories
    // ========================================================================

    pub async fn list_categories(
        &self,
        params: &ListParams,
    ) -> ServiceResult<PaginatedResponse<CategoryResponse>> {
        let (query, page, per_page) = list_query(params);
        let rows = self.ctx.category_repo().list(&query).await?;
        Ok(paginated(rows, page, per_page))
    }

    pub async fn get_category(&self, id: Uuid) -> ServiceResult<CategoryResponse> {
        let category = self
            .ctx
            .category_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("ServiceCategory", id.to_string()))?;
        Ok(category.into())
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: CategoryInput) -> ServiceResult<CategoryResponse> {
        input.validate()?;
        let slug = self
            .assign_slug(SlugOwner::Category, input.slug.as_deref(), &input.name, None)
            .await?;
        let mut category = ServiceCategory::new(input.name, slug);
        category.order = input.order;
        category.is_active = input.is_active;
        self.ctx.category_repo().create(&category).await?;
        info!(category_id = %category.id, slug = %category.slug, "Category created");
        Ok(category.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: Uuid,
        input: CategoryInput,
    ) -> ServiceResult<CategoryResponse> {
        input.validate()?;
        let mut category = self
            .ctx
            .category_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("ServiceCategory", id.to_string()))?;
        if let Some(slug) = input.slug.as_deref() {
            category.slug = self
                .assign_slug(SlugOwner::Category, Some(slug), &input.name, Some(id))
                .await?;
        }
        category.name = input.name;
        category.order = input.order;
        category.is_active = input.is_active;
        category.touch();
        self.ctx.category_repo().update(&category).await?;
        Ok(category.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.category_repo().delete(id).await? {
            return Err(ServiceError::not_found("ServiceCategory", id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Services
    // ========================================================================

    pub async fn list_services(
        &self,
        params: &ListParams,
    ) -> ServiceResult<PaginatedResponse<ServiceResponse>> {
        let (query, page, per_page) = list_query(params);
        let rows = self.ctx.service_repo().list(&query).await?;
        Ok(paginated(rows, page, per_page))
    }

    pub async fn get_service(&self, id: Uuid) -> ServiceResult<ServiceResponse> {
        let service = self
            .ctx
            .service_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Service", id.to_string()))?;
        Ok(service.into())
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_service(&self, input: ServiceInput) -> ServiceResult<ServiceResponse> {
        input.validate()?;
        let price_from = parse_price(input.price_from.as_deref())?;
        self.ensure_category(input.category_id).await?;
        let slug = self
            .assign_slug(SlugOwner::Service, input.slug.as_deref(), &input.name, None)
            .await?;

        let mut service = Service::new(input.name, slug, input.description);
        service.category_id = input.category_id;
        service.icon = input.icon;
        service.image = input.image;
        service.price_from = price_from;
        if let Some(unit) = input.price_unit {
            service.price_unit = unit;
        }
        service.order = input.order;
        service.is_active = input.is_active;

        self.ctx.service_repo().create(&service).await?;
        info!(service_id = %service.id, slug = %service.slug, "Service created");
        Ok(service.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_service(&self, id: Uuid, input: ServiceInput) -> ServiceResult<ServiceResponse> {
        input.validate()?;
        let price_from = parse_price(input.price_from.as_deref())?;
        self.ensure_category(input.category_id).await?;
        let mut service = self
            .ctx
            .service_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Service", id.to_string()))?;
        if let Some(slug) = input.slug.as_deref() {
            service.slug = self
                .assign_slug(SlugOwner::Service, Some(slug), &input.name, Some(id))
                .await?;
        }

        service.name = input.name;
        service.category_id = input.category_id;
        service.icon = input.icon;
        service.image = input.image;
        service.description = input.description;
        service.price_from = price_from;
        if let Some(unit) = input.price_unit {
            service.price_unit = unit;
        }
        service.order = input.order;
        service.is_active = input.is_active;
        service.touch();

        self.ctx.service_repo().update(&service).await?;
        Ok(service.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_service(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.service_repo().delete(id).await? {
            return Err(ServiceError::not_found("Service", id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Portfolio
    // ========================================================================

    pub async fn list_portfolio(
        &self,
        params: &ListParams,
    ) -> ServiceResult<PaginatedResponse<PortfolioItemResponse>> {
        let (query, page, per_page) = list_query(params);
        let rows = self.ctx.portfolio_repo().list(&query).await?;
        Ok(paginated(rows, page, per_page))
    }

    pub async fn get_portfolio_item(&self, id: Uuid) -> ServiceResult<PortfolioItemResponse> {
        let item = self
            .ctx
            .portfolio_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("PortfolioItem", id.to_string()))?;
        Ok(item.into())
    }

    #[instrument(skip(self, input))]
    pub async fn create_portfolio_item(
        &self,
        input: PortfolioItemInput,
    ) -> ServiceResult<PortfolioItemResponse> {
        input.validate()?;
        self.ensure_service(input.service_id).await?;
        let mut item = PortfolioItem::new(String::new(), String::new());
        apply_portfolio(&mut item, input);
        self.ctx.portfolio_repo().create(&item).await?;
        info!(item_id = %item.id, "Portfolio item created");
        Ok(item.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_portfolio_item(
        &self,
        id: Uuid,
        input: PortfolioItemInput,
    ) -> ServiceResult<PortfolioItemResponse> {
        input.validate()?;
        self.ensure_service(input.service_id).await?;
        let mut item = self
            .ctx
            .portfolio_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("PortfolioItem", id.to_string()))?;
        apply_portfolio(&mut item, input);
        item.touch();
        self.ctx.portfolio_repo().update(&item).await?;
        Ok(item.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_portfolio_item(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.portfolio_repo().delete(id).await? {
            return Err(ServiceError::not_found("PortfolioItem", id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Testimonials
    // ========================================================================

    pub async fn list_testimonials(
        &self,
        params: &ListParams,
    ) -> ServiceResult<PaginatedResponse<TestimonialResponse>> {
        let (query, page, per_page) = list_query(params);
        let rows = self.ctx.testimonial_repo().list(&query).await?;
        Ok(paginated(rows, page, per_page))
    }

    pub async fn get_testimonial(&self, id: Uuid) -> ServiceResult<TestimonialResponse> {
        let testimonial = self
            .ctx
            .testimonial_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Testimonial", id.to_string()))?;
        Ok(testimonial.into())
    }

    #[instrument(skip(self, input))]
    pub async fn create_testimonial(&self, input: TestimonialInput) -> ServiceResult<TestimonialResponse> {
        input.validate()?;
        let mut testimonial = Testimonial::new(String::new(), String::new());
        apply_testimonial(&mut testimonial, input);
        self.ctx.testimonial_repo().create(&testimonial).await?;
        Ok(testimonial.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_testimonial(
        &self,
        id: Uuid,
        input: TestimonialInput,
    ) -> ServiceResult<TestimonialResponse> {
        input.validate()?;
        let mut testimonial = self
            .ctx
            .testimonial_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Testimonial", id.to_string()))?;
        apply_testimonial(&mut testimonial, input);
        testimonial.touch();
        self.ctx.testimonial_repo().update(&testimonial).await?;
        Ok(testimonial.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_testimonial(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.testimonial_repo().delete(id).await? {
            return Err(ServiceError::not_found("Testimonial", id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    pub async fn list_statistics(&self) -> ServiceResult<Vec<StatisticResponse>> {
        let rows = self.ctx.statistic_repo().list().await?;
        Ok(rows.iter().map(Into::into).collect())
    }

    pub async fn get_statistic(&self, id: Uuid) -> ServiceResult<StatisticResponse> {
        let statistic = self
            .ctx
            .statistic_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Statistic", id.to_string()))?;
        Ok(statistic.into())
    }

    #[instrument(skip(self, input))]
    pub async fn create_statistic(&self, input: StatisticInput) -> ServiceResult<StatisticResponse> {
        input.validate()?;
        let mut statistic = Statistic::new(0, String::new(), String::new());
        apply_statistic(&mut statistic, input);
        self.ctx.statistic_repo().create(&statistic).await?;
        Ok(statistic.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_statistic(
        &self,
        id: Uuid,
        input: StatisticInput,
    ) -> ServiceResult<StatisticResponse> {
        input.validate()?;
        let mut statistic = self
            .ctx
            .statistic_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Statistic", id.to_string()))?;
        apply_statistic(&mut statistic, input);
        statistic.touch();
        self.ctx.statistic_repo().update(&statistic).await?;
        Ok(statistic.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_statistic(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.statistic_repo().delete(id).await? {
            return Err(ServiceError::not_found("Statistic", id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Telegram subscribers (created by the bot only)
    // ========================================================================

    pub async fn list_telegram_chats(&self) -> ServiceResult<Vec<TelegramChatResponse>> {
        let rows = self.ctx.telegram_chat_repo().list().await?;
        Ok(rows.iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn update_telegram_chat(
        &self,
        id: Uuid,
        update: TelegramChatUpdate,
    ) -> ServiceResult<()> {
        if !self
            .ctx
            .telegram_chat_repo()
            .set_active(id, update.is_active)
            .await?
        {
            return Err(ServiceError::not_found("TelegramChat", id.to_string()));
        }
        info!(chat = %id, active = update.is_active, "Telegram subscriber toggled");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_telegram_chat(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.telegram_chat_repo().delete(id).await? {
            return Err(ServiceError::not_found("TelegramChat", id.to_string()));
        }
        Ok(())
    }

    // ========================================================================
    // Contact inbox
    // ========================================================================

    pub async fn list_contacts(
        &self,
        params: &ContactListParams,
    ) -> ServiceResult<PaginatedResponse<ContactMessageResponse>> {
        let (page, per_page) = params.paging();
        let query = ContactQuery {
            status: params.status,
            is_read: params.is_read,
            search: params.search.clone(),
            limit: i64::from(per_page),
            offset: i64::from(page - 1) * i64::from(per_page),
        };
        let rows = self.ctx.contact_repo().list(&query).await?;
        Ok(paginated(rows, page, per_page))
    }

    pub async fn get_contact(&self, id: Uuid) -> ServiceResult<ContactMessageResponse> {
        let message = self
            .ctx
            .contact_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("ContactMessage", id.to_string()))?;
        Ok(message.into())
    }

    /// Any edit through the admin counts as reading the message
    #[instrument(skip(self, input))]
    pub async fn update_contact(
        &self,
        id: Uuid,
        input: ContactUpdateInput,
    ) -> ServiceResult<ContactMessageResponse> {
        let mut message = self
            .ctx
            .contact_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("ContactMessage", id.to_string()))?;

        if let Some(status) = input.status {
            message.set_status(status);
        }
        if let Some(notes) = input.admin_notes {
            message.admin_notes = notes;
        }
        match input.is_read {
            Some(false) => {
                message.is_read = false;
                message.updated_at = chrono::Utc::now();
            }
            _ => message.mark_read(),
        }

        self.ctx.contact_repo().update(&message).await?;
        Ok(message.into())
    }

    #[instrument(skip(self, request), fields(count = request.ids.len(), action = ?request.action))]
    pub async fn bulk_contacts(&self, request: ContactBulkRequest) -> ServiceResult<BulkResult> {
        if request.ids.is_empty() {
            return Ok(BulkResult { updated: 0 });
        }
        let repo = self.ctx.contact_repo();
        let updated = match request.action {
            BulkAction::MarkRead => repo.mark_read(&request.ids).await?,
            BulkAction::MarkInProgress => {
                repo.set_status(&request.ids, ContactStatus::InProgress)
                    .await?
            }
            BulkAction::MarkCompleted => {
                repo.set_status(&request.ids, ContactStatus::Completed)
                    .await?
            }
        };
        info!(updated, "Contact messages updated");
        Ok(BulkResult { updated })
    }

    #[instrument(skip(self))]
    pub async fn delete_contact(&self, id: Uuid) -> ServiceResult<()> {
        if !self.ctx.contact_repo().delete(id).await? {
            return Err(ServiceError::not_found("ContactMessage", id.to_string()));
        }
        Ok(())
    }

    pub async fn unread_contacts(&self) -> ServiceResult<i64> {
        Ok(self.ctx.contact_repo().count_unread().await?)
    }

    // ========================================================================
    // Uploads
    // ========================================================================

    pub async fn upload(&self, entity: &str, filename: &str, bytes: &[u8]) -> ServiceResult<StoredFile> {
        self.ctx.media().save(entity, filename, bytes).await
    }
}
