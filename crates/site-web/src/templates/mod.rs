//! Server-side page templates
//!
//! Handlebars templates are compiled into the binary and registered once at
//! startup. HTML escaping stays on; the only raw output is the admin-authored
//! "about" description.

mod helpers;

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

pub use helpers::{decimal_dot, phone_format};

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/partials/header.hbs")),
    ("footer", include_str!("../../templates/partials/footer.hbs")),
    ("contact_form", include_str!("../../templates/partials/contact_form.hbs")),
    ("pagination", include_str!("../../templates/partials/pagination.hbs")),
    ("service_card", include_str!("../../templates/partials/service_card.hbs")),
    ("work_card", include_str!("../../templates/partials/work_card.hbs")),
];

const PAGES: &[(&str, &str)] = &[
    ("home", include_str!("../../templates/home.hbs")),
    ("about", include_str!("../../templates/about.hbs")),
    ("privacy", include_str!("../../templates/privacy.hbs")),
    ("catalog", include_str!("../../templates/catalog.hbs")),
    ("service_detail", include_str!("../../templates/service_detail.hbs")),
    ("portfolio", include_str!("../../templates/portfolio.hbs")),
    ("contact", include_str!("../../templates/contact.hbs")),
    ("error", include_str!("../../templates/error.hbs")),
];

/// Compiled template registry
pub struct Templates {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates")
            .field("count", &self.registry.get_templates().len())
            .finish()
    }
}

impl Templates {
    /// Compile every page and partial
    ///
    /// # Errors
    /// Returns the first template that fails to parse
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry.register_helper("phone_format", Box::new(helpers::PhoneFormatHelper));
        registry.register_helper("decimal_dot", Box::new(helpers::DecimalDotHelper));

        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in PAGES {
            registry.register_template_string(name, *source)?;
        }

        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        self.registry.render(name, data)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn site() -> serde_json::Value {
        json!({
            "site_name": "Яркий Город",
            "phone_formatted": "+7 (8142) 28-09-03",
            "settings": {
                "phone": "+78142280903",
                "phone_href": "+78142280903",
                "email": "info@example.ru",
                "address": "Петрозаводск",
                "working_hours": "Пн-Пт: 9:00 - 18:00",
            },
        })
    }

    #[test]
    fn test_every_page_compiles() {
        let templates = Templates::new().unwrap();
        for (name, _) in PAGES {
            assert!(templates.has_template(name), "{name} missing");
        }
    }

    #[test]
    fn test_privacy_renders_site_contacts() {
        let templates = Templates::new().unwrap();
        let html = templates.render("privacy", &json!({ "site": site() })).unwrap();
        assert!(html.contains("Политика конфиденциальности"));
        assert!(html.contains("info@example.ru"));
        assert!(html.contains("+7 (8142) 28-09-03"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render(
                "catalog",
                &json!({
                    "site": site(),
                    "services": [],
                    "search_query": "<script>alert(1)</script>",
                    "pagination": { "page": 1, "total_pages": 1 },
                }),
            )
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_error_page() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render(
                "error",
                &json!({ "site": site(), "status": 404, "title": "Страница не найдена" }),
            )
            .unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("Страница не найдена"));
    }
}
