//! `sitemap.xml` and `robots.txt`

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Pages that exist regardless of content
pub const STATIC_PAGES: &[&str] = &["/", "/about/", "/services/catalog/", "/portfolio/", "/privacy/"];

struct UrlEntry {
    loc: String,
    lastmod: Option<DateTime<Utc>>,
    changefreq: &'static str,
    priority: &'static str,
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn render(base_url: &str, entries: &[UrlEntry]) -> String {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&format!("{base}{}", entry.loc)));
        if let Some(lastmod) = entry.lastmod {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod.format("%Y-%m-%d"));
        }
        let _ = writeln!(xml, "    <changefreq>{}</changefreq>", entry.changefreq);
        let _ = writeln!(xml, "    <priority>{}</priority>", entry.priority);
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Crawl rules: everything but the admin prefix
pub fn robots_txt(base_url: &str, admin_prefix: &str) -> String {
    let admin = format!("/{}/", admin_prefix.trim_matches('/'));
    format!(
        "User-agent: *\nDisallow: {admin}\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        base_url.trim_end_matches('/')
    )
}

pub struct SitemapService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SitemapService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Static pages, active services and active portfolio items
    #[instrument(skip(self))]
    pub async fn sitemap_xml(&self, base_url: &str) -> ServiceResult<String> {
        let services = self.ctx.service_repo().list_active(None).await?;
        let works = self.ctx.portfolio_repo().list_all_active().await?;

        let mut entries: Vec<UrlEntry> = STATIC_PAGES
            .iter()
            .map(|path| UrlEntry {
                loc: (*path).to_string(),
                lastmod: None,
                changefreq: "monthly",
                priority: "1.0",
            })
            .collect();
        entries.extend(services.iter().map(|s| UrlEntry {
            loc: s.url(),
            lastmod: Some(s.updated_at),
            changefreq: "weekly",
            priority: "0.8",
        }));
        entries.extend(works.iter().map(|w| UrlEntry {
            loc: format!("/portfolio/#work-{}", w.id),
            lastmod: Some(w.updated_at),
            changefreq: "monthly",
            priority: "0.6",
        }));

        Ok(render(base_url, &entries))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use site_core::{NoopNotifier, PortfolioItem, Service};

    use super::*;
    use crate::testing::memory_context;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<c>\"'"), "a&amp;b&lt;c&gt;&quot;&apos;");
    }

    #[test]
    fn test_robots_disallows_admin() {
        let robots = robots_txt("https://yarko.example/", "secret-admin/");
        assert!(robots.contains("Disallow: /secret-admin/\n"));
        assert!(robots.ends_with("Sitemap: https://yarko.example/sitemap.xml\n"));
    }

    #[tokio::test]
    async fn test_sitemap_lists_active_content() {
        let (ctx, stores) = memory_context(Arc::new(NoopNotifier));
        stores.catalog.services.lock().push(Service::new(
            "Полиграфия".to_string(),
            "poligrafiia".to_string(),
            String::new(),
        ));
        let mut hidden = Service::new("Скрытая".to_string(), "skrytaia".to_string(), String::new());
        hidden.is_active = false;
        stores.catalog.services.lock().push(hidden);
        let work = PortfolioItem::new("Вывеска".to_string(), String::new());
        let work_id = work.id;
        stores.catalog.portfolio.lock().push(work);

        let xml = SitemapService::new(&ctx)
            .sitemap_xml("https://yarko.example")
            .await
            .unwrap();

        assert!(xml.starts_with("<?xml"));
        assert_eq!(xml.matches("<url>").count(), STATIC_PAGES.len() + 2);
        assert!(xml.contains("<loc>https://yarko.example/services/catalog/poligrafiia/</loc>"));
        assert!(!xml.contains("skrytaia"));
        assert!(xml.contains(&format!("/portfolio/#work-{work_id}")));
        assert!(xml.contains("<priority>0.8</priority>"));
    }
}
