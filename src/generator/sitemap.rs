//! Sitemap generation

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::PostMeta;
use crate::helpers::{date_xml, full_url_for, parse_date, post_url};

/// One `<url>` entry of a sitemap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: String,
    pub priority: f32,
}

/// Build sitemap entries: the site root, the blog index, then one per post
///
/// Callers pass published posts only; drafts must never be advertised.
pub fn build_entries(config: &SiteConfig, posts: &[PostMeta], now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let mut entries = vec![
        SitemapEntry {
            loc: full_url_for(config, ""),
            lastmod: Some(now),
            changefreq: "weekly".to_string(),
            priority: 1.0,
        },
        SitemapEntry {
            loc: full_url_for(config, &config.blog_dir),
            lastmod: Some(now),
            changefreq: "weekly".to_string(),
            priority: 0.8,
        },
    ];

    for post in posts {
        let lastmod = parse_date(&post.date);
        if lastmod.is_none() {
            tracing::debug!("Post {:?} has unparsable date {:?}, omitting lastmod", post.slug, post.date);
        }
        entries.push(SitemapEntry {
            loc: post_url(config, &post.slug),
            lastmod,
            changefreq: config.sitemap.post_changefreq.clone(),
            priority: config.sitemap.post_priority,
        });
    }

    entries
}

/// Render entries as sitemaps.org XML
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", date_xml(lastmod)));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            escape_xml(&entry.changefreq)
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
