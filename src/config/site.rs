//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,
    pub blog_dir: String,

    // Directory
    pub public_dir: String,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub sitemap: SitemapConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),

            url: "http://localhost:3000".to_string(),
            root: "/".to_string(),
            blog_dir: "blog".to_string(),

            public_dir: "public".to_string(),

            content: ContentConfig::default(),
            preview: PreviewConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// How `load` resolves a requested slug to a backing file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugMatch {
    /// Exact front-matter `slug` or file stem, via an index built per call
    #[default]
    Exact,
    /// First file whose name contains the slug (legacy behavior)
    Substring,
}

/// Content directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding one file per post, relative to the base directory
    pub dir: String,
    /// Accepted file extensions, without the leading dot
    pub extensions: Vec<String>,
    pub slug_match: SlugMatch,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: "content/blog".to_string(),
            extensions: vec!["mdx".to_string()],
            slug_match: SlugMatch::Exact,
        }
    }
}

/// Preview link configuration
///
/// The secret itself never lives in `_config.yml`; only the name of the
/// environment variable holding it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub secret_env: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            secret_env: "REVIEW_SECRET".to_string(),
        }
    }
}

impl PreviewConfig {
    /// Read the signing secret from the environment. Unset or empty means
    /// previews are disabled.
    pub fn resolve_secret(&self) -> Option<String> {
        match std::env::var(&self.secret_env) {
            Ok(secret) if !secret.is_empty() => Some(secret),
            Ok(_) => {
                tracing::warn!("{} is empty, draft previews are disabled", self.secret_env);
                None
            }
            Err(_) => {
                tracing::debug!("{} is not set, draft previews are disabled", self.secret_env);
                None
            }
        }
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub post_changefreq: String,
    pub post_priority: f32,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            post_changefreq: "monthly".to_string(),
            post_priority: 0.7,
        }
    }
}
