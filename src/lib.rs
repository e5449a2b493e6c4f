//! folio: the content core of a personal portfolio site
//!
//! Reads blog posts from a directory of front-matter files and verifies
//! signed, time-limited preview links for posts that are not yet published.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod preview;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentRepository, Post, PostMeta};
use preview::PreviewValidator;

/// The site: configuration plus the content and preview components
#[derive(Debug)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    posts: ContentRepository,
    previews: PreviewValidator,
}

impl Folio {
    /// Create a new instance from a directory, reading `_config.yml` when
    /// present and the preview secret from the environment
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let secret = config.preview.resolve_secret();
        Ok(Self::with_config(base_dir, config, secret))
    }

    /// Create an instance from explicit configuration
    pub fn with_config<P: Into<PathBuf>>(
        base_dir: P,
        config: config::SiteConfig,
        preview_secret: Option<String>,
    ) -> Self {
        let base_dir = base_dir.into();
        let public_dir = base_dir.join(&config.public_dir);
        let posts = ContentRepository::from_config(&base_dir, &config.content);
        let previews = PreviewValidator::new(preview_secret);

        Self {
            config,
            base_dir,
            public_dir,
            posts,
            previews,
        }
    }

    pub fn posts(&self) -> &ContentRepository {
        &self.posts
    }

    pub fn previews(&self) -> &PreviewValidator {
        &self.previews
    }

    /// List posts, newest first
    pub fn list_posts(&self, include_drafts: bool) -> Result<Vec<PostMeta>> {
        Ok(self.posts.list(include_drafts)?)
    }

    /// Load a post for public display; unpublished posts are not found
    pub fn published_post(&self, slug: &str) -> Result<Option<Post>> {
        Ok(self.posts.load(slug)?.filter(Post::is_published))
    }

    /// Load a post of any status when `token` grants preview access to it
    ///
    /// A refused token and a missing post look the same to the caller.
    pub fn preview_post(&self, slug: &str, token: Option<&str>) -> Result<Option<Post>> {
        if !self.previews.validate(slug, token) {
            return Ok(None);
        }
        Ok(self.posts.load(slug)?)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{site, token_for, FAR_FUTURE};

    #[test]
    fn test_list_posts() {
        let (_tmp, folio) = site();
        let slugs: Vec<_> = folio
            .list_posts(false)
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["threat-hunting", "hello-world", "undated"]);
        assert_eq!(folio.list_posts(true).unwrap().len(), 4);
    }

    #[test]
    fn test_published_post_hides_drafts() {
        let (_tmp, folio) = site();
        assert!(folio.published_post("hello-world").unwrap().is_some());
        assert!(folio.published_post("secret-draft").unwrap().is_none());
        assert!(folio.published_post("undated").unwrap().is_none());
    }

    #[test]
    fn test_preview_post() {
        let (_tmp, folio) = site();
        let token = token_for("secret-draft", FAR_FUTURE);

        let post = folio
            .preview_post("secret-draft", Some(token.as_str()))
            .unwrap()
            .unwrap();
        assert_eq!(post.meta.title, "Secret Draft");

        assert!(folio.preview_post("secret-draft", None).unwrap().is_none());
        assert!(folio
            .preview_post("secret-draft", Some(token_for("secret-draft", "1").as_str()))
            .unwrap()
            .is_none());
        // valid token for a post that does not exist
        let ghost = token_for("ghost", FAR_FUTURE);
        assert!(folio.preview_post("ghost", Some(ghost.as_str())).unwrap().is_none());
    }

    #[test]
    fn test_new_without_config_file_uses_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let folio = crate::Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.config.content.dir, "content/blog");
        assert_eq!(folio.posts().dir(), tmp.path().join("content/blog"));
        assert!(folio.list_posts(true).unwrap().is_empty());
    }

    #[test]
    fn test_new_reads_config_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("_config.yml"),
            "title: Test\ncontent:\n  dir: posts\npreview:\n  secret_env: FOLIO_TEST_UNSET_SECRET\n",
        )
        .unwrap();
        let folio = crate::Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.config.title, "Test");
        assert_eq!(folio.posts().dir(), tmp.path().join("posts"));
        assert!(!folio.previews().is_configured());
    }
}
