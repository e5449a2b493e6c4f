//! Post models

use serde::{Deserialize, Serialize};
use std::fmt;

use super::FrontMatter;

/// Date used for listed posts whose front-matter has none, so they sort last
pub const FALLBACK_DATE: &str = "1970-01-01";

/// Publication status of a post
///
/// Anything other than `published` keeps a post out of public listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    PendingReview,
    Other(String),
}

impl PostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::PendingReview => "pending-review",
            PostStatus::Other(s) => s,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, PostStatus::Published)
    }
}

impl From<&str> for PostStatus {
    fn from(s: &str) -> Self {
        match s {
            "draft" => PostStatus::Draft,
            "published" => PostStatus::Published,
            "pending-review" => PostStatus::PendingReview,
            other => PostStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for PostStatus {
    fn from(s: String) -> Self {
        PostStatus::from(s.as_str())
    }
}

impl From<PostStatus> for String {
    fn from(status: PostStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A blog post without its body, as shown in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMeta {
    /// Post title
    pub title: String,

    /// URL-friendly identifier
    pub slug: String,

    /// ISO-ish publication date, compared as a string
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub status: PostStatus,

    /// MITRE ATT&CK technique references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitre: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<Vec<String>>,

    /// Backing file name, relative to the content directory
    pub source: String,
}

impl PostMeta {
    /// Build listing metadata, filling in a title and date when the
    /// front-matter lacks them
    pub fn with_defaults(fm: FrontMatter, file_stem: &str, source: String) -> Self {
        let slug = fm.slug.unwrap_or_else(|| file_stem.to_string());
        Self {
            title: fm.title.unwrap_or_else(|| slug.clone()),
            date: fm.date.unwrap_or_else(|| FALLBACK_DATE.to_string()),
            slug,
            summary: fm.summary,
            tags: fm.tags,
            status: fm.status.map(PostStatus::from).unwrap_or_default(),
            mitre: fm.mitre,
            tools: fm.tools,
            reviewers: fm.reviewers,
            source,
        }
    }

    /// Tags as a slice, empty when none are set
    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// A fully loaded post, body included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,

    /// Raw MDX body, handed to an external renderer untouched
    pub content: String,
}

impl Post {
    /// Build a post for direct lookup. Returns `None` when the front-matter
    /// lacks a title or a date; no defaults are substituted here.
    pub fn from_parts(
        fm: FrontMatter,
        body: &str,
        requested_slug: &str,
        source: String,
    ) -> Option<Self> {
        let (Some(title), Some(date)) = (fm.title, fm.date) else {
            return None;
        };

        let meta = PostMeta {
            title,
            slug: fm.slug.unwrap_or_else(|| requested_slug.to_string()),
            date,
            summary: fm.summary,
            tags: fm.tags,
            status: fm.status.map(PostStatus::from).unwrap_or_default(),
            mitre: fm.mitre,
            tools: fm.tools,
            reviewers: fm.reviewers,
            source,
        };

        Some(Self {
            meta,
            content: body.to_string(),
        })
    }

    pub fn slug(&self) -> &str {
        &self.meta.slug
    }

    pub fn is_published(&self) -> bool {
        self.meta.status.is_published()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["draft", "published", "pending-review", "archived"] {
            assert_eq!(PostStatus::from(s).as_str(), s);
        }
        assert_eq!(PostStatus::from("archived"), PostStatus::Other("archived".into()));
        assert!(!PostStatus::from("Published").is_published());
    }

    #[test]
    fn test_with_defaults_fills_title_and_date() {
        let meta = PostMeta::with_defaults(FrontMatter::default(), "untitled-note", "untitled-note.mdx".into());
        assert_eq!(meta.slug, "untitled-note");
        assert_eq!(meta.title, "untitled-note");
        assert_eq!(meta.date, FALLBACK_DATE);
        assert_eq!(meta.status, PostStatus::Draft);
    }

    #[test]
    fn test_with_defaults_prefers_declared_slug() {
        let fm = FrontMatter {
            slug: Some("declared".into()),
            ..Default::default()
        };
        let meta = PostMeta::with_defaults(fm, "2024-01-01-file", "2024-01-01-file.mdx".into());
        assert_eq!(meta.slug, "declared");
        assert_eq!(meta.title, "declared");
    }

    #[test]
    fn test_from_parts_requires_title_and_date() {
        let missing_date = FrontMatter {
            title: Some("T".into()),
            ..Default::default()
        };
        assert!(Post::from_parts(missing_date, "", "t", "t.mdx".into()).is_none());

        let missing_title = FrontMatter {
            date: Some("2024-01-01".into()),
            ..Default::default()
        };
        assert!(Post::from_parts(missing_title, "", "t", "t.mdx".into()).is_none());

        let complete = FrontMatter {
            title: Some("T".into()),
            date: Some("2024-01-01".into()),
            ..Default::default()
        };
        let post = Post::from_parts(complete, "body", "t", "t.mdx".into()).unwrap();
        assert_eq!(post.slug(), "t");
        assert_eq!(post.content, "body");
        assert!(!post.is_published());
    }

    #[test]
    fn test_json_shape() {
        let fm = FrontMatter {
            title: Some("T".into()),
            date: Some("2024-01-01".into()),
            status: Some("published".into()),
            ..Default::default()
        };
        let post = Post::from_parts(fm, "body", "t", "t.mdx".into()).unwrap();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["status"], "published");
        assert_eq!(json["slug"], "t");
        assert_eq!(json["content"], "body");
        assert!(json.get("tags").is_none());
    }
}
