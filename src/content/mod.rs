//! Content module - reads posts and their front-matter from disk

mod error;
mod frontmatter;
pub mod markdown;
mod post;
pub mod repository;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use post::{Post, PostMeta, PostStatus, FALLBACK_DATE};
pub use repository::{ContentRepository, DuplicateSlug, ScanOutcome, SlugIndex};
