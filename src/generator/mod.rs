//! Generator module - derived documents built from the post listing

pub mod sitemap;

pub use sitemap::{build_entries, render, SitemapEntry};
