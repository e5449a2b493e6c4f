//! List helper functions for tag filters, search and reading time

use indexmap::IndexMap;
use std::collections::BTreeMap;

use crate::content::{markdown, PostMeta};

/// Words per minute assumed by reading time estimates
const WORDS_PER_MINUTE: usize = 200;

/// All distinct tags, sorted
pub fn all_tags(posts: &[PostMeta]) -> Vec<String> {
    tag_counts(posts).into_keys().collect()
}

/// Number of posts carrying each tag, sorted by tag
pub fn tag_counts(posts: &[PostMeta]) -> IndexMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for post in posts {
        for tag in post.tag_list() {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    counts.into_iter().collect()
}

/// Posts carrying `tag` (exact match)
pub fn filter_by_tag<'a>(posts: &'a [PostMeta], tag: &str) -> Vec<&'a PostMeta> {
    posts
        .iter()
        .filter(|p| p.tag_list().iter().any(|t| t == tag))
        .collect()
}

/// Case-insensitive search over title, summary and tags
///
/// A blank query matches everything.
pub fn search<'a>(posts: &'a [PostMeta], query: &str) -> Vec<&'a PostMeta> {
    let query = query.trim().to_lowercase();
    posts.iter().filter(|p| matches_query(p, &query)).collect()
}

/// `query` must already be trimmed and lowercased
fn matches_query(post: &PostMeta, query: &str) -> bool {
    query.is_empty()
        || post.title.to_lowercase().contains(query)
        || post
            .summary
            .as_ref()
            .is_some_and(|s| s.to_lowercase().contains(query))
        || post.tag_list().iter().any(|t| t.to_lowercase().contains(query))
}

/// Apply an optional tag filter, then an optional search query
pub fn filter_posts<'a>(
    posts: &'a [PostMeta],
    tag: Option<&str>,
    query: Option<&str>,
) -> Vec<&'a PostMeta> {
    let tagged: Vec<&PostMeta> = match tag.filter(|t| !t.is_empty()) {
        Some(tag) => filter_by_tag(posts, tag),
        None => posts.iter().collect(),
    };

    let query = query.unwrap_or("").trim().to_lowercase();
    tagged
        .into_iter()
        .filter(|p| matches_query(p, &query))
        .collect()
}

/// Listing estimate of reading time, from the summary alone
///
/// Segments are counted the way a split on whitespace runs counts them, so
/// an absent or blank summary is one segment and leading or trailing
/// whitespace adds an empty one. Always at least one minute.
pub fn reading_minutes(summary: Option<&str>) -> usize {
    estimate(split_segments(summary.unwrap_or("")) + WORDS_PER_MINUTE)
}

/// Pieces left after splitting on runs of whitespace, empty ends included
fn split_segments(text: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for c in text.chars() {
        let ws = c.is_whitespace();
        if ws && !in_run {
            runs += 1;
        }
        in_run = ws;
    }
    runs + 1
}

/// Reading time of a full post body, ignoring markup and components
pub fn body_reading_minutes(content: &str) -> usize {
    estimate(markdown::word_count(content))
}

fn estimate(words: usize) -> usize {
    let minutes = (words as f64 / WORDS_PER_MINUTE as f64).round() as usize;
    minutes.max(1)
}
