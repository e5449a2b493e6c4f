//! List posts

use anyhow::Result;

use crate::content::PostMeta;
use crate::helpers::filter_posts;
use crate::Folio;

/// Listing filters taken from the command line
#[derive(Debug, Default, Clone)]
pub struct ListOptions {
    pub include_drafts: bool,
    pub tag: Option<String>,
    pub search: Option<String>,
}

/// Format a post listing, one line per post
pub fn render(posts: &[&PostMeta]) -> String {
    let mut out = format!("Posts ({}):\n", posts.len());
    for post in posts {
        out.push_str(&format!(
            "  {} - {} [{}] ({})\n",
            post.date, post.title, post.slug, post.status
        ));
    }
    out
}

/// List posts, newest first
pub fn run(folio: &Folio, options: &ListOptions) -> Result<()> {
    let posts = folio.list_posts(options.include_drafts)?;
    let shown = filter_posts(&posts, options.tag.as_deref(), options.search.as_deref());
    print!("{}", render(&shown));
    Ok(())
}
