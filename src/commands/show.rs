//! Show a single post

use anyhow::{bail, Result};

use crate::content::Post;
use crate::helpers::body_reading_minutes;
use crate::Folio;

/// Format a post's metadata followed by its raw body
pub fn render(post: &Post) -> String {
    let meta = &post.meta;
    let mut out = String::new();

    out.push_str(&format!("title:     {}\n", meta.title));
    out.push_str(&format!("slug:      {}\n", meta.slug));
    out.push_str(&format!("date:      {}\n", meta.date));
    out.push_str(&format!("status:    {}\n", meta.status));
    out.push_str(&format!("source:    {}\n", meta.source));
    if let Some(summary) = &meta.summary {
        out.push_str(&format!("summary:   {}\n", summary));
    }

    let lists = [
        ("tags", &meta.tags),
        ("mitre", &meta.mitre),
        ("tools", &meta.tools),
        ("reviewers", &meta.reviewers),
    ];
    for (name, values) in lists {
        if let Some(values) = values {
            out.push_str(&format!("{:<10} {}\n", format!("{}:", name), values.join(", ")));
        }
    }

    out.push_str(&format!(
        "reading:   {} min\n",
        body_reading_minutes(&post.content)
    ));
    out.push_str("---\n");
    out.push_str(&post.content);
    out
}

/// Show a post of any status; drafts are visible locally
pub fn run(folio: &Folio, slug: &str, json: bool) -> Result<()> {
    let Some(post) = folio.posts().load(slug)? else {
        bail!("post not found: {}", slug);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", render(&post));
    }

    Ok(())
}
