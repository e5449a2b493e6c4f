//! Check whether a preview token grants access to a post

use anyhow::{bail, Result};

use crate::Folio;

/// Verify `token` for `slug` and report the outcome
///
/// Unlike the HTTP surface, this tells the operator why a token was refused.
pub fn run(folio: &Folio, slug: &str, token: &str) -> Result<()> {
    if let Err(reason) = folio.previews().verify(slug, Some(token)) {
        bail!("preview denied for {}: {}", slug, reason);
    }

    match folio.posts().load(slug)? {
        Some(post) => {
            println!(
                "Preview granted: {} ({}, status: {})",
                post.meta.title, post.meta.date, post.meta.status
            );
            Ok(())
        }
        None => bail!("token is valid but no loadable post matches {}", slug),
    }
}
