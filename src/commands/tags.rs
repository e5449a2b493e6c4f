//! List tags of published posts

use anyhow::Result;
use indexmap::IndexMap;

use crate::helpers::tag_counts;
use crate::Folio;

pub fn render(counts: &IndexMap<String, usize>) -> String {
    let mut out = format!("Tags ({}):\n", counts.len());
    for (tag, count) in counts {
        out.push_str(&format!("  {} ({})\n", tag, count));
    }
    out
}

pub fn run(folio: &Folio) -> Result<()> {
    let posts = folio.list_posts(false)?;
    print!("{}", render(&tag_counts(&posts)));
    Ok(())
}
