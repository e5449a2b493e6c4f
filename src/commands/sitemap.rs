//! Write the sitemap

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::generator::sitemap;
use crate::Folio;

/// Render the sitemap of published posts
pub fn generate(folio: &Folio) -> Result<String> {
    let posts = folio.list_posts(false)?;
    let entries = sitemap::build_entries(&folio.config, &posts, chrono::Utc::now());
    Ok(sitemap::render(&entries))
}

/// Write the sitemap to `output`, `-` for stdout, or `<public_dir>/sitemap.xml`
pub fn run(folio: &Folio, output: Option<&Path>) -> Result<()> {
    let xml = generate(folio)?;

    let path = match output {
        Some(path) if path == Path::new("-") => {
            print!("{}", xml);
            return Ok(());
        }
        Some(path) => path.to_path_buf(),
        None => folio.public_dir.join("sitemap.xml"),
    };

    write_file(&path, &xml)?;
    tracing::info!("Generated {:?}", path);
    println!("Wrote {}", path.display());

    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
