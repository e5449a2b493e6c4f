//! Report content files that cannot be listed or looked up

use anyhow::{bail, Result};

use crate::content::{DuplicateSlug, ScanOutcome};
use crate::Folio;

/// Problems found in the content directory
#[derive(Debug, Default)]
pub struct Report {
    pub loaded: usize,
    /// (file name, reason)
    pub skipped: Vec<(String, String)>,
    pub duplicates: Vec<DuplicateSlug>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.duplicates.is_empty()
    }
}

/// Scan every backing file and the slug index
pub fn inspect(folio: &Folio) -> Result<Report> {
    let mut report = Report::default();

    for outcome in folio.posts().scan()? {
        match outcome {
            ScanOutcome::Loaded(_) => report.loaded += 1,
            ScanOutcome::Skipped { source, reason } => {
                report.skipped.push((source, reason.to_string()))
            }
        }
    }
    report.duplicates = folio.posts().index()?.duplicates().to_vec();

    Ok(report)
}

pub fn run(folio: &Folio) -> Result<()> {
    let report = inspect(folio)?;

    println!("{} post(s) readable", report.loaded);
    for (source, reason) in &report.skipped {
        println!("  skipped {}: {}", source, reason);
    }
    for dup in &report.duplicates {
        println!(
            "  duplicate slug {:?}: {} shadows {}",
            dup.slug,
            dup.kept.display(),
            dup.shadowed.display()
        );
    }

    if !report.is_clean() {
        bail!(
            "{} unreadable file(s), {} duplicate slug(s)",
            report.skipped.len(),
            report.duplicates.len()
        );
    }

    Ok(())
}
