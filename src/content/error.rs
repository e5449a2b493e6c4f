//! Errors raised while reading backing content files

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("front-matter block has no closing ---")]
    UnterminatedFrontMatter,

    #[error("invalid front-matter: {0}")]
    InvalidFrontMatter(#[from] serde_yaml::Error),

    #[error("front-matter must be a mapping of keys to values")]
    NotAMapping,

    #[error("cannot read content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ContentError>,
    },
}

impl ContentError {
    /// Attach the offending file to this error
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            ContentError::InFile { .. } => self,
            other => ContentError::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}
