//! Content repository - lists and loads posts from the content directory

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, FrontMatter, Post, PostMeta};
use crate::config::{ContentConfig, SlugMatch};

/// Outcome of reading one backing file during a scan
#[derive(Debug)]
pub enum ScanOutcome {
    Loaded(PostMeta),
    Skipped { source: String, reason: ContentError },
}

/// Two backing files that resolve to the same slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSlug {
    pub slug: String,
    /// The file lookups resolve to
    pub kept: PathBuf,
    /// The file shadowed by `kept`
    pub shadowed: PathBuf,
}

/// Slug to backing file mapping, rebuilt on every lookup
#[derive(Debug, Default)]
pub struct SlugIndex {
    declared: IndexMap<String, PathBuf>,
    stems: IndexMap<String, PathBuf>,
    duplicates: Vec<DuplicateSlug>,
}

impl SlugIndex {
    /// Resolve a slug. A front-matter `slug` wins over a file stem.
    pub fn resolve(&self, slug: &str) -> Option<&Path> {
        self.declared
            .get(slug)
            .or_else(|| self.stems.get(slug))
            .map(PathBuf::as_path)
    }

    /// Slugs claimed by more than one file
    pub fn duplicates(&self) -> &[DuplicateSlug] {
        &self.duplicates
    }
}

/// Reads posts from a flat directory of front-matter files
///
/// Nothing is cached: every call goes back to the filesystem.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    dir: PathBuf,
    extensions: Vec<String>,
    slug_match: SlugMatch,
}

impl ContentRepository {
    /// Create a repository over `dir` accepting `.mdx` files
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        let defaults = ContentConfig::default();
        Self {
            dir: dir.into(),
            extensions: defaults.extensions,
            slug_match: defaults.slug_match,
        }
    }

    /// Create a repository from the `content` section of the site config
    pub fn from_config(base_dir: &Path, config: &ContentConfig) -> Self {
        Self {
            dir: base_dir.join(&config.dir),
            extensions: config.extensions.clone(),
            slug_match: config.slug_match,
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_slug_match(mut self, slug_match: SlugMatch) -> Self {
        self.slug_match = slug_match;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Backing files directly inside the content directory, by file name
    ///
    /// A missing directory means no content yet, not an error.
    fn files(&self) -> Result<Vec<PathBuf>, ContentError> {
        if !self.dir.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", self.dir);
            return Ok(Vec::new());
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", self.dir, e);
                    continue;
                }
            };

            if entry.file_type().is_file() && self.is_content_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|ext| ext == e))
            .unwrap_or(false)
    }

    /// Read every backing file, reporting a per-file outcome
    pub fn scan(&self) -> Result<Vec<ScanOutcome>, ContentError> {
        let outcomes = self
            .files()?
            .into_iter()
            .map(|path| {
                let source = file_name(&path);
                match read_post_file(&path) {
                    Ok((fm, _body)) => {
                        ScanOutcome::Loaded(PostMeta::with_defaults(fm, &file_stem(&path), source))
                    }
                    Err(reason) => ScanOutcome::Skipped { source, reason },
                }
            })
            .collect();

        Ok(outcomes)
    }

    /// List posts, newest first
    ///
    /// Only `published` posts are returned unless `include_drafts` is set.
    /// Posts sharing a date keep file-name order. Files that fail to parse
    /// are logged and left out.
    pub fn list(&self, include_drafts: bool) -> Result<Vec<PostMeta>, ContentError> {
        let mut posts: Vec<PostMeta> = self
            .scan()?
            .into_iter()
            .filter_map(|outcome| match outcome {
                ScanOutcome::Loaded(meta) => Some(meta),
                ScanOutcome::Skipped { source, reason } => {
                    tracing::warn!("Failed to load post {}: {}", source, reason);
                    None
                }
            })
            .filter(|meta| include_drafts || meta.status.is_published())
            .collect();

        // Sort by date descending (newest first); ISO dates order lexically
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Build the slug index used by exact lookups
    ///
    /// A file is reported as shadowed when its own slug resolves to some
    /// other file, so the report always names the file `load` returns.
    pub fn index(&self) -> Result<SlugIndex, ContentError> {
        let mut index = SlugIndex::default();
        let mut claims: Vec<(String, PathBuf)> = Vec::new();

        for path in self.files()? {
            let stem = file_stem(&path);
            index.stems.entry(stem.clone()).or_insert_with(|| path.clone());

            let declared = match read_post_file(&path) {
                Ok((fm, _)) => fm.slug,
                Err(e) => {
                    tracing::warn!("Indexing {:?} by file name only: {}", path, e);
                    None
                }
            };

            if let Some(slug) = &declared {
                index.declared.entry(slug.clone()).or_insert_with(|| path.clone());
            }

            claims.push((declared.unwrap_or(stem), path));
        }

        for (slug, path) in claims {
            let Some(kept) = index.resolve(&slug).map(Path::to_path_buf) else {
                continue;
            };
            if kept != path {
                tracing::warn!("Duplicate slug {:?}: {:?} shadows {:?}", slug, kept, path);
                index.duplicates.push(DuplicateSlug {
                    slug,
                    kept,
                    shadowed: path,
                });
            }
        }

        Ok(index)
    }

    /// Load a single post by slug, body included
    ///
    /// Returns `Ok(None)` when nothing matches or when the matched file lacks
    /// a title or a date. Fails only when the matched file cannot be read
    /// or parsed.
    pub fn load(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        if slug.is_empty() {
            return Ok(None);
        }

        let path = match self.slug_match {
            SlugMatch::Exact => self.index()?.resolve(slug).map(Path::to_path_buf),
            SlugMatch::Substring => self
                .files()?
                .into_iter()
                .find(|path| file_name(path).contains(slug)),
        };

        let Some(path) = path else {
            tracing::debug!("No post matches slug {:?}", slug);
            return Ok(None);
        };

        let (fm, body) = read_post_file(&path)?;
        let post = Post::from_parts(fm, &body, slug, file_name(&path));
        if post.is_none() {
            tracing::debug!("{:?} lacks a title or date, not loadable", path);
        }

        Ok(post)
    }
}

/// Read and split one backing file
fn read_post_file(path: &Path) -> Result<(FrontMatter, String), ContentError> {
    let raw = fs::read_to_string(path).map_err(|e| ContentError::from(e).in_file(path))?;
    let (fm, body) = FrontMatter::parse(&raw).map_err(|e| e.in_file(path))?;
    Ok((fm, body.to_string()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
