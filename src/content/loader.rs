//! Content loader - collects Markdown records from a content directory

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentRecord, FrontMatter, MarkdownRenderer};
use crate::config::SiteConfig;

/// Loads content records from section directories
pub struct ContentLoader {
    renderer: MarkdownRenderer,
    include_drafts: bool,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            renderer: MarkdownRenderer::with_config(&config.markdown),
            include_drafts: config.build.drafts,
        }
    }

    /// Collect every Markdown file directly inside `dir`, in file-name order.
    /// A missing directory is an error.
    pub fn collect(&self, dir: &Path) -> Result<Vec<ContentRecord>> {
        if !dir.is_dir() {
            bail!("Content directory not found: {:?}", dir);
        }

        let mut records = Vec::new();

        for path in markdown_files(dir)? {
            let record = self.load_record(&path)?;
            if record.front_matter.is_draft() && !self.include_drafts {
                tracing::debug!("Skipping draft {:?}", path);
                continue;
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Like [`collect`](Self::collect), but a missing directory yields `None`
    pub fn collect_optional(&self, dir: &Path) -> Result<Option<Vec<ContentRecord>>> {
        if !dir.exists() {
            return Ok(None);
        }
        self.collect(dir).map(Some)
    }

    /// Load a single record from a file
    pub fn load_record(&self, path: &Path) -> Result<ContentRecord> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&content)
            .with_context(|| format!("Failed to parse front-matter in {:?}", path))?;

        let body_html = self.renderer.render(body);

        Ok(ContentRecord::new(
            fm,
            body_html,
            slug_for(path),
            path.to_path_buf(),
        ))
    }
}

/// Markdown files directly inside `dir`, sorted by file name
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to list {:?}", dir))?;
        let path = entry.path();
        if path.is_file() && is_markdown_file(path) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// File name with the `.md` extension stripped, nothing else changed
pub fn slug_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loader() -> ContentLoader {
        ContentLoader::new(&SiteConfig::default())
    }

    #[test]
    fn test_collect_markdown_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b-post.md"), "---\ntitle: B\n---\nHello *b*").unwrap();
        fs::write(dir.path().join("a-post.md"), "---\ntitle: A\n---\nHello").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/deep.md"), "---\ntitle: Deep\n---\n").unwrap();

        let records = loader().collect(dir.path()).unwrap();
        let slugs: Vec<_> = records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a-post", "b-post"]);
        assert_eq!(records[1].body, "<p>Hello <em>b</em></p>\n");
    }

    #[test]
    fn test_slug_is_file_stem() {
        assert_eq!(slug_for(Path::new("/x/My Post.v2.md")), "My Post.v2");
        assert_eq!(slug_for(Path::new("getting-started.md")), "getting-started");
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(loader().collect(&missing).is_err());
        assert!(loader().collect_optional(&missing).unwrap().is_none());
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(loader().collect(dir.path()).unwrap().is_empty());
        assert_eq!(
            loader().collect_optional(dir.path()).unwrap().map(|r| r.len()),
            Some(0)
        );
    }

    #[test]
    fn test_bad_front_matter_aborts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.md"), "---\ntitle: fine\n---\n").unwrap();
        fs::write(dir.path().join("broken.md"), "---\ntitle: [oops\n---\n").unwrap();

        let err = loader().collect(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.md"));
    }

    #[test]
    fn test_drafts_skipped_unless_enabled() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("draft.md"), "---\ndraft: true\n---\n").unwrap();
        fs::write(dir.path().join("live.md"), "---\ntitle: Live\n---\n").unwrap();

        assert_eq!(loader().collect(dir.path()).unwrap().len(), 1);

        let mut config = SiteConfig::default();
        config.build.drafts = true;
        assert_eq!(ContentLoader::new(&config).collect(dir.path()).unwrap().len(), 2);
    }
}
