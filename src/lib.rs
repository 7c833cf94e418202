//! inspektra-site: static site builder for the Inspektra blog, webinars and academy
//!
//! Markdown content with YAML front-matter is rendered to HTML and poured into
//! plain `{{placeholder}}` templates, one section at a time.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

pub use generator::BuildReport;

/// Configuration file looked up at the site root
pub const CONFIG_FILE: &str = "site.yml";

/// A content section of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Section {
    Blog,
    Webinars,
    Academy,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Blog, Section::Webinars, Section::Academy];
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Blog => "blog",
            Section::Webinars => "webinars",
            Section::Academy => "academy",
        };
        f.write_str(name)
    }
}

/// The site being built
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Site root; every configured directory is relative to it
    pub base_dir: PathBuf,
}

impl Site {
    /// Open the site rooted at a directory, reading `site.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)
                .with_context(|| format!("Failed to load {:?}", config_path))?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self { config, base_dir })
    }

    /// Use an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.templates_dir)
    }

    /// Markdown source directory of a section
    pub fn content_dir(&self, section: Section) -> PathBuf {
        let dirs = &self.config.content;
        let rel = match section {
            Section::Blog => &dirs.blog,
            Section::Webinars => &dirs.webinars,
            Section::Academy => &dirs.academy,
        };
        self.base_dir.join(rel)
    }

    /// Generated pages directory of a section
    pub fn output_dir(&self, section: Section) -> PathBuf {
        let dirs = &self.config.output;
        let rel = match section {
            Section::Blog => &dirs.blog,
            Section::Webinars => &dirs.webinars,
            Section::Academy => &dirs.academy,
        };
        self.base_dir.join(rel)
    }

    /// Build every section
    pub fn build(&self) -> Result<BuildReport> {
        commands::build::run(self)
    }

    /// Remove generated pages
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Scaffold a new content file
    pub fn new_content(
        &self,
        section: Section,
        title: &str,
        category: Option<&str>,
    ) -> Result<PathBuf> {
        commands::new::create_content(self, section, title, category)
    }
}
