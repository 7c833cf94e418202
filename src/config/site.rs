//! Site configuration (site.yml)

use anyhow::{bail, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub blog_title: String,
    pub blog_description: String,

    /// strftime pattern used for human-readable dates
    pub date_format: String,

    // Directory
    pub templates_dir: String,
    #[serde(default)]
    pub content: ContentDirs,
    #[serde(default)]
    pub output: OutputDirs,

    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Inspektra".to_string(),
            blog_title: "Blog".to_string(),
            blog_description: "Latest insights and updates from Inspektra".to_string(),

            date_format: "%B %-d, %Y".to_string(),

            templates_dir: "templates".to_string(),
            content: ContentDirs::default(),
            output: OutputDirs::default(),

            templates: TemplatesConfig::default(),
            build: BuildConfig::default(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail halfway through a build
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            bail!("Invalid date_format: {:?}", self.date_format);
        }
        Ok(())
    }
}

/// Where each section's Markdown sources live, relative to the site root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentDirs {
    pub blog: String,
    pub webinars: String,
    pub academy: String,
}

impl Default for ContentDirs {
    fn default() -> Self {
        Self {
            blog: "content/blog".to_string(),
            webinars: "content/webinars".to_string(),
            academy: "content/academy".to_string(),
        }
    }
}

/// Where each section's generated pages go, relative to the site root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputDirs {
    pub blog: String,
    pub webinars: String,
    pub academy: String,
}

impl Default for OutputDirs {
    fn default() -> Self {
        Self {
            blog: "blog".to_string(),
            webinars: "webinars".to_string(),
            academy: "academy".to_string(),
        }
    }
}

/// What to do with `{{name}}` tokens that no builder supplied a value for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Leave the token in the output silently
    Keep,
    /// Leave the token in the output and log a warning
    Warn,
    /// Abort the build
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    pub unresolved: UnresolvedPolicy,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            unresolved: UnresolvedPolicy::Warn,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Include content marked `draft: true`
    pub drafts: bool,
    /// HTML-escape front-matter values before they reach a template.
    /// Rendered Markdown bodies are inserted as-is either way.
    pub escape_front_matter: bool,
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub highlight: bool,
    pub line_numbers: bool,
    pub theme: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            highlight: false,
            line_numbers: false,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}
