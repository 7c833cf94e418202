//! Generator module - renders the blog, webinar and academy sections to HTML

mod academy;
mod blog;
mod webinars;

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{ContentLoader, ContentRecord};
use crate::helpers::{escape_html, format_date, full_date};
use crate::templates::TemplateSet;
use crate::{Section, Site};

pub use academy::CATEGORIES;

/// Pages written by one build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub pages: Vec<(Section, PathBuf)>,
}

impl BuildReport {
    /// Number of pages written for a section
    pub fn count(&self, section: Section) -> usize {
        self.pages.iter().filter(|(s, _)| *s == section).count()
    }

    pub fn total(&self) -> usize {
        self.pages.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} pages ({} blog, {} webinars, {} academy)",
            self.total(),
            self.count(Section::Blog),
            self.count(Section::Webinars),
            self.count(Section::Academy)
        )
    }
}

/// Static site generator using placeholder templates
pub struct Generator {
    site: Site,
    templates: TemplateSet,
    loader: ContentLoader,
}

impl Generator {
    /// Create a new generator, loading every template up front
    pub fn new(site: &Site) -> Result<Self> {
        let templates =
            TemplateSet::load(site.templates_dir(), site.config.templates.unresolved)?;
        let loader = ContentLoader::new(&site.config);

        Ok(Self {
            site: site.clone(),
            templates,
            loader,
        })
    }

    /// Generate every section in order: blog, webinars, academy
    pub fn generate(&self) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        tracing::info!("Building Blog...");
        self.build_blog(&mut report)?;
        tracing::info!("Blog built successfully ({} pages)", report.count(Section::Blog));

        tracing::info!("Building Webinars...");
        self.build_webinars(&mut report)?;
        tracing::info!("Webinars built successfully");

        tracing::info!("Building Academy...");
        self.build_academy(&mut report)?;
        tracing::info!(
            "Academy built successfully ({} pages)",
            report.count(Section::Academy)
        );

        Ok(report)
    }

    /// Front-matter value ready for HTML, empty when missing
    fn field(&self, record: &ContentRecord, key: &str) -> String {
        self.field_opt(record, key).unwrap_or_default()
    }

    fn field_opt(&self, record: &ContentRecord, key: &str) -> Option<String> {
        record.attr(key).map(|v| self.text(&v))
    }

    /// Apply front-matter escaping if enabled
    fn text(&self, value: &str) -> String {
        if self.site.config.build.escape_front_matter {
            escape_html(value)
        } else {
            value.to_string()
        }
    }

    /// Human-readable date, empty when the record has none
    fn long_date(&self, record: &ContentRecord) -> String {
        record
            .date
            .map(|date| {
                format_date(&date, &self.site.config.date_format)
                    .unwrap_or_else(|| full_date(&date))
            })
            .unwrap_or_default()
    }

    /// Write a page, creating its directory on demand
    fn write_page(
        &self,
        section: Section,
        path: &Path,
        html: &str,
        report: &mut BuildReport,
    ) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Generated: {:?}", path);

        report.pages.push((section, path.to_path_buf()));
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::config::{SiteConfig, UnresolvedPolicy};
    use crate::templates::TemplateError;

    #[test]
    fn test_generate_all_sections() {
        let (dir, site) = fixture_site();
        let root = dir.path();
        write_content(root, "content/blog/hello.md", "title: Hello\ndate: 2024-01-01", "Hi");
        write_content(
            root,
            "content/webinars/ep1.md",
            "title: Ep 1\ndate: 2024-02-01",
            "Talk",
        );
        write_content(
            root,
            "content/academy/guides/start.md",
            "title: Start\norder: 1",
            "Go",
        );

        let report = Generator::new(&site).unwrap().generate().unwrap();

        assert_eq!(report.count(Section::Blog), 2);
        assert_eq!(report.count(Section::Webinars), 1);
        assert_eq!(report.count(Section::Academy), 2);
        assert_eq!(report.total(), 5);
        assert!(root.join("blog/hello.html").exists());
        assert!(root.join("webinars/index.html").exists());
        assert!(root.join("academy/guides/start.html").exists());
        assert!(root.join("academy/index.html").exists());
        assert_eq!(
            report.summary(),
            "5 pages (2 blog, 1 webinars, 2 academy)"
        );
    }

    #[test]
    fn test_missing_blog_dir_aborts_build() {
        let (dir, site) = fixture_site();
        fs::remove_dir_all(dir.path().join("content/blog")).unwrap();

        let err = Generator::new(&site).unwrap().generate().unwrap_err();
        assert!(format!("{:#}", err).contains("content/blog"));
        assert!(!dir.path().join("webinars/index.html").exists());
    }

    #[test]
    fn test_missing_template_fails_before_writing() {
        let (dir, site) = fixture_site();
        fs::remove_file(dir.path().join("templates/academy-article.html")).unwrap();

        let err = Generator::new(&site).err().unwrap();
        assert!(err.downcast_ref::<TemplateError>().is_some());
        assert!(!dir.path().join("blog").exists());
    }

    #[test]
    fn test_unresolved_policy_error_aborts() {
        let mut config = SiteConfig::default();
        config.templates.unresolved = UnresolvedPolicy::Error;
        let (dir, site) = fixture_site_with(config);
        fs::write(
            dir.path().join("templates/layout.html"),
            "{{content}}{{analytics_snippet}}",
        )
        .unwrap();

        let err = Generator::new(&site).unwrap().generate().unwrap_err();
        assert!(format!("{}", err).contains("analytics_snippet"));
    }

    #[test]
    fn test_escape_front_matter() {
        let mut config = SiteConfig::default();
        config.build.escape_front_matter = true;
        let (dir, site) = fixture_site_with(config);
        write_content(
            dir.path(),
            "content/blog/x.md",
            "title: \"<script>alert(1)</script>\"\ndate: 2024-01-01",
            "<em>body html stays</em>",
        );

        Generator::new(&site).unwrap().generate().unwrap();
        let page = read(dir.path(), "blog/x.html");
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!page.contains("<script>alert(1)"));
        assert!(page.contains("<em>body html stays</em>"));
    }

    #[test]
    fn test_custom_date_format() {
        let config = SiteConfig {
            date_format: "%d/%m/%Y".to_string(),
            ..Default::default()
        };
        let (dir, site) = fixture_site_with(config);
        write_content(dir.path(), "content/blog/x.md", "title: X\ndate: 2024-06-01", "");

        Generator::new(&site).unwrap().generate().unwrap();
        assert!(read(dir.path(), "blog/x.html").contains("01/06/2024 by"));
    }
}
