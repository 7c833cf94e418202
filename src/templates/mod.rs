//! Page templates with `{{name}}` placeholder substitution
//!
//! Templates are plain HTML files read from the templates directory. The only
//! syntax is `{{name}}`: each token is replaced by the value the section
//! builder supplied for `name`. Substitution is a single pass over the
//! template, so values are never themselves scanned for placeholders.

use anyhow::{Context as _, Result};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::UnresolvedPolicy;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap();
}

/// Errors raised while loading or filling templates
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template {name} not found at {path:?}")]
    Missing {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("template {template} has unresolved placeholders: {}", .names.join(", "))]
    Unresolved {
        template: &'static str,
        names: Vec<String>,
    },
}

/// The fixed set of page templates a build needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    Layout,
    BlogPost,
    BlogIndex,
    Webinars,
    AcademyIndex,
    AcademyArticle,
}

impl TemplateName {
    pub const ALL: [TemplateName; 6] = [
        TemplateName::Layout,
        TemplateName::BlogPost,
        TemplateName::BlogIndex,
        TemplateName::Webinars,
        TemplateName::AcademyIndex,
        TemplateName::AcademyArticle,
    ];

    /// File name inside the templates directory
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateName::Layout => "layout.html",
            TemplateName::BlogPost => "blog-post.html",
            TemplateName::BlogIndex => "blog-index.html",
            TemplateName::Webinars => "webinars.html",
            TemplateName::AcademyIndex => "academy-index.html",
            TemplateName::AcademyArticle => "academy-article.html",
        }
    }
}

/// Values for one template render, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: IndexMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// A missing value is supplied as the empty string
    pub fn insert_opt(&mut self, key: &str, value: Option<String>) -> &mut Self {
        self.insert(key, value.unwrap_or_default())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Result of filling a template
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub html: String,
    /// Placeholder names found in the template with no value in the context,
    /// deduplicated, in order of first appearance
    pub unresolved: Vec<String>,
}

/// Replace every `{{key}}` in `template` with the context value for `key`.
/// Tokens without a value are left as they are.
pub fn render(template: &str, context: &Context) -> String {
    render_checked(template, context).html
}

/// Like [`render`], also reporting the placeholders left unresolved
pub fn render_checked(template: &str, context: &Context) -> Rendered {
    let mut unresolved: Vec<String> = Vec::new();

    let html = PLACEHOLDER
        .replace_all(template, |caps: &Captures| match context.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => {
                if !unresolved.iter().any(|n| n == &caps[1]) {
                    unresolved.push(caps[1].to_string());
                }
                caps[0].to_string()
            }
        })
        .into_owned();

    Rendered { html, unresolved }
}

/// All page templates, loaded once per build
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: HashMap<TemplateName, String>,
    policy: UnresolvedPolicy,
}

impl TemplateSet {
    /// Read every template from `dir`. Any missing file is an error.
    pub fn load<P: AsRef<Path>>(dir: P, policy: UnresolvedPolicy) -> Result<Self> {
        let dir = dir.as_ref();
        let mut templates = HashMap::new();

        for name in TemplateName::ALL {
            let path = dir.join(name.file_name());
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(TemplateError::Missing {
                        name: name.file_name(),
                        path,
                        source: e,
                    }
                    .into());
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to read template {:?}", path))
                }
            };
            tracing::debug!("Loaded template {:?}", path);
            templates.insert(name, source);
        }

        Ok(Self::from_sources(templates, policy))
    }

    /// Build a set from in-memory sources; names not given render as empty
    pub fn from_sources(templates: HashMap<TemplateName, String>, policy: UnresolvedPolicy) -> Self {
        Self { templates, policy }
    }

    pub fn source(&self, name: TemplateName) -> &str {
        self.templates.get(&name).map(String::as_str).unwrap_or("")
    }

    /// Fill a template, applying the unresolved-placeholder policy
    pub fn render(&self, name: TemplateName, context: &Context) -> Result<String> {
        let rendered = render_checked(self.source(name), context);

        if !rendered.unresolved.is_empty() {
            match self.policy {
                UnresolvedPolicy::Keep => {}
                UnresolvedPolicy::Warn => {
                    for placeholder in &rendered.unresolved {
                        tracing::warn!(
                            "Unresolved placeholder {{{{{}}}}} in {}",
                            placeholder,
                            name.file_name()
                        );
                    }
                }
                UnresolvedPolicy::Error => {
                    return Err(TemplateError::Unresolved {
                        template: name.file_name(),
                        names: rendered.unresolved,
                    }
                    .into());
                }
            }
        }

        Ok(rendered.html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context(pairs: &[(&str, &str)]) -> Context {
        let mut ctx = Context::new();
        for (k, v) in pairs {
            ctx.insert(k, *v);
        }
        ctx
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let ctx = context(&[("title", "Hello"), ("author", "Dana")]);
        assert_eq!(
            render("<h1>{{title}}</h1><title>{{title}}</title>{{author}}", &ctx),
            "<h1>Hello</h1><title>Hello</title>Dana"
        );
    }

    #[test]
    fn test_missing_value_is_empty() {
        let mut ctx = Context::new();
        ctx.insert_opt("image", None).insert_opt("title", Some("T".into()));
        assert_eq!(render("[{{image}}][{{title}}]", &ctx), "[][T]");
    }

    #[test]
    fn test_template_without_placeholders_unchanged() {
        let ctx = context(&[("title", "x")]);
        let template = "<p>{ not a {placeholder} }</p>";
        assert_eq!(render(template, &ctx), template);
    }

    #[test]
    fn test_values_not_rescanned() {
        let ctx = context(&[("body", "use {{title}} here"), ("title", "T")]);
        assert_eq!(render("{{body}}|{{title}}", &ctx), "use {{title}} here|T");
    }

    #[test]
    fn test_unresolved_reported_and_kept() {
        let ctx = context(&[("title", "T")]);
        let rendered = render_checked("{{title}} {{footer}} {{nav}} {{footer}}", &ctx);
        assert_eq!(rendered.html, "T {{footer}} {{nav}} {{footer}}");
        assert_eq!(rendered.unresolved, vec!["footer", "nav"]);
    }

    #[test]
    fn test_spaced_tokens_are_not_placeholders() {
        let ctx = context(&[("title", "T")]);
        let rendered = render_checked("{{ title }}", &ctx);
        assert_eq!(rendered.html, "{{ title }}");
        assert!(rendered.unresolved.is_empty());
    }

    #[test]
    fn test_policy_error() {
        let mut sources = HashMap::new();
        sources.insert(TemplateName::Layout, "{{content}}{{footer}}".to_string());
        let set = TemplateSet::from_sources(sources, UnresolvedPolicy::Error);

        let err = set
            .render(TemplateName::Layout, &context(&[("content", "x")]))
            .unwrap_err();
        match err.downcast_ref::<TemplateError>() {
            Some(TemplateError::Unresolved { template, names }) => {
                assert_eq!(*template, "layout.html");
                assert_eq!(names, &vec!["footer".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_policy_keep_and_warn_pass_through() {
        for policy in [UnresolvedPolicy::Keep, UnresolvedPolicy::Warn] {
            let mut sources = HashMap::new();
            sources.insert(TemplateName::Layout, "{{content}}{{footer}}".to_string());
            let set = TemplateSet::from_sources(sources, policy);
            let html = set
                .render(TemplateName::Layout, &context(&[("content", "x")]))
                .unwrap();
            assert_eq!(html, "x{{footer}}");
        }
    }

    #[test]
    fn test_load_reports_missing_template() {
        let dir = TempDir::new().unwrap();
        for name in TemplateName::ALL {
            if name != TemplateName::Webinars {
                fs::write(dir.path().join(name.file_name()), "x").unwrap();
            }
        }

        let err = TemplateSet::load(dir.path(), UnresolvedPolicy::Warn).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TemplateError>(),
            Some(TemplateError::Missing {
                name: "webinars.html",
                ..
            })
        ));

        fs::write(dir.path().join("webinars.html"), "{{episode_list_html}}").unwrap();
        let set = TemplateSet::load(dir.path(), UnresolvedPolicy::Warn).unwrap();
        assert_eq!(set.source(TemplateName::Webinars), "{{episode_list_html}}");
    }
}
