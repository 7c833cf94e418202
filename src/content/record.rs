//! Content record model and section orderings

use chrono::NaiveDateTime;
use std::path::PathBuf;

use super::FrontMatter;

/// Sort position for academy articles without a usable `order`
pub const DEFAULT_ORDER: f64 = 99.0;

/// One parsed Markdown file
#[derive(Debug, Clone)]
pub struct ContentRecord {
    /// Front-matter attributes
    pub front_matter: FrontMatter,

    /// Rendered HTML body
    pub body: String,

    /// File name without the `.md` extension
    pub slug: String,

    /// Full source file path
    pub source: PathBuf,

    /// Parsed `date` attribute
    pub date: Option<NaiveDateTime>,
}

impl ContentRecord {
    pub fn new(front_matter: FrontMatter, body: String, slug: String, source: PathBuf) -> Self {
        let date = front_matter.parse_date();
        Self {
            front_matter,
            body,
            slug,
            source,
            date,
        }
    }

    /// Attribute as text
    pub fn attr(&self, key: &str) -> Option<String> {
        self.front_matter.get_str(key)
    }

    /// Attribute as text, falling back when missing or blank
    pub fn attr_or(&self, key: &str, default: &str) -> String {
        self.attr(key)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    /// Explicit `order` attribute, or [`DEFAULT_ORDER`]
    pub fn order(&self) -> f64 {
        self.front_matter.get_f64("order").unwrap_or(DEFAULT_ORDER)
    }

    /// Title, or the slug when the front-matter has none
    pub fn display_title(&self) -> String {
        self.attr("title").unwrap_or_else(|| self.slug.clone())
    }
}

/// Most recent first; undated records go last in file order
pub fn sort_by_date_desc(records: &mut [ContentRecord]) {
    for record in records.iter().filter(|r| r.date.is_none()) {
        tracing::warn!(
            "No parseable date in {:?} (date: {:?}), placing it last",
            record.source,
            record.attr("date")
        );
    }
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Ascending by `order`; ties keep enumeration order
pub fn sort_by_order(records: &mut [ContentRecord]) {
    records.sort_by(|a, b| a.order().total_cmp(&b.order()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(slug: &str, front_matter: &str) -> ContentRecord {
        let content = format!("---\n{}\n---\n", front_matter);
        let (fm, _) = FrontMatter::parse(&content).unwrap();
        ContentRecord::new(fm, String::new(), slug.to_string(), PathBuf::from(slug))
    }

    fn slugs(records: &[ContentRecord]) -> Vec<&str> {
        records.iter().map(|r| r.slug.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date_desc() {
        let mut records = vec![
            record("jan", "date: 2024-01-01"),
            record("undated", "title: Later"),
            record("jun", "date: 2024-06-01"),
            record("mar", "date: 2024-03-10 08:00"),
        ];
        sort_by_date_desc(&mut records);
        assert_eq!(slugs(&records), vec!["jun", "mar", "jan", "undated"]);
    }

    #[test]
    fn test_sort_by_order_default_and_ties() {
        let mut records = vec![
            record("b", "order: 2"),
            record("none-1", "title: x"),
            record("a", "order: 1"),
            record("none-2", "title: y"),
            record("also-2", "order: \"2\""),
        ];
        sort_by_order(&mut records);
        assert_eq!(slugs(&records), vec!["a", "b", "also-2", "none-1", "none-2"]);
    }

    #[test]
    fn test_attr_or_defaults_blank_values() {
        let r = record("x", "duration: \"\"\nlevel: Advanced");
        assert_eq!(r.attr_or("duration", "5 min"), "5 min");
        assert_eq!(r.attr_or("level", "Beginner"), "Advanced");
        assert_eq!(r.attr_or("missing", "fallback"), "fallback");
    }

    #[test]
    fn test_display_title_falls_back_to_slug() {
        assert_eq!(record("intro", "order: 1").display_title(), "intro");
        assert_eq!(record("intro", "title: Welcome").display_title(), "Welcome");
    }
}
