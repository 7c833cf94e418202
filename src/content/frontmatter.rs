//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde_yaml::Value;
use thiserror::Error;

/// Errors raised while splitting front-matter from a content file
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front-matter must be a mapping of key: value pairs")]
    NotAMapping,
}

/// Front-matter attributes of a content file, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub attributes: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// The block must open on the very first line with `---` and close with a
    /// line holding only `---` (or `...`). Anything else means the file has no
    /// front-matter and the whole text is body.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(rest) = strip_delimiter_line(content, "---") else {
            return Ok((FrontMatter::default(), content));
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            let trimmed = line.trim_end();
            if trimmed == "---" || trimmed == "..." {
                let yaml_content = &rest[..offset];
                let remaining = &rest[offset + line.len()..];
                let remaining = remaining.trim_start_matches(['\n', '\r']);
                return Ok((Self::from_yaml(yaml_content)?, remaining));
            }
            offset += line.len();
        }

        // No closing delimiter, treat as no front-matter
        Ok((FrontMatter::default(), content))
    }

    fn from_yaml(yaml_content: &str) -> Result<Self, FrontMatterError> {
        if yaml_content.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        let value: Value = serde_yaml::from_str(yaml_content)?;
        let attributes = match value {
            // A block holding only comments
            Value::Null => IndexMap::new(),
            // Scalar keys like `2024:` or `true:` read as their text
            Value::Mapping(map) => map
                .into_iter()
                .filter_map(|(key, value)| value_to_string(&key).map(|key| (key, value)))
                .collect(),
            _ => return Err(FrontMatterError::NotAMapping),
        };

        Ok(Self { attributes })
    }

    /// Raw YAML value of an attribute
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Attribute rendered as text; null and missing attributes are `None`
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_to_string)
    }

    /// Attribute read as a number, accepting numeric strings
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        let n = match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        n.is_finite().then_some(n)
    }

    /// Whether the file is marked as a draft
    pub fn is_draft(&self) -> bool {
        matches!(self.get("draft"), Some(Value::Bool(true)))
    }

    /// Parse the date attribute
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.get_str("date").and_then(|s| parse_date_string(&s))
    }
}

/// Only an exact `---` line opens a block; `----` is a Markdown rule
fn strip_delimiter_line<'a>(content: &'a str, delimiter: &str) -> Option<&'a str> {
    let rest = content.strip_prefix(delimiter)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Render a YAML scalar the way it would read in a template
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(items) => Some(
            items
                .iter()
                .map(|v| value_to_string(v).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Mapping(_) => None,
        Value::Tagged(tagged) => value_to_string(&tagged.value),
    }
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, normalized to UTC
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}
