//! Content module - front-matter, Markdown rendering and content records

mod frontmatter;
pub mod loader;
mod markdown;
mod record;

pub use frontmatter::{parse_date_string, value_to_string, FrontMatter, FrontMatterError};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use record::{sort_by_date_desc, sort_by_order, ContentRecord, DEFAULT_ORDER};
