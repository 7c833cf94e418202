//! Configuration module

mod site;

pub use site::BuildConfig;
pub use site::ContentDirs;
pub use site::MarkdownConfig;
pub use site::OutputDirs;
pub use site::SiteConfig;
pub use site::TemplatesConfig;
pub use site::UnresolvedPolicy;
