//! Scaffold a new content file

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::loader::markdown_files;
use crate::generator::CATEGORIES;
use crate::{Section, Site};

/// Create a Markdown file with the front-matter fields its section reads.
/// Academy articles are appended after the current last lesson.
pub fn create_content(
    site: &Site,
    section: Section,
    title: &str,
    category: Option<&str>,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("Cannot derive a file name from title {:?}", title);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let quoted = serde_yaml::to_string(title)?.trim_end().to_string();

    let (target_dir, front_matter) = match section {
        Section::Blog => (
            site.content_dir(section),
            format!(
                "title: {}\ndate: {}\nauthor: \nimage: \ndescription: \n",
                quoted, today
            ),
        ),
        Section::Webinars => (
            site.content_dir(section),
            format!(
                "title: {}\ndate: {}\ntype: Webinar\nguest: \nduration: \nimage: \naudio_url: \n",
                quoted, today
            ),
        ),
        Section::Academy => {
            let category = category.unwrap_or(CATEGORIES[0]);
            if !CATEGORIES.contains(&category) {
                bail!(
                    "Unknown academy category: {}. Available: {}",
                    category,
                    CATEGORIES.join(", ")
                );
            }
            let dir = site.content_dir(section).join(category);
            let order = if dir.is_dir() {
                markdown_files(&dir)?.len() + 1
            } else {
                1
            };
            (
                dir,
                format!(
                    "title: {}\ndescription: \ncategory: {}\norder: {}\nduration: 5 min\nlevel: Beginner\nvideo_url: \n",
                    quoted,
                    display_name(category),
                    order
                ),
            )
        }
    };

    fs::create_dir_all(&target_dir)
        .with_context(|| format!("Failed to create dir {:?}", target_dir))?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, format!("---\n{}---\n\n", front_matter))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// `guides` -> `Guides`
fn display_name(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
