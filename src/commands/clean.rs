//! Remove generated pages

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::loader::{markdown_files, slug_for};
use crate::generator::CATEGORIES;
use crate::{Section, Site};

/// Delete the pages a build writes. Output directories may hold hand-made
/// files too, so only pages that map to a content file or an index go.
pub fn run(site: &Site) -> Result<()> {
    let mut removed = 0;

    for path in generated_pages(site)? {
        if path.is_file() {
            fs::remove_file(&path).with_context(|| format!("Failed to delete {:?}", path))?;
            tracing::debug!("Deleted: {:?}", path);
            removed += 1;
        }
    }

    // Category folders are created by the build; drop them once emptied
    let academy_out = site.output_dir(Section::Academy);
    for category in CATEGORIES {
        remove_dir_if_empty(&academy_out.join(category))?;
    }
    for section in Section::ALL {
        remove_dir_if_empty(&site.output_dir(section))?;
    }

    tracing::info!("Deleted {} generated pages", removed);
    Ok(())
}

/// Output paths a build of the current content would produce
pub fn generated_pages(site: &Site) -> Result<Vec<PathBuf>> {
    let mut pages = Vec::new();

    let blog_out = site.output_dir(Section::Blog);
    pages.extend(
        pages_for(&site.content_dir(Section::Blog))?
            .into_iter()
            .map(|slug| blog_out.join(format!("{}.html", slug))),
    );
    pages.push(blog_out.join("index.html"));

    pages.push(site.output_dir(Section::Webinars).join("index.html"));

    let academy_in = site.content_dir(Section::Academy);
    let academy_out = site.output_dir(Section::Academy);
    for category in CATEGORIES {
        let out = academy_out.join(category);
        pages.extend(
            pages_for(&academy_in.join(category))?
                .into_iter()
                .map(|slug| out.join(format!("{}.html", slug))),
        );
    }
    pages.push(academy_out.join("index.html"));

    Ok(pages)
}

fn pages_for(content_dir: &Path) -> Result<Vec<String>> {
    if !content_dir.is_dir() {
        return Ok(Vec::new());
    }
    Ok(markdown_files(content_dir)?
        .iter()
        .map(|p| slug_for(p))
        .collect())
}

fn remove_dir_if_empty(dir: &Path) -> Result<()> {
    if dir.is_dir() && fs::read_dir(dir)?.next().is_none() {
        fs::remove_dir(dir)?;
        tracing::debug!("Deleted: {:?}", dir);
    }
    Ok(())
}
