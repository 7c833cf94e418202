//! List site content in build order

use anyhow::Result;

use crate::content::{sort_by_date_desc, sort_by_order, ContentLoader, ContentRecord};
use crate::generator::CATEGORIES;
use crate::{Section, Site};

/// Print one section, or all of them
pub fn run(site: &Site, section: Option<Section>) -> Result<()> {
    let sections = match section {
        Some(s) => vec![s],
        None => Section::ALL.to_vec(),
    };

    for section in sections {
        for line in listing(site, section)? {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Lines describing a section's content, ordered as the build orders it
pub fn listing(site: &Site, section: Section) -> Result<Vec<String>> {
    let loader = ContentLoader::new(&site.config);
    let mut lines = Vec::new();

    match section {
        Section::Blog | Section::Webinars => {
            let mut records = loader.collect(&site.content_dir(section))?;
            sort_by_date_desc(&mut records);
            lines.push(format!("{} ({}):", heading(section), records.len()));
            lines.extend(records.iter().map(dated_line));
        }
        Section::Academy => {
            let root = site.content_dir(section);
            for category in CATEGORIES {
                let Some(mut records) = loader.collect_optional(&root.join(category))? else {
                    continue;
                };
                sort_by_order(&mut records);
                lines.push(format!("Academy {} ({}):", category, records.len()));
                lines.extend(records.iter().map(|r| {
                    format!("  {:>3} - {} [{}]", r.order(), r.display_title(), r.slug)
                }));
            }
        }
    }

    Ok(lines)
}

fn heading(section: Section) -> &'static str {
    match section {
        Section::Blog => "Blog posts",
        Section::Webinars => "Webinar episodes",
        Section::Academy => "Academy",
    }
}

fn dated_line(record: &ContentRecord) -> String {
    let date = record
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());
    format!("  {} - {} [{}]", date, record.display_title(), record.slug)
}
