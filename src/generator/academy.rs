//! Academy section: ordered guides and tutorials with sidebar navigation

use anyhow::Result;

use super::{BuildReport, Generator};
use crate::content::{sort_by_order, ContentRecord};
use crate::templates::{Context, TemplateName};
use crate::Section;

/// Category folders under the academy content root, in index order
pub const CATEGORIES: [&str; 2] = ["guides", "tutorials"];

const DEFAULT_DURATION: &str = "5 min";
const DEFAULT_LEVEL: &str = "Beginner";

const ARROW_ICON: &str = r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M5 12h14M12 5l7 7-7 7"/></svg>"#;
const CLOCK_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"/><polyline points="12 6 12 12 16 14"/></svg>"#;
const BOOK_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M2 3h6a4 4 0 0 1 4 4v14a3 3 0 0 0-3-3H2z"/><path d="M22 3h-6a4 4 0 0 0-4 4v14a3 3 0 0 1 3-3h7z"/></svg>"#;

impl Generator {
    pub(super) fn build_academy(&self, report: &mut BuildReport) -> Result<()> {
        let content_root = self.site.content_dir(Section::Academy);
        let output_root = self.site.output_dir(Section::Academy);

        let mut grids = Vec::with_capacity(CATEGORIES.len());

        for category in CATEGORIES {
            let Some(mut articles) = self.loader.collect_optional(&content_root.join(category))?
            else {
                tracing::debug!("No academy {} directory, skipping", category);
                grids.push(String::new());
                continue;
            };
            sort_by_order(&mut articles);

            let output_dir = output_root.join(category);
            for index in 0..articles.len() {
                let html = self.render_article(&articles, index)?;
                let path = output_dir.join(format!("{}.html", articles[index].slug));
                self.write_page(Section::Academy, &path, &html, report)?;
            }

            grids.push(self.category_grid(&articles, category));
        }

        let mut context = Context::new();
        for (category, grid) in CATEGORIES.iter().zip(grids) {
            context.insert(&format!("{}_html", category), grid);
        }
        let html = self.templates.render(TemplateName::AcademyIndex, &context)?;
        self.write_page(
            Section::Academy,
            &output_root.join("index.html"),
            &html,
            report,
        )?;

        Ok(())
    }

    fn render_article(&self, articles: &[ContentRecord], index: usize) -> Result<String> {
        let article = &articles[index];

        let mut context = Context::new();
        context
            .insert("title", self.field(article, "title"))
            .insert("description", self.field(article, "description"))
            .insert("category", self.field(article, "category"))
            .insert("body", article.body.as_str())
            .insert("sidebar_links", self.sidebar_links(articles, index))
            .insert("next_lesson_button", self.next_lesson_button(articles, index))
            .insert("video_player", self.video_player(article));
        self.templates.render(TemplateName::AcademyArticle, &context)
    }

    /// Every article in the category, the current one marked active
    fn sidebar_links(&self, articles: &[ContentRecord], current: usize) -> String {
        articles
            .iter()
            .enumerate()
            .map(|(i, a)| {
                format!(
                    r#"<a href="{}.html" class="sidebar-link {}">{}</a>"#,
                    self.text(&a.slug),
                    if i == current { "active" } else { "" },
                    self.text(&a.display_title())
                )
            })
            .collect()
    }

    /// Link to the following article, empty for the last one
    fn next_lesson_button(&self, articles: &[ContentRecord], index: usize) -> String {
        match articles.get(index + 1) {
            Some(next) => format!(
                r#"<a href="{}.html" class="btn-next-lesson">
                 <span>Next: {}</span>
                 {}
               </a>"#,
                self.text(&next.slug),
                self.text(&next.display_title()),
                ARROW_ICON
            ),
            None => String::new(),
        }
    }

    fn video_player(&self, article: &ContentRecord) -> String {
        match self
            .field_opt(article, "video_url")
            .filter(|url| !url.trim().is_empty())
        {
            Some(url) => format!(
                r#"<div class="academy-video-container">
                 <iframe src="{}" allowfullscreen></iframe>
               </div>"#,
                url
            ),
            None => String::new(),
        }
    }

    /// Index cards for one category, linking into its subdirectory
    fn category_grid(&self, articles: &[ContentRecord], folder: &str) -> String {
        articles
            .iter()
            .map(|article| {
                format!(
                    r#"
        <a href="{folder}/{slug}.html" class="academy-card">
            <h3>{title}</h3>
            <p>{description}</p>
            <div class="academy-card-meta">
                <div class="meta-item">
                    {clock}
                    <span>{duration}</span>
                </div>
                <div class="meta-item">
                    {book}
                    <span>{level}</span>
                </div>
                <div class="card-arrow">
                    {arrow}
                </div>
            </div>
        </a>
    "#,
                    folder = folder,
                    slug = self.text(&article.slug),
                    title = self.field(article, "title"),
                    description = self.field(article, "description"),
                    clock = CLOCK_ICON,
                    duration = self.text(&article.attr_or("duration", DEFAULT_DURATION)),
                    book = BOOK_ICON,
                    level = self.text(&article.attr_or("level", DEFAULT_LEVEL)),
                    arrow = ARROW_ICON,
                )
            })
            .collect()
    }
}
