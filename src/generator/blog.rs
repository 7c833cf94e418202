//! Blog section: one page per post plus an index with a featured card

use anyhow::Result;

use super::{BuildReport, Generator};
use crate::content::{sort_by_date_desc, ContentRecord};
use crate::templates::{Context, TemplateName};
use crate::Section;

impl Generator {
    pub(super) fn build_blog(&self, report: &mut BuildReport) -> Result<()> {
        let mut posts = self
            .loader
            .collect(&self.site.content_dir(Section::Blog))?;
        sort_by_date_desc(&mut posts);

        let output_dir = self.site.output_dir(Section::Blog);

        for post in &posts {
            let html = self.render_post_page(post)?;
            let path = output_dir.join(format!("{}.html", post.slug));
            self.write_page(Section::Blog, &path, &html, report)?;
        }

        let html = self.render_blog_index(&posts)?;
        self.write_page(Section::Blog, &output_dir.join("index.html"), &html, report)?;

        Ok(())
    }

    fn render_post_page(&self, post: &ContentRecord) -> Result<String> {
        let mut context = Context::new();
        context
            .insert("title", self.field(post, "title"))
            .insert("date", self.long_date(post))
            .insert("author", self.field(post, "author"))
            .insert("image", self.field(post, "image"))
            .insert("body", post.body.as_str());
        let content = self.templates.render(TemplateName::BlogPost, &context)?;

        let mut layout = Context::new();
        layout
            .insert("title", self.field(post, "title"))
            .insert("description", self.field(post, "description"))
            .insert("content", content);
        self.templates.render(TemplateName::Layout, &layout)
    }

    fn render_blog_index(&self, posts: &[ContentRecord]) -> Result<String> {
        let featured = posts
            .first()
            .map(|post| self.featured_card(post))
            .unwrap_or_default();
        let others: String = posts
            .iter()
            .skip(1)
            .map(|post| self.post_card(post))
            .collect();

        let mut context = Context::new();
        context.insert("featuredPost", featured).insert("posts", others);
        let content = self.templates.render(TemplateName::BlogIndex, &context)?;

        let mut layout = Context::new();
        layout
            .insert("title", self.text(&self.site.config.blog_title))
            .insert("description", self.text(&self.site.config.blog_description))
            .insert("content", content);
        self.templates.render(TemplateName::Layout, &layout)
    }

    /// Card for the most recent post
    fn featured_card(&self, post: &ContentRecord) -> String {
        format!(
            r#"
    <a href="{slug}.html" class="featured-post-card">
        <div class="featured-post-image" style="background-image: url('{image}')"></div>
        <div class="featured-post-content">
            <div class="featured-badge">Latest Article</div>
            <h2 class="featured-post-title">{title}</h2>
            <p class="featured-post-excerpt">{description}</p>
            <div class="featured-post-meta">
                {date} • {author}
            </div>
        </div>
    </a>
"#,
            slug = self.text(&post.slug),
            image = self.field(post, "image"),
            title = self.field(post, "title"),
            description = self.field(post, "description"),
            date = self.long_date(post),
            author = self.field(post, "author"),
        )
    }

    /// Card for every post after the featured one
    fn post_card(&self, post: &ContentRecord) -> String {
        format!(
            r#"
    <a href="{slug}.html" class="blog-card">
        <div class="blog-card-image" style="background-image: url('{image}')"></div>
        <div class="blog-card-content">
            <div class="blog-card-title">{title}</div>
            <div class="blog-card-excerpt">{description}</div>
            <div class="blog-card-meta">
                {date} • {author}
            </div>
        </div>
    </a>
"#,
            slug = self.text(&post.slug),
            image = self.field(post, "image"),
            title = self.field(post, "title"),
            description = self.field(post, "description"),
            date = self.long_date(post),
            author = self.field(post, "author"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;

    fn section<'a>(page: &'a str, class: &str) -> &'a str {
        let open = format!("<section class=\"{}\">", class);
        let start = page.find(&open).unwrap() + open.len();
        let end = start + page[start..].find("</section>").unwrap();
        &page[start..end]
    }

    #[test]
    fn test_featured_is_latest_post() {
        let (dir, site) = fixture_site();
        let root = dir.path();
        write_content(
            root,
            "content/blog/new-year.md",
            "title: New Year\ndate: 2024-01-01\nauthor: Ana\ndescription: Resolutions",
            "January words",
        );
        write_content(
            root,
            "content/blog/summer.md",
            "title: Summer\ndate: 2024-06-01\nauthor: Ben\nimage: /img/sun.png",
            "June words",
        );

        let mut report = BuildReport::default();
        Generator::new(&site).unwrap().build_blog(&mut report).unwrap();
        assert_eq!(report.count(Section::Blog), 3);

        let index = read(root, "blog/index.html");
        let featured = section(&index, "featured");
        assert!(featured.contains(r#"<a href="summer.html" class="featured-post-card">"#));
        assert!(featured.contains("June 1, 2024 • Ben"));
        assert!(featured.contains("url('/img/sun.png')"));
        assert!(!featured.contains("new-year.html"));

        let list = section(&index, "list");
        assert_eq!(list.matches("class=\"blog-card\"").count(), 1);
        assert!(list.contains(r#"<a href="new-year.html" class="blog-card">"#));
        assert!(list.contains("Resolutions"));

        assert!(index.contains("<title>Blog</title>"));
        assert!(index.contains("Latest insights and updates from Inspektra"));
    }

    #[test]
    fn test_post_page_wrapped_in_layout() {
        let (dir, site) = fixture_site();
        let root = dir.path();
        write_content(
            root,
            "content/blog/summer.md",
            "title: Summer\ndate: 2024-06-01\nauthor: Ben\ndescription: Hot takes",
            "Some **bold** text",
        );

        Generator::new(&site)
            .unwrap()
            .build_blog(&mut BuildReport::default())
            .unwrap();

        let page = read(root, "blog/summer.html");
        assert!(page.starts_with("<html><head><title>Summer</title>"));
        assert!(page.contains("<meta content=\"Hot takes\">"));
        assert!(page.contains("<h1>Summer</h1>"));
        assert!(page.contains("June 1, 2024 by Ben"));
        assert!(page.contains("<strong>bold</strong>"));
        // Missing image becomes empty, not a leftover token
        assert!(page.contains("<img src=\"\">"));
    }

    #[test]
    fn test_empty_blog() {
        let (dir, site) = fixture_site();
        let root = dir.path();

        let mut report = BuildReport::default();
        Generator::new(&site).unwrap().build_blog(&mut report).unwrap();

        assert_eq!(report.count(Section::Blog), 1);
        let index = read(root, "blog/index.html");
        assert_eq!(section(&index, "featured"), "");
        assert_eq!(section(&index, "list"), "");

        let files: Vec<_> = fs::read_dir(root.join("blog")).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_three_posts_in_date_order() {
        let (dir, site) = fixture_site();
        let root = dir.path();
        write_content(root, "content/blog/a.md", "title: A\ndate: 2023-05-01", "");
        write_content(root, "content/blog/b.md", "title: B\ndate: 2024-02-01", "");
        write_content(root, "content/blog/c.md", "title: C\ndate: 2023-11-01", "");

        Generator::new(&site)
            .unwrap()
            .build_blog(&mut BuildReport::default())
            .unwrap();

        let index = read(root, "blog/index.html");
        assert!(section(&index, "featured").contains("b.html"));
        let list = section(&index, "list");
        let c = list.find("c.html").unwrap();
        let a = list.find("a.html").unwrap();
        assert!(c < a);
    }

    #[test]
    fn test_escaped_slug_in_card_links() {
        let mut config = SiteConfig::default();
        config.build.escape_front_matter = true;
        let (dir, site) = fixture_site_with(config);
        let root = dir.path();
        write_content(root, "content/blog/say\"hi.md", "title: Quote\ndate: 2024-02-01", "");
        write_content(root, "content/blog/plain.md", "title: Plain\ndate: 2024-01-01", "");

        Generator::new(&site)
            .unwrap()
            .build_blog(&mut BuildReport::default())
            .unwrap();

        let index = read(root, "blog/index.html");
        assert!(index.contains(r#"<a href="say&quot;hi.html" class="featured-post-card">"#));
        assert!(index.contains(r#"<a href="plain.html" class="blog-card">"#));
        assert!(root.join("blog/say\"hi.html").exists());
    }
}
