//! Webinars section: a single page seeded with the latest episode.
//! Other episodes are swapped in client-side from the embedded JSON blob.

use anyhow::Result;
use serde_json::{Map, Value};

use super::{BuildReport, Generator};
use crate::content::{sort_by_date_desc, ContentRecord};
use crate::helpers::{date_json, script_safe_json};
use crate::templates::{Context, TemplateName};
use crate::Section;

impl Generator {
    pub(super) fn build_webinars(&self, report: &mut BuildReport) -> Result<()> {
        let mut episodes = self
            .loader
            .collect(&self.site.content_dir(Section::Webinars))?;
        sort_by_date_desc(&mut episodes);

        let episode_list: String = episodes
            .iter()
            .enumerate()
            .map(|(index, episode)| self.episode_list_item(index, episode))
            .collect();

        let mut context = Context::new();
        context
            .insert("episode_list_html", episode_list)
            .insert("episodes_json", episodes_json(&episodes)?);

        match episodes.first() {
            Some(latest) => {
                context
                    .insert("latest_title", self.field(latest, "title"))
                    .insert("latest_type", self.field(latest, "type"))
                    .insert("latest_guest", self.field(latest, "guest"))
                    .insert("latest_date", self.long_date(latest))
                    .insert("latest_duration", self.field(latest, "duration"))
                    .insert("latest_image", self.field(latest, "image"))
                    .insert("latest_audio", self.field(latest, "audio_url"))
                    .insert("latest_body", latest.body.as_str());
            }
            None => {
                for key in [
                    "latest_title",
                    "latest_type",
                    "latest_guest",
                    "latest_date",
                    "latest_duration",
                    "latest_image",
                    "latest_audio",
                    "latest_body",
                ] {
                    context.insert_opt(key, None);
                }
            }
        }

        let html = self.templates.render(TemplateName::Webinars, &context)?;
        let path = self.site.output_dir(Section::Webinars).join("index.html");
        self.write_page(Section::Webinars, &path, &html, report)?;

        tracing::debug!("Rendered {} webinar episodes", episodes.len());
        Ok(())
    }

    /// Clickable entry; the index is what `loadEpisodeDetails` looks up
    fn episode_list_item(&self, index: usize, episode: &ContentRecord) -> String {
        format!(
            r#"
    <div class="episode-list-item {active}" onclick="loadEpisodeDetails({index})">
        <div class="episode-thumb-small" style="background-image: url('{image}')"></div>
        <div class="episode-info-small">
            <h4>{title}</h4>
            <p>{kind} • {duration}</p>
        </div>
    </div>
"#,
            active = if index == 0 { "active" } else { "" },
            index = index,
            image = self.field(episode, "image"),
            title = self.field(episode, "title"),
            kind = self.field(episode, "type"),
            duration = self.field(episode, "duration"),
        )
    }
}

/// Every episode as a JSON object: its front-matter, then `body`, `slug`
/// and `dateObj`, safe to drop into a `<script>` element
fn episodes_json(episodes: &[ContentRecord]) -> Result<String> {
    let mut list = Vec::with_capacity(episodes.len());

    for episode in episodes {
        let mut object = Map::new();
        for (key, value) in &episode.front_matter.attributes {
            object.insert(key.clone(), serde_json::to_value(value)?);
        }
        object.insert("body".to_string(), Value::String(episode.body.clone()));
        object.insert("slug".to_string(), Value::String(episode.slug.clone()));
        object.insert(
            "dateObj".to_string(),
            episode
                .date
                .map(|d| Value::String(date_json(&d)))
                .unwrap_or(Value::Null),
        );
        list.push(Value::Object(object));
    }

    Ok(script_safe_json(&serde_json::to_string(&list)?))
}
