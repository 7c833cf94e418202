//! Build the static site

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebouncedEvent};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::{BuildReport, Generator};
use crate::{Section, Site};

/// Build every section once
pub fn run(site: &Site) -> Result<BuildReport> {
    let start = Instant::now();

    let generator = Generator::new(site)?;
    let report = generator.generate()?;

    tracing::info!(
        "Generated {} in {:.2}s",
        report.summary(),
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Inputs whose changes call for a rebuild: content roots, templates, config
pub fn watch_paths(site: &Site) -> Vec<(PathBuf, RecursiveMode)> {
    let mut paths: Vec<(PathBuf, RecursiveMode)> = Section::ALL
        .iter()
        .map(|s| (site.content_dir(*s), RecursiveMode::Recursive))
        .collect();
    paths.push((site.templates_dir(), RecursiveMode::Recursive));
    paths.push((site.config_path(), RecursiveMode::NonRecursive));

    paths.into_iter().filter(|(p, _)| p.exists()).collect()
}

/// Editor droppings and VCS churn
pub fn is_relevant_change(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

/// Rebuild, re-reading `site.yml` so config edits take effect
pub fn rebuild(base_dir: &Path) -> Result<BuildReport> {
    let site = Site::new(base_dir)?;
    run(&site)
}

/// Watch for file changes and rebuild until the watcher goes away
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(300), tx)?;

    for (path, mode) in watch_paths(site) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<&DebouncedEvent> = events
                    .iter()
                    .filter(|e| is_relevant_change(&e.path))
                    .collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }
                if let Err(e) = rebuild(&site.base_dir) {
                    tracing::error!("Build failed: {:#}", e);
                }
            }
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
            }
        }
    }

    Ok(())
}
