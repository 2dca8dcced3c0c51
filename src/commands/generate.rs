//! Generate static files

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::{BuildReport, Generator};
use crate::{Quill, CONFIG_FILE};

/// Load the content and generate the site
pub fn run(quill: &Quill) -> Result<BuildReport> {
    let start = Instant::now();

    let index = quill.open_index()?;
    let report = Generator::new(quill).generate(&index)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(report)
}

/// Watch for file changes and regenerate
pub async fn watch(quill: &Quill) -> Result<()> {
    let quill = quill.clone();
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    tokio::task::spawn_blocking(move || rebuild_on_change(&quill, || {})).await?
}

/// Rebuild the site after every debounced batch of source changes
///
/// Blocks the calling thread. `on_rebuild` runs after each successful build.
pub fn rebuild_on_change(quill: &Quill, mut on_rebuild: impl FnMut()) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let watched = [
        (quill.content_dir(), RecursiveMode::Recursive),
        (
            quill.base_dir.join(&quill.config.assets_dir),
            RecursiveMode::Recursive,
        ),
        (quill.base_dir.join(CONFIG_FILE), RecursiveMode::NonRecursive),
    ];
    for (path, mode) in &watched {
        if path.exists() {
            debouncer.watcher().watch(path, *mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let relevant: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
        if relevant.is_empty() {
            continue;
        }
        for event in &relevant {
            tracing::info!("File changed: {}", event.path.display());
        }

        // Config edits take effect on the next build
        let result = Quill::new(&quill.base_dir)
            .map_err(anyhow::Error::from)
            .and_then(|q| run(&q));
        match result {
            Ok(_) => {
                tracing::info!("Regenerated successfully");
                on_rebuild();
            }
            Err(e) => tracing::error!("Generation failed: {:#}", e),
        }
    }

    Ok(())
}

/// Ignore editor and VCS noise
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git") && !path_str.contains(".DS_Store") && !path_str.ends_with('~')
}
