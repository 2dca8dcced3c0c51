//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Quill;

/// Create `<content_dir>/<slug>/index.md` for a new post
pub fn create_post(quill: &Quill, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = match path {
        Some(p) => p.trim_matches('/').to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a post path from title {:?}", title);
    }

    let target_dir = quill.content_dir().join(&slug);
    let file_path = target_dir.join("index.md");

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::create_dir_all(&target_dir)?;

    let content = format!(
        "---\ntitle: {}\ndate: \"{}\"\ndescription: \"\"\n---\n\n",
        yaml_string(title),
        now.format("%Y-%m-%dT%H:%M:%S")
    );
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

/// Quote a scalar for YAML front-matter
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
