//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    #[serde(default)]
    pub author: AuthorConfig,

    // URL
    pub url: String,
    /// Path prefix the site is served under, e.g. `/blog`
    pub path_prefix: String,

    // Directory
    pub content_dir: String,
    pub assets_dir: String,
    pub public_dir: String,

    // Writing
    pub date_format: String,
    pub excerpt_length: usize,
    #[serde(default)]
    pub avatar: AvatarConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "AM77 blog".to_string(),
            description: String::new(),
            language: "en".to_string(),
            author: AuthorConfig::default(),

            url: "http://localhost:4000".to_string(),
            path_prefix: String::new(),

            content_dir: "content/blog".to_string(),
            assets_dir: "content/assets".to_string(),
            public_dir: "public".to_string(),

            date_format: "MMMM DD, YYYY".to_string(),
            excerpt_length: 140,
            avatar: AvatarConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config: SiteConfig =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(path.to_path_buf(), e))?;
        config.path_prefix = normalize_prefix(&config.path_prefix);
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// The path of the home page, e.g. `/blog/`
    pub fn root_path(&self) -> String {
        format!("{}/", self.path_prefix)
    }
}

/// Normalise a path prefix to either `""` or `/segment` without a trailing slash
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Author shown in the identity card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub summary: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "Mohamed Amine Griche".to_string(),
            summary: "Full-stack web developer writing about JavaScript and the web.".to_string(),
        }
    }
}

/// Avatar asset lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Regular expression matched against the paths, relative to the site
    /// directory, of every non-markdown file under `content_dir` and `assets_dir`
    pub pattern: String,
    pub width: u32,
    pub height: u32,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            pattern: "profile-pic.jpg".to_string(),
            width: 250,
            height: 250,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/blog");
        assert_eq!(config.avatar.width, 250);
        assert_eq!(config.root_path(), "/");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author:
  name: Test User
path_prefix: /blog/
excerpt_length: 80
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author.name, "Test User");
        assert_eq!(config.author.summary, AuthorConfig::default().summary);
        assert_eq!(config.excerpt_length, 80);
        assert_eq!(config.avatar.pattern, "profile-pic.jpg");
    }

    #[test]
    fn test_load_normalizes_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "path_prefix: blog/\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.path_prefix, "/blog");
        assert_eq!(config.root_path(), "/blog/");
    }

    #[test]
    fn test_load_reports_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: [unclosed\n").unwrap();

        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(..)));
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix("/blog"), "/blog");
        assert_eq!(normalize_prefix("blog/"), "/blog");
    }
}
