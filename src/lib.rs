//! quill: the static front-end of a personal blog
//!
//! Markdown posts are loaded into a content index, rendered through a small
//! set of page components (a listing, a layout shell, an author card) into a
//! markup tree, and written out as static HTML.

pub mod commands;
pub mod components;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod markup;
pub mod server;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// A blog site on disk
#[derive(Debug, Clone)]
pub struct Quill {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Quill {
    /// Open the site rooted at a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let public_dir = base_dir.join(&config.public_dir);
        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// Directory holding the markdown posts
    pub fn content_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.content_dir)
    }

    /// Load the content index from disk
    pub fn open_index(&self) -> Result<content::SourceIndex> {
        content::SourceIndex::open(&self.config, &self.base_dir)
    }

    /// Generate the static site
    pub fn generate(&self) -> anyhow::Result<generator::BuildReport> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> anyhow::Result<PathBuf> {
        commands::new::create_post(self, title, None)
    }
}
