//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Site
title: My Blog
description: ''
language: en
author:
  name: John Doe
  summary: Writes about the web.

# URL
url: http://localhost:4000
path_prefix: ''

# Directory
content_dir: content/blog
assets_dir: content/assets
public_dir: public

# Writing
date_format: MMMM DD, YYYY
excerpt_length: 140
avatar:
  pattern: profile-pic.jpg
  width: 250
  height: 250
highlight:
  theme: base16-ocean.dark
  line_number: true
"#;

const HELLO_WORLD: &str = r#"---
title: Hello World
date: "2015-05-01T22:12:03.284Z"
description: "Hello World"
---

This is my first post on my new blog! How exciting!

```js
console.log("hello")
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    // Parse the template so defaults below match what gets written
    let config: SiteConfig = serde_yaml::from_str(CONFIG_TEMPLATE)?;

    let content_dir = target_dir.join(&config.content_dir);
    let assets_dir = target_dir.join(&config.assets_dir);
    fs::create_dir_all(content_dir.join("hello-world"))?;
    fs::create_dir_all(&assets_dir)?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;
    fs::write(content_dir.join("hello-world").join("index.md"), HELLO_WORLD)?;

    tracing::info!("Created {:?}", config_path);
    tracing::warn!(
        "Add an avatar matching {:?} to {:?} before generating",
        config.avatar.pattern,
        assets_dir
    );

    Ok(())
}
