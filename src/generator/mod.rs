//! Generator module - renders every page of the site into the public directory

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::components::post::PostView;
use crate::components::{
    listing, not_found, post, FixedImage, HeadMeta, ListingData, Location, RenderContext,
    SiteLinker,
};
use crate::content::{ContentIndex, DocumentQuery, SiteMetadata};
use crate::helpers::full_url_for;
use crate::markup::{Element, Node};
use crate::Quill;

/// Pages and files written by one build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub assets: usize,
    /// Post paths written more than once; the last document wins
    pub collisions: Vec<String>,
}

/// Static site generator driven by a content index
pub struct Generator<'a> {
    quill: &'a Quill,
    navigator: SiteLinker,
    images: FixedImage,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(quill: &'a Quill) -> Self {
        let prefix = &quill.config.path_prefix;
        Self {
            quill,
            navigator: SiteLinker::new(prefix.as_str()),
            images: FixedImage::new(prefix.as_str()),
        }
    }

    /// Generate the entire site
    pub fn generate(&self, index: &dyn ContentIndex) -> Result<BuildReport> {
        let public_dir = &self.quill.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        let site = index.site_metadata()?;
        let mut report = BuildReport::default();

        // The avatar is required by every page; fail before writing any
        let author = index.author()?;
        let avatar_target = public_dir.join(safe_relative(&author.avatar.public_path));
        copy_file(&author.avatar.source, &avatar_target)?;
        report.assets += 1;

        let listing_data = ListingData::query(index)?;
        let home = self.quill.config.root_path();
        self.write_page(index, &site, "/", |ctx| {
            listing::render(ctx, &listing_data, &Location::new(home.as_str()))
        })?;
        report.pages += 1;

        let documents = index.documents(&DocumentQuery::newest_first())?;
        let mut written = HashSet::new();
        for record in &documents {
            if !written.insert(record.slug.as_str()) {
                tracing::warn!(
                    "Post path {} is used by more than one document, keeping the last one",
                    record.slug
                );
                report.collisions.push(record.slug.clone());
            }
            let body_html = index.document_body(&record.slug)?.unwrap_or_default();
            let (newer, older) = documents.neighbours(&record.slug);
            let view = PostView {
                site_title: &site.title,
                record,
                body_html: &body_html,
                newer,
                older,
            };
            self.write_page(index, &site, &record.slug, |ctx| post::render(ctx, &view))?;
            report.pages += 1;
        }

        let not_found_path = format!("{}/404.html", self.quill.config.path_prefix);
        self.write_page(index, &site, "/404.html", |ctx| {
            Ok(not_found::render(
                ctx,
                &site.title,
                &Location::new(not_found_path.as_str()),
            ))
        })?;
        report.pages += 1;

        report.assets += self.copy_content_assets()?;

        tracing::info!(
            "Wrote {} pages and {} assets to {:?}",
            report.pages,
            report.assets,
            public_dir
        );
        Ok(report)
    }

    /// Render the page at `page_path` into an HTML document under the public directory
    ///
    /// Paths ending in `/` are written as `index.html` inside that directory.
    fn write_page<F>(
        &self,
        index: &dyn ContentIndex,
        site: &SiteMetadata,
        page_path: &str,
        render: F,
    ) -> Result<()>
    where
        F: FnOnce(&RenderContext<'_>) -> crate::Result<Node>,
    {
        let head = HeadMeta::new();
        let ctx = RenderContext {
            index,
            navigator: &self.navigator,
            images: &self.images,
            seo: &head,
            path_prefix: &self.quill.config.path_prefix,
        };

        let body = render(&ctx)?;
        let url = full_url_for(&site.url, &self.quill.config.path_prefix, page_path);
        let html = html_document(site, &url, head.title().as_deref(), &body);

        let target = if page_path.ends_with('/') {
            safe_relative(page_path).join("index.html")
        } else {
            safe_relative(page_path)
        };
        let output_path = self.quill.public_dir.join(target);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy non-markdown files next to posts so relative links keep working
    fn copy_content_assets(&self) -> Result<usize> {
        let content_dir = self.quill.content_dir();
        let mut copied = 0;

        for entry in WalkDir::new(&content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || is_markdown(path) {
                continue;
            }
            let Ok(relative) = path.strip_prefix(&content_dir) else {
                continue;
            };
            copy_file(path, &self.quill.public_dir.join(relative))?;
            copied += 1;
        }

        Ok(copied)
    }
}

/// Wrap a rendered body in a complete HTML document
///
/// The page title becomes `"{page} | {site}"`; without one the site title is used.
pub fn html_document(
    site: &SiteMetadata,
    url: &str,
    page_title: Option<&str>,
    body: &Node,
) -> String {
    let title = match page_title {
        Some(t) if !t.is_empty() => format!("{} | {}", t, site.title),
        _ => site.title.clone(),
    };

    let mut head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::new("title").text(&title))
        .child(Element::new("link").attr("rel", "canonical").attr("href", url))
        .child(
            Element::new("meta")
                .attr("property", "og:title")
                .attr("content", &title),
        )
        .child(
            Element::new("meta")
                .attr("property", "og:url")
                .attr("content", url),
        );
    if !site.description.is_empty() {
        head = head
            .child(
                Element::new("meta")
                    .attr("name", "description")
                    .attr("content", &site.description),
            )
            .child(
                Element::new("meta")
                    .attr("property", "og:description")
                    .attr("content", &site.description),
            );
    }
    head = head.child(
        Element::new("meta")
            .attr("name", "generator")
            .attr("content", format!("quill {}", env!("CARGO_PKG_VERSION"))),
    );

    let html: Node = Element::new("html")
        .attr("lang", &site.language)
        .child(head)
        .child(Element::new("body").child(body.clone()))
        .into();

    format!("<!DOCTYPE html>\n{}\n", html.to_html())
}

/// Turn a site path into a relative filesystem path, dropping anything that
/// could escape the output directory
fn safe_relative(site_path: &str) -> PathBuf {
    Path::new(site_path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to).with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
    tracing::debug!("Copied: {:?}", to);
    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md" | "markdown")
    )
}
