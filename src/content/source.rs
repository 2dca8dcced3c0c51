//! Filesystem-backed content index - loads posts and assets from the site directory

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::index::{apply_query, match_single_asset, IndexedDocument};
use super::markdown::MarkdownRenderer;
use super::{
    AuthorProfile, ContentIndex, DocumentCollection, DocumentQuery, DocumentRecord, FrontMatter,
    ImageAsset, SiteMetadata,
};
use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::helpers::{excerpt_from_html, format_date};

/// Directory assets are published under
pub const STATIC_DIR: &str = "static";

/// Content index over the markdown sources of a site
///
/// Everything is read when the index is opened; queries never touch the disk.
pub struct SourceIndex {
    config: SiteConfig,
    documents: Vec<IndexedDocument>,
    /// Asset files with the path string avatar patterns match against
    assets: Vec<(PathBuf, String)>,
}

impl SourceIndex {
    /// Load all documents and assets below `base_dir`
    pub fn open(config: &SiteConfig, base_dir: &Path) -> Result<Self> {
        let renderer = MarkdownRenderer::with_options(&config.highlight);
        let content_dir = base_dir.join(&config.content_dir);
        let assets_dir = base_dir.join(&config.assets_dir);

        let mut documents = Vec::new();
        for path in markdown_files(&content_dir) {
            let doc = load_document(config, &renderer, &content_dir, &path)?;
            tracing::debug!("Loaded {} from {:?}", doc.record.slug, path);
            documents.push(doc);
        }

        let mut asset_paths = BTreeSet::new();
        for dir in [&content_dir, &assets_dir] {
            asset_paths.extend(files_under(dir).filter(|p| !is_markdown_file(p)));
        }
        let assets = asset_paths
            .into_iter()
            .map(|path| {
                let name = path
                    .strip_prefix(base_dir)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .replace('\\', "/");
                (path, name)
            })
            .collect();

        tracing::info!("Indexed {} documents", documents.len());

        Ok(Self {
            config: config.clone(),
            documents,
            assets,
        })
    }
}

impl ContentIndex for SourceIndex {
    fn site_metadata(&self) -> Result<SiteMetadata> {
        Ok(SiteMetadata {
            title: self.config.title.clone(),
            description: self.config.description.clone(),
            language: self.config.language.clone(),
            url: self.config.url.clone(),
        })
    }

    fn documents(&self, query: &DocumentQuery) -> Result<DocumentCollection> {
        Ok(apply_query(&self.documents, query))
    }

    fn document_body(&self, slug: &str) -> Result<Option<String>> {
        Ok(self
            .documents
            .iter()
            .find(|doc| doc.record.slug == slug)
            .map(|doc| doc.html.clone()))
    }

    fn author(&self) -> Result<AuthorProfile> {
        let avatar = &self.config.avatar;
        let source = match_single_asset(&avatar.pattern, &self.assets)?;
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| Error::AvatarNotFound(avatar.pattern.clone()))?;

        Ok(AuthorProfile {
            name: self.config.author.name.clone(),
            summary: self.config.author.summary.clone(),
            avatar: ImageAsset {
                source,
                public_path: format!("/{}/{}", STATIC_DIR, file_name),
                width: avatar.width,
                height: avatar.height,
            },
        })
    }
}

/// Load a single markdown document
fn load_document(
    config: &SiteConfig,
    renderer: &MarkdownRenderer,
    content_dir: &Path,
    path: &Path,
) -> Result<IndexedDocument> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let (fm, body) = FrontMatter::parse(&content)
        .map_err(|e| Error::FrontMatter(path.to_path_buf(), e.to_string()))?;

    let slug = slug_for(content_dir, path)?;
    let published = fm.parse_date();
    if fm.date.is_some() && published.is_none() {
        tracing::warn!("Unrecognised date {:?} in {:?}", fm.date, path);
    }

    let (excerpt_md, full_md) = MarkdownRenderer::split_excerpt(body);
    let html = renderer.render(&full_md);
    let excerpt = match excerpt_md {
        Some(md) => excerpt_from_html(&renderer.render(md), usize::MAX),
        None => excerpt_from_html(&html, config.excerpt_length),
    };

    Ok(IndexedDocument {
        record: DocumentRecord {
            slug,
            title: fm.title,
            date: published
                .map(|d| format_date(&d, &config.date_format))
                .unwrap_or_default(),
            description: fm.description,
            excerpt,
        },
        published,
        draft: fm.draft,
        html,
    })
}

/// Derive the URL path of a document from its location
///
/// `hello-world/index.md` becomes `/hello-world/`, `notes/rust.md` becomes
/// `/notes/rust/`.
pub fn slug_for(content_dir: &Path, path: &Path) -> Result<String> {
    let missing = || Error::MissingSlug(path.to_path_buf());

    let relative = path.strip_prefix(content_dir).unwrap_or(path);
    let without_ext = relative.with_extension("");
    let without_index = if without_ext.file_name().is_some_and(|n| n == "index") {
        without_ext.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        without_ext
    };

    let mut segments = Vec::new();
    for component in without_index.components() {
        segments.push(component.as_os_str().to_str().ok_or_else(missing)?);
    }

    if segments.is_empty() {
        return Err(missing());
    }

    Ok(format!("/{}/", segments.join("/")))
}

/// Markdown files below `dir`, in a stable order
fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = files_under(dir).filter(|p| is_markdown_file(p)).collect();
    files.sort();
    files
}

fn files_under(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(base: &Path, rel: &str, content: &str) {
        let path = base.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "content/blog/hello-world/index.md",
            "---\ntitle: Hello World\ndate: \"2015-05-01T22:12:03.284Z\"\n---\n\nThis is my first post on my new fake blog!",
        );
        write(
            dir.path(),
            "content/blog/my-second-post/index.md",
            "---\ntitle: My Second Post!\ndate: \"2015-05-06T23:46:37.121Z\"\ndescription: \"<b>Wow!</b>\"\n---\n\nWow! I love blogging so much already.",
        );
        write(
            dir.path(),
            "content/blog/drafty.md",
            "---\ndate: 2016-01-01\ndraft: true\n---\n\nNot yet.",
        );
        write(dir.path(), "content/assets/profile-pic.jpg", "jpg");
        dir
    }

    #[test]
    fn test_slug_for() {
        let root = Path::new("/site/content/blog");
        assert_eq!(
            slug_for(root, &root.join("hello-world/index.md")).unwrap(),
            "/hello-world/"
        );
        assert_eq!(
            slug_for(root, &root.join("notes/rust.md")).unwrap(),
            "/notes/rust/"
        );
        assert!(matches!(
            slug_for(root, &root.join("index.md")),
            Err(Error::MissingSlug(_))
        ));
    }

    #[test]
    fn test_documents_newest_first() {
        let dir = site();
        let index = SourceIndex::open(&SiteConfig::default(), dir.path()).unwrap();
        let docs = index.documents(&DocumentQuery::newest_first()).unwrap();

        let slugs: Vec<_> = docs.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["/my-second-post/", "/hello-world/"]);

        let second = &docs.as_slice()[0];
        assert_eq!(second.date, "May 06, 2015");
        assert_eq!(second.description.as_deref(), Some("<b>Wow!</b>"));

        let first = &docs.as_slice()[1];
        assert_eq!(first.excerpt, "This is my first post on my new fake blog!");
    }

    #[test]
    fn test_document_body() {
        let dir = site();
        let index = SourceIndex::open(&SiteConfig::default(), dir.path()).unwrap();
        let body = index.document_body("/hello-world/").unwrap().unwrap();
        assert!(body.contains("<p>This is my first post"));
        assert!(index.document_body("/nope/").unwrap().is_none());
    }

    #[test]
    fn test_author_avatar() {
        let dir = site();
        let index = SourceIndex::open(&SiteConfig::default(), dir.path()).unwrap();
        let author = index.author().unwrap();
        assert_eq!(author.avatar.public_path, "/static/profile-pic.jpg");
        assert_eq!(author.avatar.width, 250);
        assert!(author.avatar.source.ends_with("content/assets/profile-pic.jpg"));
    }

    #[test]
    fn test_author_fails_on_ambiguous_avatar() {
        let dir = site();
        write(dir.path(), "content/blog/hello-world/profile-pic.jpg", "jpg");
        let index = SourceIndex::open(&SiteConfig::default(), dir.path()).unwrap();
        assert!(matches!(
            index.author(),
            Err(Error::AmbiguousAvatar { count: 2, .. })
        ));
    }

    #[test]
    fn test_author_fails_without_avatar() {
        let dir = site();
        fs::remove_file(dir.path().join("content/assets/profile-pic.jpg")).unwrap();
        let index = SourceIndex::open(&SiteConfig::default(), dir.path()).unwrap();
        assert!(matches!(index.author(), Err(Error::AvatarNotFound(_))));
    }

    #[test]
    fn test_malformed_frontmatter_fails_open() {
        let dir = site();
        write(
            dir.path(),
            "content/blog/bad/index.md",
            "---\ntitle: Foo: bar\ndate: 2024-01-01\n---\n\nBody.",
        );
        let err = SourceIndex::open(&SiteConfig::default(), dir.path())
            .err()
            .unwrap();
        match err {
            Error::FrontMatter(path, message) => {
                assert!(path.ends_with("content/blog/bad/index.md"));
                assert!(message.contains("YAML"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_content_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let index = SourceIndex::open(&SiteConfig::default(), dir.path()).unwrap();
        assert!(index
            .documents(&DocumentQuery::newest_first())
            .unwrap()
            .is_empty());
    }
}
