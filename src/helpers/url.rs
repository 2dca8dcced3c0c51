//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Whether a link target leaves the site
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://")
        || path.starts_with("https://")
        || path.starts_with("//")
        || path.starts_with("mailto:")
}

/// Generate a URL with the path prefix
///
/// External URLs are returned untouched; internal paths are percent-encoded.
///
/// # Examples
/// ```ignore
/// url_for("/blog", "/hello-world/") // -> "/blog/hello-world/"
/// ```
pub fn url_for(prefix: &str, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let root = prefix.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, encode_path(path))
    }
}

/// Percent-encode each segment of a path, keeping the `/` separators
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Decode a percent-encoded request path
pub fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for("https://example.com", "/blog", "/about/") // -> "https://example.com/blog/about/"
/// ```
pub fn full_url_for(base: &str, prefix: &str, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }
    format!("{}{}", base.trim_end_matches('/'), url_for(prefix, path))
}
