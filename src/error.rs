//! Error types for content querying and page rendering

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that abort a site build
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error in `{0}`")]
    Config(PathBuf, #[source] serde_yaml::Error),

    #[error("invalid front-matter in `{0}`: {1}")]
    FrontMatter(PathBuf, String),

    #[error("cannot derive a slug for `{0}`")]
    MissingSlug(PathBuf),

    #[error("no asset matches avatar pattern `{0}`")]
    AvatarNotFound(String),

    #[error("avatar pattern `{pattern}` matches {count} assets, expected exactly one")]
    AmbiguousAvatar { pattern: String, count: usize },

    #[error("invalid avatar pattern `{0}`")]
    AvatarPattern(String, #[source] regex::Error),
}

impl Error {
    /// Wrap an IO error with the path that caused it
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io(path.into(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_avatar_message() {
        let err = Error::AmbiguousAvatar {
            pattern: "profile-pic.jpg".to_string(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "avatar pattern `profile-pic.jpg` matches 2 assets, expected exactly one"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;
        let err = Error::io(
            "content/blog/a.md",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("content/blog/a.md"));
        assert!(err.source().is_some());
    }
}
