use crate::error::ShortenerError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use url::Url;

/// The unique key of a [`UrlRecord`](crate::UrlRecord).
///
/// Generated ids are base-62 strings; custom ids supplied by callers are
/// validated to be 1-32 characters of `[a-zA-Z0-9_-]` so they always form a
/// single URL path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortId(String);

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = 32;

impl ShortId {
    /// Creates a `ShortId` from a caller-supplied string after validating it.
    pub fn custom(id: impl Into<String>) -> Result<Self, ShortenerError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Creates a `ShortId` without validation.
    ///
    /// Use this only for ids produced by trusted internal sources such as
    /// the generator or a repository row.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extracts the short id from the path of a short URL.
    ///
    /// `https://small.ml/abc` yields `abc`. A URL without a path is rejected.
    pub fn from_short_url(short_url: &Url) -> Result<Self, ShortenerError> {
        let path = short_url.path();
        let id = path.strip_prefix('/').unwrap_or(path);
        if id.is_empty() {
            return Err(ShortenerError::Validation(format!(
                "The URL '{}' does not have a path.",
                short_url
            )));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(id: &str) -> Result<(), ShortenerError> {
        let len = id.chars().count();
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&len) {
            return Err(ShortenerError::Validation(format!(
                "short id length must be between {} and {}, got {}",
                MIN_LENGTH, MAX_LENGTH, len
            )));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ShortenerError::Validation(format!(
                "short id must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                id
            )));
        }

        Ok(())
    }
}

impl Display for ShortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_custom_ids() {
        assert!(ShortId::custom("a").is_ok());
        assert!(ShortId::custom("Abc-123_xyz").is_ok());
        assert!(ShortId::custom("a".repeat(32)).is_ok());
    }

    #[test]
    fn empty_custom_id_is_rejected() {
        assert!(matches!(
            ShortId::custom(""),
            Err(ShortenerError::Validation(_))
        ));
    }

    #[test]
    fn too_long() {
        assert!(ShortId::custom("a".repeat(33)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortId::custom("abc def").is_err());
        assert!(ShortId::custom("abc/def").is_err());
        assert!(ShortId::custom("abc?def").is_err());
    }

    #[test]
    fn from_short_url_strips_leading_slash() {
        let url = Url::parse("http://small.ml/alpha").unwrap();
        let id = ShortId::from_short_url(&url).unwrap();
        assert_eq!(id.as_str(), "alpha");
    }

    #[test]
    fn from_short_url_without_path_fails() {
        let url = Url::parse("http://www.small.ml").unwrap();
        let err = ShortId::from_short_url(&url).unwrap_err();
        assert!(matches!(err, ShortenerError::Validation(_)));
    }

    #[test]
    fn display_is_the_raw_id() {
        let id = ShortId::new_unchecked("abc");
        assert_eq!(id.to_string(), "abc");
    }
}
