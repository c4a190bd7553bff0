use crate::error::ShortenerError;
use crate::short_id::ShortId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use url::{ParseError, Url};

/// An absolute URL submitted for shortening.
///
/// The string is validated once on construction and then kept exactly as
/// the caller wrote it, so lookups by long URL match what was stored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LongUrl(String);

impl LongUrl {
    pub fn parse(input: impl Into<String>) -> Result<Self, ShortenerError> {
        let input = input.into();
        // Url::parse strips these silently; the raw string is what gets stored
        // and later sent back as a Location header.
        if input.trim() != input || input.chars().any(char::is_control) {
            return Err(ShortenerError::Validation(format!(
                "'{}' contains whitespace or control characters",
                input.escape_debug()
            )));
        }

        match Url::parse(&input) {
            Ok(_) => Ok(Self(input)),
            Err(ParseError::RelativeUrlWithoutBase) => Err(ShortenerError::Validation(format!(
                "'{}' is a relative url. Absolute urls are expected",
                input
            ))),
            Err(e) => Err(ShortenerError::Validation(format!(
                "'{}' is not a valid url: {}",
                input, e
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LongUrl {
    type Error = ShortenerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LongUrl> for String {
    fn from(value: LongUrl) -> Self {
        value.0
    }
}

impl Display for LongUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scheme and host that short URLs are composed under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    scheme: String,
    host: String,
}

impl BaseUrl {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Parses a configured base URL such as `https://small.ml/`.
    ///
    /// Only the scheme and the host (with its port, if any) are kept.
    pub fn parse(input: &str) -> Result<Self, ShortenerError> {
        let url = Url::parse(input).map_err(|e| {
            ShortenerError::Validation(format!("'{}' is not a valid base url: {}", input, e))
        })?;

        let host = url.host_str().ok_or_else(|| {
            ShortenerError::Validation(format!("failed to determine host from '{}'", input))
        })?;

        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self::new(url.scheme(), host))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Builds the public short URL for `short_id`.
    pub fn compose(&self, short_id: &ShortId) -> String {
        format!("{}://{}/{}", self.scheme, self.host, short_id)
    }
}

impl Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_url_keeps_original_spelling() {
        let url = LongUrl::parse("http://example.com").unwrap();
        assert_eq!(url.as_str(), "http://example.com");
    }

    #[test]
    fn relative_long_url_is_rejected() {
        let err = LongUrl::parse("/just/a/path").unwrap_err();
        assert!(matches!(err, ShortenerError::Validation(msg) if msg.contains("relative url")));
    }

    #[test]
    fn garbage_long_url_is_rejected() {
        assert!(LongUrl::parse("not a url").is_err());
        assert!(LongUrl::parse("").is_err());
    }

    #[test]
    fn long_url_with_control_characters_is_rejected() {
        for input in [
            "https://example.com/a\nb",
            "https://example.com/\ttab",
            "https://example.com/\u{7f}",
        ] {
            let err = LongUrl::parse(input).unwrap_err();
            assert!(matches!(err, ShortenerError::Validation(_)), "{input:?}");
        }
    }

    #[test]
    fn padded_long_url_is_rejected() {
        assert!(LongUrl::parse(" http://example.com").is_err());
        assert!(LongUrl::parse("http://example.com ").is_err());
        assert!(LongUrl::parse("http://example.com").is_ok());
    }

    #[test]
    fn compose_joins_scheme_host_and_id() {
        let base = BaseUrl::new("http", "small.ml");
        let id = ShortId::new_unchecked("alpha");
        assert_eq!(base.compose(&id), "http://small.ml/alpha");
    }

    #[test]
    fn parse_base_url_drops_path() {
        let base = BaseUrl::parse("https://small.ml/").unwrap();
        assert_eq!(base.scheme(), "https");
        assert_eq!(base.host(), "small.ml");
        assert_eq!(
            base.compose(&ShortId::new_unchecked("shrt")),
            "https://small.ml/shrt"
        );
    }

    #[test]
    fn parse_base_url_keeps_port() {
        let base = BaseUrl::parse("http://localhost:8080").unwrap();
        assert_eq!(base.host(), "localhost:8080");
    }

    #[test]
    fn parse_base_url_requires_host() {
        assert!(BaseUrl::parse("mailto:someone@example.com").is_err());
        assert!(BaseUrl::parse("small.ml").is_err());
    }
}
