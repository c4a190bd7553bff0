use crate::address::{BaseUrl, LongUrl};
use crate::error::Result;
use crate::repository::UrlRecord;
use crate::short_id::ShortId;
use async_trait::async_trait;
use serde::Serialize;
use url::Url;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone)]
pub struct ShortenRequest {
    /// The URL to be shortened.
    pub long_url: LongUrl,
    /// Optional caller-chosen short id.
    pub custom_short_id: Option<ShortId>,
    /// Scheme and host the short URL is composed under.
    pub base: BaseUrl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenResponse {
    pub long_url: String,
    pub short_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandResponse {
    pub long_url: String,
    pub short_url: String,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Returns the short URL for a long URL, creating a mapping if none exists.
    async fn shorten(&self, request: ShortenRequest) -> Result<ShortenResponse>;

    /// Resolves a short id to its stored record.
    async fn resolve(&self, short_id: &ShortId) -> Result<UrlRecord>;

    /// Resolves a full short URL back to its long URL.
    async fn expand(&self, short_url: &Url) -> Result<ExpandResponse>;
}
