use serde::{Deserialize, Serialize};
use smallurl_core::{ExpandResponse, ShortenResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenUrlRequest {
    pub long_url: String,
    #[serde(default, alias = "ShortId")]
    pub short_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandQuery {
    pub short_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub long_url: String,
    pub short_url: String,
}

impl From<ShortenResponse> for UrlResponse {
    fn from(response: ShortenResponse) -> Self {
        Self {
            long_url: response.long_url,
            short_url: response.short_url,
        }
    }
}

impl From<ExpandResponse> for UrlResponse {
    fn from(response: ExpandResponse) -> Self {
        Self {
            long_url: response.long_url,
            short_url: response.short_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
