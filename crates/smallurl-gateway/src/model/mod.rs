mod url;

pub use url::{ErrorResponse, ExpandQuery, ShortenUrlRequest, UrlResponse};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
