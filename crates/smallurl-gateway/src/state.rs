use std::sync::Arc;

use smallurl_core::{BaseUrl, Shortener};

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    base_url: BaseUrl,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, base_url: BaseUrl) -> Self {
        Self {
            shortener,
            base_url,
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    /// Scheme and host new short URLs are issued under.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }
}
