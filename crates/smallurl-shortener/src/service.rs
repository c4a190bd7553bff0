use async_trait::async_trait;
use smallurl_core::{
    ExpandResponse, LengthClass, LongUrl, Repository, Result, ShortId, ShortenRequest,
    ShortenResponse, Shortener, ShortenerError, StorageError, UrlRecord,
};
use smallurl_generator::ShortIdGenerator;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use url::Url;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `ShortIdGenerator` to handle:
/// - Reusing the existing mapping of a long URL
/// - Custom short ids, saved once and never retried
/// - Generated short ids, retried once per [`LengthClass`] on collision
///
/// Uniqueness is left to the repository's atomic insert; the service holds
/// no locks of its own.
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<R: Repository, G: ShortIdGenerator> ShortenerService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self::from_shared(Arc::new(repository), Arc::new(generator))
    }

    /// Creates a service over a repository and generator owned elsewhere.
    pub fn from_shared(repository: Arc<R>, generator: Arc<G>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Looks up a previous mapping for `long_url`. A miss is `Ok(None)`.
    async fn existing_mapping(&self, long_url: &LongUrl) -> Result<Option<UrlRecord>> {
        match self.repository.find_by_long_url(long_url.as_str()).await {
            Ok(record) => Ok(Some(record)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => {
                error!(long_url = %long_url, error = %e, "failed to look up existing mapping");
                Err(ShortenerError::Storage(e))
            }
        }
    }

    /// Saves a caller-chosen short id exactly once.
    async fn save_custom(&self, long_url: &LongUrl, short_id: ShortId) -> Result<UrlRecord> {
        let record = UrlRecord::new(long_url.as_str(), short_id.clone());

        match self.repository.save(record).await {
            Ok(record) => Ok(record),
            Err(e) if e.is_unique_violation() => {
                debug!(short_id = %short_id, "custom short id already in use");
                Err(ShortenerError::ShortIdInUse {
                    short_id: short_id.into_inner(),
                    source: e,
                })
            }
            Err(e) => {
                error!(short_id = %short_id, error = %e, "failed to save custom short id");
                Err(ShortenerError::Storage(e))
            }
        }
    }

    /// Generates and saves a short id, escalating through the length
    /// classes on each collision. Any other storage failure ends the loop.
    async fn save_generated(&self, long_url: &LongUrl) -> Result<UrlRecord> {
        let mut last_collision = None;

        for (attempt, class) in LengthClass::ESCALATION.into_iter().enumerate() {
            let candidate = self.generator.generate(class);
            let record = UrlRecord::new(long_url.as_str(), candidate.clone());

            match self.repository.save(record).await {
                Ok(record) => {
                    debug!(
                        long_url = %long_url,
                        attempt,
                        class = %class,
                        short_id = %candidate,
                        "saved generated short id"
                    );
                    return Ok(record);
                }
                Err(e) if e.is_unique_violation() => {
                    debug!(
                        long_url = %long_url,
                        attempt,
                        class = %class,
                        short_id = %candidate,
                        "generated short id collided"
                    );
                    last_collision = Some(e);
                }
                Err(e) => {
                    error!(
                        long_url = %long_url,
                        attempt,
                        short_id = %candidate,
                        error = %e,
                        "failed to save generated short id"
                    );
                    return Err(ShortenerError::Storage(e));
                }
            }
        }

        let attempts = LengthClass::ESCALATION.len();
        warn!(long_url = %long_url, attempts, "exhausted short id attempts");

        Err(ShortenerError::FailedToSave {
            attempts,
            source: last_collision.unwrap_or_else(|| {
                StorageError::Operation("no generation attempts were made".to_string())
            }),
        })
    }
}

#[async_trait]
impl<R: Repository, G: ShortIdGenerator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, request: ShortenRequest) -> Result<ShortenResponse> {
        let ShortenRequest {
            long_url,
            custom_short_id,
            base,
        } = request;

        if let Some(existing) = self.existing_mapping(&long_url).await? {
            info!(
                long_url = %long_url,
                short_id = %existing.short_id,
                "record found for long url"
            );
            return Ok(ShortenResponse {
                short_url: base.compose(&existing.short_id),
                long_url: long_url.into(),
            });
        }

        let record = match custom_short_id {
            Some(short_id) => self.save_custom(&long_url, short_id).await?,
            None => self.save_generated(&long_url).await?,
        };

        info!(long_url = %long_url, short_id = %record.short_id, "created short url");

        Ok(ShortenResponse {
            short_url: base.compose(&record.short_id),
            long_url: long_url.into(),
        })
    }

    async fn resolve(&self, short_id: &ShortId) -> Result<UrlRecord> {
        self.repository
            .find_by_short_id(short_id)
            .await
            .map_err(|e| match e {
                StorageError::NotFound(_) => {
                    ShortenerError::NotFound(format!("No URL for {}", short_id))
                }
                other => ShortenerError::Storage(other),
            })
    }

    async fn expand(&self, short_url: &Url) -> Result<ExpandResponse> {
        let short_id = ShortId::from_short_url(short_url)?;
        let record = self.resolve(&short_id).await?;

        Ok(ExpandResponse {
            long_url: record.long_url,
            short_url: short_url.to_string(),
        })
    }
}
