use crate::error::StorageResult;
use crate::short_id::ShortId;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored long URL to short id mapping. Records are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The original URL that was shortened.
    pub long_url: String,
    /// The unique key of the record.
    pub short_id: ShortId,
    /// When the record was created.
    pub create_time: Timestamp,
}

impl UrlRecord {
    /// Creates a record stamped with the current time.
    pub fn new(long_url: impl Into<String>, short_id: ShortId) -> Self {
        Self {
            long_url: long_url.into(),
            short_id,
            create_time: Timestamp::now(),
        }
    }
}

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record for a short id.
    /// Returns `Err(NotFound)` if the id does not exist.
    async fn find_by_short_id(&self, short_id: &ShortId) -> StorageResult<UrlRecord>;

    /// Retrieves a record for a long URL.
    /// Returns `Err(NotFound)` if the URL has never been shortened.
    async fn find_by_long_url(&self, long_url: &str) -> StorageResult<UrlRecord>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new record and returns it.
    ///
    /// Returns `Err(UniqueViolation)` if the short id already exists. The
    /// check must be atomic with the insert so that concurrent callers racing
    /// on one id see exactly one success.
    async fn save(&self, record: UrlRecord) -> StorageResult<UrlRecord>;
}
