use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use smallurl_core::{ReadRepository, Repository, ShortId, StorageError, StorageResult, UrlRecord};

/// In-memory implementation of the Repository trait using DashMap.
///
/// Records are keyed by short id. A second map indexes the first short id
/// saved for each long URL so `find_by_long_url` does not scan.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: DashMap<ShortId, UrlRecord>,
    by_long_url: DashMap<String, ShortId>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_short_id(&self, short_id: &ShortId) -> StorageResult<UrlRecord> {
        self.records
            .get(short_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::NotFound(short_id.to_string()))
    }

    async fn find_by_long_url(&self, long_url: &str) -> StorageResult<UrlRecord> {
        let short_id = self
            .by_long_url
            .get(long_url)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::NotFound(long_url.to_string()))?;

        self.find_by_short_id(&short_id).await
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn save(&self, record: UrlRecord) -> StorageResult<UrlRecord> {
        // The entry guard holds the shard lock, making check-and-insert atomic.
        match self.records.entry(record.short_id.clone()) {
            Entry::Occupied(_) => {
                return Err(StorageError::UniqueViolation(record.short_id.to_string()));
            }
            Entry::Vacant(vacant) => {
                vacant.insert(record.clone());
            }
        }

        self.by_long_url
            .entry(record.long_url.clone())
            .or_insert_with(|| record.short_id.clone());

        Ok(record)
    }
}
