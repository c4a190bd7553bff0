use thiserror::Error;

/// Result type for repository operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result type for shortener operations.
pub type Result<T> = std::result::Result<T, ShortenerError>;

/// Failures reported by a repository backend.
///
/// `UniqueViolation` must stay distinguishable from every other variant:
/// the shortener retries on it and treats everything else as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("short id already exists: {0}")]
    UniqueViolation(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StorageError::UniqueViolation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("can not save short id '{short_id}'; it is already in use")]
    ShortIdInUse {
        short_id: String,
        #[source]
        source: StorageError,
    },
    #[error("failed to find a free short id after {attempts} attempts")]
    FailedToSave {
        attempts: usize,
        #[source]
        source: StorageError,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(#[source] StorageError),
}

impl ShortenerError {
    /// Stable machine-readable code for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ShortenerError::Validation(_) => "shortenUrl.validation",
            ShortenerError::ShortIdInUse { .. } => "shortenUrl.shortIdInUse",
            ShortenerError::FailedToSave { .. } => "shortenUrl.failedToSave",
            ShortenerError::NotFound(_) => "retrieveFullURL.urlNotFound",
            ShortenerError::Storage(_) => "storage.failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base62Error {
    #[error("cannot decode an empty string")]
    Empty,
    #[error("invalid base62 character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error("base62 value overflows u64")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn shortener_error_keeps_storage_cause() {
        let err = ShortenerError::FailedToSave {
            attempts: 4,
            source: StorageError::UniqueViolation("abc".to_string()),
        };

        let cause = err.source().expect("cause should be attached");
        assert_eq!(cause.to_string(), "short id already exists: abc");
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            ShortenerError::Validation(String::new()).kind(),
            ShortenerError::ShortIdInUse {
                short_id: String::new(),
                source: StorageError::UniqueViolation(String::new()),
            }
            .kind(),
            ShortenerError::FailedToSave {
                attempts: 0,
                source: StorageError::UniqueViolation(String::new()),
            }
            .kind(),
            ShortenerError::NotFound(String::new()).kind(),
            ShortenerError::Storage(StorageError::Timeout(String::new())).kind(),
        ];

        let unique: std::collections::HashSet<_> = kinds.iter().collect();
        assert_eq!(unique.len(), kinds.len());
    }
}
