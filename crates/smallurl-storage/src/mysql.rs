use async_trait::async_trait;
use jiff::Timestamp;
use smallurl_core::{ReadRepository, Repository, ShortId, StorageError, StorageResult, UrlRecord};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::trace;

/// MySQL implementation of the repository contract.
///
/// Records live in the `url_records` table (see `ddl/mysql/url_records.sql`).
/// `short_id` is the primary key, so uniqueness is enforced by the insert
/// itself. `create_time` is stored as Unix milliseconds.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `url_records` table if it does not exist.
    pub async fn ensure_schema(&self) -> StorageResult<()> {
        sqlx::query(include_str!("../ddl/mysql/url_records.sql"))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

fn parse_create_time(millis: i64) -> StorageResult<Timestamp> {
    Timestamp::from_millisecond(millis).map_err(|e| {
        StorageError::InvalidData(format!("invalid create_time timestamp '{}': {e}", millis))
    })
}

fn row_to_record(row: MySqlRow) -> StorageResult<UrlRecord> {
    let short_id: String = row.try_get("short_id").map_err(map_sqlx_error)?;
    let long_url: String = row.try_get("long_url").map_err(map_sqlx_error)?;
    let create_time: i64 = row.try_get("create_time").map_err(map_sqlx_error)?;

    Ok(UrlRecord {
        long_url,
        short_id: ShortId::new_unchecked(short_id),
        create_time: parse_create_time(create_time)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn find_by_short_id(&self, short_id: &ShortId) -> StorageResult<UrlRecord> {
        let row = sqlx::query(
            r#"
            SELECT short_id, long_url, create_time
            FROM url_records
            WHERE short_id = ?
            LIMIT 1
            "#,
        )
        .bind(short_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(row) => row_to_record(row),
            None => Err(StorageError::NotFound(short_id.to_string())),
        }
    }

    async fn find_by_long_url(&self, long_url: &str) -> StorageResult<UrlRecord> {
        let row = sqlx::query(
            r#"
            SELECT short_id, long_url, create_time
            FROM url_records
            WHERE long_url = ?
            ORDER BY create_time ASC
            LIMIT 1
            "#,
        )
        .bind(long_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(row) => row_to_record(row),
            None => Err(StorageError::NotFound(long_url.to_string())),
        }
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn save(&self, record: UrlRecord) -> StorageResult<UrlRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO url_records (short_id, long_url, create_time)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(record.short_id.as_str())
        .bind(record.long_url.as_str())
        .bind(record.create_time.as_millisecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(record),
            Err(err) if is_unique_violation(&err) => {
                trace!(short_id = %record.short_id, "unique violation on insert");
                Err(StorageError::UniqueViolation(record.short_id.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
