//! Backend-polymorphic registration store.

use crate::error::StoreError;
use crate::file::FileStore;
use crate::mongo::MongoStore;
use crate::record::{NewRegistration, Registration};
use tracing::info;

/// Storage backend selected at startup configuration.
///
/// Both variants satisfy the same contract: `create` validates, stamps
/// the submission time and durably appends; `list_all` returns every
/// record ordered by timestamp descending.
pub enum Store {
    /// MongoDB collection, one insert per submission
    Mongo(MongoStore),
    /// Whole-file JSON store with an in-memory mirror
    File(FileStore),
}

impl Store {
    /// Open a file-backed store.
    pub async fn file(path: impl Into<std::path::PathBuf>) -> Result<Self, StoreError> {
        info!("Using file-backed registration store");
        Ok(Store::File(FileStore::open(path).await?))
    }

    /// Connect a MongoDB-backed store.
    pub async fn mongo(
        uri: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, StoreError> {
        info!("Using MongoDB-backed registration store");
        Ok(Store::Mongo(MongoStore::connect(uri, database, collection).await?))
    }

    /// Human-readable backend name, used by the health endpoint.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Mongo(_) => "mongo",
            Store::File(_) => "file",
        }
    }

    /// Validate and persist a submission, returning the stored record.
    ///
    /// Validation happens before any persistence attempt; a persistence
    /// failure is reported to the caller, never swallowed.
    pub async fn create(&self, new: NewRegistration) -> Result<Registration, StoreError> {
        new.validate()?;
        let record = new.into_record();

        match self {
            Store::Mongo(s) => s.create(record.clone()).await?,
            Store::File(s) => s.create(record.clone()).await?,
        }

        Ok(record)
    }

    /// Every stored record, most recent first.
    pub async fn list_all(&self) -> Result<Vec<Registration>, StoreError> {
        match self {
            Store::Mongo(s) => s.list_all().await,
            Store::File(s) => s.list_all().await,
        }
    }

    /// Number of stored records.
    pub async fn count(&self) -> Result<u64, StoreError> {
        match self {
            Store::Mongo(s) => s.count().await,
            Store::File(s) => Ok(s.count().await as u64),
        }
    }
}
