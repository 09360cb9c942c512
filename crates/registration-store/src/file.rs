//! Flat-file JSON storage for registrations.

use crate::error::StoreError;
use crate::record::Registration;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// JSON-file-backed registration store.
///
/// The whole file is loaded into an in-memory mirror at open time. All
/// mutations take the write lock, append to the mirror and rewrite the
/// file atomically (temp file + rename), so concurrent submissions are
/// serialized and the mirror never diverges from disk. Reads are served
/// from the mirror under a read lock.
#[derive(Clone)]
pub struct FileStore {
    path: PathBuf,
    records: Arc<RwLock<Vec<Registration>>>,
}

impl FileStore {
    /// Open a file store, loading existing records into memory.
    ///
    /// Creates an empty file (and parent directories) if none exists. A
    /// file that exists but does not parse is an error, not an empty
    /// store: silently discarding unreadable registrations would lose
    /// data on the next write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let records: Vec<Registration> = if path.exists() {
            let data = fs::read(&path).await?;
            serde_json::from_slice(&data).map_err(|e| {
                StoreError::Persistence(format!(
                    "Registration file {:?} is not valid JSON: {}",
                    path, e
                ))
            })?
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&path, b"[]").await?;
            info!("Created empty registration file at {:?}", path);
            Vec::new()
        };

        info!("Loaded {} registrations from {:?}", records.len(), path);

        Ok(Self {
            path,
            records: Arc::new(RwLock::new(records)),
        })
    }

    /// Append a record, flushing the whole list back to disk.
    ///
    /// The write lock is held across the append and the flush; if the
    /// flush fails the append is rolled back so the mirror still
    /// matches the file.
    #[instrument(skip(self, record))]
    pub async fn create(&self, record: Registration) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.push(record);

        if let Err(e) = self.flush(&records).await {
            records.pop();
            return Err(e);
        }

        debug!("Stored registration (total: {})", records.len());
        Ok(())
    }

    /// All records, most recent first.
    pub async fn list_all(&self) -> Result<Vec<Registration>, StoreError> {
        let records = self.records.read().await;
        let mut out = records.clone();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(out)
    }

    /// Number of stored records.
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Serialize the full list and replace the file atomically.
    async fn flush(&self, records: &[Registration]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(records)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!("Flushed {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }
}
