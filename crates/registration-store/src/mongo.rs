//! MongoDB-backed storage for registrations.

use crate::error::StoreError;
use crate::record::Registration;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Wire shape of a registration in the collection.
///
/// Timestamps are stored as native BSON datetimes so the server-side
/// sort in [`MongoStore::list_all`] orders chronologically. The `_id`
/// is internal to the store and stripped before records leave it.
#[derive(Debug, Serialize, Deserialize)]
struct RegistrationDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    house_block: String,
    phone: String,
    category: String,
    event: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    timestamp: DateTime<Utc>,
}

impl From<Registration> for RegistrationDocument {
    fn from(r: Registration) -> Self {
        Self {
            id: None,
            name: r.name,
            house_block: r.house_block,
            phone: r.phone,
            category: r.category,
            event: r.event,
            timestamp: r.timestamp,
        }
    }
}

impl From<RegistrationDocument> for Registration {
    fn from(d: RegistrationDocument) -> Self {
        Self {
            name: d.name,
            house_block: d.house_block,
            phone: d.phone,
            category: d.category,
            event: d.event,
            timestamp: d.timestamp,
        }
    }
}

/// MongoDB-backed registration store.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<RegistrationDocument>,
}

impl MongoStore {
    /// Connect to MongoDB and bind to the registrations collection.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let collection = client.database(database).collection(collection);

        info!(database, collection_name = collection.name(), "Connected to MongoDB");
        Ok(Self { collection })
    }

    /// Insert a single record.
    #[instrument(skip(self, record))]
    pub async fn create(&self, record: Registration) -> Result<(), StoreError> {
        self.collection
            .insert_one(RegistrationDocument::from(record))
            .await?;

        debug!("Inserted registration document");
        Ok(())
    }

    /// All records, most recent first (server-side sort).
    pub async fn list_all(&self) -> Result<Vec<Registration>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "timestamp": -1 })
            .await?;

        let documents: Vec<RegistrationDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Registration::from).collect())
    }

    /// Number of stored records.
    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}
