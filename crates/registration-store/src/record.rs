//! Registration record types.

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored participant registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub house_block: String,
    pub phone: String,
    pub category: String,
    pub event: String,
    pub timestamp: DateTime<Utc>,
}

/// A submission that has not been persisted yet.
///
/// The store stamps the timestamp at creation time; callers only
/// supply the five business fields.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRegistration {
    pub name: String,
    pub house_block: String,
    pub phone: String,
    pub category: String,
    pub event: String,
}

impl NewRegistration {
    /// Check that every required field is present and non-blank.
    pub fn validate(&self) -> Result<(), StoreError> {
        for (value, field) in [
            (&self.name, "name"),
            (&self.house_block, "house_block"),
            (&self.phone, "phone"),
            (&self.category, "category"),
            (&self.event, "event"),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::Validation(field));
            }
        }
        Ok(())
    }

    /// Stamp the submission with the current time, producing a storable record.
    pub fn into_record(self) -> Registration {
        Registration {
            name: self.name,
            house_block: self.house_block,
            phone: self.phone,
            category: self.category,
            event: self.event,
            timestamp: Utc::now(),
        }
    }
}
