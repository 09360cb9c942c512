//! API request and response types.

use crate::export::mask_phone;
use chrono::{DateTime, Utc};
use registration_store::{NewRegistration, Registration};
use serde::{Deserialize, Serialize};

/// A registration submission.
///
/// Fields default to empty strings so an absent field surfaces as a
/// 400 validation message rather than a body deserialization error.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub house_block: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub event: String,
}

impl RegisterRequest {
    pub fn into_submission(self) -> NewRegistration {
        NewRegistration {
            name: self.name,
            house_block: self.house_block,
            phone: self.phone,
            category: self.category,
            event: self.event,
        }
    }
}

/// Generic confirmation body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A registration as rendered on screen, phone masked.
#[derive(Debug, Serialize)]
pub struct ParticipantView {
    pub name: String,
    pub house_block: String,
    pub phone: String,
    pub category: String,
    pub event: String,
    pub timestamp: DateTime<Utc>,
}

impl ParticipantView {
    /// Build the display view of a record, masking the phone field.
    pub fn masked(record: Registration) -> Self {
        Self {
            name: record.name,
            house_block: record.house_block,
            phone: mask_phone(&record.phone),
            category: record.category,
            event: record.event,
            timestamp: record.timestamp,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: &'static str,
    pub registrations: u64,
}
