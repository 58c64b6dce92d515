//! Domain DTOs for the Todo Store.
//!
//! # Design
//! `TodoRecord` uses the store's wire names (`_id`, `todoDescription`, ...)
//! through serde renames so the Rust fields stay snake_case. The mock-server
//! crate defines its own copy of the record; integration tests catch any
//! schema drift between the two.
//!
//! Ids are generated client-side on create, and timestamps are normalized to
//! millisecond-precision UTC (`2024-01-01T00:00:00.000Z`) before they leave
//! the controller.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo as stored by the Todo Store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "todoDescription")]
    pub description: String,
    #[serde(rename = "todoDateCreated")]
    pub date_created: String,
    #[serde(rename = "todoCompleted")]
    pub completed: bool,
}

impl TodoRecord {
    /// Build a record from a draft under the given id.
    pub fn from_draft(id: impl Into<String>, draft: &TodoDraft) -> Self {
        Self {
            id: id.into(),
            description: draft.description.clone(),
            date_created: normalize_timestamp(draft.date_created),
            completed: draft.completed,
        }
    }

    /// A record is valid when its description has visible content.
    pub fn is_valid(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// Form input for a submit or an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub description: String,
    pub date_created: DateTime<Utc>,
    pub completed: bool,
}

impl TodoDraft {
    pub fn new(description: impl Into<String>, date_created: DateTime<Utc>, completed: bool) -> Self {
        Self {
            description: description.into(),
            date_created,
            completed,
        }
    }
}

/// Fresh, unique id for a record created on this client.
pub fn generate_todo_id() -> String {
    Uuid::new_v4().to_string()
}

/// Render a timestamp the way the store expects it: RFC 3339, UTC,
/// millisecond precision, `Z` suffix.
pub fn normalize_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
