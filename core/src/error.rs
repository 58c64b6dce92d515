//! Error types for the sync core.
//!
//! # Design
//! `ApiError` covers everything that can go wrong talking to the Todo Store.
//! The controller never lets it escape: it is caught at `settle` and turned
//! into a stored message. `SyncError` is for caller mistakes that are
//! rejected before any request is built, and `ConfigError` for a bad
//! environment.

use thiserror::Error;

/// Failures of a single round-trip to the Todo Store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The host could not complete the round-trip (connection refused, DNS,
    /// timeout, ...).
    #[error("network error: {0}")]
    Transport(String),
}

/// Operations the controller refuses to start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("controller already initialized")]
    AlreadyInitialized,

    #[error("todo description must not be empty")]
    EmptyDescription,

    /// `update` was called for a todo that is not loaded into the edit form.
    #[error("todo {0} is not selected for editing")]
    NotEditing(String),

    #[error("no todo with id {0} in the current list")]
    UnknownTodo(String),

    #[error(transparent)]
    Request(#[from] ApiError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
}
