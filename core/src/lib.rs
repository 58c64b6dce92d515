//! Client-side synchronization core for a remote todo list.
//!
//! # Overview
//! `TodoSync` keeps a local copy of the list held by a REST Todo Store and
//! tracks the notices a UI shows around it: the fetch error, the create and
//! update errors, a confirmation, and the todo currently loaded into the
//! edit form. It never touches the network. Operations return plain-data
//! requests; the host executes them and settles the outcome back
//! (host-does-IO pattern).
//!
//! # Design
//! - `TodoClient` is stateless: `build_*` produces a request, `parse_*`
//!   consumes a response.
//! - `SyncState` is plain data with one transition per event; `TodoSync`
//!   adds request sequencing (tickets, last-refresh-wins).
//! - Every settled create/update yields exactly one follow-up refresh; the
//!   list is never patched locally.
//! - Views in `view` are borrowed read models for a presentation layer.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod state;
pub mod transport;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use config::{SyncConfig, INITIAL_FETCH_DELAY};
pub use controller::{PendingRequest, RequestKind, Startup, Ticket, TodoSync};
pub use error::{ApiError, ConfigError, SyncError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{DismissKind, GetError, GetErrorCause, LoadStatus, MutationKind, SyncState};
pub use transport::{drive, start, Transport};
pub use types::{generate_todo_id, normalize_timestamp, TodoDraft, TodoRecord};
pub use view::{Dialog, FormMode, FormView, ListView, Placeholder, RowAction, TodoRow};
