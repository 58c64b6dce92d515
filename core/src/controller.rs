//! The todo synchronization controller.
//!
//! # Design
//! `TodoSync` wraps `SyncState` with the request side of the workflow. Every
//! operation that needs the store returns a `PendingRequest`; the host
//! executes it and reports back through `settle`. Settling a create or an
//! update always hands back exactly one follow-up refresh, so the list is
//! re-read from the store after every mutation whatever its outcome.
//!
//! Each request carries a `Ticket` with a monotonic sequence number. A
//! refresh that settles after a newer refresh has already been applied is
//! dropped (last request wins). A ticket settles at most once.

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::client::TodoClient;
use crate::config::{SyncConfig, INITIAL_FETCH_DELAY};
use crate::error::{ApiError, SyncError};
use crate::http::{HttpRequest, HttpResponse};
use crate::state::{DismissKind, MutationKind, SyncState};
use crate::types::{generate_todo_id, TodoDraft, TodoRecord};
use crate::view::{Dialog, FormView, ListView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Refresh,
    Create,
    Update,
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    kind: RequestKind,
    seq: u64,
}

impl Ticket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// A request the host must execute and then `settle`.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// Returned by `initialize`: wait `delay`, then execute `request`.
#[derive(Debug, Clone)]
pub struct Startup {
    pub delay: Duration,
    pub request: PendingRequest,
}

#[derive(Debug)]
pub struct TodoSync {
    client: TodoClient,
    state: SyncState,
    initialized: bool,
    next_seq: u64,
    in_flight: HashSet<u64>,
    newest_applied_refresh: Option<u64>,
}

impl TodoSync {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            state: SyncState::new(),
            initialized: false,
            next_seq: 0,
            in_flight: HashSet::new(),
            newest_applied_refresh: None,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(TodoClient::new(&config.base_url))
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Number of issued requests that have not been settled yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Schedule the first list fetch. Valid once per controller.
    pub fn initialize(&mut self) -> Result<Startup, SyncError> {
        if self.initialized {
            return Err(SyncError::AlreadyInitialized);
        }
        self.initialized = true;
        let request = self.refresh();
        Ok(Startup {
            delay: INITIAL_FETCH_DELAY,
            request,
        })
    }

    /// Issue a fetch of the whole list.
    pub fn refresh(&mut self) -> PendingRequest {
        let request = self.client.build_list_todos();
        self.issue(RequestKind::Refresh, request)
    }

    /// Create a new todo from `draft` under a freshly generated id.
    pub fn submit(&mut self, draft: &TodoDraft) -> Result<PendingRequest, SyncError> {
        let todo = TodoRecord::from_draft(generate_todo_id(), draft);
        if !todo.is_valid() {
            return Err(SyncError::EmptyDescription);
        }
        let request = self.client.build_create_todo(&todo)?;
        self.state.begin_mutation(MutationKind::Create);
        Ok(self.issue(RequestKind::Create, request))
    }

    /// Replace the selected todo with `draft`.
    pub fn update(&mut self, todo_id: &str, draft: &TodoDraft) -> Result<PendingRequest, SyncError> {
        match self.state.selected() {
            Some(selected) if selected.id == todo_id => {}
            _ => return Err(SyncError::NotEditing(todo_id.to_string())),
        }
        let todo = TodoRecord::from_draft(todo_id, draft);
        if !todo.is_valid() {
            return Err(SyncError::EmptyDescription);
        }
        let request = self.client.build_update_todo(&todo)?;
        self.state.begin_mutation(MutationKind::Update);
        Ok(self.issue(RequestKind::Update, request))
    }

    /// Load the todo with `todo_id` into the edit form.
    pub fn select(&mut self, todo_id: &str) -> Result<&TodoRecord, SyncError> {
        self.state.select(todo_id)
    }

    /// Return the form to create mode.
    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }

    pub fn dismiss(&mut self, kind: DismissKind) {
        self.state.dismiss(kind);
    }

    /// Apply the outcome of a request returned earlier. Transport failures
    /// arrive as `ApiError::Transport`.
    ///
    /// Returns the refresh that must follow a mutation; `None` after a
    /// refresh or for a ticket that is not in flight.
    pub fn settle(&mut self, ticket: Ticket, outcome: Result<HttpResponse, ApiError>) -> Option<PendingRequest> {
        if !self.in_flight.remove(&ticket.seq) {
            warn!(seq = ticket.seq, kind = ?ticket.kind, "ignoring outcome for a request that is not in flight");
            return None;
        }

        match ticket.kind {
            RequestKind::Refresh => {
                self.apply_refresh(ticket.seq, outcome);
                None
            }
            RequestKind::Create => {
                let result = outcome.and_then(|r| self.client.parse_create_todo(r));
                self.finish_mutation(ticket, MutationKind::Create, result);
                Some(self.refresh())
            }
            RequestKind::Update => {
                let result = outcome.and_then(|r| self.client.parse_update_todo(r));
                self.finish_mutation(ticket, MutationKind::Update, result);
                Some(self.refresh())
            }
        }
    }

    pub fn list_view(&self) -> ListView<'_> {
        ListView::new(&self.state)
    }

    pub fn form_view(&self) -> FormView<'_> {
        FormView::new(&self.state)
    }

    pub fn dialogs(&self) -> Vec<Dialog<'_>> {
        Dialog::visible(&self.state)
    }

    fn issue(&mut self, kind: RequestKind, request: HttpRequest) -> PendingRequest {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.insert(seq);
        debug!(seq, ?kind, method = request.method.as_str(), path = %request.path, "issuing request");
        PendingRequest {
            ticket: Ticket { kind, seq },
            request,
        }
    }

    fn apply_refresh(&mut self, seq: u64, outcome: Result<HttpResponse, ApiError>) {
        if let Some(newest) = self.newest_applied_refresh {
            if seq < newest {
                warn!(seq, newest, "dropping stale list refresh");
                return;
            }
        }
        self.newest_applied_refresh = Some(seq);

        let result = outcome.and_then(|r| self.client.parse_list_todos(r));
        match &result {
            Ok(todos) => info!(seq, count = todos.len(), "todo list refreshed"),
            Err(err) => warn!(seq, error = %err, "todo list refresh failed"),
        }
        self.state.apply_fetch(result);
    }

    fn finish_mutation(&mut self, ticket: Ticket, kind: MutationKind, result: Result<(), ApiError>) {
        match &result {
            Ok(()) => info!(seq = ticket.seq, ?kind, "mutation accepted"),
            Err(err) => warn!(seq = ticket.seq, ?kind, error = %err, "mutation failed"),
        }
        self.state.finish_mutation(kind, result);
    }
}
