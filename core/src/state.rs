//! Client-side state of the todo list and its notices.
//!
//! # Design
//! `SyncState` is plain data plus one transition method per event. It knows
//! nothing about requests or sequencing; `TodoSync` decides which events
//! reach it. `LoadStatus` is derived from the fields on demand so it can
//! never disagree with them.

use crate::error::{ApiError, SyncError};
use crate::types::TodoRecord;

pub const NO_TODOS_MESSAGE: &str = "There are no todos stored";
pub const TODO_ADDED_MESSAGE: &str = "Todo added";
pub const TODO_UPDATED_MESSAGE: &str = "Todo updated";

/// Where the list stands. Exactly one variant holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus<'a> {
    /// No fetch has been applied yet.
    Loading,
    /// The latest applied fetch failed or returned no records.
    Error(&'a str),
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetErrorCause {
    /// The store could not be reached or answered with an error.
    Unavailable,
    /// The store answered with an empty list.
    NoTodos,
}

/// Failure of the latest applied list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetError {
    pub message: String,
    pub cause: GetErrorCause,
    /// How many times the user dismissed the dialog for this instance.
    pub acknowledgements: u32,
}

impl GetError {
    fn new(cause: GetErrorCause, message: String) -> Self {
        Self {
            message,
            cause,
            acknowledgements: 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.acknowledgements == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
}

/// Which notice the user dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissKind {
    Get,
    Post,
    Put,
    Confirmation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncState {
    todos: Vec<TodoRecord>,
    fetched: bool,
    get_error: Option<GetError>,
    post_error: Option<String>,
    put_error: Option<String>,
    confirmation: Option<String>,
    selected: Option<TodoRecord>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[TodoRecord] {
        &self.todos
    }

    pub fn load_status(&self) -> LoadStatus<'_> {
        match (&self.get_error, self.fetched) {
            (Some(err), _) => LoadStatus::Error(&err.message),
            (None, true) => LoadStatus::Loaded,
            (None, false) => LoadStatus::Loading,
        }
    }

    pub fn get_error(&self) -> Option<&GetError> {
        self.get_error.as_ref()
    }

    pub fn post_error(&self) -> Option<&str> {
        self.post_error.as_deref()
    }

    pub fn put_error(&self) -> Option<&str> {
        self.put_error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    pub fn selected(&self) -> Option<&TodoRecord> {
        self.selected.as_ref()
    }

    pub fn find(&self, id: &str) -> Option<&TodoRecord> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Replace the list with the outcome of a fetch.
    pub fn apply_fetch(&mut self, outcome: Result<Vec<TodoRecord>, ApiError>) {
        self.fetched = true;
        match outcome {
            Ok(todos) if todos.is_empty() => {
                self.todos.clear();
                self.selected = None;
                self.get_error = Some(GetError::new(GetErrorCause::NoTodos, NO_TODOS_MESSAGE.to_string()));
            }
            Ok(todos) => {
                self.todos = todos;
                self.get_error = None;
                self.reconcile_selection();
            }
            Err(err) => {
                // The selection still points into the last successful list.
                self.todos.clear();
                self.get_error = Some(GetError::new(
                    GetErrorCause::Unavailable,
                    format!("Data not available from the server: {err}"),
                ));
            }
        }
    }

    /// Reset the notices owned by `kind` before its request goes out.
    pub fn begin_mutation(&mut self, kind: MutationKind) {
        self.confirmation = None;
        match kind {
            MutationKind::Create => self.post_error = None,
            MutationKind::Update => {
                self.put_error = None;
                self.selected = None;
            }
        }
    }

    pub fn finish_mutation(&mut self, kind: MutationKind, outcome: Result<(), ApiError>) {
        match (kind, outcome) {
            (MutationKind::Create, Ok(())) => self.confirmation = Some(TODO_ADDED_MESSAGE.to_string()),
            (MutationKind::Update, Ok(())) => self.confirmation = Some(TODO_UPDATED_MESSAGE.to_string()),
            (MutationKind::Create, Err(err)) => {
                self.post_error = Some(format!("There was a problem adding the todo: {err}"));
            }
            (MutationKind::Update, Err(err)) => {
                self.put_error = Some(format!("There was a problem updating the todo: {err}"));
            }
        }
    }

    pub fn select(&mut self, id: &str) -> Result<&TodoRecord, SyncError> {
        let todo = self
            .find(id)
            .cloned()
            .ok_or_else(|| SyncError::UnknownTodo(id.to_string()))?;
        Ok(self.selected.insert(todo))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn dismiss(&mut self, kind: DismissKind) {
        match kind {
            DismissKind::Get => {
                if let Some(err) = self.get_error.as_mut() {
                    err.acknowledgements = err.acknowledgements.saturating_add(1);
                }
            }
            DismissKind::Post => self.post_error = None,
            DismissKind::Put => self.put_error = None,
            DismissKind::Confirmation => self.confirmation = None,
        }
    }

    /// Point the selection at the fresh copy of its record, or drop it when
    /// the record is gone.
    fn reconcile_selection(&mut self) {
        let Some(selected) = self.selected.take() else {
            return;
        };
        self.selected = self.find(&selected.id).cloned();
    }
}
