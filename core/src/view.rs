//! Data contracts for the presentation layer.
//!
//! Nothing here renders. Each view borrows from `SyncState` and exposes
//! exactly what the list, the form and the notice dialogs need.

use chrono::{DateTime, Utc};

use crate::state::{DismissKind, LoadStatus, SyncState};
use crate::types::TodoRecord;

const LOADING_MESSAGE: &str = "Data is loading...";
const INVALID_DATE: &str = "Invalid Date";

/// `{ todos, error }` as consumed by the list.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    pub todos: &'a [TodoRecord],
    pub error: Option<&'a str>,
    status: LoadStatus<'a>,
}

impl<'a> ListView<'a> {
    pub fn new(state: &'a SyncState) -> Self {
        let status = state.load_status();
        let error = match status {
            LoadStatus::Error(msg) => Some(msg),
            _ => None,
        };
        Self {
            todos: state.todos(),
            error,
            status,
        }
    }

    /// One row per record, in the order the store returned them.
    pub fn rows(&self) -> Vec<TodoRow<'a>> {
        self.todos.iter().map(TodoRow::new).collect()
    }

    /// What to show in place of rows when there are none.
    pub fn placeholder(&self) -> Option<Placeholder<'a>> {
        if !self.todos.is_empty() {
            return None;
        }
        match self.status {
            LoadStatus::Loading => Some(Placeholder::Loading),
            LoadStatus::Error(msg) => Some(Placeholder::Error(msg)),
            LoadStatus::Loaded => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder<'a> {
    Loading,
    Error(&'a str),
}

impl<'a> Placeholder<'a> {
    pub fn message(&self) -> &'a str {
        match *self {
            Placeholder::Loading => LOADING_MESSAGE,
            Placeholder::Error(msg) => msg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    /// Completed todos are not editable.
    NotApplicable,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            RowAction::Edit => "Edit",
            RowAction::NotApplicable => "N/A",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow<'a> {
    pub id: &'a str,
    pub description: &'a str,
    pub created_display: String,
    pub completed: bool,
    pub action: RowAction,
}

impl<'a> TodoRow<'a> {
    fn new(todo: &'a TodoRecord) -> Self {
        Self {
            id: &todo.id,
            description: &todo.description,
            created_display: display_date(&todo.date_created),
            completed: todo.completed,
            action: if todo.completed { RowAction::NotApplicable } else { RowAction::Edit },
        }
    }
}

/// Format a stored timestamp as an HTTP date (`Sat, 04 May 2019 15:30:00 GMT`).
pub fn display_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => at.with_timezone(&Utc).format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        Err(_) => INVALID_DATE.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<'a> {
    Create,
    Edit(&'a TodoRecord),
}

#[derive(Debug, Clone, Copy)]
pub struct FormView<'a> {
    pub mode: FormMode<'a>,
}

impl<'a> FormView<'a> {
    pub fn new(state: &'a SyncState) -> Self {
        let mode = match state.selected() {
            Some(todo) => FormMode::Edit(todo),
            None => FormMode::Create,
        };
        Self { mode }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn can_submit(description: &str) -> bool {
        !description.trim().is_empty()
    }
}

/// A notice currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialog<'a> {
    pub kind: DismissKind,
    pub message: &'a str,
}

impl<'a> Dialog<'a> {
    /// Visible notices in display order: get, post, put, confirmation.
    pub fn visible(state: &'a SyncState) -> Vec<Self> {
        let get = state
            .get_error()
            .filter(|err| err.is_visible())
            .map(|err| Dialog {
                kind: DismissKind::Get,
                message: err.message.as_str(),
            });
        let notices = [
            (DismissKind::Post, state.post_error()),
            (DismissKind::Put, state.put_error()),
            (DismissKind::Confirmation, state.confirmation()),
        ];
        get.into_iter()
            .chain(
                notices
                    .into_iter()
                    .filter_map(|(kind, message)| message.map(|message| Dialog { kind, message })),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::state::MutationKind;

    fn record(id: &str, completed: bool) -> TodoRecord {
        TodoRecord {
            id: id.to_string(),
            description: format!("Todo {id}"),
            date_created: "2019-05-04T15:30:00.000Z".to_string(),
            completed,
        }
    }

    #[test]
    fn list_rows_follow_server_order() {
        let mut state = SyncState::new();
        state.apply_fetch(Ok(vec![record("c", false), record("a", true), record("b", false)]));
        let view = ListView::new(&state);
        let ids: Vec<_> = view.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, ["c", "a", "b"]);
        assert!(view.error.is_none());
        assert!(view.placeholder().is_none());
    }

    #[test]
    fn completed_rows_are_not_editable() {
        let mut state = SyncState::new();
        state.apply_fetch(Ok(vec![record("1", true), record("2", false)]));
        let rows = ListView::new(&state).rows();
        assert_eq!(rows[0].action.label(), "N/A");
        assert_eq!(rows[1].action.label(), "Edit");
        assert_eq!(rows[0].created_display, "Sat, 04 May 2019 15:30:00 GMT");
    }

    #[test]
    fn placeholder_tracks_load_status() {
        let mut state = SyncState::new();
        assert_eq!(ListView::new(&state).placeholder(), Some(Placeholder::Loading));
        assert_eq!(
            ListView::new(&state).placeholder().unwrap().message(),
            "Data is loading..."
        );

        state.apply_fetch(Ok(Vec::new()));
        let view = ListView::new(&state);
        assert_eq!(view.error, Some("There are no todos stored"));
        assert_eq!(view.placeholder().unwrap().message(), "There are no todos stored");
    }

    #[test]
    fn display_date_handles_offsets_and_garbage() {
        assert_eq!(display_date("2024-01-01T02:00:00+02:00"), "Mon, 01 Jan 2024 00:00:00 GMT");
        assert_eq!(display_date("yesterday"), "Invalid Date");
    }

    #[test]
    fn form_mode_follows_selection() {
        let mut state = SyncState::new();
        state.apply_fetch(Ok(vec![record("1", false)]));
        assert_eq!(FormView::new(&state).mode, FormMode::Create);

        state.select("1").unwrap();
        let form = FormView::new(&state);
        assert!(form.is_editing());
        assert!(matches!(form.mode, FormMode::Edit(todo) if todo.id == "1"));
    }

    #[test]
    fn submit_needs_a_description() {
        assert!(!FormView::can_submit(""));
        assert!(!FormView::can_submit("  "));
        assert!(FormView::can_submit("Buy milk"));
    }

    #[test]
    fn dialogs_list_visible_notices_in_order() {
        let mut state = SyncState::new();
        state.apply_fetch(Err(ApiError::NotFound));
        state.finish_mutation(MutationKind::Update, Err(ApiError::NotFound));
        state.finish_mutation(MutationKind::Create, Err(ApiError::NotFound));

        let kinds: Vec<_> = Dialog::visible(&state).iter().map(|d| d.kind).collect();
        assert_eq!(kinds, [DismissKind::Get, DismissKind::Post, DismissKind::Put]);

        state.dismiss(DismissKind::Get);
        let kinds: Vec<_> = Dialog::visible(&state).iter().map(|d| d.kind).collect();
        assert_eq!(kinds, [DismissKind::Post, DismissKind::Put]);
    }
}
