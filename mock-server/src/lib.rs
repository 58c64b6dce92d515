use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
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

/// Records in insertion order; the list endpoint returns them as stored.
pub type Db = Arc<RwLock<Vec<TodoRecord>>>;

type Rejection = (StatusCode, &'static str);

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router over a store seeded with `todos`.
pub fn app_with(todos: Vec<TodoRecord>) -> Router {
    let db: Db = Arc::new(RwLock::new(todos));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<TodoRecord>> {
    let todos = db.read().await;
    tracing::debug!(count = todos.len(), "list todos");
    Json(todos.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoRecord>,
) -> Result<(StatusCode, Json<TodoRecord>), Rejection> {
    validate(&input)?;
    let mut todos = db.write().await;
    if todos.iter().any(|t| t.id == input.id) {
        tracing::warn!(id = %input.id, "duplicate todo id");
        return Err((StatusCode::CONFLICT, "a todo with this _id already exists"));
    }
    todos.push(input.clone());
    tracing::info!(id = %input.id, "todo created");
    Ok((StatusCode::CREATED, Json(input)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<TodoRecord>,
) -> Result<Json<TodoRecord>, Rejection> {
    if input.id != id {
        return Err((StatusCode::BAD_REQUEST, "_id does not match the request path"));
    }
    validate(&input)?;
    let mut todos = db.write().await;
    let todo = todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or((StatusCode::NOT_FOUND, "todo not found"))?;
    *todo = input;
    tracing::info!(%id, "todo replaced");
    Ok(Json(todo.clone()))
}

fn validate(todo: &TodoRecord) -> Result<(), Rejection> {
    if todo.description.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "todoDescription must not be empty"));
    }
    Ok(())
}
