use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, TodoRecord};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn list_request() -> Request<String> {
    Request::builder().uri("/todos").body(String::new()).unwrap()
}

fn record(id: &str, description: &str) -> TodoRecord {
    TodoRecord {
        id: id.to_string(),
        description: description.to_string(),
        date_created: "2024-01-01T00:00:00.000Z".to_string(),
        completed: false,
    }
}

const MILK: &str =
    r#"{"_id":"1","todoDescription":"Buy milk","todoDateCreated":"2024-01-01T00:00:00.000Z","todoCompleted":false}"#;

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = app().oneshot(list_request()).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<TodoRecord> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_todos_keeps_insertion_order() {
    let seeded = vec![record("c", "third"), record("a", "first"), record("b", "second")];
    let resp = app_with(seeded.clone()).oneshot(list_request()).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<TodoRecord> = body_json(resp).await;
    assert_eq!(todos, seeded);
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201() {
    let resp = app().oneshot(json_request("POST", "/todos", MILK)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: TodoRecord = body_json(resp).await;
    assert_eq!(todo, record("1", "Buy milk"));
}

#[tokio::test]
async fn create_todo_duplicate_id_returns_409() {
    let resp = app_with(vec![record("1", "Existing")])
        .oneshot(json_request("POST", "/todos", MILK))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_todo_empty_description_returns_400() {
    let body = r#"{"_id":"1","todoDescription":"","todoDateCreated":"2024-01-01T00:00:00.000Z","todoCompleted":false}"#;
    let resp = app().oneshot(json_request("POST", "/todos", body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"title":"wrong shape"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = app().oneshot(json_request("PUT", "/todos/1", MILK)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_todo_id_mismatch_returns_400() {
    let resp = app_with(vec![record("2", "Walk dog")])
        .oneshot(json_request("PUT", "/todos/2", MILK))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full lifecycle ---

#[tokio::test]
async fn create_update_list_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/todos", MILK))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // replace the whole record
    let replacement =
        r#"{"_id":"1","todoDescription":"Buy oat milk","todoDateCreated":"2024-01-01T00:00:00.000Z","todoCompleted":true}"#;
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/todos/1", replacement))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: TodoRecord = body_json(resp).await;
    assert_eq!(updated.description, "Buy oat milk");
    assert!(updated.completed);

    // list reflects the replacement
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(list_request())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<TodoRecord> = body_json(resp).await;
    assert_eq!(todos, vec![updated]);
}
