use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub user_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub user_id: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub user_id: Option<u64>,
}

/// Todos keyed by id. Ids come from a counter, so key order is insertion order.
#[derive(Debug)]
pub struct Store {
    next_id: u64,
    todos: BTreeMap<u64, Todo>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            todos: BTreeMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    let todos: Vec<Todo> = store
        .todos
        .values()
        .filter(|todo| query.user_id.is_none_or(|user_id| todo.user_id == user_id))
        .cloned()
        .collect();
    tracing::debug!(user_id = ?query.user_id, count = todos.len(), "list todos");
    Json(todos)
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut store = db.write().await;
    let todo = Todo {
        id: store.next_id,
        user_id: input.user_id,
        title: input.title,
        completed: input.completed,
    };
    store.next_id += 1;
    store.todos.insert(todo.id, todo.clone());
    tracing::debug!(todo_id = todo.id, user_id = todo.user_id, "created todo");
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, StatusCode> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    if let Some(user_id) = input.user_id {
        todo.user_id = user_id;
    }
    tracing::debug!(todo_id = id, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let removed = store.todos.remove(&id);
    tracing::debug!(todo_id = id, found = removed.is_some(), "delete todo");
    removed.map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_camel_case() {
        let todo = Todo {
            id: 1,
            user_id: 7,
            title: "Test".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["userId"], 7);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn create_todo_defaults_completed_to_false() {
        let input: CreateTodo =
            serde_json::from_str(r#"{"title":"No completed field","userId":7}"#).unwrap();
        assert_eq!(input.title, "No completed field");
        assert!(!input.completed);
    }

    #[test]
    fn create_todo_requires_user_id() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"title":"Orphan"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_todo_rejects_missing_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"completed":true,"userId":7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_todo_all_fields_optional() {
        let input: UpdateTodo = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.completed.is_none());
        assert!(input.user_id.is_none());
    }

    #[test]
    fn store_ids_start_at_one() {
        assert_eq!(Store::default().next_id, 1);
    }
}
