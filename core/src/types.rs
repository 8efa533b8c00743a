//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates. Field
//! names are camelCase on the wire (`userId`).

use serde::{Deserialize, Serialize};

/// Server-assigned todo identifier.
pub type TodoId = u64;

/// Identifier of the user owning a todo.
pub type UserId = u64;

/// Id carried by an optimistic entry that the server has not persisted yet.
pub const UNSAVED_TODO_ID: TodoId = 0;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub user_id: UserId,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    /// Whether this entry is a local placeholder without a server id.
    pub fn is_unsaved(&self) -> bool {
        self.id == UNSAVED_TODO_ID
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoDraft {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub user_id: UserId,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>, user_id: UserId) -> Self {
        Self {
            title: title.into(),
            completed: false,
            user_id,
        }
    }

    /// The placeholder shown while the create request is in flight.
    pub fn to_optimistic(&self) -> Todo {
        Todo {
            id: UNSAVED_TODO_ID,
            user_id: self.user_id,
            title: self.title.clone(),
            completed: self.completed,
        }
    }
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// The authenticated user the list belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn with_id(id: UserId) -> Self {
        Self {
            id,
            name: None,
            email: None,
        }
    }
}
