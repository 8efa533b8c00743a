//! Client-side synchronization core for a single user's todo list.
//!
//! # Overview
//! `TodoListController` owns the in-memory list and keeps it in sync with a
//! remote CRUD collection through the [`TodoApi`] trait. The HTTP flavour of
//! that trait, [`HttpTodoApi`], builds and parses requests with the stateless
//! [`TodoClient`] and leaves the round-trip to a host-provided [`Transport`].
//!
//! # Design
//! - `TodoClient` is stateless and holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - The controller reconciles by reload: adds and updates are followed by a
//!   full list refetch instead of local patching.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod controller;
pub mod error;
pub mod filter;
pub mod http;
pub mod types;

pub use api::{HttpTodoApi, TodoApi};
pub use client::TodoClient;
pub use controller::{BatchReport, TodoListController, TodoListView};
pub use error::{ApiError, ErrorKind};
pub use filter::FilterOption;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{Todo, TodoDraft, TodoId, TodoPatch, User, UserId, UNSAVED_TODO_ID};
