//! State owner for a single user's todo list.
//!
//! # Design
//! `TodoListController` keeps the in-memory collection together with the
//! transient UI state (error banner, adding flag, pending ids) behind one
//! mutex. Async operations only take the lock in short synchronous sections,
//! never across an `.await`, so batch operations can drive many borrowed
//! futures concurrently on one task.
//!
//! Every operation records its own failure as an [`ErrorKind`] and reveals
//! the banner; the `Result` it returns is informational. Updates and adds
//! are reconciled by reloading the whole collection from the server.

use std::collections::BTreeSet;

use futures_util::future::join_all;
use parking_lot::Mutex;

use crate::api::TodoApi;
use crate::error::{ApiError, ErrorKind};
use crate::filter::{self, FilterOption};
use crate::types::{Todo, TodoDraft, TodoId, TodoPatch, User};

#[derive(Debug)]
struct ListState {
    user: Option<User>,
    todos: Vec<Todo>,
    error: ErrorKind,
    error_hidden: bool,
    filter: FilterOption,
    is_adding: bool,
    pending_ids: BTreeSet<TodoId>,
}

impl ListState {
    fn new(user: Option<User>) -> Self {
        Self {
            user,
            todos: Vec::new(),
            error: ErrorKind::default(),
            error_hidden: true,
            filter: FilterOption::default(),
            is_adding: false,
            pending_ids: BTreeSet::new(),
        }
    }

    fn fail(&mut self, kind: ErrorKind) {
        self.error = kind;
        self.error_hidden = false;
    }
}

/// Snapshot handed to presentational collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListView {
    pub visible: Vec<Todo>,
    pub pending_ids: BTreeSet<TodoId>,
    pub filter: FilterOption,
    pub active_count: usize,
    pub has_todos: bool,
    /// Drives the toggle-all control's active state.
    pub all_completed: bool,
    pub clear_needed: bool,
    pub is_adding: bool,
    /// The banner's error while it is visible.
    pub error: Option<ErrorKind>,
}

impl TodoListView {
    pub fn items_left(&self) -> String {
        filter::items_left_label(self.active_count)
    }

    pub fn is_pending(&self, id: TodoId) -> bool {
        self.pending_ids.contains(&id)
    }
}

/// Outcome of a fan-out operation. Failures never short-circuit the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<TodoId>,
    pub failed: Vec<(TodoId, ApiError)>,
}

impl BatchReport {
    fn collect(ids: Vec<TodoId>, results: Vec<Result<(), ApiError>>) -> Self {
        let mut report = Self::default();
        for (id, result) in ids.into_iter().zip(results) {
            match result {
                Ok(()) => report.succeeded.push(id),
                Err(e) => report.failed.push((id, e)),
            }
        }
        report
    }

    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Marks a todo as busy for the duration of a delete/update round-trip.
///
/// Dropping the guard empties the whole pending set, not just its own id.
struct PendingGuard<'a> {
    state: &'a Mutex<ListState>,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().pending_ids.clear();
    }
}

/// Keeps the optimistic entry and the adding flag alive while a create is
/// in flight.
struct OptimisticAdd<'a> {
    state: &'a Mutex<ListState>,
    placeholder: Todo,
}

impl Drop for OptimisticAdd<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.is_adding = false;
        if let Some(pos) = state.todos.iter().position(|todo| *todo == self.placeholder) {
            state.todos.remove(pos);
        }
    }
}

/// Owns the todo list of the current user and keeps it in sync with a
/// remote [`TodoApi`].
pub struct TodoListController<A> {
    api: A,
    state: Mutex<ListState>,
}

impl<A: TodoApi> TodoListController<A> {
    pub fn new(api: A, user: Option<User>) -> Self {
        Self {
            api,
            state: Mutex::new(ListState::new(user)),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn user(&self) -> Option<User> {
        self.state.lock().user.clone()
    }

    /// Swap the authenticated user. A different user starts from an empty
    /// list; call [`load_todos`](Self::load_todos) afterwards.
    pub fn set_user(&self, user: Option<User>) {
        let mut state = self.state.lock();
        let changed = state.user.as_ref().map(|u| u.id) != user.as_ref().map(|u| u.id);
        state.user = user;
        if changed {
            state.todos.clear();
            state.pending_ids.clear();
        }
    }

    // -----------------------------------------------------------------------
    // Remote operations
    // -----------------------------------------------------------------------

    /// Replace the collection with the server's list for the current user.
    ///
    /// Does nothing while unauthenticated.
    pub async fn load_todos(&self) -> Result<(), ApiError> {
        let Some(user_id) = self.state.lock().user.as_ref().map(|u| u.id) else {
            tracing::debug!("no authenticated user, skipping load");
            return Ok(());
        };

        match self.api.list_todos(user_id).await {
            Ok(todos) => {
                tracing::debug!(user_id, count = todos.len(), "loaded todos");
                self.state.lock().todos = todos;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "failed to load todos");
                self.state.lock().fail(ErrorKind::Get);
                Err(e)
            }
        }
    }

    /// Create a todo, showing an optimistic placeholder meanwhile.
    ///
    /// The placeholder is removed on every exit path and the list is then
    /// reloaded, whatever the create request returned.
    pub async fn add_todo(&self, draft: TodoDraft) -> Result<Todo, ApiError> {
        let adding = {
            let placeholder = draft.to_optimistic();
            let mut state = self.state.lock();
            state.error_hidden = true;
            state.is_adding = true;
            state.todos.push(placeholder.clone());
            OptimisticAdd {
                state: &self.state,
                placeholder,
            }
        };

        let result = self.api.create_todo(&draft).await;
        match &result {
            Ok(todo) => tracing::debug!(todo_id = todo.id, "created todo"),
            Err(e) => {
                tracing::warn!(title = %draft.title, error = %e, "failed to create todo");
                self.state.lock().fail(ErrorKind::Add);
            }
        }
        drop(adding);

        // a failed reload is recorded as ErrorKind::Get
        let _ = self.load_todos().await;
        result
    }

    /// Delete a todo; on success it disappears from the local list.
    pub async fn delete_todo(&self, id: TodoId) -> Result<(), ApiError> {
        let _pending = self.mark_pending(id);

        match self.api.delete_todo(id).await {
            Ok(()) => {
                tracing::debug!(todo_id = id, "deleted todo");
                self.state.lock().todos.retain(|todo| todo.id != id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(todo_id = id, error = %e, "failed to delete todo");
                self.state.lock().fail(ErrorKind::Delete);
                Err(e)
            }
        }
    }

    /// Apply a partial update, then reload the list once.
    pub async fn update_todo(&self, id: TodoId, patch: TodoPatch) -> Result<(), ApiError> {
        let _pending = self.mark_pending(id);

        if let Err(e) = self.api.update_todo(id, &patch).await {
            tracing::warn!(todo_id = id, error = %e, "failed to update todo");
            self.state.lock().fail(ErrorKind::Update);
            return Err(e);
        }
        tracing::debug!(todo_id = id, "updated todo");
        self.load_todos().await
    }

    /// Flip the completed flag of one todo. Unknown ids are ignored.
    pub async fn toggle_todo(&self, id: TodoId) -> Result<(), ApiError> {
        let Some(completed) = self.find(id).map(|todo| todo.completed) else {
            return Ok(());
        };
        self.update_todo(id, TodoPatch::completed(!completed)).await
    }

    /// Commit an inline edit: an empty title deletes the todo, an unchanged
    /// one is a no-op.
    pub async fn rename_todo(&self, id: TodoId, title: &str) -> Result<(), ApiError> {
        let Some(current) = self.find(id) else {
            return Ok(());
        };
        let title = title.trim();
        if title.is_empty() {
            return self.delete_todo(id).await;
        }
        if title == current.title {
            return Ok(());
        }
        self.update_todo(id, TodoPatch::title(title)).await
    }

    /// Delete every completed todo concurrently.
    pub async fn clear_completed(&self) -> BatchReport {
        let ids: Vec<TodoId> = self
            .state
            .lock()
            .todos
            .iter()
            .filter(|todo| todo.completed && !todo.is_unsaved())
            .map(|todo| todo.id)
            .collect();

        let results = join_all(ids.iter().map(|&id| self.delete_todo(id))).await;
        let report = BatchReport::collect(ids, results);
        tracing::debug!(deleted = report.succeeded.len(), failed = report.failed.len(), "cleared completed");
        report
    }

    /// Complete every active todo, or reopen all of them when none is active.
    pub async fn toggle_all(&self) -> BatchReport {
        let targets: Vec<(TodoId, bool)> = {
            let state = self.state.lock();
            let any_active = state.todos.iter().any(|todo| !todo.completed);
            state
                .todos
                .iter()
                .filter(|todo| !todo.is_unsaved() && (!any_active || !todo.completed))
                .map(|todo| (todo.id, todo.completed))
                .collect()
        };

        let results = join_all(
            targets
                .iter()
                .map(|&(id, completed)| self.update_todo(id, TodoPatch::completed(!completed))),
        )
        .await;
        let ids = targets.into_iter().map(|(id, _)| id).collect();
        let report = BatchReport::collect(ids, results);
        tracing::debug!(updated = report.succeeded.len(), failed = report.failed.len(), "toggled all");
        report
    }

    // -----------------------------------------------------------------------
    // Local state
    // -----------------------------------------------------------------------

    pub fn set_filter(&self, filter: FilterOption) {
        self.state.lock().filter = filter;
    }

    pub fn filter(&self) -> FilterOption {
        self.state.lock().filter
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.state.lock().todos.clone()
    }

    pub fn visible_todos(&self) -> Vec<Todo> {
        let state = self.state.lock();
        filter::derive_visible(&state.todos, state.filter)
    }

    pub fn active_count(&self) -> usize {
        filter::active_count(&self.state.lock().todos)
    }

    pub fn is_clear_needed(&self) -> bool {
        let state = self.state.lock();
        filter::is_clear_needed(&state.todos, state.filter)
    }

    pub fn is_adding(&self) -> bool {
        self.state.lock().is_adding
    }

    pub fn pending_ids(&self) -> BTreeSet<TodoId> {
        self.state.lock().pending_ids.clone()
    }

    pub fn is_pending(&self, id: TodoId) -> bool {
        self.state.lock().pending_ids.contains(&id)
    }

    pub fn error(&self) -> ErrorKind {
        self.state.lock().error
    }

    pub fn is_error_hidden(&self) -> bool {
        self.state.lock().error_hidden
    }

    /// Record an error raised outside the controller, e.g. by the input form.
    pub fn report_error(&self, kind: ErrorKind) {
        self.state.lock().fail(kind);
    }

    pub fn hide_error(&self) {
        self.state.lock().error_hidden = true;
    }

    pub fn show_error(&self) {
        self.state.lock().error_hidden = false;
    }

    pub fn view(&self) -> TodoListView {
        let state = self.state.lock();
        let active_count = filter::active_count(&state.todos);
        TodoListView {
            visible: filter::derive_visible(&state.todos, state.filter),
            pending_ids: state.pending_ids.clone(),
            filter: state.filter,
            active_count,
            has_todos: !state.todos.is_empty(),
            all_completed: active_count == 0,
            clear_needed: filter::is_clear_needed(&state.todos, state.filter),
            is_adding: state.is_adding,
            error: (!state.error_hidden).then_some(state.error),
        }
    }

    fn find(&self, id: TodoId) -> Option<Todo> {
        self.state.lock().todos.iter().find(|todo| todo.id == id).cloned()
    }

    fn mark_pending(&self, id: TodoId) -> PendingGuard<'_> {
        let mut state = self.state.lock();
        state.error_hidden = true;
        state.pending_ids.insert(id);
        PendingGuard { state: &self.state }
    }
}
