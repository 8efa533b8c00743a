//! One subcommand per user intent, plus the text rendering of the list.

use std::io::{self, Write};

use todo_sync::{FilterOption, TodoApi, TodoDraft, TodoId, TodoListController, TodoListView};

#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the list.
    List {
        /// all, active or completed; anything else shows all.
        #[arg(short, long, default_value = "all")]
        filter: String,
    },
    /// Add a todo.
    Add {
        #[arg(value_parser = non_empty_title)]
        title: String,
    },
    /// Flip a todo between active and completed.
    Toggle { id: TodoId },
    /// Change a todo's title; an empty title deletes it.
    Rename { id: TodoId, title: String },
    /// Delete a todo.
    Delete { id: TodoId },
    /// Delete every completed todo.
    ClearCompleted,
    /// Complete all todos, or reopen them all when none is active.
    ToggleAll,
}

impl Default for Command {
    fn default() -> Self {
        Command::List {
            filter: FilterOption::All.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("no user configured; pass --user-id or set TODO_USER_ID")]
    Unauthenticated,
}

fn non_empty_title(raw: &str) -> Result<String, String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err("title can't be empty".to_string());
    }
    Ok(title.to_string())
}

/// Load the list, then apply `command`. Failures of the remote calls end up
/// in the controller's error banner, not in the returned `Result`.
pub async fn run<A: TodoApi>(
    controller: &TodoListController<A>,
    command: Command,
) -> Result<(), CommandError> {
    let Some(user) = controller.user() else {
        return Err(CommandError::Unauthenticated);
    };

    if controller.load_todos().await.is_err() {
        return Ok(());
    }

    match command {
        Command::List { filter } => controller.set_filter(FilterOption::parse_lenient(&filter)),
        Command::Add { title } => {
            if let Err(e) = controller.add_todo(TodoDraft::new(title, user.id)).await {
                tracing::debug!(error = %e, "add failed");
            }
        }
        Command::Toggle { id } => {
            if let Err(e) = controller.toggle_todo(id).await {
                tracing::debug!(todo_id = id, error = %e, "toggle failed");
            }
        }
        Command::Rename { id, title } => {
            if let Err(e) = controller.rename_todo(id, &title).await {
                tracing::debug!(todo_id = id, error = %e, "rename failed");
            }
        }
        Command::Delete { id } => {
            if let Err(e) = controller.delete_todo(id).await {
                tracing::debug!(todo_id = id, error = %e, "delete failed");
            }
        }
        Command::ClearCompleted => {
            let report = controller.clear_completed().await;
            tracing::info!(deleted = report.succeeded.len(), failed = report.failed.len(), "clear completed");
        }
        Command::ToggleAll => {
            let report = controller.toggle_all().await;
            tracing::info!(updated = report.succeeded.len(), failed = report.failed.len(), "toggle all");
        }
    }
    Ok(())
}

pub fn render(view: &TodoListView, out: &mut impl Write) -> io::Result<()> {
    if view.has_todos {
        for todo in &view.visible {
            let mark = if todo.completed { "x" } else { " " };
            let busy = if view.is_pending(todo.id) { "  (saving)" } else { "" };
            writeln!(out, "[{mark}] {:>4}  {}{busy}", todo.id, todo.title)?;
        }

        let mut footer = format!("{}  |  filter: {}", view.items_left(), view.filter);
        if view.clear_needed {
            footer.push_str("  |  clear-completed available");
        }
        writeln!(out, "{footer}")?;
    } else {
        writeln!(out, "nothing to do")?;
    }

    if let Some(error) = view.error {
        writeln!(out, "error: {}", error.message())?;
    }
    Ok(())
}
