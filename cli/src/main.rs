//! `todo-sync` -- command line host for the todo list controller.
//!
//! # Usage
//!
//! ```bash
//! # Start the in-memory API
//! cargo run --bin mock-server
//!
//! # Add and list todos for user 7
//! cargo run --bin todo-sync -- --user-id 7 add "Buy milk"
//! cargo run --bin todo-sync -- --user-id 7 list --filter active
//!
//! # Or via environment variables
//! TODO_API_URL=http://127.0.0.1:3000 TODO_USER_ID=7 cargo run --bin todo-sync -- toggle-all
//! ```

mod commands;
mod config;
mod transport;

use std::process::ExitCode;

use clap::Parser;
use todo_sync::{HttpTodoApi, TodoListController, User};

use crate::config::{CliArgs, ClientConfig};
use crate::transport::ReqwestTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = CliArgs::parse();

    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(base_url = %config.base_url, user_id = ?config.user_id, "starting");

    let api = HttpTodoApi::new(&config.base_url, ReqwestTransport::new());
    let controller = TodoListController::new(api, config.user_id.map(User::with_id));

    if let Err(e) = commands::run(&controller, cli.command.unwrap_or_default()).await {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let view = controller.view();
    if let Err(e) = commands::render(&view, &mut std::io::stdout().lock()) {
        tracing::error!(error = %e, "failed to write output");
        return ExitCode::FAILURE;
    }

    if view.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
