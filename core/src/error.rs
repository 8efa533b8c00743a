//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging. `Transport` carries failures reported
//! by the host while executing a request.

/// Errors returned by `TodoClient` parse methods and `Transport` hosts.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404 and the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Which category of operation last failed; selects the banner message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[default]
    Get,
    Add,
    Delete,
    Update,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Get => "Unable to load todos",
            ErrorKind::Add => "Unable to add a todo",
            ErrorKind::Delete => "Unable to delete a todo",
            ErrorKind::Update => "Unable to update a todo",
        }
    }
}
