//! The remote collection resource as seen by the controller.
//!
//! `TodoApi` is the seam the controller talks to. `HttpTodoApi` implements it
//! by pairing the stateless `TodoClient` with a host-provided `Transport`.

use std::future::Future;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{Todo, TodoDraft, TodoId, TodoPatch, UserId};

/// CRUD operations on the remote todo collection.
pub trait TodoApi: Send + Sync {
    /// All todos owned by `user_id`, in server order.
    fn list_todos(&self, user_id: UserId) -> impl Future<Output = Result<Vec<Todo>, ApiError>> + Send;

    fn create_todo(&self, draft: &TodoDraft) -> impl Future<Output = Result<Todo, ApiError>> + Send;

    fn update_todo(
        &self,
        id: TodoId,
        patch: &TodoPatch,
    ) -> impl Future<Output = Result<Todo, ApiError>> + Send;

    fn delete_todo(&self, id: TodoId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// `TodoApi` over HTTP: requests are built by `TodoClient` and executed by `T`.
#[derive(Debug, Clone)]
pub struct HttpTodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> HttpTodoApi<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }
}

impl<T: Transport> TodoApi for HttpTodoApi<T> {
    async fn list_todos(&self, user_id: UserId) -> Result<Vec<Todo>, ApiError> {
        let response = self.transport.execute(self.client.build_list_todos(user_id)).await?;
        self.client.parse_list_todos(response)
    }

    async fn create_todo(&self, draft: &TodoDraft) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(draft)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_todo(response)
    }

    async fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(id, patch)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_todo(response)
    }

    async fn delete_todo(&self, id: TodoId) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_todo(id)).await?;
        self.client.parse_delete_todo(response)
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Answers every request with one canned response and records the request.
    struct CannedTransport {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().push(request);
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.to_string(),
            })
        }
    }

    struct DownTransport;

    impl Transport for DownTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn list_goes_through_transport() {
        let api = HttpTodoApi::new(
            "http://api.test",
            CannedTransport::new(200, r#"[{"id":1,"userId":7,"title":"a","completed":false}]"#),
        );
        let todos = api.list_todos(7).await.unwrap();
        assert_eq!(todos.len(), 1);

        let seen = api.transport.seen.lock();
        assert_eq!(seen[0].method, HttpMethod::Get);
        assert_eq!(seen[0].path, "http://api.test/todos?userId=7");
    }

    #[tokio::test]
    async fn status_errors_come_from_the_parser() {
        let api = HttpTodoApi::new("http://api.test", CannedTransport::new(404, ""));
        let err = api.delete_todo(3).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let api = HttpTodoApi::new("http://api.test", DownTransport);
        let err = api.update_todo(3, &TodoPatch::completed(true)).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
