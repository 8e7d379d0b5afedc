//! Live adapter for the `TaskStore` port over the task API's REST
//! endpoints.

use std::error::Error;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::model::{Task, TaskDraft, TaskPatch};
use crate::ports::task_store::{StoreFuture, TaskStore};

/// Error envelope returned by the task API on non-2xx responses.
#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Task store backed by the remote task API.
pub struct HttpTaskStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTaskStore {
    /// Creates a store for the API at `base_url`, with an optional
    /// bearer token.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client: Client::new(), base_url, token }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }
}

/// Reads a response body, mapping non-2xx statuses to the server's error
/// message and decoding the JSON payload otherwise.
async fn decode<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> Result<T, Box<dyn Error + Send + Sync>> {
    let text = read_success_body(response, what).await?;
    serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse {what} response: {e}").into())
}

async fn read_success_body(
    response: Response,
    what: &str,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read {what} response: {e}"))?;
    if !status.is_success() {
        let msg = serde_json::from_str::<ApiError>(&text)
            .map(|e| e.message)
            .unwrap_or(text);
        return Err(format!("Task API error ({}): {msg}", status.as_u16()).into());
    }
    Ok(text)
}

fn send_error(what: &str, e: &reqwest::Error) -> Box<dyn Error + Send + Sync> {
    format!("{what} request failed: {e}").into()
}

impl TaskStore for HttpTaskStore {
    fn list_tasks(&self) -> StoreFuture<'_, Vec<Task>> {
        Box::pin(async move {
            let response = self
                .request(Method::GET, "/tasks")
                .send()
                .await
                .map_err(|e| send_error("Task list", &e))?;
            decode(response, "task list").await
        })
    }

    fn list_tasks_by_project(&self, project_id: u64) -> StoreFuture<'_, Vec<Task>> {
        Box::pin(async move {
            let response = self
                .request(Method::GET, &format!("/projects/{project_id}/tasks"))
                .send()
                .await
                .map_err(|e| send_error("Project task list", &e))?;
            decode(response, "project task list").await
        })
    }

    fn create_task(&self, draft: &TaskDraft) -> StoreFuture<'_, Task> {
        let draft = draft.clone();
        Box::pin(async move {
            let response = self
                .request(Method::POST, "/tasks")
                .json(&draft)
                .send()
                .await
                .map_err(|e| send_error("Task create", &e))?;
            decode(response, "task create").await
        })
    }

    fn update_task(&self, id: u64, patch: &TaskPatch) -> StoreFuture<'_, Task> {
        let patch = patch.clone();
        Box::pin(async move {
            let response = self
                .request(Method::PATCH, &format!("/tasks/{id}"))
                .json(&patch)
                .send()
                .await
                .map_err(|e| send_error("Task update", &e))?;
            decode(response, "task update").await
        })
    }

    fn delete_task(&self, id: u64) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let response = self
                .request(Method::DELETE, &format!("/tasks/{id}"))
                .send()
                .await
                .map_err(|e| send_error("Task delete", &e))?;
            read_success_body(response, "task delete").await.map(|_| ())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed_from_the_base_url() {
        let store = HttpTaskStore::new("https://api.example.test/", None);
        assert_eq!(store.base_url, "https://api.example.test");
    }
}
