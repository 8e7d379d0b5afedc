//! Live adapter for the `UserDirectory` port over the directory REST
//! endpoints.

use std::error::Error;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::ports::directory::{Team, User, UserDirectory};
use crate::ports::task_store::StoreFuture;

/// Error envelope returned by the directory API on non-2xx responses.
#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// User/team directory backed by the remote API.
pub struct HttpUserDirectory {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpUserDirectory {
    /// Creates a directory client for the API at `base_url`, with an
    /// optional bearer token.
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

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        what: &str,
    ) -> Result<T, Box<dyn Error + Send + Sync>> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(|e| format!("{what} request failed: {e}"))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| format!("Failed to read {what} response: {e}"))?;
        if !status.is_success() {
            let msg = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(format!("Directory API error ({}): {msg}", status.as_u16()).into());
        }
        serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse {what} response: {e}").into())
    }
}

impl UserDirectory for HttpUserDirectory {
    fn get_user(&self, id: u64) -> StoreFuture<'_, User> {
        Box::pin(async move { self.fetch(&format!("/users/{id}"), "user").await })
    }

    fn list_users(&self) -> StoreFuture<'_, Vec<User>> {
        Box::pin(async move { self.fetch("/users", "user list").await })
    }

    fn list_teams(&self) -> StoreFuture<'_, Vec<Team>> {
        Box::pin(async move { self.fetch("/teams", "team list").await })
    }
}
