//! HTTP capability used by the components. The trait keeps the components
//! independent of the transport; `HttpUsersApi` is the reqwest implementation
//! with a fixed timeout policy and sanitized error bodies.

pub mod errors;
pub mod types;

pub use errors::AppError;
pub use types::{NewUserRequest, NewUserResponse, UserRecord, UsersPage};

use crate::APP_USER_AGENT;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Response,
};
use serde::de::DeserializeOwned;
use std::{future::Future, time::Duration};
use tracing::{debug, instrument};

/// Endpoint for both creating and listing users, relative to the API base.
pub const USERS_ENDPOINT: &str = "/reqres/users";
/// Default request timeout applied to all component requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;
const APPLICATION_JSON: &str = "application/json";

/// Fetch capability injected into the components.
pub trait UsersApi {
    /// `POST` a new user and return the server-assigned id.
    fn create_user(
        &self,
        user: &NewUserRequest,
    ) -> impl Future<Output = Result<NewUserResponse, AppError>> + Send;

    /// `GET` the current users, in server order.
    fn list_users(&self) -> impl Future<Output = Result<Vec<UserRecord>, AppError>> + Send;
}

#[derive(Clone, Debug)]
pub struct HttpUsersApi {
    client: Client,
    base_url: String,
}

impl HttpUsersApi {
    /// Build a client that talks to `base_url` with the default timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying reqwest client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// # Errors
    /// Returns an error if the underlying reqwest client cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        build_url_with_base(&self.base_url, USERS_ENDPOINT)
    }
}

impl UsersApi for HttpUsersApi {
    #[instrument(skip(self))]
    async fn create_user(&self, user: &NewUserRequest) -> Result<NewUserResponse, AppError> {
        let url = self.users_url();
        let payload = serde_json::to_string(user)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(payload)
            .send()
            .await
            .map_err(map_request_error)?;

        debug!("POST {} -> {}", url, response.status());

        handle_json_response(response).await
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        let url = self.users_url();

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .send()
            .await
            .map_err(map_request_error)?;

        debug!("GET {} -> {}", url, response.status());

        handle_json_response::<UsersPage>(response)
            .await
            .map(|page| page.data)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
#[must_use]
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
