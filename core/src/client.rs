//! Stateless request builder and response parser for the todo API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any non-2xx status is a failure; the specific code is logged and dropped.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Credentials, LoginResponse, Todo};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_signup(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        self.json_post("/signup", None, credentials)
    }

    pub fn build_login(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        self.json_post("/login", None, credentials)
    }

    pub fn build_list_todos(&self, token: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: vec![bearer(token)],
            body: None,
        }
    }

    pub fn build_create_todo(&self, token: &str, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.json_post("/todos", Some(token), input)
    }

    /// The signup body is ignored; any 2xx means the account exists now.
    pub fn parse_signup(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, "/signup", ApiError::signup_failed)
    }

    /// Extract the bearer token. An empty `access_token` counts as a
    /// rejected login so a session can never hold an empty token.
    pub fn parse_login(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, "/login", ApiError::login_failed)?;
        let body: LoginResponse = decode(&response)?;
        if body.access_token.is_empty() {
            tracing::warn!("login succeeded without an access token");
            return Err(ApiError::login_failed());
        }
        Ok(body.access_token)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, "/todos", ApiError::fetch_failed)?;
        decode(&response)
    }

    /// The created item is not read back; callers re-pull the list.
    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, "/todos", ApiError::create_failed)
    }

    fn json_post<T: Serialize>(
        &self,
        endpoint: &str,
        token: Option<&str>,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
        if let Some(token) = token {
            headers.push(bearer(token));
        }
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{endpoint}", self.base_url),
            headers,
            body: Some(body),
        })
    }
}

fn bearer(token: &str) -> (String, String) {
    ("authorization".to_string(), format!("Bearer {token}"))
}

/// Map any non-2xx status to the endpoint's labeled failure.
fn check_status(response: &HttpResponse, endpoint: &str, failure: fn() -> ApiError) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    tracing::warn!(endpoint, status = response.status, "request rejected");
    Err(failure())
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
