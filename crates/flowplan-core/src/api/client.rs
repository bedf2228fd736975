//! API client for communicating with the FlowPlan backend.
//!
//! This module provides the `ApiClient` struct for making JSON requests,
//! authenticated or not, against a configured base URL, plus typed helpers
//! for each backend endpoint.

use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{
    AuthResponse, LoginRequest, NewProject, Project, RegisterRequest, SuggestTasksRequest,
    SuggestTasksResponse,
};

use super::request::{ApiRequest, Auth, BearerToken, ResponseBody};
use super::ApiError;

// ============================================================================
// Endpoints
// ============================================================================

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const PROJECTS_PATH: &str = "/projects";
const SUGGEST_TASKS_PATH: &str = "/ai/suggest-tasks";

/// API client for the FlowPlan backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client that shares an existing connection pool
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error built from the body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "API request failed");
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Perform one request and return the raw decoded body.
    pub async fn send(&self, request: ApiRequest) -> Result<ResponseBody, ApiError> {
        request.validate()?;
        let url = self.url(&request.path);
        debug!(method = %request.method, url = %url, "API request");

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Auth::Bearer(ref token) = request.auth {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(body) = request.body.filter(|body| !body.is_null()) {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await?;
        let response = Self::check_response(response).await?;

        match response.text().await {
            Ok(text) => Ok(ResponseBody::parse(text)),
            Err(e) => {
                debug!(url = %url, error = %e, "Failed to read response body");
                Ok(ResponseBody::Empty)
            }
        }
    }

    /// Perform one request and return its JSON, or `None` when a successful
    /// response carries no JSON body.
    pub async fn request(&self, request: ApiRequest) -> Result<Option<serde_json::Value>, ApiError> {
        let path = request.path.clone();
        let body = self.send(request).await?;
        if let ResponseBody::NotJson(ref text) = body {
            debug!(path = %path, bytes = text.len(), "Response body is not JSON, treating as empty");
        }
        Ok(body.into_json())
    }

    /// Perform one request and decode the JSON body into `T`
    pub async fn request_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let path = request.path.clone();
        let value = self
            .request(request)
            .await?
            .ok_or_else(|| ApiError::InvalidResponse(format!("Empty response from {}", path)))?;
        serde_json::from_value(value).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", path, e))
        })
    }

    // ===== Auth =====

    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = ApiRequest::post(LOGIN_PATH).json(&LoginRequest { email, password })?;
        Self::require_token(self.request_json(request).await?)
    }

    /// Create an account and authenticate as it
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let request =
            ApiRequest::post(REGISTER_PATH).json(&RegisterRequest { name, email, password })?;
        Self::require_token(self.request_json(request).await?)
    }

    fn require_token(auth: AuthResponse) -> Result<AuthResponse, ApiError> {
        if auth.token.is_empty() {
            Err(ApiError::InvalidResponse("Auth response has an empty token".to_string()))
        } else {
            Ok(auth)
        }
    }

    // ===== Projects =====

    /// Fetch the projects visible to the authenticated user
    pub async fn list_projects(&self, token: &BearerToken) -> Result<Vec<Project>, ApiError> {
        self.request_json(ApiRequest::get(PROJECTS_PATH).bearer(token)).await
    }

    pub async fn create_project(
        &self,
        token: &BearerToken,
        project: &NewProject,
    ) -> Result<Project, ApiError> {
        let request = ApiRequest::post(PROJECTS_PATH).json(project)?.bearer(token);
        self.request_json(request).await
    }

    // ===== AI =====

    /// Ask the backend's AI copilot for task suggestions
    pub async fn suggest_tasks(
        &self,
        token: &BearerToken,
        suggestion: &SuggestTasksRequest,
    ) -> Result<SuggestTasksResponse, ApiError> {
        let request = ApiRequest::post(SUGGEST_TASKS_PATH).json(suggestion)?.bearer(token);
        self.request_json(request).await
    }
}
