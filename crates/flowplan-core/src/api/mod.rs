//! REST API client module for the FlowPlan backend.
//!
//! This module provides the `ApiClient` for communicating with the
//! backend's auth, project, and AI suggestion endpoints.
//!
//! Requests are JSON over HTTP. Authenticated endpoints take a
//! `BearerToken`, sent as an `Authorization: Bearer` header.

pub mod client;
pub mod error;
pub mod request;

pub use client::ApiClient;
pub use error::ApiError;
pub use request::{ApiRequest, Auth, BearerToken, Method, ResponseBody};
