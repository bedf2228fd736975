//! Core library for the FlowPlan client.
//!
//! - [`api`]: JSON-over-HTTP client for the backend, with typed endpoints
//! - [`auth`]: session store persisted across restarts
//! - [`config`]: backend URL and storage location from the environment
//! - [`models`]: request and response payloads

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError, ApiRequest, Auth, BearerToken, Method, ResponseBody};
pub use auth::{FileStorage, MemoryStorage, SessionState, SessionStore, Storage};
pub use config::Config;
