//! Data models for FlowPlan API payloads.
//!
//! This module contains the request and response bodies exchanged with
//! the backend:
//!
//! - `User`, `AuthResponse`: account profile and login/register results
//! - `Project`, `NewProject`: project records and creation payload
//! - AI types: `SuggestTasksRequest`, `SuggestTasksResponse`, `SuggestedTask`

pub mod ai;
pub mod project;
pub mod user;

pub use ai::{SuggestTasksRequest, SuggestTasksResponse, SuggestedTask};
pub use project::{NewProject, Project};
pub use user::{AuthResponse, Id, LoginRequest, RegisterRequest, User};
