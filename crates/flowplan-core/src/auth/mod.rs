//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionStore`: login / register / logout with the session persisted
//! - `Storage`: durable key-value backends (`FileStorage`, `MemoryStorage`)
//!
//! The session is stored under two keys, `fp_token` and `fp_user`.

pub mod session;
pub mod storage;

pub use session::{SessionState, SessionStore, TOKEN_KEY, USER_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
