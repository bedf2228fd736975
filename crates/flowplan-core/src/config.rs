//! Application configuration.
//!
//! Configuration is read once at startup from the environment:
//!
//! - `FLOWPLAN_BACKEND_URL`: backend base URL (default `http://localhost:8000`)
//! - `FLOWPLAN_DATA_DIR`: where the session is stored
//!   (default `<data dir>/flowplan`)

use std::path::PathBuf;

use anyhow::Result;

/// Application name used for the data directory path
const APP_NAME: &str = "flowplan";

/// Backend used when none is configured (local development server)
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

pub const BACKEND_URL_VAR: &str = "FLOWPLAN_BACKEND_URL";
pub const DATA_DIR_VAR: &str = "FLOWPLAN_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps variable names to values
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend_url = non_blank(BACKEND_URL_VAR)
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let data_dir = match non_blank(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => Self::default_data_dir()?,
        };

        Ok(Self {
            backend_url,
            data_dir,
        })
    }

    fn default_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}
