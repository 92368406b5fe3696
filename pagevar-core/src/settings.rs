//! Settings loading — `.env` first, `settings.json` fallback.
//!
//! Mirrors the two-source scheme the store credentials ship in: a dotenv
//! file for local development, or a `settings.json` document whose `Values`
//! table is exported into the process environment. Typed fields are then
//! read back from the environment, so either source (or the ambient
//! environment itself) can supply them.
//!
//! # API pattern
//!
//! - [`Settings::load_from`] — explicit paths; used in tests
//! - [`Settings::load`] — conventional `./.env` / `./settings.json`

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{io_err, SettingsError};

/// Bearer token for the workspace store API. Required.
pub const ENV_API_TOKEN: &str = "PAGEVAR_API_TOKEN";
/// Base URL of the workspace store API. Optional.
pub const ENV_BASE_URL: &str = "PAGEVAR_BASE_URL";
/// Database to poll for modified records. Required only for polling mode.
pub const ENV_DATABASE_ID: &str = "PAGEVAR_DATABASE_ID";

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// Typed runtime settings for the client and poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_token: String,
    pub base_url: String,
    pub database_id: Option<String>,
}

/// On-disk `settings.json` shape. Only the `Values` table is consumed;
/// every entry is exported into the process environment as a string.
#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(rename = "Values", default)]
    values: BTreeMap<String, Value>,
}

impl Settings {
    /// Load from `./.env`, falling back to `./settings.json`.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(Path::new(".env"), Path::new("settings.json"))
    }

    /// Load from explicit paths.
    ///
    /// A missing `.env` is not an error — the settings file is tried next,
    /// and a missing settings file still succeeds if the environment already
    /// carries the required variables.
    pub fn load_from(env_path: &Path, settings_path: &Path) -> Result<Self, SettingsError> {
        match dotenvy::from_path(env_path) {
            Ok(()) => tracing::debug!(path = %env_path.display(), "loaded .env file"),
            Err(_) => {
                if settings_path.exists() {
                    load_settings_file(settings_path)?;
                } else {
                    tracing::warn!(
                        "neither .env nor settings.json found; relying on process environment"
                    );
                }
            }
        }
        Self::from_env()
    }

    /// Build settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let api_token = lookup(ENV_API_TOKEN).ok_or(SettingsError::MissingVar(ENV_API_TOKEN))?;
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let database_id = lookup(ENV_DATABASE_ID);
        Ok(Self {
            api_token,
            base_url,
            database_id,
        })
    }
}

/// Parse `settings.json` and export its `Values` entries into the process
/// environment. Non-string values are stringified.
fn load_settings_file(path: &Path) -> Result<(), SettingsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let file: SettingsFile = serde_json::from_str(&contents).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    for (key, value) in file.values {
        let value = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        std::env::set_var(&key, value);
    }
    tracing::debug!(path = %path.display(), "loaded settings.json file");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
