//! Configuration for the video service API
//!
//! Settings are injected at construction and never stored as process-wide
//! state. `from_env` supports the usual deployment path; `new` is for tests
//! and embedders that already know their endpoint.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Catalog language requested when none is configured
pub const DEFAULT_LANGUAGE: &str = "ENG";

/// Playback platform identifier requested when none is configured
pub const DEFAULT_PLATFORM: &str = "WEB_HLS";

/// Connection settings for the video service API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base origin of the service, e.g. `https://play.pitwall.tv`
    pub base_url: String,
    /// Catalog language code embedded in every request path
    pub language: String,
    /// Platform identifier embedded in every request path
    pub platform: String,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }

    /// Load settings from environment variables.
    ///
    /// - `PITWALL_BASE_URL` (required)
    /// - `PITWALL_LANGUAGE` (default `ENG`)
    /// - `PITWALL_PLATFORM` (default `WEB_HLS`)
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("PITWALL_BASE_URL")
            .context("PITWALL_BASE_URL environment variable not set")?;

        Ok(Self {
            base_url,
            language: env::var("PITWALL_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
            platform: env::var("PITWALL_PLATFORM").unwrap_or_else(|_| DEFAULT_PLATFORM.to_string()),
        })
    }
}
