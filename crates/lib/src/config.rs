//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.stride/config.json`) and environment.
//! Holds defaults for the send command so the token and target do not have to be
//! passed on every invocation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Stride API settings and send defaults.
    #[serde(default)]
    pub stride: StrideConfig,
}

/// Stride API settings: credential, endpoint, and default target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrideConfig {
    /// Bearer token. Overridden by STRIDE_TOKEN env when set. Never logged.
    pub token: Option<String>,

    /// API base URL for self-hosted deployments (default https://api.atlassian.com/).
    pub api: Option<String>,

    /// Default cloud/site id for the send command.
    pub site_id: Option<String>,

    /// Default conversation (room) id for the send command.
    pub conversation_id: Option<String>,

    /// Enforce TLS certificate validation (default true). Disable only for
    /// personally controlled sites using self-signed certificates.
    #[serde(default = "default_validate_certs")]
    pub validate_certs: bool,
}

fn default_validate_certs() -> bool {
    true
}

impl Default for StrideConfig {
    fn default() -> Self {
        Self {
            token: None,
            api: None,
            site_id: None,
            conversation_id: None,
            validate_certs: default_validate_certs(),
        }
    }
}

/// Resolve the bearer token: env STRIDE_TOKEN overrides config.
pub fn resolve_token(config: &Config) -> Option<String> {
    resolve_token_from(std::env::var("STRIDE_TOKEN").ok(), config)
}

/// Token resolution with the env value passed in. Blank values (env or config)
/// are treated as unset.
fn resolve_token_from(env_token: Option<String>, config: &Config) -> Option<String> {
    env_token
        .and_then(|s| {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                Some(t.to_string())
            }
        })
        .or_else(|| {
            config
                .stride
                .token
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("STRIDE_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".stride").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Load config from the default path (or STRIDE_CONFIG_PATH). Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}
