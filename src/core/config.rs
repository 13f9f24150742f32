//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.solaris/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SolarisConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Overrides the persisted session id as the submission user id.
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    /// Seconds between result polls while an answer is pending.
    pub poll_interval_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SERVER_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub server_base_url: String,
    pub poll_interval_secs: u64,
    /// None means "use the persisted session id" (resolved in main).
    pub user_id: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.solaris/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".solaris").join("config.toml"))
}

/// Load config from `~/.solaris/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SolarisConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SolarisConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SolarisConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SolarisConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: SolarisConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Solaris Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# user_id = "my-stable-id"            # Or set SOLARIS_USER_ID env var

# [server]
# base_url = "http://localhost:8000"  # Or set SOLARIS_SERVER_URL env var
# poll_interval_secs = 2
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_server` and `cli_user_id` are from CLI flags (None = not specified).
pub fn resolve(
    config: &SolarisConfig,
    cli_server: Option<&str>,
    cli_user_id: Option<&str>,
) -> ResolvedConfig {
    // Server URL: CLI → env → config → default
    let server_base_url = cli_server
        .map(|s| s.to_string())
        .or_else(|| std::env::var("SOLARIS_SERVER_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_BASE_URL.to_string());

    // User id: CLI → env → config. None falls back to the session file.
    let user_id = cli_user_id
        .map(|s| s.to_string())
        .or_else(|| std::env::var("SOLARIS_USER_ID").ok())
        .or_else(|| config.general.user_id.clone());

    ResolvedConfig {
        server_base_url,
        poll_interval_secs: config
            .server
            .poll_interval_secs
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
        user_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = SolarisConfig::default();
        assert!(config.server.base_url.is_none());
        assert!(config.general.user_id.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = SolarisConfig::default();
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.server_base_url, DEFAULT_SERVER_BASE_URL);
        assert_eq!(resolved.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
        assert!(resolved.user_id.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = SolarisConfig {
            general: GeneralConfig {
                user_id: Some("configured-id".to_string()),
            },
            server: ServerConfig {
                base_url: Some("http://solaris.example:9000".to_string()),
                poll_interval_secs: Some(5),
            },
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.server_base_url, "http://solaris.example:9000");
        assert_eq!(resolved.poll_interval_secs, 5);
        assert_eq!(resolved.user_id.as_deref(), Some("configured-id"));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = SolarisConfig {
            server: ServerConfig {
                base_url: Some("http://from-config:9000".to_string()),
                poll_interval_secs: None,
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("http://from-cli:8000"), Some("cli-id"));
        assert_eq!(resolved.server_base_url, "http://from-cli:8000");
        assert_eq!(resolved.user_id.as_deref(), Some("cli-id"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[server]
base_url = "http://10.0.0.5:8000"
"#;
        let config: SolarisConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("http://10.0.0.5:8000")
        );
        assert!(config.server.poll_interval_secs.is_none());
        assert!(config.general.user_id.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[general]
user_id = "stable-id"

[server]
base_url = "http://localhost:8000"
poll_interval_secs = 3
"#;
        let config: SolarisConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.user_id.as_deref(), Some("stable-id"));
        assert_eq!(config.server.poll_interval_secs, Some(3));
    }
}
