//! Configuration loader
//!
//! Loads application configuration from environment variables or files,
//! falling back to built-in defaults (local backend on port 8000).
//!
//! ## Loading Strategy
//! 1. Starts from a config file when one is found, defaults otherwise
//! 2. Applies environment variable overrides on top
//! 3. Validates the resulting base URL
//!
//! ## Environment Variables
//! - `CORESHIFT_API_BASE_URL`: Backend base URL
//! - `CORESHIFT_HTTP_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `CORESHIFT_SESSION_DIR`: Directory for persisted session entries
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./coreshift.json` or `./coreshift.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use coreshift_domain::{Config, CoreShiftError, Result};
use url::Url;

/// Load configuration with automatic fallback strategy.
///
/// # Errors
/// Returns `CoreShiftError::Config` if a found file is malformed or the
/// resulting base URL is invalid. A missing file is not an error.
pub fn load() -> Result<Config> {
    let base = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("no config file found, using defaults");
            Config::default()
        }
    };

    let config = apply_env_overrides(base)?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from environment variables over built-in defaults.
///
/// # Errors
/// Returns `CoreShiftError::Config` for unparseable values.
pub fn load_from_env() -> Result<Config> {
    let config = apply_env_overrides(Config::default())?;
    validate(&config)?;
    Ok(config)
}

fn apply_env_overrides(mut config: Config) -> Result<Config> {
    if let Ok(base_url) = std::env::var("CORESHIFT_API_BASE_URL") {
        config.backend.base_url = base_url.trim_end_matches('/').to_string();
    }

    if let Ok(raw) = std::env::var("CORESHIFT_HTTP_TIMEOUT_SECS") {
        config.backend.timeout_seconds = raw
            .parse::<u64>()
            .map_err(|e| CoreShiftError::config(format!("Invalid timeout: {e}")))?;
    }

    if let Ok(dir) = std::env::var("CORESHIFT_SESSION_DIR") {
        config.session.storage_dir = dir;
    }

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(&config.backend.base_url)
        .map_err(|e| CoreShiftError::config(format!("Invalid base URL: {e}")))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(CoreShiftError::config(format!(
            "Unsupported base URL scheme: {}",
            url.scheme()
        )));
    }
    if config.backend.timeout_seconds == 0 {
        return Err(CoreShiftError::config("Timeout must be at least 1 second"));
    }
    Ok(())
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CoreShiftError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CoreShiftError::config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CoreShiftError::config("No config file found in any of the standard locations")
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CoreShiftError::config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content; format detected by extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CoreShiftError::config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CoreShiftError::config(format!("Invalid JSON format: {e}"))),
        _ => Err(CoreShiftError::config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("coreshift.json"),
            cwd.join("coreshift.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("coreshift.json"),
                exe_dir.join("coreshift.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn clear_env() {
        std::env::remove_var("CORESHIFT_API_BASE_URL");
        std::env::remove_var("CORESHIFT_HTTP_TIMEOUT_SECS");
        std::env::remove_var("CORESHIFT_SESSION_DIR");
    }

    #[test]
    fn env_overrides_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CORESHIFT_API_BASE_URL", "https://api.coreshift.example/");
        std::env::set_var("CORESHIFT_HTTP_TIMEOUT_SECS", "10");
        std::env::set_var("CORESHIFT_SESSION_DIR", "/tmp/coreshift-session");

        let config = load_from_env().expect("config");
        assert_eq!(config.backend.base_url, "https://api.coreshift.example");
        assert_eq!(config.backend.timeout_seconds, 10);
        assert_eq!(config.session.storage_dir, "/tmp/coreshift-session");

        clear_env();
    }

    #[test]
    fn missing_env_falls_back_to_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let config = load_from_env().expect("config");
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.backend.timeout_seconds, 30);
    }

    #[test]
    fn invalid_timeout_is_a_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CORESHIFT_HTTP_TIMEOUT_SECS", "soon");
        let result = load_from_env();
        assert!(matches!(result, Err(CoreShiftError::Config { .. })));

        clear_env();
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CORESHIFT_API_BASE_URL", "not a url");
        assert!(load_from_env().is_err());

        std::env::set_var("CORESHIFT_API_BASE_URL", "ftp://files.example");
        assert!(load_from_env().is_err());

        clear_env();
    }

    #[test]
    fn loads_json_config_file() {
        let json_content = r#"{
            "backend": {
                "base_url": "http://10.0.0.5:9000",
                "timeout_seconds": 15
            },
            "session": {
                "storage_dir": ".sessions"
            }
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("config");
        assert_eq!(config.backend.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.backend.timeout_seconds, 15);
        assert_eq!(config.session.storage_dir, ".sessions");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn loads_toml_config_file() {
        let toml_content = r#"
[backend]
base_url = "http://10.0.0.5:9000"
timeout_seconds = 20

[session]
storage_dir = ".sessions"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("config");
        assert_eq!(config.backend.timeout_seconds, 20);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn file_not_found_is_a_config_error() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(CoreShiftError::Config { .. })));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let result = parse_config("backend: {}", &PathBuf::from("config.yaml"));
        assert!(matches!(result, Err(CoreShiftError::Config { .. })));
    }
}
