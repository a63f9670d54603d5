use std::path::PathBuf;
use std::time::Duration;

use control_room_client::backend::{BackendConfig, BackendKind, DEFAULT_PROJECTS_PATH};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_STATE_DIR: &str = ".control-room";

/// An environment variable held a value that could not be used.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value '{value}' for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Runtime configuration for the `control-room` binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    /// Directory holding the persisted current-project id.
    pub state_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                             | Default                   |
    /// |-------------------------------------|---------------------------|
    /// | `CONTROL_ROOM_BACKEND`              | `http` (`http` or `mock`) |
    /// | `CONTROL_ROOM_API_URL`              | `http://127.0.0.1:8000`   |
    /// | `CONTROL_ROOM_REGISTRY_URL`         | value of the API URL      |
    /// | `CONTROL_ROOM_PROJECTS_PATH`        | `/api/v1/projects`        |
    /// | `CONTROL_ROOM_REGISTRY_WRITABLE`    | `false`                   |
    /// | `CONTROL_ROOM_STATE_DIR`            | `.control-room`           |
    /// | `CONTROL_ROOM_REQUEST_TIMEOUT_SECS` | unset (no timeout)        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let kind = match var("CONTROL_ROOM_BACKEND") {
            Some(value) => value.parse::<BackendKind>().map_err(|e| ConfigError {
                var: "CONTROL_ROOM_BACKEND",
                value,
                reason: e.to_string(),
            })?,
            None => BackendKind::Http,
        };

        let api_url = var("CONTROL_ROOM_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();
        let registry_url = var("CONTROL_ROOM_REGISTRY_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| api_url.clone());

        let projects_path = match var("CONTROL_ROOM_PROJECTS_PATH") {
            Some(path) if path.starts_with('/') => path.trim_end_matches('/').to_string(),
            Some(path) => {
                return Err(ConfigError {
                    var: "CONTROL_ROOM_PROJECTS_PATH",
                    value: path,
                    reason: "must start with '/'".into(),
                })
            }
            None => DEFAULT_PROJECTS_PATH.into(),
        };

        let registry_writable = match var("CONTROL_ROOM_REGISTRY_WRITABLE") {
            Some(value) => parse_bool(&value).ok_or_else(|| ConfigError {
                var: "CONTROL_ROOM_REGISTRY_WRITABLE",
                value,
                reason: "expected true or false".into(),
            })?,
            None => false,
        };

        let request_timeout = match var("CONTROL_ROOM_REQUEST_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError {
                        var: "CONTROL_ROOM_REQUEST_TIMEOUT_SECS",
                        value,
                        reason: "must be a positive number of seconds".into(),
                    })
                }
            },
            None => None,
        };

        let state_dir = var("CONTROL_ROOM_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));

        Ok(Self {
            backend: BackendConfig {
                kind,
                api_url,
                registry_url,
                projects_path,
                registry_writable,
                request_timeout,
            },
            state_dir,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.backend.kind, BackendKind::Http);
        assert_eq!(config.backend.api_url, DEFAULT_API_URL);
        assert_eq!(config.backend.registry_url, DEFAULT_API_URL);
        assert_eq!(config.backend.projects_path, DEFAULT_PROJECTS_PATH);
        assert!(!config.backend.registry_writable);
        assert_eq!(config.backend.request_timeout, None);
        assert_eq!(config.state_dir, PathBuf::from(DEFAULT_STATE_DIR));
    }

    #[test]
    fn registry_url_follows_api_url() {
        let config = load(&[("CONTROL_ROOM_API_URL", "http://backend:9000/")]).unwrap();
        assert_eq!(config.backend.api_url, "http://backend:9000");
        assert_eq!(config.backend.registry_url, "http://backend:9000");
    }

    #[test]
    fn separate_registry_and_overrides() {
        let config = load(&[
            ("CONTROL_ROOM_BACKEND", "Mock"),
            ("CONTROL_ROOM_REGISTRY_URL", "http://registry:8100"),
            ("CONTROL_ROOM_PROJECTS_PATH", "/api/projects"),
            ("CONTROL_ROOM_REGISTRY_WRITABLE", "yes"),
            ("CONTROL_ROOM_REQUEST_TIMEOUT_SECS", "15"),
            ("CONTROL_ROOM_STATE_DIR", "/tmp/cr"),
        ])
        .unwrap();
        assert_eq!(config.backend.kind, BackendKind::Mock);
        assert_eq!(config.backend.registry_url, "http://registry:8100");
        assert_eq!(config.backend.projects_path, "/api/projects");
        assert!(config.backend.registry_writable);
        assert_eq!(config.backend.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.state_dir, PathBuf::from("/tmp/cr"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[("CONTROL_ROOM_BACKEND", "  ")]).unwrap();
        assert_eq!(config.backend.kind, BackendKind::Http);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = load(&[("CONTROL_ROOM_BACKEND", "grpc")]).unwrap_err();
        assert_eq!(err.var, "CONTROL_ROOM_BACKEND");

        let err = load(&[("CONTROL_ROOM_REGISTRY_WRITABLE", "maybe")]).unwrap_err();
        assert_eq!(err.var, "CONTROL_ROOM_REGISTRY_WRITABLE");

        let err = load(&[("CONTROL_ROOM_REQUEST_TIMEOUT_SECS", "0")]).unwrap_err();
        assert_eq!(err.var, "CONTROL_ROOM_REQUEST_TIMEOUT_SECS");

        let err = load(&[("CONTROL_ROOM_PROJECTS_PATH", "projects")]).unwrap_err();
        assert_eq!(err.var, "CONTROL_ROOM_PROJECTS_PATH");
    }
}
