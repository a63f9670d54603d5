//! Startup selection between the HTTP and fixture strategies.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use control_room_core::error::CoreError;

use crate::api::BackendApi;
use crate::decisions::{DecisionQuery, HttpDecisionQuery, MockDecisionQuery};
use crate::directory::{HttpProjectDirectory, MockProjectDirectory, ProjectDirectory};
use crate::error::ClientResult;

/// Default collection path of the project registry.
pub const DEFAULT_PROJECTS_PATH: &str = "/api/v1/projects";

/// Which implementation backs the directory and decision clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Registry and decision backend over HTTP.
    Http,
    /// In-memory fixtures; nothing leaves the process.
    Mock,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for BackendKind {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "mock" => Ok(Self::Mock),
            other => Err(CoreError::Validation(format!(
                "Unknown backend '{other}'. Must be one of: http, mock"
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to build the client strategies.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// Decision backend base URL.
    pub api_url: String,
    /// Project registry base URL.
    pub registry_url: String,
    pub projects_path: String,
    pub registry_writable: bool,
    pub request_timeout: Option<Duration>,
}

impl BackendConfig {
    /// Fixture-backed configuration, handy for tests.
    pub fn mock() -> Self {
        Self {
            kind: BackendKind::Mock,
            api_url: String::new(),
            registry_url: String::new(),
            projects_path: DEFAULT_PROJECTS_PATH.to_string(),
            registry_writable: true,
            request_timeout: None,
        }
    }

    /// HTTP configuration with one base URL for both registry and decisions.
    pub fn http(base_url: &str) -> Self {
        Self {
            kind: BackendKind::Http,
            api_url: base_url.to_string(),
            registry_url: base_url.to_string(),
            projects_path: DEFAULT_PROJECTS_PATH.to_string(),
            registry_writable: false,
            request_timeout: None,
        }
    }
}

/// The directory and decision clients chosen for this run.
#[derive(Clone)]
pub struct Backends {
    pub kind: BackendKind,
    pub directory: Arc<dyn ProjectDirectory>,
    pub decisions: Arc<dyn DecisionQuery>,
}

impl Backends {
    pub fn from_config(config: &BackendConfig) -> ClientResult<Self> {
        let backends = match config.kind {
            BackendKind::Mock => Self {
                kind: BackendKind::Mock,
                directory: Arc::new(MockProjectDirectory::seeded()),
                decisions: Arc::new(MockDecisionQuery::seeded()),
            },
            BackendKind::Http => {
                let api = BackendApi::new(&config.api_url, config.request_timeout)?;
                let registry = if config.registry_url == config.api_url {
                    api.clone()
                } else {
                    BackendApi::new(&config.registry_url, config.request_timeout)?
                };
                Self {
                    kind: BackendKind::Http,
                    directory: Arc::new(HttpProjectDirectory::new(
                        registry,
                        &config.projects_path,
                        config.registry_writable,
                    )),
                    decisions: Arc::new(HttpDecisionQuery::new(api)),
                }
            }
        };
        tracing::info!(
            backend = %config.kind,
            api_url = %config.api_url,
            registry_url = %config.registry_url,
            "Backend strategy selected"
        );
        Ok(backends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_parses_case_insensitively() {
        assert_eq!("HTTP".parse::<BackendKind>().unwrap(), BackendKind::Http);
        assert_eq!(" mock ".parse::<BackendKind>().unwrap(), BackendKind::Mock);
        assert!("grpc".parse::<BackendKind>().is_err());
    }

    #[test]
    fn mock_config_builds_fixture_backends() {
        let backends = Backends::from_config(&BackendConfig::mock()).unwrap();
        assert_eq!(backends.kind, BackendKind::Mock);
    }

    #[test]
    fn http_config_builds_without_contacting_anything() {
        let backends = Backends::from_config(&BackendConfig::http("http://127.0.0.1:9")).unwrap();
        assert_eq!(backends.kind, BackendKind::Http);
    }
}
