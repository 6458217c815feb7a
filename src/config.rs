use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 8000;
pub const DEFAULT_SNAPSHOT: &str = "shows.json";

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct AppConfig {
    #[serde(default)]
    #[validate(nested)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    #[validate(nested)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    #[validate(url(message = "Base URL must be a valid URL"))]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    #[validate(range(min = 1, message = "Timeout must be at least 1 ms"))]
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Credential sent with follow requests. Opaque to this crate.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct StoreConfig {
    #[serde(default = "default_snapshot")]
    #[validate(custom(function = "validate_snapshot_path"))]
    pub snapshot: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_snapshot() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT)
}

fn validate_snapshot_path(path: &PathBuf) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::new("empty_snapshot_path"));
    }
    Ok(())
}

impl AppConfig {
    pub fn load_with_cli_args(cli_args: &crate::cli::CliArgs) -> Result<Self, AppError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("tvminder").required(false));

        if let Some(config_path) = &cli_args.config {
            builder = builder.add_source(File::from(config_path.as_path()));
        }

        builder = builder.add_source(Environment::with_prefix("TVMINDER").separator("__"));

        // CLI flags win over files and environment
        if let Some(snapshot) = &cli_args.snapshot {
            builder = builder.set_override("store.snapshot", snapshot.to_string_lossy().into_owned())?;
        }
        if let Some(timeout_ms) = cli_args.timeout {
            builder = builder.set_override("api.timeout_ms", timeout_ms as i64)?;
        }

        let app_config: AppConfig = builder.build()?.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliArgs;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.timeout(), Duration::from_secs(8));
        assert_eq!(config.store.snapshot, PathBuf::from("shows.json"));
        assert!(config.auth.token.is_none());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();
        config.api.timeout_ms = 0;
        config.store.snapshot = PathBuf::new();

        let errors = config.validate().unwrap_err();
        assert!(errors.errors().contains_key("api"));
        assert!(errors.errors().contains_key("store"));
        assert!(!errors.errors().contains_key("auth"));
    }

    #[test]
    fn test_file_then_cli_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://tvminder.example/api\"\ntimeout_ms = 2000\n\n[auth]\ntoken = \"jwt-token\""
        )
        .unwrap();

        let cli_args = CliArgs::parse_from([
            "tvminder",
            "--config",
            file.path().to_str().unwrap(),
            "--timeout",
            "500",
            "--snapshot",
            "/tmp/other.json",
            "following",
        ]);

        let config = AppConfig::load_with_cli_args(&cli_args).unwrap();
        assert_eq!(config.api.base_url, "https://tvminder.example/api");
        assert_eq!(config.api.timeout_ms, 500);
        assert_eq!(config.auth.token.as_deref(), Some("jwt-token"));
        assert_eq!(config.store.snapshot, PathBuf::from("/tmp/other.json"));
    }
}
