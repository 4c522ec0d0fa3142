//! Report API configuration.
//!
//! Settings come from three layers: command line flags, environment
//! variables and a YAML config file. Flags win over the environment, the
//! environment wins over the file, and the built-in default applies last.
//! The disabled flag is the exception: it is set if any layer sets it.

use crate::error::ConfigError;
use clap::Args;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default report API URL
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

pub const ENV_API_URL: &str = "PYTEST_REPORT_API_URL";
pub const ENV_AUTH_TOKEN: &str = "PYTEST_REPORT_API_AUTH_TOKEN";
pub const ENV_DISABLED: &str = "PYTEST_REPORT_API_DISABLED";

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "lumi-report.yaml";

/// Command line flags, meant to be flattened into a host CLI.
#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = "Report API")]
pub struct ReportApiArgs {
    /// API URL to submit test progress and results.
    #[arg(long = "report-api-url", value_name = "URL")]
    pub report_api_url: Option<String>,

    /// API authentication token.
    #[arg(long = "report-api-auth-token", value_name = "TOKEN")]
    pub report_api_auth_token: Option<String>,

    /// Disable reporting tests to API.
    #[arg(long = "report-api-disabled")]
    pub report_api_disabled: bool,

    /// YAML file with report_api_* settings.
    #[arg(long = "report-api-config", value_name = "PATH")]
    pub report_api_config: Option<PathBuf>,
}

/// Settings read from the config file. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub report_api_url: Option<String>,
    #[serde(default)]
    pub report_api_auth_token: Option<String>,
    #[serde(default)]
    pub report_api_disabled: Option<bool>,
}

impl FileSettings {
    /// Load settings from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find and load the config file.
    ///
    /// An explicit path must exist. Otherwise `lumi-report.yaml` in the
    /// working directory is tried, then `lumi-report/config.yaml` in the
    /// user config directory. No file at all means no file settings.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidates = [
            Some(PathBuf::from(CONFIG_FILE_NAME)),
            dirs::config_dir().map(|dir| dir.join("lumi-report").join("config.yaml")),
        ];

        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                log::debug!("Using report API config file {}", path.display());
                return Self::load(&path);
            }
        }

        Ok(Self::default())
    }
}

/// Resolved report API configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    api_url: String,
    auth_token: Option<String>,
    disabled: bool,
    headers: BTreeMap<String, String>,
}

impl ReportConfig {
    pub fn new(api_url: impl Into<String>, auth_token: Option<String>, disabled: bool) -> Self {
        let auth_token = non_empty(auth_token);
        let headers = auth_token
            .iter()
            .map(|token| ("Authorization".to_string(), format!("token {}", token)))
            .collect();

        Self {
            api_url: api_url.into(),
            auth_token,
            disabled,
            headers,
        }
    }

    /// Resolve configuration from flags, an environment lookup and file settings.
    pub fn resolve<F>(args: &ReportApiArgs, file: &FileSettings, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = non_empty(args.report_api_url.clone())
            .or_else(|| non_empty(env(ENV_API_URL)))
            .or_else(|| non_empty(file.report_api_url.clone()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let auth_token = non_empty(args.report_api_auth_token.clone())
            .or_else(|| non_empty(env(ENV_AUTH_TOKEN)))
            .or_else(|| non_empty(file.report_api_auth_token.clone()));

        let env_disabled = env(ENV_DISABLED)
            .map(|value| parse_flag(ENV_DISABLED, &value))
            .unwrap_or(false);
        let disabled =
            args.report_api_disabled || env_disabled || file.report_api_disabled.unwrap_or(false);

        Self::new(api_url, auth_token, disabled)
    }

    /// Resolve against the process environment, discovering the config file.
    pub fn from_process_env(args: &ReportApiArgs) -> Result<Self, ConfigError> {
        let file = FileSettings::discover(args.report_api_config.as_deref())?;
        Ok(Self::resolve(args, &file, |key| std::env::var(key).ok()))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Headers sent with every request
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a boolean environment flag. Unrecognized values count as false.
fn parse_flag(name: &str, value: &str) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "" | "0" | "false" | "no" | "off" => false,
        other => {
            log::warn!("Ignoring unrecognized value {:?} for {}", other, name);
            false
        }
    }
}
