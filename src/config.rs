//! Configuration loading via `ortho-config`.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::transactions::PollPolicy;

/// Default SoftLayer REST endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.softlayer.com/rest/v3";

/// SoftLayer account configuration derived from environment variables,
/// configuration files, and CLI flags.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "SL",
    discovery(
        app_name = "slcpi",
        env_var = "SLCPI_CONFIG_PATH",
        config_file_name = "slcpi.toml",
        dotfile_name = ".slcpi.toml",
        project_file_name = "slcpi.toml"
    )
)]
pub struct SoftLayerConfig {
    /// Account username used for HTTP basic authentication.
    pub username: String,
    /// API key paired with the username. This value is required.
    pub api_key: String,
    /// Base URL of the REST endpoint.
    #[ortho_config(default = DEFAULT_API_BASE_URL.to_owned())]
    pub api_base_url: String,
    /// Per-request HTTP timeout in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_secs: u64,
    /// Delay between active-transaction polls in seconds.
    #[ortho_config(default = 5)]
    pub poll_interval_secs: u64,
    /// Upper bound on how long provisioning waits may take, in seconds.
    #[ortho_config(default = 600)]
    pub wait_timeout_secs: u64,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, toml_key: &'static str) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }
}

impl SoftLayerConfig {
    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to slcpi.toml",
                metadata.description, metadata.env_var, metadata.toml_key
            )));
        }
        Ok(())
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("slcpi")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Performs semantic validation on required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a credential is empty, and
    /// [`ConfigError::Invalid`] when a polling interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.username,
            &FieldMetadata::new("SoftLayer username", "SL_USERNAME", "username"),
        )?;
        Self::require_field(
            &self.api_key,
            &FieldMetadata::new("SoftLayer API key", "SL_API_KEY", "api_key"),
        )?;
        Self::require_field(
            &self.api_base_url,
            &FieldMetadata::new("API base URL", "SL_API_BASE_URL", "api_base_url"),
        )?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(String::from(
                "request_timeout_secs must be greater than zero",
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(String::from(
                "poll_interval_secs must be greater than zero",
            )));
        }
        Ok(())
    }

    /// Returns the poll policy used while waiting for provisioning.
    #[must_use]
    pub const fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(
            Duration::from_secs(self.poll_interval_secs),
            Duration::from_secs(self.wait_timeout_secs),
        )
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Indicates a configuration value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn valid_config() -> SoftLayerConfig {
        SoftLayerConfig {
            username: String::from("fake-username"),
            api_key: String::from("fake-api-key"),
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            request_timeout_secs: 30,
            poll_interval_secs: 5,
            wait_timeout_secs: 600,
        }
    }

    #[rstest]
    fn accepts_complete_config(valid_config: SoftLayerConfig) {
        assert_eq!(valid_config.validate(), Ok(()));
    }

    #[rstest]
    #[case("SL_USERNAME", "username")]
    #[case("SL_API_KEY", "api_key")]
    fn missing_credentials_name_env_var_and_toml_key(
        valid_config: SoftLayerConfig,
        #[case] env_var: &str,
        #[case] toml_key: &str,
    ) {
        let mut cfg = valid_config;
        match toml_key {
            "username" => cfg.username = String::new(),
            _ => cfg.api_key = String::from("   "),
        }
        let message = cfg.validate().expect_err("should fail").to_string();
        assert!(message.contains(env_var), "missing env var: {message}");
        assert!(message.contains(toml_key), "missing toml key: {message}");
        assert!(message.contains("slcpi.toml"), "missing file: {message}");
    }

    #[rstest]
    fn rejects_zero_poll_interval(valid_config: SoftLayerConfig) {
        let cfg = SoftLayerConfig {
            poll_interval_secs: 0,
            ..valid_config
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[rstest]
    fn poll_policy_uses_configured_seconds(valid_config: SoftLayerConfig) {
        let policy = valid_config.poll_policy();
        assert_eq!(policy.interval(), Duration::from_secs(5));
        assert_eq!(policy.timeout(), Duration::from_secs(600));
    }
}
