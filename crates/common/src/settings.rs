//! Adapter configuration.
//!
//! Settings are read from TOML and merged with environment variables prefixed
//! with `PLAYGROUNDXYZ__`. For example, `PLAYGROUNDXYZ__ADAPTER__ENDPOINT`
//! overrides `adapter.endpoint`.

use std::str;

use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{
    DEFAULT_CURRENCY, DEFAULT_ENDPOINT, DEFAULT_PREBID_VERSION, DEFAULT_SYNC_URL,
    DEFAULT_TTL_SECS, ENV_PREFIX, ENV_SEPARATOR,
};
use crate::error::PlaygroundXyzError;

/// Configuration for the Playground XYZ adapter.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Whether the adapter is registered at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Bid endpoint receiving the batched `OpenRTB` payload
    #[serde(default = "default_endpoint")]
    #[validate(url)]
    pub endpoint: String,

    /// User-sync pixel URL, protocol relative
    #[serde(default = "default_sync_url")]
    #[validate(length(min = 1))]
    pub sync_url: String,

    /// Currency assumed when the response omits `cur`
    #[serde(default = "default_currency")]
    #[validate(length(equal = 3))]
    pub default_currency: String,

    /// Bid time-to-live in seconds
    #[serde(default = "default_ttl")]
    #[validate(range(min = 1))]
    pub ttl: u32,

    /// Version string reported to the partner in `imp.ext.pxyz.adapter`
    #[serde(default = "default_prebid_version")]
    pub prebid_version: String,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_sync_url() -> String {
    DEFAULT_SYNC_URL.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_ttl() -> u32 {
    DEFAULT_TTL_SECS
}

fn default_prebid_version() -> String {
    DEFAULT_PREBID_VERSION.to_string()
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            sync_url: default_sync_url(),
            default_currency: default_currency(),
            ttl: default_ttl(),
            prebid_version: default_prebid_version(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub adapter: AdapterConfig,
}

impl Settings {
    /// Load the settings embedded at build time.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the embedded TOML is not valid UTF-8,
    /// cannot be parsed, or fails validation.
    pub fn new() -> Result<Self, Report<PlaygroundXyzError>> {
        let toml_bytes = include_bytes!("../../../playgroundxyz.toml");
        let toml_str =
            str::from_utf8(toml_bytes).change_context(PlaygroundXyzError::Configuration {
                message: "embedded playgroundxyz.toml is not valid UTF-8".to_string(),
            })?;

        Self::from_toml(toml_str)
    }

    /// Parse settings from a TOML string, applying environment overrides.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the TOML is invalid, a value has the
    /// wrong type, or the merged settings fail validation.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<PlaygroundXyzError>> {
        let environment = Environment::default()
            .prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR);

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(PlaygroundXyzError::Configuration {
                message: "Failed to build configuration".to_string(),
            })?;

        let settings: Self =
            config
                .try_deserialize()
                .change_context(PlaygroundXyzError::Configuration {
                    message: "Failed to deserialize configuration".to_string(),
                })?;

        settings
            .validate()
            .change_context(PlaygroundXyzError::Configuration {
                message: "Settings validation failed".to_string(),
            })?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT_VAR: &str = "PLAYGROUNDXYZ__ADAPTER__ENDPOINT";

    #[test]
    fn test_settings_new() {
        temp_env::with_var_unset(ENDPOINT_VAR, || {
            let settings = Settings::new().expect("should load embedded settings");

            assert!(settings.adapter.enabled);
            assert_eq!(settings.adapter.endpoint, DEFAULT_ENDPOINT);
            assert_eq!(settings.adapter.sync_url, DEFAULT_SYNC_URL);
            assert_eq!(settings.adapter.default_currency, "USD");
            assert_eq!(settings.adapter.ttl, 300);
            assert_eq!(settings.adapter.prebid_version, DEFAULT_PREBID_VERSION);
        });
    }

    #[test]
    fn test_settings_empty_toml_uses_defaults() {
        temp_env::with_var_unset(ENDPOINT_VAR, || {
            let settings = Settings::from_toml("").expect("should accept empty TOML");
            assert_eq!(settings, Settings::default());
        });
    }

    #[test]
    fn test_settings_from_valid_toml() {
        let toml_str = r#"
            [adapter]
            enabled = false
            endpoint = "https://staging.playground.xyz/host-config/prebid?v=2"
            default_currency = "AUD"
            ttl = 60
            prebid_version = "9.9.9"
            "#;

        let settings = temp_env::with_var_unset(ENDPOINT_VAR, || {
            Settings::from_toml(toml_str).expect("should parse settings")
        });

        assert!(!settings.adapter.enabled);
        assert_eq!(
            settings.adapter.endpoint,
            "https://staging.playground.xyz/host-config/prebid?v=2"
        );
        assert_eq!(settings.adapter.default_currency, "AUD");
        assert_eq!(settings.adapter.ttl, 60);
        assert_eq!(settings.adapter.prebid_version, "9.9.9");
        assert_eq!(settings.adapter.sync_url, DEFAULT_SYNC_URL);
    }

    #[test]
    fn test_settings_rejects_invalid_endpoint() {
        let toml_str = r#"
            [adapter]
            endpoint = "not a url"
            "#;

        assert!(
            Settings::from_toml(toml_str).is_err(),
            "Should fail when endpoint is not a URL"
        );
    }

    #[test]
    fn test_settings_rejects_zero_ttl_and_bad_currency() {
        assert!(Settings::from_toml("[adapter]\nttl = 0").is_err());
        assert!(Settings::from_toml("[adapter]\ndefault_currency = \"DOLLARS\"").is_err());
    }

    #[test]
    fn test_settings_invalid_toml_syntax() {
        let toml_str = r#"
            [adapter
            endpoint = "https://ads.playground.xyz"
            "#;

        assert!(Settings::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_override_env() {
        let toml_str = r#"
            [adapter]
            endpoint = "https://ads.playground.xyz/host-config/prebid?v=2"
            "#;

        temp_env::with_var(
            ENDPOINT_VAR,
            Some("https://eu.playground.xyz/host-config/prebid?v=2"),
            || {
                let settings = Settings::from_toml(toml_str).expect("should parse settings");
                assert_eq!(
                    settings.adapter.endpoint,
                    "https://eu.playground.xyz/host-config/prebid?v=2"
                );
            },
        );
    }
}
