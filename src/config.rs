//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Modes
//!
//! - **Local** (default): the service resolves the postal code itself through
//!   the location and weather APIs.
//! - **Gateway**: when `UPSTREAM_TEMPERATURE_BASE_URL` is set, the service only
//!   validates the postal code and forwards the lookup to another instance
//!   running in local mode.
//!
//! ## Required Variables
//!
//! - `WEATHER_API_TOKEN` - API key of the weather provider (local mode only)
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `VIACEP_API_BASE_URL` - Location service (default: `https://viacep.com.br/ws`)
//! - `VIACEP_API_TOKEN` - Bearer token for the location service (default: none)
//! - `VIACEP_PATH_SUFFIX` - Segment appended after the CEP (default: `json`, empty to disable)
//! - `WEATHER_API_BASE_URL` - Weather service (default: `https://api.weatherapi.com/v1`)
//! - `UPSTREAM_TEMPERATURE_BASE_URL` - Upstream temperature service; enables gateway mode
//! - `UPSTREAM_TEMPERATURE_TOKEN` - Bearer token for the upstream service (default: none)
//! - `CEP_VALIDATOR` - `national` or `length` (default: `national`)
//! - `CEP_STATES` - Comma-separated state codes accepted by the national validator
//! - `HTTP_TIMEOUT_SECONDS` - Outbound request timeout (default: 10, range: 1-300)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP/HTTP collector, e.g. `http://otelcol:4318`
//!   (default: none, trace export disabled)
//! - `OTEL_SERVICE_NAME` - Service name reported with exported spans (default: `cep-temperature`)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::domain::validators::{NationalCepValidator, ValidatorKind};

pub const DEFAULT_VIACEP_API_BASE_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_WEATHER_API_BASE_URL: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_OTEL_SERVICE_NAME: &str = "cep-temperature";

/// Location of a remote API and the credential used to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl RemoteApiConfig {
    /// Parses [`RemoteApiConfig::base_url`].
    ///
    /// # Errors
    ///
    /// Returns an error unless the URL parses and uses `http` or `https`.
    pub fn parsed_base_url(&self) -> Result<Url> {
        parse_http_url(&self.base_url)
    }
}

/// OpenTelemetry trace export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtlpConfig {
    /// Collector base URL; `/v1/traces` is appended when missing.
    pub endpoint: String,
    pub service_name: String,
}

/// How temperature requests are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMode {
    /// Location and weather APIs are called directly.
    Local,
    /// Requests are forwarded to an upstream temperature service.
    Gateway,
}

impl ServiceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Gateway => "gateway",
        }
    }
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Postal code to city service.
    pub location_api: RemoteApiConfig,
    /// Appended after the CEP in the location URL; `None` when disabled.
    pub location_path_suffix: Option<String>,
    /// City to weather service. The token is required in local mode.
    pub weather_api: RemoteApiConfig,
    /// Upstream temperature service; `Some` switches to gateway mode.
    pub upstream_api: Option<RemoteApiConfig>,
    pub cep_validator: ValidatorKind,
    /// Upper-cased state codes; empty means every state.
    pub cep_states: Vec<String>,
    pub http_timeout_seconds: u64,
    /// `None` disables trace export.
    pub otlp: Option<OtlpConfig>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `CEP_VALIDATOR` names an unknown validator or
    /// `HTTP_TIMEOUT_SECONDS` is not a number.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let location_api = RemoteApiConfig {
            base_url: env::var("VIACEP_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_VIACEP_API_BASE_URL.to_string()),
            token: non_empty_var("VIACEP_API_TOKEN"),
        };

        let location_path_suffix = match env::var("VIACEP_PATH_SUFFIX") {
            Ok(suffix) if suffix.trim().is_empty() => None,
            Ok(suffix) => Some(suffix.trim().to_string()),
            Err(_) => Some("json".to_string()),
        };

        let weather_api = RemoteApiConfig {
            base_url: env::var("WEATHER_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_WEATHER_API_BASE_URL.to_string()),
            token: env::var("WEATHER_API_TOKEN").ok(),
        };

        let upstream_api =
            non_empty_var("UPSTREAM_TEMPERATURE_BASE_URL").map(|base_url| RemoteApiConfig {
                base_url,
                token: non_empty_var("UPSTREAM_TEMPERATURE_TOKEN"),
            });

        let cep_validator = match env::var("CEP_VALIDATOR") {
            Ok(value) => value.parse().context("Invalid CEP_VALIDATOR")?,
            Err(_) => ValidatorKind::default(),
        };

        let cep_states = env::var("CEP_STATES")
            .map(|v| parse_state_list(&v))
            .unwrap_or_default();

        let http_timeout_seconds = match env::var("HTTP_TIMEOUT_SECONDS") {
            Ok(value) => value
                .trim()
                .parse()
                .with_context(|| format!("Invalid HTTP_TIMEOUT_SECONDS '{value}'"))?,
            Err(_) => 10,
        };

        let otlp = non_empty_var("OTEL_EXPORTER_OTLP_ENDPOINT").map(|endpoint| OtlpConfig {
            endpoint,
            service_name: non_empty_var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_OTEL_SERVICE_NAME.to_string()),
        });

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            location_api,
            location_path_suffix,
            weather_api,
            upstream_api,
            cep_validator,
            cep_states,
            http_timeout_seconds,
            otlp,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - a base URL or the OTLP endpoint is not an `http`/`https` URL
    /// - the weather token is empty in local mode
    /// - `cep_states` contains an unknown state code
    /// - `http_timeout_seconds` is outside 1-300
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        match &self.upstream_api {
            Some(upstream) => {
                upstream
                    .parsed_base_url()
                    .context("Invalid UPSTREAM_TEMPERATURE_BASE_URL")?;
            }
            None => {
                self.location_api
                    .parsed_base_url()
                    .context("Invalid VIACEP_API_BASE_URL")?;
                self.weather_api
                    .parsed_base_url()
                    .context("Invalid WEATHER_API_BASE_URL")?;

                if self.weather_api.token.as_deref().is_none_or(str::is_empty) {
                    anyhow::bail!("WEATHER_API_TOKEN must be set and not empty");
                }
            }
        }

        if let Some(unknown) = self
            .cep_states
            .iter()
            .find(|s| !NationalCepValidator::is_known_state(s))
        {
            anyhow::bail!("CEP_STATES contains unknown state code '{}'", unknown);
        }

        if self.http_timeout_seconds == 0 || self.http_timeout_seconds > 300 {
            anyhow::bail!(
                "HTTP_TIMEOUT_SECONDS must be between 1 and 300, got {}",
                self.http_timeout_seconds
            );
        }

        if let Some(otlp) = &self.otlp {
            parse_http_url(&otlp.endpoint).context("Invalid OTEL_EXPORTER_OTLP_ENDPOINT")?;
        }

        Ok(())
    }

    pub fn mode(&self) -> ServiceMode {
        if self.upstream_api.is_some() {
            ServiceMode::Gateway
        } else {
            ServiceMode::Local
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Configuration as `(label, value)` pairs with credentials masked.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let validator = if self.cep_states.is_empty() {
            self.cep_validator.to_string()
        } else {
            format!("{} (states: {})", self.cep_validator, self.cep_states.join(","))
        };

        let mut summary = vec![
            ("Listen address", self.listen_addr.clone()),
            ("Log level", self.log_level.clone()),
            ("Log format", self.log_format.clone()),
            ("Mode", self.mode().to_string()),
        ];

        match &self.upstream_api {
            Some(upstream) => summary.push(("Upstream API", describe_api(upstream))),
            None => {
                summary.push(("Location API", describe_api(&self.location_api)));
                summary.push((
                    "Location path suffix",
                    self.location_path_suffix
                        .clone()
                        .unwrap_or_else(|| "disabled".to_string()),
                ));
                summary.push(("Weather API", describe_api(&self.weather_api)));
            }
        }

        summary.push(("CEP validator", validator));
        summary.push(("HTTP timeout", format!("{}s", self.http_timeout_seconds)));
        summary.push((
            "Trace export",
            match &self.otlp {
                Some(otlp) => format!("{} (service: {})", otlp.endpoint, otlp.service_name),
                None => "disabled".to_string(),
            },
        ));

        summary
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        for (label, value) in self.summary() {
            tracing::info!("  {}: {}", label, value);
        }
    }
}

/// Reads a variable, treating an empty or blank value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_http_url(value: &str) -> Result<Url> {
    let url = Url::parse(value).with_context(|| format!("invalid URL '{}'", value))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("URL must start with 'http://' or 'https://', got '{}'", value);
    }

    Ok(url)
}

fn describe_api(api: &RemoteApiConfig) -> String {
    format!("{} (token: {})", api.base_url, mask_token(api.token.as_deref()))
}

/// Splits a comma-separated list of state codes, dropping blanks.
fn parse_state_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Masks a credential for logging, keeping at most its first four characters.
///
/// - `None` → `not set`
/// - `abc` → `***`
/// - `abcdef123` → `abcd***`
fn mask_token(token: Option<&str>) -> String {
    match token {
        None => "not set".to_string(),
        Some(t) if t.chars().count() <= 4 => "***".to_string(),
        Some(t) => format!("{}***", t.chars().take(4).collect::<String>()),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LISTEN",
        "LOG_FORMAT",
        "VIACEP_API_BASE_URL",
        "VIACEP_API_TOKEN",
        "VIACEP_PATH_SUFFIX",
        "WEATHER_API_BASE_URL",
        "WEATHER_API_TOKEN",
        "UPSTREAM_TEMPERATURE_BASE_URL",
        "UPSTREAM_TEMPERATURE_TOKEN",
        "CEP_VALIDATOR",
        "CEP_STATES",
        "HTTP_TIMEOUT_SECONDS",
        "OTEL_EXPORTER_OTLP_ENDPOINT",
        "OTEL_SERVICE_NAME",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            location_api: RemoteApiConfig {
                base_url: DEFAULT_VIACEP_API_BASE_URL.to_string(),
                token: None,
            },
            location_path_suffix: Some("json".to_string()),
            weather_api: RemoteApiConfig {
                base_url: DEFAULT_WEATHER_API_BASE_URL.to_string(),
                token: Some("weather-key".to_string()),
            },
            upstream_api: None,
            cep_validator: ValidatorKind::National,
            cep_states: Vec::new(),
            http_timeout_seconds: 10,
            otlp: None,
        }
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token(None), "not set");
        assert_eq!(mask_token(Some("abc")), "***");
        assert_eq!(mask_token(Some("abcdef123")), "abcd***");
    }

    #[test]
    fn test_summary_masks_tokens() {
        let mut config = valid_config();
        config.location_api.token = Some("location-secret".to_string());
        config.cep_states = vec!["RS".to_string(), "SC".to_string()];

        let summary = config.summary();
        let text: Vec<String> = summary.iter().map(|(l, v)| format!("{l}: {v}")).collect();
        let text = text.join("\n");

        assert!(!text.contains("location-secret"));
        assert!(!text.contains("weather-key"));
        assert!(text.contains("loca***"));
        assert!(text.contains("Mode: local"));
        assert!(text.contains("CEP validator: national (states: RS,SC)"));
        assert!(text.contains("Trace export: disabled"));
    }

    #[test]
    fn test_summary_in_gateway_mode() {
        let mut config = valid_config();
        config.upstream_api = Some(RemoteApiConfig {
            base_url: "http://temperature:8080".to_string(),
            token: Some("upstream-secret".to_string()),
        });

        let text: Vec<String> = config
            .summary()
            .iter()
            .map(|(l, v)| format!("{l}: {v}"))
            .collect();
        let text = text.join("\n");

        assert!(text.contains("Mode: gateway"));
        assert!(text.contains("Upstream API: http://temperature:8080 (token: upst***)"));
        assert!(!text.contains("Weather API"));
    }

    #[test]
    fn test_parse_state_list() {
        assert_eq!(parse_state_list(" rs, sp ,,SC"), vec!["RS", "SP", "SC"]);
        assert!(parse_state_list("").is_empty());
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "8080".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "127.0.0.1:8080".to_string();

        config.location_api.base_url = "ftp://viacep.com.br/ws".to_string();
        assert!(config.validate().is_err());
        config.location_api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
        config.location_api.base_url = "http://localhost:9000/ws".to_string();
        assert!(config.validate().is_ok());

        config.weather_api.token = Some(String::new());
        assert!(config.validate().is_err());
        config.weather_api.token = Some("weather-key".to_string());

        config.cep_states = vec!["RS".to_string(), "XX".to_string()];
        assert!(config.validate().is_err());
        config.cep_states = vec!["RS".to_string()];
        assert!(config.validate().is_ok());

        config.http_timeout_seconds = 0;
        assert!(config.validate().is_err());
        config.http_timeout_seconds = 301;
        assert!(config.validate().is_err());
        config.http_timeout_seconds = 10;

        config.otlp = Some(OtlpConfig {
            endpoint: "otelcol:4318".to_string(),
            service_name: DEFAULT_OTEL_SERVICE_NAME.to_string(),
        });
        assert!(config.validate().is_err());
        config.otlp = Some(OtlpConfig {
            endpoint: "http://otelcol:4318".to_string(),
            service_name: DEFAULT_OTEL_SERVICE_NAME.to_string(),
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gateway_validation_ignores_weather_token() {
        let mut config = valid_config();
        config.weather_api.token = None;
        assert!(config.validate().is_err());

        config.upstream_api = Some(RemoteApiConfig {
            base_url: "http://temperature:8080".to_string(),
            token: None,
        });
        assert!(config.validate().is_ok());
        assert_eq!(config.mode(), ServiceMode::Gateway);

        config.upstream_api = Some(RemoteApiConfig {
            base_url: "temperature:8080".to_string(),
            token: None,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("WEATHER_API_TOKEN", "weather-key");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.location_api.base_url, DEFAULT_VIACEP_API_BASE_URL);
        assert_eq!(config.location_api.token, None);
        assert_eq!(config.location_path_suffix.as_deref(), Some("json"));
        assert_eq!(config.weather_api.base_url, DEFAULT_WEATHER_API_BASE_URL);
        assert_eq!(config.weather_api.token.as_deref(), Some("weather-key"));
        assert_eq!(config.upstream_api, None);
        assert_eq!(config.mode(), ServiceMode::Local);
        assert_eq!(config.cep_validator, ValidatorKind::National);
        assert!(config.cep_states.is_empty());
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert_eq!(config.otlp, None);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("WEATHER_API_TOKEN", "weather-key");
            env::set_var("VIACEP_API_TOKEN", "");
            env::set_var("VIACEP_PATH_SUFFIX", "");
            env::set_var("CEP_VALIDATOR", "Length");
            env::set_var("CEP_STATES", "rs,sc");
            env::set_var("HTTP_TIMEOUT_SECONDS", "3");
            env::set_var("OTEL_EXPORTER_OTLP_ENDPOINT", "http://otelcol:4318");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.location_api.token, None);
        assert_eq!(config.location_path_suffix, None);
        assert_eq!(config.cep_validator, ValidatorKind::Length);
        assert_eq!(config.cep_states, vec!["RS", "SC"]);
        assert_eq!(config.http_timeout_seconds, 3);
        assert_eq!(
            config.otlp,
            Some(OtlpConfig {
                endpoint: "http://otelcol:4318".to_string(),
                service_name: DEFAULT_OTEL_SERVICE_NAME.to_string(),
            })
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_gateway_mode() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("UPSTREAM_TEMPERATURE_BASE_URL", "http://temperature:8080");
            env::set_var("UPSTREAM_TEMPERATURE_TOKEN", "upstream-token");
            env::set_var("OTEL_EXPORTER_OTLP_ENDPOINT", "http://otelcol:4318");
            env::set_var("OTEL_SERVICE_NAME", "cep-gateway");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.mode(), ServiceMode::Gateway);
        assert_eq!(
            config.upstream_api,
            Some(RemoteApiConfig {
                base_url: "http://temperature:8080".to_string(),
                token: Some("upstream-token".to_string()),
            })
        );
        assert_eq!(config.otlp.unwrap().service_name, "cep-gateway");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_weather_token_in_local_mode() {
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(err.to_string().contains("WEATHER_API_TOKEN"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_validator() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("WEATHER_API_TOKEN", "weather-key");
            env::set_var("CEP_VALIDATOR", "regex");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unparsable_timeout() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("WEATHER_API_TOKEN", "weather-key");
            env::set_var("HTTP_TIMEOUT_SECONDS", "abc");
        }

        let err = load_from_env().unwrap_err();
        assert!(err.to_string().contains("HTTP_TIMEOUT_SECONDS"));

        clear_env();
    }
}
