//! Configuration types for the transport, the URL check and logging.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::ResultflowError;

/// Environment variable overriding [`TransportConfig::timeout_seconds`].
pub const ENV_TIMEOUT_SECS: &str = "RESULTFLOW_TIMEOUT_SECS";
/// Environment variable overriding [`TransportConfig::user_agent`].
pub const ENV_USER_AGENT: &str = "RESULTFLOW_USER_AGENT";
/// Environment variable overriding [`ResultflowConfig::required_scheme`].
pub const ENV_REQUIRED_SCHEME: &str = "RESULTFLOW_REQUIRED_SCHEME";
/// Environment variable overriding [`ResultflowConfig::log_format`].
pub const ENV_LOG_FORMAT: &str = "RESULTFLOW_LOG_FORMAT";

/// URL the demo driver fetches when none is given.
pub const DEFAULT_URL: &str = "https://postman-echo.com/get?foo1=bar1&foo2=bar2";

/// Configuration for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Additional headers sent with every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout() -> f64 {
    30.0
}

fn default_user_agent() -> String {
    concat!("resultflow/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            headers: HashMap::new(),
        }
    }
}

impl TransportConfig {
    /// Creates a new transport configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Gets timeout as Duration.
    ///
    /// Fails unless the timeout is a positive number of seconds that fits a
    /// [`Duration`].
    pub fn timeout(&self) -> Result<Duration, ResultflowError> {
        let seconds = self.timeout_seconds;
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(ResultflowError::config(TIMEOUT_KEY, "must be a positive number"));
        }
        Duration::try_from_secs_f64(seconds)
            .map_err(|e| ResultflowError::config(TIMEOUT_KEY, format!("{seconds} seconds: {e}")))
    }

    /// Checks every field that can make client construction fail.
    pub fn validate(&self) -> Result<(), ResultflowError> {
        self.timeout().map(drop)
    }
}

const TIMEOUT_KEY: &str = "transport.timeout_seconds";
const SCHEME_KEY: &str = "required_scheme";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, one line per event.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ResultflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ResultflowError::config(
                ENV_LOG_FORMAT,
                format!("unknown log format '{other}'"),
            )),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultflowConfig {
    /// Transport settings.
    #[serde(default)]
    pub transport: TransportConfig,
    /// Prefix a URL must start with to pass the URL check.
    #[serde(default = "default_required_scheme")]
    pub required_scheme: String,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_required_scheme() -> String {
    "https://".to_string()
}

impl Default for ResultflowConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            required_scheme: default_required_scheme(),
            log_format: LogFormat::default(),
        }
    }
}

impl ResultflowConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ResultflowError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with the `RESULTFLOW_*` environment variables.
    pub fn from_env() -> Result<Self, ResultflowError> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlays values returned by `lookup` for each `RESULTFLOW_*` key.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self, ResultflowError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.transport.timeout_seconds = raw
                .trim()
                .parse()
                .map_err(|_| ResultflowError::config(ENV_TIMEOUT_SECS, format!("'{raw}' is not a number")))?;
            self.transport
                .validate()
                .map_err(|e| match e {
                    ResultflowError::Config { message, .. } => ResultflowError::config(ENV_TIMEOUT_SECS, message),
                    other => other,
                })?;
        }
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            self.transport.user_agent = agent;
        }
        if let Some(scheme) = lookup(ENV_REQUIRED_SCHEME) {
            if scheme.is_empty() {
                return Err(ResultflowError::config(ENV_REQUIRED_SCHEME, "must not be empty"));
            }
            self.required_scheme = scheme;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.log_format = format.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks the whole configuration.
    ///
    /// Run by [`ResultflowConfig::from_json`], [`ResultflowConfig::overlay`]
    /// and [`Pipeline::from_config`](crate::pipeline::Pipeline::from_config);
    /// values set through the `with_*` builders are checked there.
    pub fn validate(&self) -> Result<(), ResultflowError> {
        if self.required_scheme.is_empty() {
            return Err(ResultflowError::config(SCHEME_KEY, "must not be empty"));
        }
        self.transport.validate()
    }

    /// Sets the transport configuration.
    #[must_use]
    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Sets the required URL prefix.
    #[must_use]
    pub fn with_required_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.required_scheme = scheme.into();
        self
    }

    /// Sets the log format.
    #[must_use]
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ResultflowConfig::default();
        assert_eq!(config.required_scheme, "https://");
        assert_eq!(config.transport.timeout().unwrap(), Duration::from_secs(30));
        assert!(config.transport.user_agent.starts_with("resultflow/"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config =
            ResultflowConfig::from_json(r#"{"transport": {"timeout_seconds": 2.5}, "log_format": "json"}"#)
                .unwrap();
        assert_eq!(config.transport.timeout().unwrap(), Duration::from_millis(2500));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.required_scheme, "https://");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = ResultflowConfig::from_json("{").unwrap_err();
        assert!(matches!(err, ResultflowError::Serialization(_)));
    }

    #[test]
    fn test_overlay_applies_values() {
        let config = ResultflowConfig::default()
            .overlay(env(&[
                (ENV_TIMEOUT_SECS, "5"),
                (ENV_USER_AGENT, "custom/1.0"),
                (ENV_REQUIRED_SCHEME, "http"),
                (ENV_LOG_FORMAT, "JSON"),
            ]))
            .unwrap();

        let expected = ResultflowConfig::new()
            .with_transport(TransportConfig::new().with_timeout(5.0).with_user_agent("custom/1.0"))
            .with_required_scheme("http")
            .with_log_format(LogFormat::Json);
        assert_eq!(config, expected);
    }

    #[test]
    fn test_overlay_without_values_is_identity() {
        let config = ResultflowConfig::default().overlay(env(&[])).unwrap();
        assert_eq!(config, ResultflowConfig::default());
    }

    #[test]
    fn test_overlay_rejects_bad_timeout() {
        let err = ResultflowConfig::default()
            .overlay(env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));

        let err = ResultflowConfig::default()
            .overlay(env(&[(ENV_TIMEOUT_SECS, "-1")]))
            .unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_overlay_rejects_timeout_too_large_for_duration() {
        let err = ResultflowConfig::default()
            .overlay(env(&[(ENV_TIMEOUT_SECS, "1e300")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn test_from_json_rejects_unusable_timeouts() {
        for raw in ["-1", "0", "1e300"] {
            let json = format!(r#"{{"transport": {{"timeout_seconds": {raw}}}}}"#);
            let err = ResultflowConfig::from_json(&json).unwrap_err();
            assert!(
                matches!(&err, ResultflowError::Config { key, .. } if key == TIMEOUT_KEY),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn test_timeout_reports_instead_of_panicking() {
        for seconds in [-1.0, f64::NAN, f64::INFINITY, 1e300] {
            assert!(TransportConfig::new().with_timeout(seconds).timeout().is_err(), "{seconds}");
        }
        assert_eq!(
            TransportConfig::new().with_timeout(0.25).timeout().unwrap(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_from_json_rejects_empty_scheme() {
        let err = ResultflowConfig::from_json(r#"{"required_scheme": ""}"#).unwrap_err();
        assert!(matches!(&err, ResultflowError::Config { key, .. } if key == SCHEME_KEY));
    }

    #[test]
    fn test_validate_catches_builder_values() {
        assert!(ResultflowConfig::new().validate().is_ok());
        assert!(ResultflowConfig::new().with_required_scheme("").validate().is_err());
        assert!(ResultflowConfig::new()
            .with_transport(TransportConfig::new().with_timeout(-3.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_overlay_rejects_unknown_log_format() {
        let err = ResultflowConfig::default()
            .overlay(env(&[(ENV_LOG_FORMAT, "xml")]))
            .unwrap_err();
        assert!(err.to_string().contains("unknown log format 'xml'"));
    }

    #[test]
    fn test_transport_headers() {
        let config = TransportConfig::new().with_header("Accept", "application/json");
        assert_eq!(config.headers.get("Accept"), Some(&"application/json".to_string()));
    }
}
