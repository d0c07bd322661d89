//! Environment-driven settings shared by the CLI and the gateway.
//!
//! Every value has a built-in default; the environment only overrides.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BRASIL_API_URL: &str = "https://brasilapi.com.br/api/cep/v1";
pub const DEFAULT_VIACEP_URL: &str = "http://viacep.com.br/ws";
pub const DEFAULT_DEADLINE_MS: u64 = 1_000;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 3_000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config: {key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub brasil_api_url: String,
    pub viacep_url: String,
    /// Overall deadline for one resolution.
    pub deadline: Duration,
    /// Per-request timeout each adapter applies to its own HTTP call.
    pub http_timeout: Duration,
    pub gate_addr: SocketAddr,
    /// Prometheus listener; disabled when unset.
    pub metrics_addr: Option<SocketAddr>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brasil_api_url: DEFAULT_BRASIL_API_URL.into(),
            viacep_url: DEFAULT_VIACEP_URL.into(),
            deadline: Duration::from_millis(DEFAULT_DEADLINE_MS),
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
            gate_addr: ([0, 0, 0, 0], 3000).into(),
            metrics_addr: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(url) = get("CEP_BRASILAPI_URL") {
            settings.brasil_api_url = url;
        }
        if let Some(url) = get("CEP_VIACEP_URL") {
            settings.viacep_url = url;
        }
        if let Some(raw) = get("CEP_DEADLINE_MS") {
            settings.deadline = parse_millis("CEP_DEADLINE_MS", &raw)?;
        }
        if let Some(raw) = get("CEP_HTTP_TIMEOUT_MS") {
            settings.http_timeout = parse_millis("CEP_HTTP_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = get("CEP_GATE_ADDR") {
            settings.gate_addr = parse_addr("CEP_GATE_ADDR", &raw)?;
        }
        if let Some(raw) = get("CEP_METRICS_ADDR") {
            settings.metrics_addr = Some(parse_addr("CEP_METRICS_ADDR", &raw)?);
        }
        Ok(settings)
    }
}

/// Parse a positive number of milliseconds.
pub fn parse_millis(key: &'static str, raw: &str) -> Result<Duration> {
    let ms: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    if ms == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(Duration::from_millis(ms))
}

fn parse_addr(key: &'static str, raw: &str) -> Result<SocketAddr> {
    raw.trim().parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.deadline, Duration::from_secs(1));
        assert!(settings.metrics_addr.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Settings::from_lookup(lookup(&[
            ("CEP_BRASILAPI_URL", "http://127.0.0.1:9000/cep"),
            ("CEP_DEADLINE_MS", "250"),
            ("CEP_HTTP_TIMEOUT_MS", "800"),
            ("CEP_METRICS_ADDR", "127.0.0.1:9100"),
        ]))
        .unwrap();
        assert_eq!(settings.brasil_api_url, "http://127.0.0.1:9000/cep");
        assert_eq!(settings.viacep_url, DEFAULT_VIACEP_URL);
        assert_eq!(settings.deadline, Duration::from_millis(250));
        assert_eq!(settings.http_timeout, Duration::from_millis(800));
        assert_eq!(settings.metrics_addr, Some(([127, 0, 0, 1], 9100).into()));
    }

    #[test]
    fn blank_values_are_ignored() {
        let settings = Settings::from_lookup(lookup(&[("CEP_DEADLINE_MS", "  ")])).unwrap();
        assert_eq!(settings.deadline, Duration::from_millis(DEFAULT_DEADLINE_MS));
    }

    #[test]
    fn non_numeric_deadline_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("CEP_DEADLINE_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CEP_DEADLINE_MS", .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("CEP_HTTP_TIMEOUT_MS", "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn bad_gate_addr_is_rejected() {
        assert!(Settings::from_lookup(lookup(&[("CEP_GATE_ADDR", "localhost")])).is_err());
    }
}
