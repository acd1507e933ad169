use std::time::Duration;

use crate::OrderServiceError;

/// Environment variable holding the service base URL.
pub const BASE_URL_ENV: &str = "ORDER_SERVICE_BASE_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "ORDER_SERVICE_TIMEOUT";

/// Local development endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Immutable client configuration, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Service root, e.g. `http://localhost:8000`. A trailing `/` is ignored.
    pub base_url: String,
    /// Timeout for each request, including reading the body.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with [`BASE_URL_ENV`] and [`TIMEOUT_ENV`].
    pub fn from_env() -> Result<Self, OrderServiceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OrderServiceError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(url) = get(BASE_URL_ENV) {
            config.base_url = url;
        }
        if let Some(raw) = get(TIMEOUT_ENV) {
            config.timeout = parse_timeout_secs(&raw)?;
        }
        Ok(config)
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parse a positive number of seconds (fractions allowed), e.g. `"2.5"`.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, OrderServiceError> {
    let invalid = || OrderServiceError::Config(format!("timeout must be a positive number of seconds, got '{raw}'"));

    let secs: f64 = raw.trim().parse().map_err(|_| invalid())?;
    match Duration::try_from_secs_f64(secs) {
        Ok(d) if !d.is_zero() => Ok(d),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn reads_environment() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "http://orders.internal:9000"),
            (TIMEOUT_ENV, "2.5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://orders.internal:9000");
        assert_eq!(config.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config =
            ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, ""), (TIMEOUT_ENV, " ")])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn explicit_overrides_win() {
        let config = ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, "http://env:1")]))
            .unwrap()
            .with_base_url("http://flag:2")
            .with_timeout(Duration::from_secs(1));
        assert_eq!(config.base_url, "http://flag:2");
        assert_eq!(config.timeout, Duration::from_secs(1));
    }

    #[test]
    fn rejects_bad_timeouts() {
        for raw in ["abc", "-1", "0", "NaN"] {
            let err = parse_timeout_secs(raw).unwrap_err();
            assert!(matches!(err, OrderServiceError::Config(_)), "{raw}");
        }
        assert!(ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")])).is_err());
    }
}
