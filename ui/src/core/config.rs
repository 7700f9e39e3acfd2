//! Endpoint configuration for the classification API.

use std::time::Duration;

/// Used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/predict";

/// Environment variable consulted at runtime (native) and at build time (all targets).
pub const ENDPOINT_ENV: &str = "AGRIPRED_API_URL";

/// Upper bound on a single classification request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Runtime env (native only), then the value baked in at build time, then the default.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let runtime = std::env::var(ENDPOINT_ENV).ok();
        #[cfg(target_arch = "wasm32")]
        let runtime: Option<String> = None;

        let compiled = option_env!("AGRIPRED_API_URL");
        Self::new(resolve_endpoint(runtime.as_deref(), compiled))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// First non-blank candidate wins.
pub fn resolve_endpoint(runtime: Option<&str>, compiled: Option<&str>) -> String {
    [runtime, compiled]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_ENDPOINT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_local_default() {
        assert_eq!(resolve_endpoint(None, None), DEFAULT_ENDPOINT);
        assert_eq!(resolve_endpoint(Some("  "), Some("")), DEFAULT_ENDPOINT);
    }

    #[test]
    fn runtime_value_wins_over_compiled() {
        let endpoint = resolve_endpoint(
            Some("https://api.example.org/predict"),
            Some("http://build.example/predict"),
        );
        assert_eq!(endpoint, "https://api.example.org/predict");
    }

    #[test]
    fn compiled_value_used_when_runtime_blank() {
        assert_eq!(
            resolve_endpoint(Some(""), Some(" http://build.example/predict ")),
            "http://build.example/predict"
        );
    }

    #[test]
    fn timeout_is_two_minutes() {
        assert_eq!(ApiConfig::default().timeout, Duration::from_secs(120));
    }
}
