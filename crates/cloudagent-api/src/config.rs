use std::time::Duration;

use crate::{Error, Result};

const DEFAULT_SUBSCRIPTION_ID: &str = "default";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the cloud agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub endpoint: String,
    pub subscription_id: String,
    /// Upper bound on a single call, including connect.
    pub request_timeout: Duration,
}

impl AgentConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            subscription_id: DEFAULT_SUBSCRIPTION_ID.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_subscription_id(mut self, subscription_id: impl Into<String>) -> Self {
        self.subscription_id = subscription_id.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Create from env vars:
    ///
    /// - `MOC_CLOUDAGENT_ENDPOINT` (required)
    /// - `MOC_SUBSCRIPTION_ID` (default: `"default"`)
    /// - `MOC_REQUEST_TIMEOUT_SECS` (default: `30`)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint = lookup("MOC_CLOUDAGENT_ENDPOINT")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::MissingEnv("MOC_CLOUDAGENT_ENDPOINT".into()))?;

        let mut config = Self::new(endpoint);

        if let Some(sub) = lookup("MOC_SUBSCRIPTION_ID").filter(|s| !s.is_empty()) {
            config.subscription_id = sub;
        }

        if let Some(raw) = lookup("MOC_REQUEST_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfig(format!("MOC_REQUEST_TIMEOUT_SECS must be an integer, got {raw:?}"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            AgentConfig::from_lookup(lookup(&[("MOC_CLOUDAGENT_ENDPOINT", "http://agent:55000")]))
                .unwrap();
        assert_eq!(config.endpoint, "http://agent:55000");
        assert_eq!(config.subscription_id, "default");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = AgentConfig::from_lookup(lookup(&[
            ("MOC_CLOUDAGENT_ENDPOINT", "http://agent:55000"),
            ("MOC_SUBSCRIPTION_ID", "sub-42"),
            ("MOC_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.subscription_id, "sub-42");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_endpoint() {
        let err = AgentConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingEnv(ref v) if v == "MOC_CLOUDAGENT_ENDPOINT"));
    }

    #[test]
    fn test_bad_timeout() {
        let err = AgentConfig::from_lookup(lookup(&[
            ("MOC_CLOUDAGENT_ENDPOINT", "http://agent:55000"),
            ("MOC_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
