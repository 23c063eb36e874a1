use std::time::Duration;

use crate::error::{Result, ZendeskError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!("zendesk-rs/", env!("CARGO_PKG_VERSION"));

/// How requests authenticate against the API.
#[derive(Clone)]
pub enum Credential {
    /// Basic auth as `{email}/token` with an API token.
    ApiToken { email: String, token: String },
    /// Basic auth with the agent's password.
    Password { email: String, password: String },
    /// OAuth access token sent as a bearer token.
    Bearer(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::ApiToken { email, .. } => {
                f.debug_struct("ApiToken").field("email", email).finish_non_exhaustive()
            }
            Credential::Password { email, .. } => {
                f.debug_struct("Password").field("email", email).finish_non_exhaustive()
            }
            Credential::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

/// Configuration for the Zendesk client.
#[derive(Debug, Clone)]
pub struct ZendeskConfig {
    /// API root, e.g. `https://acme.zendesk.com/api/v2`.
    pub base_url: String,
    pub credential: Credential,
    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,
    pub user_agent: String,
}

impl ZendeskConfig {
    /// Config for `https://{subdomain}.zendesk.com/api/v2`.
    pub fn new(subdomain: &str, credential: Credential) -> Self {
        Self {
            base_url: format!("https://{subdomain}.zendesk.com/api/v2"),
            credential,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build a config from `ZENDESK_*` environment variables.
    ///
    /// `ZENDESK_BASE_URL` wins over `ZENDESK_SUBDOMAIN`. Credentials come from
    /// `ZENDESK_OAUTH_TOKEN`, or `ZENDESK_EMAIL` plus `ZENDESK_API_TOKEN`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let credential = match get("ZENDESK_OAUTH_TOKEN") {
            Some(token) => Credential::Bearer(token),
            None => {
                let email = get("ZENDESK_EMAIL")
                    .ok_or_else(|| ZendeskError::Config("ZENDESK_EMAIL is not set".into()))?;
                let token = get("ZENDESK_API_TOKEN").ok_or_else(|| {
                    ZendeskError::Config("ZENDESK_API_TOKEN is not set".into())
                })?;
                Credential::ApiToken { email, token }
            }
        };

        let config = match (get("ZENDESK_BASE_URL"), get("ZENDESK_SUBDOMAIN")) {
            (Some(base_url), _) => Self::new("", credential).with_base_url(&base_url),
            (None, Some(subdomain)) => Self::new(&subdomain, credential),
            (None, None) => {
                return Err(ZendeskError::Config(
                    "one of ZENDESK_BASE_URL or ZENDESK_SUBDOMAIN must be set".into(),
                ))
            }
        };

        match get("ZENDESK_TIMEOUT_SECS") {
            Some(secs) => {
                let secs: u64 = secs.parse().map_err(|_| {
                    ZendeskError::Config(format!("invalid ZENDESK_TIMEOUT_SECS: {secs}"))
                })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            None => Ok(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn subdomain_builds_base_url() {
        let config = ZendeskConfig::from_lookup(lookup(&[
            ("ZENDESK_SUBDOMAIN", "acme"),
            ("ZENDESK_EMAIL", "agent@acme.test"),
            ("ZENDESK_API_TOKEN", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://acme.zendesk.com/api/v2");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(matches!(config.credential, Credential::ApiToken { .. }));
    }

    #[test]
    fn base_url_overrides_subdomain_and_trims_slash() {
        let config = ZendeskConfig::from_lookup(lookup(&[
            ("ZENDESK_SUBDOMAIN", "acme"),
            ("ZENDESK_BASE_URL", "http://127.0.0.1:8080/"),
            ("ZENDESK_OAUTH_TOKEN", "tok"),
            ("ZENDESK_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(matches!(config.credential, Credential::Bearer(_)));
    }

    #[test]
    fn missing_credentials_is_config_error() {
        let err = ZendeskConfig::from_lookup(lookup(&[("ZENDESK_SUBDOMAIN", "acme")]))
            .unwrap_err();
        assert!(matches!(err, ZendeskError::Config(_)));
    }

    #[test]
    fn debug_hides_secrets() {
        let cred = Credential::ApiToken {
            email: "agent@acme.test".into(),
            token: "secret".into(),
        };
        let rendered = format!("{cred:?}");
        assert!(rendered.contains("agent@acme.test"));
        assert!(!rendered.contains("secret"));
    }
}
