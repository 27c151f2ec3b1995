use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Upper bound for a floor-plan analysis call. The chattel endpoint runs
/// without an explicit deadline.
pub const FLOOR_PLAN_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, PartialEq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone)]
pub struct AppConfig {
    /// Absent key selects stub mode for both analysis endpoints.
    pub anthropic_api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Absent pair disables the auth gate entirely (fail-open).
    pub basic_auth: Option<BasicCredentials>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok().filter(|value| !value.is_empty()))
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let anthropic_api_key = get("ANTHROPIC_API_KEY");
        if anthropic_api_key.is_none() {
            log::warn!(
                "ANTHROPIC_API_KEY is not set; analysis endpoints will return placeholder results"
            );
        }

        let basic_auth = match (get("BASIC_AUTH_USERNAME"), get("BASIC_AUTH_PASSWORD")) {
            (Some(username), Some(password)) => Some(BasicCredentials { username, password }),
            (None, None) => None,
            _ => {
                log::warn!(
                    "Basic auth needs both BASIC_AUTH_USERNAME and BASIC_AUTH_PASSWORD; gate disabled"
                );
                None
            }
        };

        Self {
            anthropic_api_key,
            model: get("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("ANTHROPIC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            basic_auth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(move |key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]);
        assert!(config.anthropic_api_key.is_none());
        assert!(config.basic_auth.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn complete_credential_pair_arms_the_gate() {
        let config = config_from(&[
            ("BASIC_AUTH_USERNAME", "admin"),
            ("BASIC_AUTH_PASSWORD", "hunter2"),
        ]);
        assert_eq!(
            config.basic_auth,
            Some(BasicCredentials {
                username: "admin".into(),
                password: "hunter2".into(),
            })
        );
    }

    #[test]
    fn lone_username_leaves_the_gate_disabled() {
        let config = config_from(&[("BASIC_AUTH_USERNAME", "admin")]);
        assert!(config.basic_auth.is_none());
    }
}
