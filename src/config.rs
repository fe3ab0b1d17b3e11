use crate::error::{Error, Result};
use crate::framework::ENV_NAMESPACE;

/// Settings required to talk to one zone of the analytics framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkConfig {
    /// Tenant zone, sent as `Predix-Zone-Id` on every request.
    pub zone_id: String,
    /// Base URI of the service, e.g. `https://analytics-catalog.example.com`.
    pub base_uri: String,
}

impl FrameworkConfig {
    /// Reads `PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID` and `PREDIX_ANALYTICS_FRAMEWORK_URI`.
    pub fn from_env() -> Result<Self> {
        load_config(ENV_NAMESPACE, None, None)
    }
}

/// Returns the environment variable consulted for `key` within `namespace`.
///
/// The namespace is usually a Rust module path; `::`, `.` and `-` become `_`
/// and the result is uppercased, so `("predix_analytics::framework", "zone_id")`
/// maps to `PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID`.
pub fn env_key(namespace: &str, key: &str) -> String {
    let namespace = namespace.replace("::", "_").replace(['.', '-'], "_");
    format!("{}_{}", namespace, key).to_uppercase()
}

pub(crate) fn load_config(
    namespace: &str,
    zone_id: Option<String>,
    base_uri: Option<String>,
) -> Result<FrameworkConfig> {
    let zone_id = required(namespace, "zone_id", zone_id)?;
    let base_uri = required(namespace, "uri", base_uri)?;

    Ok(FrameworkConfig { zone_id, base_uri })
}

fn required(namespace: &str, key: &str, explicit: Option<String>) -> Result<String> {
    let key = env_key(namespace, key);
    match explicit.or_else(|| std::env::var(&key).ok()) {
        Some(v) => {
            tracing::trace!(key, "resolved framework setting");
            Ok(v)
        }
        None => Err(Error::MissingConfiguration { key }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "predix_analytics::framework";

    #[test]
    fn env_key_namespaces_module_path() {
        assert_eq!(env_key(NS, "zone_id"), "PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID");
        assert_eq!(env_key("predix.analytics.framework", "uri"), "PREDIX_ANALYTICS_FRAMEWORK_URI");
        assert_eq!(env_key("my-app", "uri"), "MY_APP_URI");
    }

    #[test]
    fn reads_both_settings_from_env() {
        temp_env::with_vars(
            [
                ("PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID", Some("zone-1")),
                ("PREDIX_ANALYTICS_FRAMEWORK_URI", Some("https://catalog.example.com")),
            ],
            || {
                let cfg = load_config(NS, None, None).unwrap();
                assert_eq!(cfg.zone_id, "zone-1");
                assert_eq!(cfg.base_uri, "https://catalog.example.com");
            },
        );
    }

    #[test]
    fn explicit_values_take_precedence() {
        temp_env::with_vars(
            [
                ("PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID", Some("from-env")),
                ("PREDIX_ANALYTICS_FRAMEWORK_URI", Some("https://env.example.com")),
            ],
            || {
                let cfg = load_config(NS, Some("explicit".into()), None).unwrap();
                assert_eq!(cfg.zone_id, "explicit");
                assert_eq!(cfg.base_uri, "https://env.example.com");
            },
        );
    }

    #[test]
    fn missing_zone_id_names_the_key() {
        temp_env::with_vars(
            [
                ("PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID", None::<&str>),
                ("PREDIX_ANALYTICS_FRAMEWORK_URI", Some("https://catalog.example.com")),
            ],
            || {
                let err = load_config(NS, None, None).unwrap_err();
                match err {
                    Error::MissingConfiguration { key } => {
                        assert_eq!(key, "PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID")
                    }
                    other => panic!("unexpected error: {other:?}"),
                }
            },
        );
    }

    #[test]
    fn missing_uri_names_the_key() {
        temp_env::with_vars(
            [
                ("PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID", Some("zone-1")),
                ("PREDIX_ANALYTICS_FRAMEWORK_URI", None),
            ],
            || {
                let err = load_config(NS, None, None).unwrap_err();
                assert_eq!(err.to_string(), "PREDIX_ANALYTICS_FRAMEWORK_URI environment unset");
            },
        );
    }
}
