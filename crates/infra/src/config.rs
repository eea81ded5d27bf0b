//! Environment-driven configuration.
//!
//! | Variable                    | Default | Meaning |
//! |-----------------------------|---------|---------|
//! | `WHIPPET_LOG`               | `info`  | `EnvFilter` directives |
//! | `WHIPPET_LOG_FORMAT`        | `json`  | `json` or `pretty` |
//! | `WHIPPET_VALIDATE_ON_WRITE` | `true`  | in-memory repositories validate entities on write |
//! | `WHIPPET_PUBLISH_CHANGES`   | `true`  | dispatcher publishes `EntityChanged` on the bus |
//! | `WHIPPET_DEFAULT_TENANT`    | unset   | tenant used by tools that act on a single tenant |

use thiserror::Error;

use whippet_core::TenantId;
use whippet_observability::{LogFormat, LogSettings};

pub const ENV_LOG: &str = "WHIPPET_LOG";
pub const ENV_LOG_FORMAT: &str = "WHIPPET_LOG_FORMAT";
pub const ENV_VALIDATE_ON_WRITE: &str = "WHIPPET_VALIDATE_ON_WRITE";
pub const ENV_PUBLISH_CHANGES: &str = "WHIPPET_PUBLISH_CHANGES";
pub const ENV_DEFAULT_TENANT: &str = "WHIPPET_DEFAULT_TENANT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending environment variable.
    pub fn var(&self) -> &'static str {
        match self {
            ConfigError::Invalid { var, .. } => var,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhippetConfig {
    pub log: LogSettings,
    pub validate_on_write: bool,
    pub publish_changes: bool,
    pub default_tenant: Option<TenantId>,
}

impl Default for WhippetConfig {
    fn default() -> Self {
        Self {
            log: LogSettings::default(),
            validate_on_write: true,
            publish_changes: true,
            default_tenant: None,
        }
    }
}

impl WhippetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let filter = get(ENV_LOG).unwrap_or(defaults.log.filter);
        let format = match get(ENV_LOG_FORMAT) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|reason| ConfigError::invalid(ENV_LOG_FORMAT, &raw, reason))?,
            None => defaults.log.format,
        };
        let log = LogSettings { filter, format };
        log.check_filter()
            .map_err(|reason| ConfigError::invalid(ENV_LOG, &log.filter, reason))?;

        let validate_on_write = match get(ENV_VALIDATE_ON_WRITE) {
            Some(raw) => parse_bool(ENV_VALIDATE_ON_WRITE, &raw)?,
            None => defaults.validate_on_write,
        };
        if !validate_on_write {
            tracing::warn!("{ENV_VALIDATE_ON_WRITE}=false; repositories will store unvalidated entities");
        }

        let publish_changes = match get(ENV_PUBLISH_CHANGES) {
            Some(raw) => parse_bool(ENV_PUBLISH_CHANGES, &raw)?,
            None => defaults.publish_changes,
        };

        let default_tenant = get(ENV_DEFAULT_TENANT)
            .map(|raw| {
                raw.trim()
                    .parse::<TenantId>()
                    .map_err(|e| ConfigError::invalid(ENV_DEFAULT_TENANT, &raw, e.to_string()))
            })
            .transpose()?;

        Ok(Self {
            log,
            validate_on_write,
            publish_changes,
            default_tenant,
        })
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(var, raw, "expected a boolean")),
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
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = WhippetConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, WhippetConfig::default());
        assert_eq!(config.log.filter, "info");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn reads_every_variable() {
        let tenant = TenantId::new();
        let tenant_str = tenant.to_string();
        let config = WhippetConfig::from_lookup(lookup(&[
            (ENV_LOG, "debug,whippet_infra=trace"),
            (ENV_LOG_FORMAT, "pretty"),
            (ENV_VALIDATE_ON_WRITE, "no"),
            (ENV_PUBLISH_CHANGES, "0"),
            (ENV_DEFAULT_TENANT, &tenant_str),
        ]))
        .unwrap();

        assert_eq!(config.log.filter, "debug,whippet_infra=trace");
        assert_eq!(config.log.format, LogFormat::Pretty);
        assert!(!config.validate_on_write);
        assert!(!config.publish_changes);
        assert_eq!(config.default_tenant, Some(tenant));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = WhippetConfig::from_lookup(lookup(&[(ENV_LOG, "  "), (ENV_DEFAULT_TENANT, "")]))
            .unwrap();
        assert_eq!(config.log.filter, "info");
        assert_eq!(config.default_tenant, None);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = WhippetConfig::from_lookup(lookup(&[(ENV_PUBLISH_CHANGES, "maybe")])).unwrap_err();
        assert_eq!(err.var(), ENV_PUBLISH_CHANGES);

        let err = WhippetConfig::from_lookup(lookup(&[(ENV_DEFAULT_TENANT, "tenant-1")])).unwrap_err();
        assert_eq!(err.var(), ENV_DEFAULT_TENANT);
        assert!(err.to_string().starts_with("WHIPPET_DEFAULT_TENANT: invalid value \"tenant-1\""));

        let err = WhippetConfig::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])).unwrap_err();
        assert_eq!(err.var(), ENV_LOG_FORMAT);

        let err = WhippetConfig::from_lookup(lookup(&[(ENV_LOG, "whippet_infra=loud")])).unwrap_err();
        assert_eq!(err.var(), ENV_LOG);
        assert!(err.to_string().starts_with("WHIPPET_LOG: invalid value \"whippet_infra=loud\""));

        let config =
            WhippetConfig::from_lookup(lookup(&[(ENV_LOG, "warn,whippet_infra=debug")])).unwrap();
        assert_eq!(config.log.filter, "warn,whippet_infra=debug");
    }
}
