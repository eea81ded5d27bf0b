//! Tracing subscriber setup.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Multi-line human-readable output for local development.
    Pretty,
}

impl core::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format {other:?} (expected json or pretty)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directives, e.g. `info,whippet_infra=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LogSettings {
    /// Checks that `filter` parses as `EnvFilter` directives.
    pub fn check_filter(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.filter)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed (the call is then a no-op).
/// Settings that skipped `check_filter` and carry bad directives fall back to `info`.
pub fn init(settings: &LogSettings) -> bool {
    let filter = EnvFilter::try_new(&settings.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match settings.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .try_init()
            .is_ok(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .try_init()
            .is_ok(),
    };

    if installed {
        ::tracing::debug!(filter = %settings.filter, format = ?settings.format, "tracing initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn check_filter_rejects_bad_directives() {
        assert!(LogSettings::default().check_filter().is_ok());
        let settings = LogSettings {
            filter: "info,whippet_infra=debug".to_string(),
            format: LogFormat::Json,
        };
        assert!(settings.check_filter().is_ok());

        let settings = LogSettings {
            filter: "whippet_infra=loud".to_string(),
            format: LogFormat::Json,
        };
        assert!(settings.check_filter().is_err());
    }

    #[test]
    fn second_init_is_a_no_op() {
        let settings = LogSettings {
            filter: "not a [valid filter".to_string(),
            format: LogFormat::Pretty,
        };
        let _ = init(&settings);
        assert!(!init(&LogSettings::default()));
    }
}
