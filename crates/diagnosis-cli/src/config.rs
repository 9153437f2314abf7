use std::env;
use std::path::PathBuf;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Settings read from `.env` and the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    /// Where `FileStore` keeps the last diagnosis record
    pub store_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = var("DIAG_LOG_LEVEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let store_dir = var("DIAG_STORE_DIR")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            telemetry: TelemetryConfig { log_level },
            store_dir,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.telemetry.log_level, "warn");
        assert_eq!(config.store_dir, None);
    }

    #[test]
    fn test_reads_overrides() {
        let config = config_from(&[
            ("DIAG_LOG_LEVEL", "diagnosis_core=debug"),
            ("DIAG_STORE_DIR", " /tmp/diag "),
        ]);
        assert_eq!(config.telemetry.log_level, "diagnosis_core=debug");
        assert_eq!(config.store_dir, Some(PathBuf::from("/tmp/diag")));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config_from(&[("DIAG_LOG_LEVEL", ""), ("DIAG_STORE_DIR", "  ")]);
        assert_eq!(config.telemetry.log_level, "warn");
        assert_eq!(config.store_dir, None);
    }
}
