use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self { path: default_dataset_path() }
    }
}

fn default_dataset_path() -> String { "data/breeds.json".to_string() }

/// Remote semantic search; disabled when `endpoint` is unset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSettings {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub cache_size: Option<u64>,
    pub cache_ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u16 { 10 }
fn default_max_limit() -> u16 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_numeric_weight")]
    pub numeric: f64,
    #[serde(default = "default_temperament_weight")]
    pub temperament: f64,
    #[serde(default = "default_categorical_weight")]
    pub categorical: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            numeric: default_numeric_weight(),
            temperament: default_temperament_weight(),
            categorical: default_categorical_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            numeric: config.numeric,
            temperament: config.temperament,
            categorical: config.categorical,
        }
    }
}

fn default_numeric_weight() -> f64 { 0.5 }
fn default_temperament_weight() -> f64 { 0.3 }
fn default_categorical_weight() -> f64 { 0.2 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PAWMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PAWMATCH__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Validate values that would silently skew scoring
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = &self.scoring.weights;
        for (name, value) in [
            ("numeric", weights.numeric),
            ("temperament", weights.temperament),
            ("categorical", weights.categorical),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Message(format!(
                    "scoring.weights.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.scoring.default_limit == 0 || self.scoring.default_limit > self.scoring.max_limit {
            return Err(ConfigError::Message(format!(
                "scoring.default_limit must be between 1 and max_limit ({}), got {}",
                self.scoring.max_limit, self.scoring.default_limit
            )));
        }

        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PAWMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.numeric, 0.5);
        assert_eq!(weights.temperament, 0.3);
        assert_eq!(weights.categorical, 0.2);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file_fills_defaults() {
        let path = std::env::temp_dir().join(format!("pawmatch-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nport = 9090\n\n[scoring.weights]\nnumeric = 0.6").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.scoring.weights.numeric, 0.6);
        assert_eq!(settings.scoring.weights.temperament, 0.3);
        assert_eq!(settings.dataset.path, "data/breeds.json");
        assert!(settings.search.endpoint.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let path = std::env::temp_dir().join(format!("pawmatch-limits-{}.toml", std::process::id()));
        std::fs::write(&path, "[scoring]\ndefault_limit = 50\nmax_limit = 20\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(settings.validate().is_err());
    }
}
