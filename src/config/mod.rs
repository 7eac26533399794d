//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tuning for the Perron-Frobenius strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerronFrobeniusConfig {
    /// Multiplier applied to eigenvector components before truncation
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Real parts closer than this count as the same eigenvalue
    #[serde(default = "default_eigen_tolerance")]
    pub eigen_tolerance: f64,

    /// Iteration cap for the Schur decomposition
    #[serde(default = "default_max_eigen_iterations")]
    pub max_eigen_iterations: usize,

    /// Fail instead of warning when the dominant eigenvalue is not unique
    #[serde(default)]
    pub reject_degenerate: bool,
}

fn default_scale() -> u32 {
    1000
}

fn default_eigen_tolerance() -> f64 {
    1e-9
}

fn default_max_eigen_iterations() -> usize {
    10_000
}

impl Default for PerronFrobeniusConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            eigen_tolerance: default_eigen_tolerance(),
            max_eigen_iterations: default_max_eigen_iterations(),
            reject_degenerate: false,
        }
    }
}

/// Ranking engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Strategy used when neither the caller nor the league names one
    #[serde(default = "default_strategy")]
    pub default_strategy: String,

    #[serde(default)]
    pub perron_frobenius: PerronFrobeniusConfig,
}

fn default_strategy() -> String {
    "regular".to_string()
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_strategy: default_strategy(),
            perron_frobenius: PerronFrobeniusConfig::default(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub ranking: RankingConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            ranking: RankingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ranking.default_strategy.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Default strategy must not be empty".to_string(),
            ));
        }

        let pf = &self.ranking.perron_frobenius;
        if pf.scale == 0 {
            return Err(ConfigError::ValidationError(
                "Perron-Frobenius scale must be greater than 0".to_string(),
            ));
        }

        if !pf.eigen_tolerance.is_finite() || pf.eigen_tolerance <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Eigen tolerance must be a positive number".to_string(),
            ));
        }

        if pf.max_eigen_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "Max eigen iterations must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.ranking.default_strategy, "regular");
        assert_eq!(config.ranking.perron_frobenius.scale, 1000);
        assert!(!config.ranking.perron_frobenius.reject_degenerate);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_strategy() {
        let mut config = AppConfig::default();
        config.ranking.default_strategy = "  ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_scale() {
        let mut config = AppConfig::default();
        config.ranking.perron_frobenius.scale = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_tolerance() {
        let mut config = AppConfig::default();
        config.ranking.perron_frobenius.eigen_tolerance = f64::NAN;
        assert!(config.validate().is_err());

        config.ranking.perron_frobenius.eigen_tolerance = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_iterations() {
        let mut config = AppConfig::default();
        config.ranking.perron_frobenius.max_eigen_iterations = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            log_level = "debug"

            [ranking]
            default_strategy = "perron_frobenius"

            [ranking.perron_frobenius]
            reject_degenerate = true
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.ranking.default_strategy, "perron_frobenius");
        assert!(config.ranking.perron_frobenius.reject_degenerate);
        assert_eq!(config.ranking.perron_frobenius.scale, 1000);
    }

    #[test]
    fn test_from_file_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league-ranker.toml");

        let config = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(config.ranking.default_strategy, "regular");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[ranking.perron_frobenius]\nscale = 0").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(
            config.ranking.perron_frobenius.eigen_tolerance,
            parsed.ranking.perron_frobenius.eigen_tolerance
        );
    }
}
