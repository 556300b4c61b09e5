//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::dashboard::DashboardSettings;
use crate::data::{Columns, UnitFilter};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input tables
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_gdp_path")]
    pub gdp_path: PathBuf,

    #[serde(default = "default_waste_path")]
    pub waste_path: PathBuf,

    #[serde(default = "UnitFilter::gdp_current_prices")]
    pub gdp_filter: UnitFilter,

    #[serde(default = "UnitFilter::waste_per_person")]
    pub waste_filter: UnitFilter,

    #[serde(default)]
    pub columns: Columns,
}

fn default_gdp_path() -> PathBuf {
    PathBuf::from("./GDP_Data.csv")
}

fn default_waste_path() -> PathBuf {
    PathBuf::from("./Waste_Data.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            gdp_path: default_gdp_path(),
            waste_path: default_waste_path(),
            gdp_filter: UnitFilter::gdp_current_prices(),
            waste_filter: UnitFilter::waste_per_person(),
            columns: Columns::default(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` for development, `json` for production
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the dashboard cannot render
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dashboard = &self.dashboard;
        let years = dashboard.years;

        if years.min > years.max {
            return Err(ConfigError::Invalid {
                field: "dashboard.years",
                reason: format!("min {} is greater than max {}", years.min, years.max),
            });
        }
        if !years.contains(dashboard.default_year) {
            return Err(ConfigError::Invalid {
                field: "dashboard.default_year",
                reason: format!(
                    "{} is outside the range {}-{}",
                    dashboard.default_year, years.min, years.max
                ),
            });
        }
        if dashboard.mark_step < 1 {
            return Err(ConfigError::Invalid {
                field: "dashboard.mark_step",
                reason: format!("must be at least 1, got {}", dashboard.mark_step),
            });
        }

        Ok(())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Candidate config files, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("wastemap").join("config.toml")),
            Some(PathBuf::from("/etc/wastemap/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    ///
    /// Runs before logging is configured, so nothing is logged here. The
    /// caller reports the returned source once its subscriber is installed.
    pub fn load_default() -> Result<(Self, ConfigSource), ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first existing file among `paths`
    ///
    /// A file that exists but cannot be read or parsed is an error rather
    /// than a reason to fall through to the next candidate.
    pub fn load_first(paths: &[PathBuf]) -> Result<(Self, ConfigSource), ConfigError> {
        match paths.iter().find(|p| p.exists()) {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                Ok((config, ConfigSource::File(path.clone())))
            }
            None => Ok((Self::from_env(), ConfigSource::Environment)),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Data overrides
        if let Some(path) = lookup("WASTEMAP_GDP_PATH") {
            self.data.gdp_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("WASTEMAP_WASTE_PATH") {
            self.data.waste_path = PathBuf::from(path);
        }

        // API overrides
        if let Some(host) = lookup("WASTEMAP_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("WASTEMAP_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("WASTEMAP_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("WASTEMAP_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No config file found; defaults plus environment overrides
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Environment => f.write_str("defaults and environment"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Wastemap Configuration
#
# Environment variables override these settings:
# - WASTEMAP_GDP_PATH
# - WASTEMAP_WASTE_PATH
# - WASTEMAP_HOST
# - WASTEMAP_PORT
# - WASTEMAP_LOG_LEVEL
# - WASTEMAP_LOG_FORMAT

[data]
# Input tables, read once at startup
gdp_path = "./GDP_Data.csv"
waste_path = "./Waste_Data.csv"

# Keep only GDP rows at current prices
gdp_filter = { column = "PRICE_BASE", accepted = "V" }

# Keep only waste rows measured per person
waste_filter = { column = "Unit of measure", accepted = "Kilogrammes per person" }

[data.columns]
region_code = "REF_AREA"
region_name = "Reference area"
period = "TIME_PERIOD"
value = "OBS_VALUE"

[api]
# Server host
host = "127.0.0.1"

# Server port
port = 8050

# Allowed CORS origins (empty allows any origin)
cors_origins = []

[dashboard]
heading = "Contrasting Global GDP and Municipal Waste"
years = { min = 1975, max = 2020 }
default_year = 1975
mark_step = 5

# Region used for the comparison chart before any map click
default_region = "United States"
default_region_label = "United States of America"

plotly_src = "https://cdn.plot.ly/plotly-2.35.2.min.js"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::from_toml(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.data.gdp_path, defaults.data.gdp_path);
        assert_eq!(config.data.gdp_filter, UnitFilter::gdp_current_prices());
        assert_eq!(config.data.waste_filter, UnitFilter::waste_per_person());
        assert_eq!(config.data.columns, Columns::default());
        assert_eq!(config.api.port, 8050);
        assert_eq!(config.dashboard, DashboardSettings::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.api.addr(), "127.0.0.1:8050");
        assert_eq!(config.dashboard.years.min, 1975);
        assert_eq!(config.dashboard.default_region, "United States");
    }

    #[test]
    fn test_partial_section() {
        let config = Config::from_toml(
            r#"
[api]
port = 9000

[dashboard]
default_year = 2000
"#,
        )
        .unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.dashboard.default_year, 2000);
        assert_eq!(config.dashboard.mark_step, 5);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[api\nport = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("WASTEMAP_PORT", "9100"),
            ("WASTEMAP_GDP_PATH", "/data/gdp.csv"),
            ("WASTEMAP_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.port, 9100);
        assert_eq!(config.data.gdp_path, PathBuf::from("/data/gdp.csv"));
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_bad_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|k| (k == "WASTEMAP_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.api.port, 8050);
    }

    #[test]
    fn test_default_year_outside_range_rejected() {
        let err = Config::from_toml("[dashboard]\ndefault_year = 2030").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "dashboard.default_year", .. }
        ));
    }

    #[test]
    fn test_inverted_year_range_rejected() {
        let err = Config::from_toml(
            r#"
[dashboard]
years = { min = 2020, max = 1975 }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "dashboard.years", .. }));
    }

    #[test]
    fn test_zero_mark_step_rejected() {
        let err = Config::from_toml("[dashboard]\nmark_step = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "dashboard.mark_step", .. }
        ));
    }

    #[test]
    fn test_validate_after_overrides() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.dashboard.default_year = 1974;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[dashboard]\ndefault_year = 2030").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_load_first_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "[api\nport=").unwrap();
        let fallback = dir.path().join("other.toml");
        std::fs::write(&fallback, "[api]\nport = 9000").unwrap();

        let err = Config::load_first(&[broken.clone(), fallback]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if *path == broken));
    }

    #[test]
    fn test_load_first_picks_first_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let present = dir.path().join("config.toml");
        std::fs::write(&present, "[dashboard]\nmark_step = 10").unwrap();

        let (config, source) = Config::load_first(&[missing, present.clone()]).unwrap();
        assert_eq!(source, ConfigSource::File(present));
        assert_eq!(config.dashboard.mark_step, 10);
    }

    #[test]
    fn test_load_first_without_files_uses_environment() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) = Config::load_first(&[dir.path().join("none.toml")]).unwrap();
        assert_eq!(source, ConfigSource::Environment);
        assert_eq!(config.dashboard, DashboardSettings::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
