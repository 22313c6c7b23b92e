//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every section and every field is optional; missing values fall back to
//! the defaults below. Command line flags are applied on top by the binary.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::error::{CuspXymonError, Result};
use crate::evaluator::threshold::TwoTier;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub xymon: XymonConfig,
    #[serde(default)]
    pub bounds: BoundsConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Xymon server and addressing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct XymonConfig {
    /// Monitored host name used in `<host>.<test>`
    #[serde(default = "default_host")]
    pub host: String,

    /// Server address as `host` or `host:port`
    #[serde(default = "default_server")]
    pub server: String,

    /// Seconds before the server expects a fresh status (0 = no expiry)
    #[serde(default = "default_valid_secs")]
    pub valid_secs: u64,
}

/// Acceptability bounds for report values
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BoundsConfig {
    #[serde(default = "default_pre_event")]
    pub pre_event: f64,

    #[serde(default = "default_post_event")]
    pub post_event: f64,

    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f64,

    #[serde(default = "default_clock_warning")]
    pub clock_warning: f64,

    #[serde(default = "default_clock_error")]
    pub clock_error: f64,

    /// Mbytes
    #[serde(default = "default_storage_warning")]
    pub storage_warning: f64,

    /// Mbytes
    #[serde(default = "default_storage_error")]
    pub storage_error: f64,

    #[serde(default = "default_voltage_warning")]
    pub voltage_warning: f64,

    #[serde(default = "default_voltage_error")]
    pub voltage_error: f64,
}

/// Report discovery configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    /// Glob matched against report file names
    #[serde(default = "default_match_pattern")]
    pub match_pattern: String,

    /// Reports that checked in longer ago than this are skipped
    #[serde(default = "default_recent_secs")]
    pub recent_secs: u64,

    /// Remove each report after processing
    #[serde(default)]
    pub unlink: bool,

    /// Log messages instead of sending them, keep files
    #[serde(default)]
    pub dry_run: bool,
}

// Default value functions
fn default_host() -> String { "unknown".to_string() }
fn default_server() -> String { "localhost:1984".to_string() }
fn default_valid_secs() -> u64 { 2 * 60 * 60 }

fn default_pre_event() -> f64 { 40.0 }
fn default_post_event() -> f64 { 60.0 }
fn default_sampling_rate() -> f64 { 200.0 }
fn default_clock_warning() -> f64 { 50.0 }
fn default_clock_error() -> f64 { 30.0 }
fn default_storage_warning() -> f64 { 50.0 }
fn default_storage_error() -> f64 { 10.0 }
fn default_voltage_warning() -> f64 { 11.5 }
fn default_voltage_error() -> f64 { 11.0 }

fn default_match_pattern() -> String { "Report_*.xml".to_string() }
fn default_recent_secs() -> u64 { 24 * 60 * 60 }

impl Default for XymonConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            server: default_server(),
            valid_secs: default_valid_secs(),
        }
    }
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            pre_event: default_pre_event(),
            post_event: default_post_event(),
            sampling_rate: default_sampling_rate(),
            clock_warning: default_clock_warning(),
            clock_error: default_clock_error(),
            storage_warning: default_storage_warning(),
            storage_error: default_storage_error(),
            voltage_warning: default_voltage_warning(),
            voltage_error: default_voltage_error(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            match_pattern: default_match_pattern(),
            recent_secs: default_recent_secs(),
            unlink: false,
            dry_run: false,
        }
    }
}

impl XymonConfig {
    /// Status validity interval
    pub fn valid(&self) -> Duration {
        Duration::from_secs(self.valid_secs)
    }
}

impl ScanConfig {
    /// Maximum report age
    pub fn recent(&self) -> Duration {
        Duration::from_secs(self.recent_secs)
    }
}

impl BoundsConfig {
    /// Clock quality thresholds (percent)
    pub fn clock(&self) -> TwoTier {
        TwoTier::lower_is_worse(self.clock_warning, self.clock_error)
    }

    /// Battery voltage thresholds (volts)
    pub fn voltage(&self) -> TwoTier {
        TwoTier::lower_is_worse(self.voltage_warning, self.voltage_error)
    }

    /// Free storage thresholds, converted from Mbytes to kbytes
    pub fn storage(&self) -> TwoTier {
        TwoTier::lower_is_worse(self.storage_warning * 1024.0, self.storage_error * 1024.0)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cusp_xymon::config::Config;
    ///
    /// let config = Config::load("config/cusp-xymon.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// Warning/error pairs in the wrong order are allowed and only logged.
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is unusable
    pub fn validate(&self) -> Result<()> {
        if self.xymon.host.is_empty() {
            return Err(invalid("xymon host cannot be empty"));
        }

        if self.xymon.server.is_empty() {
            return Err(invalid("xymon server cannot be empty"));
        }

        if self.scan.recent_secs == 0 {
            return Err(invalid("recent_secs must be greater than 0"));
        }

        glob::Pattern::new(&self.scan.match_pattern)?;

        let b = &self.bounds;
        for (name, value) in [
            ("pre_event", b.pre_event),
            ("post_event", b.post_event),
            ("sampling_rate", b.sampling_rate),
            ("clock_warning", b.clock_warning),
            ("clock_error", b.clock_error),
            ("storage_warning", b.storage_warning),
            ("storage_error", b.storage_error),
            ("voltage_warning", b.voltage_warning),
            ("voltage_error", b.voltage_error),
        ] {
            if !value.is_finite() {
                return Err(invalid(&format!("{} must be a finite number", name)));
            }
        }

        for (name, warning, error) in [
            ("clock", b.clock_warning, b.clock_error),
            ("storage", b.storage_warning, b.storage_error),
            ("voltage", b.voltage_warning, b.voltage_error),
        ] {
            if warning < error {
                warn!("{} warning level {} is below its error level {}", name, warning, error);
            }
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> CuspXymonError {
    CuspXymonError::Config(toml::de::Error::custom(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[xymon]
host = "cusp-wel"
server = "xymon.example.net"
valid_secs = 0

[bounds]
sampling_rate = 100.0
voltage_warning = 12.0

[scan]
unlink = true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.xymon.host, "cusp-wel");
        assert_eq!(config.xymon.server, "xymon.example.net");
        assert_eq!(config.xymon.valid(), Duration::ZERO);
        assert_eq!(config.bounds.sampling_rate, 100.0);
        assert_eq!(config.bounds.voltage_warning, 12.0);
        assert_eq!(config.bounds.voltage_error, default_voltage_error());
        assert!(config.scan.unlink);
        assert!(!config.scan.dry_run);
        assert_eq!(config.scan.match_pattern, "Report_*.xml");
    }

    #[test]
    fn test_sample_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/cusp-xymon.toml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.bounds, BoundsConfig::default());
        assert_eq!(config.xymon.server, default_server());
        assert_eq!(config.scan.recent_secs, default_recent_secs());
    }

    #[test]
    fn test_load_empty_file_gives_defaults() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"").unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.bounds, BoundsConfig::default());
        assert_eq!(config.xymon.host, "unknown");
    }

    #[test]
    fn test_load_malformed_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[bounds]\nclock_warning = \"high\"\n").unwrap();
        temp_file.flush().unwrap();

        assert!(matches!(Config::load(temp_file.path()), Err(CuspXymonError::Config(_))));
    }

    #[test]
    fn test_empty_host() {
        let mut config = Config::default();
        config.xymon.host = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_server() {
        let mut config = Config::default();
        config.xymon.server = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recent_zero() {
        let mut config = Config::default();
        config.scan.recent_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_match_pattern() {
        let mut config = Config::default();
        config.scan.match_pattern = "Report_[*.xml".to_string();
        assert!(matches!(config.validate(), Err(CuspXymonError::Pattern(_))));
    }

    #[test]
    fn test_non_finite_bound() {
        let mut config = Config::default();
        config.bounds.voltage_error = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.bounds.sampling_rate = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds_are_accepted() {
        let mut config = Config::default();
        config.bounds.clock_warning = 20.0;
        config.bounds.clock_error = 40.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_storage_thresholds_in_kbytes() {
        let bounds = BoundsConfig::default();
        let storage = bounds.storage();
        assert_eq!(storage.warning, 50.0 * 1024.0);
        assert_eq!(storage.error, 10.0 * 1024.0);
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_host(), "unknown");
        assert_eq!(default_server(), "localhost:1984");
        assert_eq!(default_valid_secs(), 7200);
        assert_eq!(default_pre_event(), 40.0);
        assert_eq!(default_post_event(), 60.0);
        assert_eq!(default_sampling_rate(), 200.0);
        assert_eq!(default_clock_warning(), 50.0);
        assert_eq!(default_clock_error(), 30.0);
        assert_eq!(default_storage_warning(), 50.0);
        assert_eq!(default_storage_error(), 10.0);
        assert_eq!(default_voltage_warning(), 11.5);
        assert_eq!(default_voltage_error(), 11.0);
        assert_eq!(default_match_pattern(), "Report_*.xml");
        assert_eq!(default_recent_secs(), 86400);
    }
}
