//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::serial::{DEFAULT_BAUD_RATE, SUPPORTED_BAUD_RATES};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub record_log: RecordLogConfig,
}

/// Serial port configuration
///
/// The device path itself is a CLI concern, not a config one.
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

/// Chart window configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    /// Samples retained per channel
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Display frame period; one record is consumed per frame
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Frames between status log lines
    #[serde(default = "default_status_interval_frames")]
    pub status_interval_frames: u64,
}

/// Record log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RecordLogConfig {
    #[serde(default = "default_record_log_enabled")]
    pub enabled: bool,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_max_records_per_file")]
    pub max_records_per_file: usize,

    #[serde(default = "default_max_files_to_keep")]
    pub max_files_to_keep: usize,
}

// Default value functions
fn default_baud_rate() -> u32 { DEFAULT_BAUD_RATE }

fn default_capacity() -> usize { 100 }
fn default_tick_interval_ms() -> u64 { 50 }
fn default_status_interval_frames() -> u64 { 100 }

fn default_record_log_enabled() -> bool { false }
fn default_log_dir() -> String { "./logs".to_string() }
fn default_max_records_per_file() -> usize { 10000 }
fn default_max_files_to_keep() -> usize { 10 }

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: default_baud_rate(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            tick_interval_ms: default_tick_interval_ms(),
            status_interval_frames: default_status_interval_frames(),
        }
    }
}

impl Default for RecordLogConfig {
    fn default() -> Self {
        Self {
            enabled: default_record_log_enabled(),
            log_dir: default_log_dir(),
            max_records_per_file: default_max_records_per_file(),
            max_files_to_keep: default_max_files_to_keep(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            chart: ChartConfig::default(),
            record_log: RecordLogConfig::default(),
        }
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
    /// use serial_scope::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
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
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if !SUPPORTED_BAUD_RATES.contains(&self.serial.baud_rate) {
            return Err(crate::error::ScopeError::Config(toml::de::Error::custom(
                format!(
                    "baud_rate must be one of: {:?}",
                    SUPPORTED_BAUD_RATES
                ),
            )));
        }

        if self.chart.capacity == 0 {
            return Err(crate::error::ScopeError::Config(toml::de::Error::custom(
                "chart capacity must be greater than 0",
            )));
        }

        if self.chart.tick_interval_ms == 0 || self.chart.tick_interval_ms > 10000 {
            return Err(crate::error::ScopeError::Config(toml::de::Error::custom(
                "tick_interval_ms must be between 1 and 10000",
            )));
        }

        if self.chart.status_interval_frames == 0 {
            return Err(crate::error::ScopeError::Config(toml::de::Error::custom(
                "status_interval_frames must be greater than 0",
            )));
        }

        if self.record_log.enabled && self.record_log.log_dir.is_empty() {
            return Err(crate::error::ScopeError::Config(toml::de::Error::custom(
                "record_log log_dir cannot be empty when enabled",
            )));
        }

        if self.record_log.max_records_per_file == 0 {
            return Err(crate::error::ScopeError::Config(toml::de::Error::custom(
                "max_records_per_file must be greater than 0",
            )));
        }

        if self.record_log.max_files_to_keep == 0 {
            return Err(crate::error::ScopeError::Config(toml::de::Error::custom(
                "max_files_to_keep must be greater than 0",
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_match_device_expectations() {
        let config = Config::default();
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.chart.capacity, 100);
        assert_eq!(config.chart.tick_interval_ms, 50);
        assert!(!config.record_log.enabled);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.chart.capacity, default_capacity());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[chart]
capacity = 250
"#,
        )
        .unwrap();
        assert_eq!(config.chart.capacity, 250);
        assert_eq!(config.chart.tick_interval_ms, default_tick_interval_ms());
        assert_eq!(config.serial.baud_rate, default_baud_rate());
    }

    #[test]
    fn test_invalid_baud_rate() {
        let mut config = Config::default();
        config.serial.baud_rate = 420_000; // Not a telemetry-firmware rate
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_baud_rates() {
        for &baud in SUPPORTED_BAUD_RATES {
            let mut config = Config::default();
            config.serial.baud_rate = baud;
            assert!(config.validate().is_ok(), "Baud rate {} should be valid", baud);
        }
    }

    #[test]
    fn test_zero_capacity() {
        let mut config = Config::default();
        config.chart.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_interval_zero() {
        let mut config = Config::default();
        config.chart.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_interval_too_high() {
        let mut config = Config::default();
        config.chart.tick_interval_ms = 10001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_status_interval_zero() {
        let mut config = Config::default();
        config.chart.status_interval_frames = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_dir_when_enabled() {
        let mut config = Config::default();
        config.record_log.enabled = true;
        config.record_log.log_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_dir_when_disabled() {
        let mut config = Config::default();
        config.record_log.enabled = false;
        config.record_log.log_dir = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_records_per_file_zero() {
        let mut config = Config::default();
        config.record_log.max_records_per_file = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_files_to_keep_zero() {
        let mut config = Config::default();
        config.record_log.max_files_to_keep = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[serial]
baud_rate = 115200

[chart]
capacity = 200
tick_interval_ms = 20

[record_log]
enabled = true
log_dir = "/tmp/serial-scope-test-logs"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.serial.baud_rate, 115200);
        assert_eq!(config.chart.capacity, 200);
        assert_eq!(config.chart.tick_interval_ms, 20);
        assert!(config.record_log.enabled);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[chart]\ncapacity = 0\n")
            .unwrap();
        temp_file.flush().unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_baud_rate(), 9600);
        assert_eq!(default_capacity(), 100);
        assert_eq!(default_tick_interval_ms(), 50);
        assert_eq!(default_status_interval_frames(), 100);
        assert!(!default_record_log_enabled());
        assert_eq!(default_log_dir(), "./logs");
        assert_eq!(default_max_records_per_file(), 10000);
        assert_eq!(default_max_files_to_keep(), 10);
    }
}
