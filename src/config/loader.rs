//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section and
//! field has a default, so an empty file (or none at all) reproduces the
//! standard NIFTY 50 run.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::{CliApp, YahooConfig};
use crate::analysis::{
    AnalysisParams, DEFAULT_REGIME_THRESHOLD, DEFAULT_TRADING_DAYS_PER_YEAR,
    DEFAULT_TRAILING_RETURN_WINDOW, DEFAULT_VOLATILITY_WINDOW,
};

/// Default report file name
pub const DEFAULT_REPORT_PATH: &str = "Output_Summary.txt";

/// Main configuration structure matching config.example.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub instrument: InstrumentSection,
    pub analysis: AnalysisSection,
    pub provider: ProviderSection,
    pub output: OutputSection,
    pub logging: LoggingSection,
}

/// Instrument configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InstrumentSection {
    /// Provider symbol (Yahoo: "^NSEI")
    pub symbol: String,
    /// Display name used in the report header
    pub name: String,
}

impl Default for InstrumentSection {
    fn default() -> Self {
        Self {
            symbol: "^NSEI".to_string(),
            name: "NIFTY 50".to_string(),
        }
    }
}

/// Analysis parameters section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Drawdown/rally fraction that flips the regime (0.20 = 20%)
    pub regime_threshold: f64,
    /// Rolling volatility window (trading days)
    pub volatility_window: usize,
    /// Trading days per year for annualization
    pub trading_days_per_year: usize,
    /// Trailing return window (trading days)
    pub trailing_return_window: usize,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            regime_threshold: DEFAULT_REGIME_THRESHOLD,
            volatility_window: DEFAULT_VOLATILITY_WINDOW,
            trading_days_per_year: DEFAULT_TRADING_DAYS_PER_YEAR,
            trailing_return_window: DEFAULT_TRAILING_RETURN_WINDOW,
        }
    }
}

/// Where the history comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Yahoo,
    Csv,
}

/// History provider section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    pub kind: ProviderKind,
    /// Yahoo chart API base URL
    pub api_url: String,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
    /// CSV file path (required when kind = "csv")
    pub csv_path: Option<String>,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Yahoo,
            api_url: YahooConfig::default().api_base_url,
            timeout_secs: 30,
            csv_path: None,
        }
    }
}

impl ProviderSection {
    /// CSV path with `~` expanded
    pub fn get_csv_path(&self) -> Option<PathBuf> {
        self.csv_path
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
    }

    pub fn yahoo_config(&self) -> YahooConfig {
        YahooConfig {
            api_base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..YahooConfig::default()
        }
    }
}

/// Report output section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Report file, overwritten each run
    pub report_path: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            report_path: DEFAULT_REPORT_PATH.to_string(),
        }
    }
}

impl OutputSection {
    /// Report path with `~` expanded
    pub fn get_report_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.report_path).as_ref())
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instrument.symbol.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "symbol cannot be empty".to_string(),
            ));
        }

        AnalysisParams::from(self)
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        match self.provider.kind {
            ProviderKind::Yahoo => {
                if self.provider.api_url.is_empty() {
                    return Err(ConfigError::ValidationError(
                        "api_url cannot be empty".to_string(),
                    ));
                }
                if self.provider.timeout_secs == 0 {
                    return Err(ConfigError::ValidationError(
                        "timeout_secs must be > 0".to_string(),
                    ));
                }
            }
            ProviderKind::Csv => {
                if self.provider.csv_path.as_deref().map_or(true, str::is_empty) {
                    return Err(ConfigError::ValidationError(
                        "csv_path is required when provider kind is \"csv\"".to_string(),
                    ));
                }
            }
        }

        if self.output.report_path.is_empty() {
            return Err(ConfigError::ValidationError(
                "report_path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply command-line overrides; flags take precedence over the file
    ///
    /// `--csv` switches the provider to CSV on that file.
    pub fn apply_cli(&mut self, app: &CliApp) {
        if let Some(csv) = &app.csv {
            self.provider.kind = ProviderKind::Csv;
            self.provider.csv_path = Some(csv.to_string_lossy().into_owned());
        }
        if let Some(output) = &app.output {
            self.output.report_path = output.to_string_lossy().into_owned();
        }
        if let Some(threshold) = app.threshold {
            self.analysis.regime_threshold = threshold;
        }
    }
}

impl From<&Config> for AnalysisParams {
    fn from(config: &Config) -> Self {
        AnalysisParams {
            regime_threshold: config.analysis.regime_threshold,
            volatility_window: config.analysis.volatility_window,
            trading_days_per_year: config.analysis.trading_days_per_year,
            trailing_return_window: config.analysis.trailing_return_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[instrument]
symbol = "^NSEI"
name = "NIFTY 50"

[analysis]
regime_threshold = 0.25
volatility_window = 126
trading_days_per_year = 252
trailing_return_window = 756

[provider]
kind = "yahoo"
api_url = "https://query2.finance.yahoo.com"
timeout_secs = 15

[output]
report_path = "reports/nifty.txt"

[logging]
level = "info"
"#
        .to_string()
    }

    fn load_str(content: &str) -> Result<Config, ConfigError> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        load_config(file.path())
    }

    #[test]
    fn test_load_valid_config() {
        let config = load_str(&create_valid_config()).unwrap();

        assert_eq!(config.instrument.symbol, "^NSEI");
        assert_eq!(config.analysis.regime_threshold, 0.25);
        assert_eq!(config.analysis.volatility_window, 126);
        assert_eq!(config.provider.kind, ProviderKind::Yahoo);
        assert_eq!(config.provider.timeout_secs, 15);
        assert_eq!(config.output.report_path, "reports/nifty.txt");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = load_str("").unwrap();

        assert_eq!(config.instrument.symbol, "^NSEI");
        assert_eq!(config.instrument.name, "NIFTY 50");
        assert_eq!(config.analysis.regime_threshold, 0.20);
        assert_eq!(config.analysis.volatility_window, 252);
        assert_eq!(config.analysis.trailing_return_window, 1260);
        assert_eq!(config.provider.api_url, "https://query1.finance.yahoo.com");
        assert_eq!(config.output.report_path, DEFAULT_REPORT_PATH);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = load_str("[analysis]\nregime_threshold = 0.1\n").unwrap();
        assert_eq!(config.analysis.regime_threshold, 0.1);
        assert_eq!(config.analysis.volatility_window, 252);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/config.toml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let result = load_str("[analysis\nregime_threshold = ");
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_invalid_threshold() {
        for bad in ["0.0", "1.0", "-0.2", "1.5"] {
            let result = load_str(&format!("[analysis]\nregime_threshold = {}\n", bad));
            assert!(
                matches!(result, Err(ConfigError::ValidationError(_))),
                "threshold {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_invalid_window() {
        let result = load_str("[analysis]\nvolatility_window = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_csv_provider_requires_path() {
        let result = load_str("[provider]\nkind = \"csv\"\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(ref m)) if m.contains("csv_path")));

        let config = load_str("[provider]\nkind = \"csv\"\ncsv_path = \"data/nifty.csv\"\n").unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Csv);
        assert_eq!(config.provider.get_csv_path(), Some(PathBuf::from("data/nifty.csv")));
    }

    #[test]
    fn test_unknown_provider_kind() {
        let result = load_str("[provider]\nkind = \"bloomberg\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_empty_symbol_rejected() {
        let result = load_str("[instrument]\nsymbol = \"\"\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_config_to_analysis_params() {
        let config = load_str(&create_valid_config()).unwrap();
        let params = AnalysisParams::from(&config);

        assert_eq!(params.regime_threshold, 0.25);
        assert_eq!(params.volatility_window, 126);
        assert_eq!(params.trading_days_per_year, 252);
        assert_eq!(params.trailing_return_window, 756);
        assert_eq!(params.trailing_return_years(), 3);
    }

    #[test]
    fn test_yahoo_config_from_provider_section() {
        let config = load_str(&create_valid_config()).unwrap();
        let yahoo = config.provider.yahoo_config();
        assert_eq!(yahoo.api_base_url, "https://query2.finance.yahoo.com");
        assert_eq!(yahoo.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config = load_str(include_str!("../../config.example.toml")).unwrap();
        let defaults = Config::default();

        assert_eq!(config.instrument.symbol, defaults.instrument.symbol);
        assert_eq!(config.analysis.regime_threshold, defaults.analysis.regime_threshold);
        assert_eq!(
            config.analysis.trailing_return_window,
            defaults.analysis.trailing_return_window
        );
        assert_eq!(config.provider.api_url, defaults.provider.api_url);
        assert_eq!(config.output.report_path, defaults.output.report_path);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_trailing_window_shorter_than_a_year() {
        let result = load_str("[analysis]\ntrailing_return_window = 100\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(ref m)) if m.contains("shorter than one")));
    }

    #[test]
    fn test_cli_flags_override_file() {
        use clap::Parser;

        let mut config = load_str(&create_valid_config()).unwrap();
        let app = CliApp::try_parse_from([
            "nifty-regimes",
            "--csv",
            "data/nifty.csv",
            "--output",
            "out/summary.txt",
            "--threshold",
            "0.15",
        ])
        .unwrap();

        config.apply_cli(&app);

        assert_eq!(config.provider.kind, ProviderKind::Csv);
        assert_eq!(config.provider.get_csv_path(), Some(PathBuf::from("data/nifty.csv")));
        assert_eq!(config.output.report_path, "out/summary.txt");
        assert_eq!(config.analysis.regime_threshold, 0.15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_cli_flags_keep_file_values() {
        use clap::Parser;

        let mut config = load_str(&create_valid_config()).unwrap();
        config.apply_cli(&CliApp::try_parse_from(["nifty-regimes"]).unwrap());

        assert_eq!(config.provider.kind, ProviderKind::Yahoo);
        assert!(config.provider.csv_path.is_none());
        assert_eq!(config.output.report_path, "reports/nifty.txt");
        assert_eq!(config.analysis.regime_threshold, 0.25);
    }

    #[test]
    fn test_report_path_tilde_expansion() {
        let output = OutputSection {
            report_path: "~/Output_Summary.txt".to_string(),
        };
        let path = output.get_report_path();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("Output_Summary.txt"));
    }
}
