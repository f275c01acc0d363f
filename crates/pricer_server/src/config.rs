//! Server configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use std::path::PathBuf;
use std::str::FromStr;

use pricer_core::types::Date;
use pricer_portfolio::PortfolioConfig;
use serde::Deserialize;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: text, json")]
    InvalidLogFormat(String),

    #[error("Invalid valuation date: {0}")]
    InvalidValuationDate(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error(transparent)]
    Portfolio(#[from] pricer_portfolio::ConfigError),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output format of the log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Log line format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_format: LogFormat,
    /// Fixed valuation date; today's date when unset
    pub valuation_date: Option<Date>,
    /// Portfolio configuration file (TOML)
    pub portfolio_config: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
            log_format: LogFormat::Text,
            valuation_date: None,
            portfolio_config: None,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `PRICER_SERVER_*` / `PRICER_LOG_*` environment overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("PRICER_SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = var("PRICER_SERVER_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("PRICER_SERVER_PORT={}", port)))?;
        }
        if let Some(level) = var("PRICER_LOG_LEVEL") {
            self.log_level = level.parse()?;
        }
        if let Some(format) = var("PRICER_LOG_FORMAT") {
            self.log_format = format.parse()?;
        }
        if let Some(date) = var("PRICER_VALUATION_DATE") {
            self.valuation_date = Some(parse_date(&date)?);
        }
        if let Some(path) = var("PRICER_PORTFOLIO_CONFIG") {
            self.portfolio_config = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valuation date for a request: the configured date or today.
    pub fn valuation_date(&self) -> Date {
        self.valuation_date.unwrap_or_else(Date::today)
    }

    /// Loads the portfolio configuration: the configured file (or defaults)
    /// followed by `PRICER_*` environment overrides.
    pub fn load_portfolio_config(&self) -> Result<PortfolioConfig, ConfigError> {
        let mut portfolio = match &self.portfolio_config {
            Some(path) => PortfolioConfig::from_file(path)?,
            None => PortfolioConfig::default(),
        };
        portfolio.apply_env()?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.parse()?;
        }
        if let Some(log_format) = &cli.log_format {
            self.log_format = log_format.parse()?;
        }
        if let Some(date) = &cli.valuation_date {
            self.valuation_date = Some(parse_date(date)?);
        }
        if let Some(path) = &cli.portfolio_config {
            self.portfolio_config = Some(path.clone());
        }
        Ok(())
    }
}

fn parse_date(s: &str) -> Result<Date, ConfigError> {
    Date::parse(s).map_err(|e| ConfigError::InvalidValuationDate(e.to_string()))
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Log format override
    pub log_format: Option<String>,
    /// Valuation date override (YYYY-MM-DD)
    pub valuation_date: Option<String>,
    /// Portfolio configuration file override
    pub portfolio_config: Option<PathBuf>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    config.apply_env()?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}
