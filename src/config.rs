// Configuration management with environment variables, JSON/TOML files, and validation

use std::env;
use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::encoder::Encoding;
use crate::errors::{ErrorCode, LoggerError, Result};
use crate::output::STDOUT;
use crate::sampling::SamplingConfig;
use crate::validation;

/// Top level configuration document. Only the `log` section is owned here;
/// other sections of a larger server config are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log: LogConfig,
}

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Each entry is "stdout", "stderr", or a file path to append to
    #[serde(default = "default_outputs")]
    pub outputs: Vec<String>,

    /// Enables debug level logging
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub encoding: Encoding,

    /// `None` disables sampling
    #[serde(default = "default_sampling")]
    pub sampling: Option<SamplingConfig>,
}

fn default_outputs() -> Vec<String> {
    vec![STDOUT.to_string()]
}

fn default_sampling() -> Option<SamplingConfig> {
    Some(SamplingConfig::default())
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            outputs: default_outputs(),
            debug: false,
            encoding: Encoding::default(),
            sampling: default_sampling(),
        }
    }
}

impl LogConfig {
    /// Validate all configuration values
    pub fn validate(&self) -> Result<()> {
        validation::validate_outputs(self.outputs.as_slice())?;
        if let Some(sampling) = &self.sampling {
            validation::validate_sampling(sampling)?;
        }
        Ok(())
    }
}

/// Read a boolean flag the way people write them in shells
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Load settings from a file. The format is chosen by extension:
    /// `.json` or `.toml`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| LoggerError::Config {
                message: format!("Failed to read config file: {}", e),
                code: ErrorCode::ConfigFileNotFound,
                source: Some(Box::new(e)),
            })?;

        let settings = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents)?,
            Some("toml") => Self::from_toml_str(&contents)?,
            _ => return Err(LoggerError::unsupported_format(&path.display().to_string())),
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| LoggerError::Config {
                message: format!("Failed to parse JSON config: {}", e),
                code: ErrorCode::ConfigParseFailed,
                source: Some(Box::new(e)),
            })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| LoggerError::Config {
                message: format!("Failed to parse TOML config: {}", e),
                code: ErrorCode::ConfigParseFailed,
                source: Some(Box::new(e)),
            })
    }

    /// Apply environment variables to the configuration.
    ///
    /// A variable that is set but cannot be read as its type is an error
    /// rather than being ignored.
    pub fn apply_env_vars(&mut self) -> Result<()> {
        if let Ok(outputs) = env::var("LOGKIT_LOG_OUTPUTS") {
            self.log.outputs = outputs
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(debug) = env::var("LOGKIT_LOG_DEBUG") {
            self.log.debug = parse_flag(&debug)
                .ok_or_else(|| LoggerError::invalid_env("LOGKIT_LOG_DEBUG", &debug))?;
        }
        if let Ok(encoding) = env::var("LOGKIT_LOG_ENCODING") {
            self.log.encoding = encoding
                .parse()
                .map_err(|_| LoggerError::invalid_env("LOGKIT_LOG_ENCODING", &encoding))?;
        }
        Ok(())
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<()> {
        self.log.validate()
    }

    /// Generate an example TOML configuration file
    pub fn example_toml() -> String {
        r#"# logkit configuration file

[log]
# "stdout", "stderr", or file paths to append to
outputs = ["stdout", "/var/log/server.log"]
debug = false
encoding = "json"    # json or console

[log.sampling]
initial = 100        # records per message per tick written unconditionally
thereafter = 100     # then one in this many
tick_ms = 1000
"#.to_string()
    }
}
