// Error types for logkit with error codes for programmatic handling

use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration errors (1000-1999)
    InvalidConfig = 1000,
    ConfigFileNotFound = 1001,
    ConfigParseFailed = 1002,
    UnsupportedConfigFormat = 1003,
    InvalidOutput = 1004,
    InvalidSampling = 1005,

    /// Logger initialisation errors (2000-2999)
    SinkOpenFailed = 2000,
    InvalidEncoder = 2001,
    GlobalAlreadySet = 2002,
}

impl ErrorCode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Main error type for logkit operations
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid configuration: {message} (code: {code})")]
    Config {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Raised while building a logger. Nothing is stored in process state
    /// when this is returned.
    #[error("Logger initialisation failed: {message} (code: {code})")]
    Init {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl LoggerError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            LoggerError::Config { code, .. } => *code,
            LoggerError::Init { code, .. } => *code,
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            LoggerError::Config { code: ErrorCode::InvalidConfig, .. } => {
                Some("Booleans accept 1/0, true/false, yes/no or on/off; encoding is json or console")
            }
            LoggerError::Config { code: ErrorCode::InvalidOutput, .. } => {
                Some("Outputs must be \"stdout\", \"stderr\" or a non-empty file path")
            }
            LoggerError::Config { code: ErrorCode::UnsupportedConfigFormat, .. } => {
                Some("Use a .json or .toml configuration file")
            }
            LoggerError::Config { code: ErrorCode::InvalidSampling, .. } => {
                Some("Sampling tick_ms must be greater than zero and fit in nanoseconds as a u64")
            }
            LoggerError::Init { code: ErrorCode::SinkOpenFailed, .. } => {
                Some("Check that the log file's directory exists and is writable")
            }
            LoggerError::Init { code: ErrorCode::GlobalAlreadySet, .. } => {
                Some("Only one logger can be installed as the global default per process")
            }
            _ => None,
        }
    }
}

// Helper functions for creating errors
impl LoggerError {
    pub fn invalid_output(output: &str, reason: &str) -> Self {
        LoggerError::Config {
            message: format!("Invalid log output {:?}: {}", output, reason),
            code: ErrorCode::InvalidOutput,
            source: None,
        }
    }

    pub fn invalid_sampling(reason: &str) -> Self {
        LoggerError::Config {
            message: format!("Invalid sampling policy: {}", reason),
            code: ErrorCode::InvalidSampling,
            source: None,
        }
    }

    pub fn invalid_env(var: &str, value: &str) -> Self {
        LoggerError::Config {
            message: format!("Invalid value {:?} for {}", value, var),
            code: ErrorCode::InvalidConfig,
            source: None,
        }
    }

    pub fn unsupported_format(path: &str) -> Self {
        LoggerError::Config {
            message: format!("Unsupported config file format: {}", path),
            code: ErrorCode::UnsupportedConfigFormat,
            source: None,
        }
    }

    pub fn sink_open_failed(path: &str, source: io::Error) -> Self {
        LoggerError::Init {
            message: format!("Failed to open log output: {}", path),
            code: ErrorCode::SinkOpenFailed,
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_encoder(reason: &str) -> Self {
        LoggerError::Init {
            message: format!("Invalid encoder configuration: {}", reason),
            code: ErrorCode::InvalidEncoder,
            source: None,
        }
    }

    pub fn global_already_set(source: tracing::dispatcher::SetGlobalDefaultError) -> Self {
        LoggerError::Init {
            message: "A global logger has already been installed".to_string(),
            code: ErrorCode::GlobalAlreadySet,
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias for logkit operations
pub type Result<T> = std::result::Result<T, LoggerError>;
