// Library interface for logkit
// Structured logger setup for server processes

pub mod config;
pub mod encoder;
pub mod errors;
pub mod logger;
pub mod output;
pub mod sampling;
pub mod sink;
pub mod startup;
pub mod state;
pub mod transport;
pub mod validation;

pub use config::{LogConfig, Settings};
pub use errors::{ErrorCode, LoggerError, Result};
pub use logger::{LogLevel, Logger, LoggerSettings};
pub use state::{build_default, get_logger, setup};
