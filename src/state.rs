// src/state.rs
//
// Process-wide logger state

use std::sync::{Arc, PoisonError, RwLock};
use lazy_static::lazy_static;

use crate::config::LogConfig;
use crate::errors::Result;
use crate::logger::Logger;

/// The logger currently in use and the configuration it was built from
#[derive(Debug, Clone)]
pub struct LoggerState {
    pub logger: Arc<Logger>,
    pub config: LogConfig,
}

lazy_static! {
    static ref STATE: RwLock<Option<LoggerState>> = RwLock::new(None);
}

/// Build a logger from `config` and make it the process-wide logger.
///
/// The new logger is fully built before it replaces the previous one, so
/// readers see either the old or the new logger, never a partial one. On
/// success the new logger writes a single "logger initialized" record
/// before this returns.
///
/// Only the handle returned by [`get_logger`] is replaced. A logger already
/// installed with [`Logger::set_global_default`] stays installed, and bare
/// `tracing` macros outside [`Logger::in_scope`] keep writing to it.
pub fn setup(config: &LogConfig) -> Result<Arc<Logger>> {
    let logger = Arc::new(Logger::build(config)?);

    {
        let mut state = STATE.write().unwrap_or_else(PoisonError::into_inner);
        *state = Some(LoggerState {
            logger: Arc::clone(&logger),
            config: config.clone(),
        });
    }

    logger.announce();
    Ok(logger)
}

/// Set up the process-wide logger with the default configuration: stdout,
/// info level.
///
/// A server without logging is not allowed to run, so if this fails the
/// error is printed to stderr and the process exits.
pub fn build_default() -> Arc<Logger> {
    match setup(&LogConfig::default()) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("failed to setup logging: {}", e);
            std::process::exit(1);
        }
    }
}

/// The process-wide logger, or `None` until [`setup`] has succeeded once.
pub fn get_logger() -> Option<Arc<Logger>> {
    STATE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|state| Arc::clone(&state.logger))
}

/// The configuration the process-wide logger was built from
pub fn current_config() -> Option<LogConfig> {
    STATE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|state| state.config.clone())
}

/// Snapshot of the whole process-wide state
pub fn current_state() -> Option<LoggerState> {
    STATE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .cloned()
}
