// Logger construction
//
// Turns a LogConfig into resolved settings and a live tracing dispatcher.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, Dispatch};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Layer, Layered, SubscriberExt};
use tracing_subscriber::Registry;

use crate::config::LogConfig;
use crate::encoder::{Encoding, ProductionJson};
use crate::errors::{LoggerError, Result};
use crate::output::resolve_outputs;
use crate::sampling::{SamplingConfig, SamplingLayer};
use crate::sink::SinkSet;

type Sampled = Layered<SamplingLayer, Layered<LevelFilter, Registry>>;

/// Minimum level a logger writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    pub fn from_debug(debug: bool) -> Self {
        if debug {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }

    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => f.write_str("debug"),
            LogLevel::Info => f.write_str("info"),
        }
    }
}

/// Everything a logger was built from, after normalisation.
///
/// Serialises to a stable form: identical configurations produce identical
/// output regardless of the order outputs were listed in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggerSettings {
    pub level: LogLevel,
    pub development: bool,
    pub encoding: Encoding,
    pub sampling: Option<SamplingConfig>,
    pub outputs: Vec<String>,
    /// Always the same as `outputs`: every sink receives every severity
    pub error_outputs: Vec<String>,
}

impl LoggerSettings {
    pub fn resolve(config: &LogConfig) -> Self {
        let outputs = resolve_outputs(config.outputs.as_slice());

        Self {
            level: LogLevel::from_debug(config.debug),
            development: false,
            encoding: config.encoding,
            sampling: config.sampling,
            error_outputs: outputs.clone(),
            outputs,
        }
    }
}

/// A live logger.
///
/// Records reach it either by running code inside [`Logger::in_scope`] or,
/// once [`Logger::set_global_default`] succeeded, from anywhere in the
/// process.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    settings: LoggerSettings,
    sinks: SinkSet,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("settings", &self.settings)
            .field("sinks", &self.sinks.sinks().len())
            .finish()
    }
}

impl Logger {
    /// Build a logger without touching process-wide state.
    ///
    /// Every output is opened before anything is returned; one output that
    /// cannot be opened fails the whole build.
    pub fn build(config: &LogConfig) -> Result<Self> {
        let settings = LoggerSettings::resolve(config);
        let sampling = SamplingLayer::new(settings.sampling.as_ref())?;
        let sinks = SinkSet::open(settings.outputs.as_slice())?;

        let output: Box<dyn Layer<Sampled> + Send + Sync> = match settings.encoding {
            Encoding::Json => Box::new(
                tracing_subscriber::fmt::layer()
                    .event_format(ProductionJson)
                    .with_writer(sinks.clone()),
            ),
            Encoding::Console => Box::new(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(sinks.clone()),
            ),
        };

        let subscriber = Registry::default()
            .with(settings.level.as_filter())
            .with(sampling)
            .with(output);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            settings,
            sinks,
        })
    }

    pub fn settings(&self) -> &LoggerSettings {
        &self.settings
    }

    /// Run `f` with this logger as the current thread's default.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Install this logger for the whole process. Only the first install in
    /// a process succeeds.
    pub fn set_global_default(&self) -> Result<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(LoggerError::global_already_set)
    }

    /// Write the startup record that shows the logger works.
    pub(crate) fn announce(&self) {
        self.in_scope(|| {
            info!(
                level = %self.settings.level,
                outputs = ?self.settings.outputs,
                "logger initialized"
            );
        });
    }
}
