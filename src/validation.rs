// Input validation for logging configuration

use crate::errors::{LoggerError, Result};
use crate::sampling::SamplingConfig;

/// Validate a single output name.
///
/// Reserved stream names always pass. File paths must be non-empty and
/// free of characters no file system accepts in a path.
pub fn validate_output(output: &str) -> Result<()> {
    if output.is_empty() {
        return Err(LoggerError::invalid_output(output, "empty output name"));
    }

    if output.trim() != output {
        return Err(LoggerError::invalid_output(output, "leading or trailing whitespace"));
    }

    if output.contains('\0') || output.contains('\n') || output.contains('\r') {
        return Err(LoggerError::invalid_output(output, "control characters in path"));
    }

    Ok(())
}

/// Validate every requested output
pub fn validate_outputs<S: AsRef<str>>(outputs: &[S]) -> Result<()> {
    outputs.iter().try_for_each(|o| validate_output(o.as_ref()))
}

/// Validate a sampling policy
pub fn validate_sampling(sampling: &SamplingConfig) -> Result<()> {
    if sampling.tick_ms == 0 {
        return Err(LoggerError::invalid_sampling("tick_ms must be greater than zero"));
    }

    if sampling.tick_ms > SamplingConfig::MAX_TICK_MS {
        return Err(LoggerError::invalid_sampling("tick_ms is too large"));
    }

    Ok(())
}
