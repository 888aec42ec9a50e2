// Server startup sequence for the logging stack

use std::sync::Arc;
use tracing::debug;

use crate::config::Settings;
use crate::errors::Result;
use crate::logger::Logger;
use crate::state;
use crate::transport;

/// Configure logging and the transport from one reading of the settings.
///
/// The debug flag is read here once and applied to each subsystem
/// separately; the logger itself never touches transport state.
pub fn init(settings: &Settings) -> Result<Arc<Logger>> {
    let debug_enabled = settings.log.debug;

    let logger = state::setup(&settings.log)?;
    transport::set_tracing(debug_enabled);

    logger.in_scope(|| debug!(rpc_tracing = debug_enabled, "transport configured"));
    Ok(logger)
}
