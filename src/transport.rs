// RPC transport switches owned by the server, not by the logger

use std::sync::atomic::{AtomicBool, Ordering};

static TRACING: AtomicBool = AtomicBool::new(false);

/// Turn verbose request tracing in the RPC transport on or off
pub fn set_tracing(enabled: bool) {
    TRACING.store(enabled, Ordering::SeqCst);
}

pub fn tracing_enabled() -> bool {
    TRACING.load(Ordering::SeqCst)
}
