// Burst suppression for repeated log records
//
// Records are keyed by level and message. Within each tick the first
// `initial` records for a key pass, after which only every `thereafter`th
// one does.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::errors::{LoggerError, Result};

const COUNTERS_PER_LEVEL: usize = 4096;
const LEVELS: usize = 5;

/// Sampling policy as it appears in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub initial: u64,
    pub thereafter: u64,
    pub tick_ms: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            initial: 100,
            thereafter: 100,
            tick_ms: 1000,
        }
    }
}

impl SamplingConfig {
    /// Longest tick whose length in nanoseconds still fits a `u64`
    pub const MAX_TICK_MS: u64 = u64::MAX / 1_000_000;

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[derive(Default)]
struct Counter {
    resets_at: AtomicU64,
    count: AtomicU64,
}

impl Counter {
    fn inc_check_reset(&self, now: u64, tick: u64) -> u64 {
        let resets_at = self.resets_at.load(Ordering::Acquire);
        if resets_at > now {
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }

        self.count.store(1, Ordering::Release);
        if self
            .resets_at
            .compare_exchange(resets_at, now.saturating_add(tick), Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // Another thread started the new tick first
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }
        1
    }
}

/// Per level and message counters deciding which records to keep
pub struct Sampler {
    initial: u64,
    thereafter: u64,
    tick: u64,
    epoch: Instant,
    counters: Box<[Counter]>,
}

impl fmt::Debug for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sampler")
            .field("initial", &self.initial)
            .field("thereafter", &self.thereafter)
            .field("tick_ns", &self.tick)
            .finish()
    }
}

impl Sampler {
    pub fn new(config: &SamplingConfig) -> Result<Self> {
        if config.tick_ms == 0 {
            return Err(LoggerError::invalid_encoder("sampling tick must be greater than zero"));
        }

        let tick = u64::try_from(config.tick().as_nanos())
            .map_err(|_| LoggerError::invalid_encoder("sampling tick is too long"))?;

        let counters = (0..LEVELS * COUNTERS_PER_LEVEL)
            .map(|_| Counter::default())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Ok(Self {
            initial: config.initial,
            thereafter: config.thereafter,
            tick,
            epoch: Instant::now(),
            counters,
        })
    }

    /// Count one record and decide whether it should be written.
    pub fn check(&self, level: Level, message: &str) -> bool {
        let now = self.epoch.elapsed().as_nanos() as u64;
        let n = self.counter(level, message).inc_check_reset(now, self.tick);

        if n <= self.initial {
            return true;
        }
        self.thereafter > 0 && (n - self.initial) % self.thereafter == 0
    }

    fn counter(&self, level: Level, message: &str) -> &Counter {
        let mut hasher = DefaultHasher::new();
        message.hash(&mut hasher);
        let slot = (hasher.finish() % COUNTERS_PER_LEVEL as u64) as usize;
        &self.counters[level_index(level) * COUNTERS_PER_LEVEL + slot]
    }
}

fn level_index(level: Level) -> usize {
    match level {
        Level::TRACE => 0,
        Level::DEBUG => 1,
        Level::INFO => 2,
        Level::WARN => 3,
        Level::ERROR => 4,
    }
}

/// Pulls the `message` field out of an event
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

/// Layer applying an optional [`Sampler`] to every event that passed the
/// level filter. Without a sampler every event passes.
#[derive(Debug, Default)]
pub struct SamplingLayer {
    sampler: Option<Sampler>,
}

impl SamplingLayer {
    pub fn new(config: Option<&SamplingConfig>) -> Result<Self> {
        Ok(Self {
            sampler: config.map(Sampler::new).transpose()?,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.sampler.is_some()
    }
}

impl<S: Subscriber> Layer<S> for SamplingLayer {
    fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
        let Some(sampler) = &self.sampler else {
            return true;
        };

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        sampler.check(*event.metadata().level(), &visitor.message)
    }
}
