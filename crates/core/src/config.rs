//! Engine configuration.
//!
//! [`SieveConfig`] is the complete configuration surface of the engine:
//! partition width, base-prime storage ceiling, and the retention ceiling
//! separating primes kept as sieving base from primes that are only
//! emitted and counted.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default partition width: one million values per segment.
pub const DEFAULT_PARTITION_WIDTH: u64 = 1_000_000;

/// Default ceiling on retained base primes.
///
/// Roughly the number of primes below 2 billion. Runs hit the cost of the
/// per-segment flag arrays long before a base this large is accumulated.
pub const DEFAULT_BASE_CAPACITY: usize = 100_000_000;

/// Complete configuration surface of the sieve engine.
///
/// Validated once at engine construction; an engine never observes an
/// invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SieveConfig {
    /// Width of every partition, including the first. Must be at least 2
    /// so the initial sieve covers the smallest prime.
    pub partition_width: u64,

    /// Maximum number of base primes retained as the sieving base.
    /// Exceeding it is a [`StorageExhausted`](Error::StorageExhausted)
    /// failure rather than a silent reallocation.
    pub base_capacity: usize,

    /// Largest prime value retained in the sieving base.
    ///
    /// Primes above this are emitted and counted but never used as sieving
    /// factors. Base primes are stored narrow (`u32`) and widened to `u64`
    /// before any `p*p` arithmetic, so the full `u32` range is safe and no
    /// empirical margin below `u32::MAX` is needed.
    pub base_retention_ceiling: u32,
}

impl Default for SieveConfig {
    fn default() -> Self {
        SieveConfig {
            partition_width: DEFAULT_PARTITION_WIDTH,
            base_capacity: DEFAULT_BASE_CAPACITY,
            base_retention_ceiling: u32::MAX,
        }
    }
}

impl SieveConfig {
    /// Create a configuration with the given partition width and default
    /// storage settings.
    pub fn new(partition_width: u64) -> Self {
        SieveConfig {
            partition_width,
            ..Default::default()
        }
    }

    /// Validate the configuration.
    ///
    /// Rejects a partition width below 2 (the first partition must cover
    /// the smallest prime) and a zero base capacity (the base would not be
    /// able to hold the prime 2, making every later segment unsievable).
    pub fn validate(&self) -> Result<()> {
        if self.partition_width < 2 {
            return Err(Error::Config(format!(
                "partition width must be at least 2, got {}",
                self.partition_width
            )));
        }
        if self.base_capacity == 0 {
            return Err(Error::Config(
                "base capacity must be positive".to_string(),
            ));
        }
        if self.base_retention_ceiling < 2 {
            return Err(Error::Config(format!(
                "base retention ceiling must be at least 2, got {}",
                self.base_retention_ceiling
            )));
        }
        Ok(())
    }
}
