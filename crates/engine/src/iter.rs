//! Lazy prime stream over the engine.

use std::collections::VecDeque;

use primegen_core::Result;
use primegen_sink::MemorySink;

use crate::engine::SieveEngine;

/// Infinite iterator over primes in increasing order.
///
/// Wraps a [`SieveEngine`] and yields every prime it discovers, sieving
/// one partition ahead of demand. Errors end the stream: the failing item
/// is yielded as `Err` and the iterator is fused afterwards. Firing the
/// engine's cancellation token ends the stream between partitions.
///
/// # Example
///
/// ```ignore
/// let engine = SieveEngine::new(SieveConfig::new(1000))?;
/// let first_five: Vec<u64> = engine
///     .into_primes()
///     .take(5)
///     .collect::<Result<_>>()?;
/// assert_eq!(first_five, [2, 3, 5, 7, 11]);
/// ```
#[derive(Debug)]
pub struct Primes {
    engine: SieveEngine,
    buffer: VecDeque<u64>,
    done: bool,
}

impl SieveEngine {
    /// Consume the engine and stream its primes lazily.
    pub fn into_primes(self) -> Primes {
        Primes {
            engine: self,
            buffer: VecDeque::new(),
            done: false,
        }
    }
}

impl Primes {
    /// Snapshot of the underlying engine's totals.
    ///
    /// Runs one partition ahead of the values yielded so far, since whole
    /// segments are sieved before their primes are handed out.
    pub fn stats(&self) -> primegen_core::EngineStats {
        self.engine.stats()
    }

    /// Token that ends the stream between partitions.
    pub fn cancel_token(&self) -> crate::CancelToken {
        self.engine.cancel_token()
    }
}

impl Iterator for Primes {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(p) = self.buffer.pop_front() {
                return Some(Ok(p));
            }
            if self.done || self.engine.cancel_token().is_cancelled() {
                return None;
            }
            let mut batch = MemorySink::new();
            match self.engine.step(&mut batch) {
                Ok(_) => self.buffer.extend(batch.into_values()),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
