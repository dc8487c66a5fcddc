//! Output sinks for discovered primes.
//!
//! The engine's only obligation to the outside world is "append a batch of
//! values, each durably recorded before the call returns, or fail". This
//! crate defines that capability as the [`PrimeSink`] trait plus the stock
//! implementations:
//!
//! - [`FileSink`]: newline-delimited decimal records in a text file
//! - [`MemorySink`]: in-process buffer for tests and embedding hosts
//! - [`NullSink`]: discards everything, for throughput measurement
//!
//! ## Ordering and durability
//!
//! Callers append primes in strictly increasing order and sinks must
//! preserve that order. A failed append may leave a prefix of the batch
//! recorded; the engine never retries or rolls back (partial emission for
//! the in-flight segment is explicitly permitted).

mod file;
mod memory;

pub use file::FileSink;
pub use memory::{MemorySink, NullSink};

use primegen_core::Result;

/// An append-only destination for discovered primes.
pub trait PrimeSink {
    /// Append a batch of values, in the order given.
    ///
    /// Every value is durably recorded before the call returns, or the
    /// call fails with a [`Sink`](primegen_core::Error::Sink) error. A
    /// failure may leave a prefix of the batch recorded.
    fn append(&mut self, primes: &[u64]) -> Result<()>;
}

impl<S: PrimeSink + ?Sized> PrimeSink for &mut S {
    fn append(&mut self, primes: &[u64]) -> Result<()> {
        (**self).append(primes)
    }
}
