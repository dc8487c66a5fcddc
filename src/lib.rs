//! # Primegen
//!
//! Unbounded prime generation with a segmented sieve and durable,
//! append-only output.
//!
//! The engine sieves one fixed-width partition at a time: a classic sieve
//! of Eratosthenes covers the first partition, then every later partition
//! is sieved against the primes already discovered, so memory per
//! iteration stays constant no matter how far the run has advanced.
//!
//! ## Quick Start
//!
//! ```ignore
//! use primegen::prelude::*;
//!
//! // Stream primes to a file, stopping at a boundary
//! let mut generator = PrimeGenerator::create("primes.txt")?;
//! let summary = generator.run_until_limit(10_000_000)?;
//! println!("found {} primes", summary.stats.primes_found);
//!
//! // Or consume them lazily in-process
//! let engine = SieveEngine::new(SieveConfig::new(1_000_000))?;
//! for prime in engine.into_primes().take(100) {
//!     println!("{}", prime?);
//! }
//! ```
//!
//! ## Stopping an unbounded run
//!
//! [`PrimeGenerator::run`] loops forever by design. Hand its
//! [`CancelToken`] to another thread (a signal handler, a timer) and fire
//! it to stop cleanly between partitions:
//!
//! ```ignore
//! let token = generator.cancel_token();
//! ctrl_c_handler(move || token.cancel());
//! let summary = generator.run()?;
//! ```

#![warn(missing_docs)]

mod generator;

pub mod prelude;

// Re-export main entry points
pub use generator::{PrimeGenerator, PrimeGeneratorBuilder};

// Re-export the engine and its collaborators
pub use primegen_engine::{CancelToken, PrimeStore, Primes, SieveEngine};

// Re-export sinks
pub use primegen_sink::{FileSink, MemorySink, NullSink, PrimeSink};

// Re-export core types
pub use primegen_core::{
    EngineStats, Error, Result, RunSummary, Segment, SegmentReport, SieveConfig,
};
