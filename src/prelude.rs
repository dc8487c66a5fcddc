//! Convenience re-exports for typical usage.
//!
//! ```ignore
//! use primegen::prelude::*;
//! ```

pub use crate::{
    CancelToken, EngineStats, Error, FileSink, MemorySink, NullSink, PrimeGenerator,
    PrimeGeneratorBuilder, PrimeSink, Primes, Result, RunSummary, Segment, SegmentReport,
    SieveConfig, SieveEngine,
};
