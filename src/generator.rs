//! Main entry point: engine plus file sink, wired together.

use std::path::{Path, PathBuf};

use primegen_core::{EngineStats, Error, Result, RunSummary, SegmentReport, SieveConfig};
use primegen_engine::{CancelToken, SieveEngine};
use primegen_sink::FileSink;

/// A sieve engine bound to a file sink.
///
/// This is the convenience surface for the common case: generate primes
/// into a text file, one decimal value per line. Hosts that need a
/// different sink or a lazy stream use [`SieveEngine`] directly.
///
/// # Example
///
/// ```ignore
/// let mut generator = PrimeGenerator::create("primes.txt")?;
/// let summary = generator.run_until_limit(10_000_000)?;
/// ```
#[derive(Debug)]
pub struct PrimeGenerator {
    engine: SieveEngine,
    sink: FileSink,
}

impl PrimeGenerator {
    /// Create a generator writing to `path` with default configuration.
    ///
    /// The file is created (or truncated): every run starts over from the
    /// beginning of the first partition.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).create()
    }

    /// Create a builder for custom configuration.
    pub fn builder() -> PrimeGeneratorBuilder {
        PrimeGeneratorBuilder::new()
    }

    /// Advance by exactly one partition.
    pub fn step(&mut self) -> Result<SegmentReport> {
        self.engine.step(&mut self.sink)
    }

    /// Run until the cancellation token fires. Errors propagate.
    pub fn run(&mut self) -> Result<RunSummary> {
        self.engine.run(&mut self.sink)
    }

    /// Run until every value below `bound` has been sieved.
    pub fn run_until_limit(&mut self, bound: u64) -> Result<RunSummary> {
        self.engine.run_until_limit(&mut self.sink, bound)
    }

    /// Token that stops [`run`](Self::run) between partitions.
    pub fn cancel_token(&self) -> CancelToken {
        self.engine.cancel_token()
    }

    /// Snapshot of the engine's running totals.
    pub fn stats(&self) -> EngineStats {
        self.engine.stats()
    }

    /// Path of the output file.
    pub fn path(&self) -> &Path {
        self.sink.path()
    }
}

/// Builder for [`PrimeGenerator`].
#[derive(Debug, Default)]
pub struct PrimeGeneratorBuilder {
    config: SieveConfig,
    path: Option<PathBuf>,
}

impl PrimeGeneratorBuilder {
    /// Create a builder with default configuration and no path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output file path (required).
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the partition width (default: one million).
    pub fn partition_width(mut self, width: u64) -> Self {
        self.config.partition_width = width;
        self
    }

    /// Set the ceiling on retained base primes.
    pub fn base_capacity(mut self, capacity: usize) -> Self {
        self.config.base_capacity = capacity;
        self
    }

    /// Set the largest prime value retained as sieving base.
    pub fn base_retention_ceiling(mut self, ceiling: u32) -> Self {
        self.config.base_retention_ceiling = ceiling;
        self
    }

    /// Replace the whole configuration at once.
    pub fn config(mut self, config: SieveConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration, create the output file, and build the
    /// generator.
    pub fn create(self) -> Result<PrimeGenerator> {
        let path = self
            .path
            .ok_or_else(|| Error::Config("output path is required".to_string()))?;
        let engine = SieveEngine::new(self.config)?;
        let sink = FileSink::create(&path)?;
        Ok(PrimeGenerator { engine, sink })
    }
}
