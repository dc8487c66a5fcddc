//! Driver state machine: bootstrap once, extend forever.

use primegen_core::{
    EngineStats, Error, Result, RunSummary, Segment, SegmentReport, SieveConfig,
};
use primegen_sink::PrimeSink;
use tracing::{debug, info};

use crate::base::first_partition;
use crate::cancel::CancelToken;
use crate::segment::sieve_segment;
use crate::store::PrimeStore;

/// Driver phase. Bootstrapping transitions to Extending unconditionally
/// after the first partition; Extending has no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Bootstrapping,
    Extending,
}

/// The segmented sieve engine.
///
/// Owns all mutable state of a run: configuration, the store of retained
/// base primes, the running limit, the largest prime emitted, and the
/// driver phase. Engines are independent; construct a fresh one to start
/// over (there is no resume across instances or restarts).
///
/// # Example
///
/// ```ignore
/// let mut engine = SieveEngine::new(SieveConfig::new(1_000_000))?;
/// let mut sink = FileSink::create("primes.txt")?;
/// let summary = engine.run(&mut sink)?; // loops until cancelled
/// ```
#[derive(Debug)]
pub struct SieveEngine {
    config: SieveConfig,
    store: PrimeStore,
    limit: u64,
    max_prime: u64,
    segments_sieved: u64,
    phase: Phase,
    cancel: CancelToken,
}

impl SieveEngine {
    /// Create an engine with the given configuration.
    ///
    /// Fails with a `Config` error if the configuration is invalid; a
    /// constructed engine never observes one.
    pub fn new(config: SieveConfig) -> Result<Self> {
        config.validate()?;
        let store = PrimeStore::new(config.base_capacity, config.base_retention_ceiling);
        Ok(SieveEngine {
            config,
            store,
            limit: 0,
            max_prime: 0,
            segments_sieved: 0,
            phase: Phase::Bootstrapping,
            cancel: CancelToken::new(),
        })
    }

    /// A token that stops [`run`](Self::run) between segments when fired.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Snapshot of the running totals.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            primes_found: self.store.total(),
            limit: self.limit,
            max_prime: self.max_prime,
            segments_sieved: self.segments_sieved,
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// Advance by exactly one partition.
    ///
    /// The first call sieves the initial partition `[0, width]` with the
    /// classic sieve; every later call sieves `[limit+1, limit+width]`
    /// against the retained base. Discovered primes are appended to the
    /// store and the sink in increasing order before the call returns.
    pub fn step<S: PrimeSink + ?Sized>(&mut self, sink: &mut S) -> Result<SegmentReport> {
        match self.phase {
            Phase::Bootstrapping => self.bootstrap(sink),
            Phase::Extending => self.extend(sink),
        }
    }

    /// Drive the loop until the cancellation token fires.
    ///
    /// Errors propagate immediately; the summary is only produced on a
    /// clean cancellation, observed between segments.
    pub fn run<S: PrimeSink + ?Sized>(&mut self, sink: &mut S) -> Result<RunSummary> {
        while !self.cancel.is_cancelled() {
            self.step(sink)?;
        }
        let stats = self.stats();
        info!(
            primes_found = stats.primes_found,
            limit = stats.limit,
            "run cancelled"
        );
        Ok(RunSummary {
            stats,
            cancelled: true,
        })
    }

    /// Drive the loop until the running limit reaches `bound` (or the
    /// token fires first).
    ///
    /// The limit advances in whole partitions, so the final limit is the
    /// first partition boundary at or above `bound`.
    pub fn run_until_limit<S: PrimeSink + ?Sized>(
        &mut self,
        sink: &mut S,
        bound: u64,
    ) -> Result<RunSummary> {
        let mut cancelled = true;
        while !self.cancel.is_cancelled() {
            if self.limit >= bound {
                cancelled = false;
                break;
            }
            self.step(sink)?;
        }
        Ok(RunSummary {
            stats: self.stats(),
            cancelled,
        })
    }

    fn bootstrap<S: PrimeSink + ?Sized>(&mut self, sink: &mut S) -> Result<SegmentReport> {
        let width = self.config.partition_width;
        let primes = first_partition(width)?;
        self.emit(&primes, sink)?;
        self.limit = width;
        self.segments_sieved += 1;
        self.phase = Phase::Extending;
        debug!(limit = self.limit, primes = primes.len(), "initial partition sieved");
        Ok(SegmentReport {
            segment: Segment::new(0, width),
            primes_emitted: primes.len(),
        })
    }

    fn extend<S: PrimeSink + ?Sized>(&mut self, sink: &mut S) -> Result<SegmentReport> {
        let lo = self.limit + 1;
        let hi = self
            .limit
            .checked_add(self.config.partition_width)
            .ok_or_else(|| Error::IndexComputation {
                lo: self.limit,
                hi: self.limit,
                detail: "running limit would exceed the representable range".to_string(),
            })?;

        let primes = sieve_segment(lo, hi, self.store.base())?;
        self.emit(&primes, sink)?;
        self.limit = hi;
        self.segments_sieved += 1;
        debug!(lo, hi, primes = primes.len(), "segment sieved");
        Ok(SegmentReport {
            segment: Segment::new(lo, hi),
            primes_emitted: primes.len(),
        })
    }

    /// Single emission path for the initial partition and every segment:
    /// store first, then sink, then the running maximum.
    fn emit<S: PrimeSink + ?Sized>(&mut self, primes: &[u64], sink: &mut S) -> Result<()> {
        for &p in primes {
            self.store.record(p)?;
        }
        sink.append(primes)?;
        if let Some(&largest) = primes.last() {
            self.max_prime = largest;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primegen_sink::MemorySink;

    fn is_prime(n: u64) -> bool {
        if n < 2 {
            return false;
        }
        let mut d = 2;
        while d * d <= n {
            if n % d == 0 {
                return false;
            }
            d += 1;
        }
        true
    }

    fn engine(width: u64) -> SieveEngine {
        SieveEngine::new(SieveConfig::new(width)).unwrap()
    }

    #[test]
    fn width_ten_partition_sequence() {
        let mut engine = engine(10);
        let mut sink = MemorySink::new();

        let first = engine.step(&mut sink).unwrap();
        assert_eq!(first.segment, Segment::new(0, 10));
        assert_eq!(sink.values(), &[2, 3, 5, 7]);

        let second = engine.step(&mut sink).unwrap();
        assert_eq!(second.segment, Segment::new(11, 20));
        assert_eq!(&sink.values()[4..], &[11, 13, 17, 19]);

        let third = engine.step(&mut sink).unwrap();
        assert_eq!(third.segment, Segment::new(21, 30));
        assert_eq!(&sink.values()[8..], &[23, 29]);
    }

    #[test]
    fn stats_track_progress() {
        let mut engine = engine(10);
        let mut sink = MemorySink::new();
        for _ in 0..3 {
            engine.step(&mut sink).unwrap();
        }

        let stats = engine.stats();
        assert_eq!(stats.limit, 30);
        assert_eq!(stats.max_prime, 29);
        assert_eq!(stats.primes_found, 10);
        assert_eq!(stats.segments_sieved, 3);
    }

    #[test]
    fn emissions_match_trial_division() {
        let mut engine = engine(100);
        let mut sink = MemorySink::new();
        engine.run_until_limit(&mut sink, 1000).unwrap();

        let expected: Vec<u64> = (2..=1000).filter(|&n| is_prime(n)).collect();
        assert_eq!(sink.values(), expected.as_slice());
    }

    #[test]
    fn emissions_are_strictly_increasing_across_segments() {
        let mut engine = engine(50);
        let mut sink = MemorySink::new();
        engine.run_until_limit(&mut sink, 600).unwrap();

        assert!(sink.values().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn run_until_limit_stops_at_partition_boundary() {
        let mut engine = engine(10);
        let mut sink = MemorySink::new();
        let summary = engine.run_until_limit(&mut sink, 25).unwrap();

        assert_eq!(summary.stats.limit, 30);
        assert!(!summary.cancelled);
    }

    #[test]
    fn pre_fired_token_stops_run_immediately() {
        let mut engine = engine(10);
        engine.cancel_token().cancel();

        let mut sink = MemorySink::new();
        let summary = engine.run(&mut sink).unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.stats.segments_sieved, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn store_capacity_overflow_aborts_the_run() {
        let config = SieveConfig {
            partition_width: 10,
            base_capacity: 5,
            ..Default::default()
        };
        let mut engine = SieveEngine::new(config).unwrap();
        let mut sink = MemorySink::new();

        // First partition retains 4 primes; the second needs 4 more.
        engine.step(&mut sink).unwrap();
        let err = engine.step(&mut sink).unwrap_err();
        assert!(err.is_storage_exhausted());
    }

    #[test]
    fn retention_ceiling_keeps_the_base_small() {
        let config = SieveConfig {
            partition_width: 100,
            base_retention_ceiling: 31,
            ..Default::default()
        };
        let mut engine = SieveEngine::new(config).unwrap();
        let mut sink = MemorySink::new();
        // 31^2 = 961, so a base capped at 31 still sieves up to 900.
        engine.run_until_limit(&mut sink, 900).unwrap();

        let expected: Vec<u64> = (2..=900).filter(|&n| is_prime(n)).collect();
        assert_eq!(sink.values(), expected.as_slice());
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let err = SieveEngine::new(SieveConfig::new(1)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
