//! Unified error types for the prime generator.
//!
//! This module provides the canonical error type used across all crates.
//! Every fatal path in the engine surfaces through one of these variants;
//! nothing is silently swallowed.

use thiserror::Error;

/// All prime-generator errors.
///
/// This is the canonical error type for all engine operations. Every
/// variant is fatal for the current run: the engine has no internal retry
/// or resume policy.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage for discovered primes or a segment flag array cannot be
    /// satisfied (configured ceiling exceeded, or allocation refused).
    #[error("storage exhausted: {what} (requested {requested} entries)")]
    StorageExhausted {
        /// Which storage could not be satisfied
        what: &'static str,
        /// Number of entries that were requested
        requested: u64,
    },

    /// Internal arithmetic or indexing fault while sieving a segment.
    ///
    /// Unreachable in a correct implementation; if observed it is a
    /// programming defect and the context here exists to aid diagnosis.
    #[error("index computation error in segment [{lo}, {hi}]: {detail}")]
    IndexComputation {
        /// Lower bound of the segment being sieved
        lo: u64,
        /// Upper bound of the segment being sieved
        hi: u64,
        /// What went wrong
        detail: String,
    },

    /// The output sink could not durably record a value.
    ///
    /// Not retried internally. Values already appended before the failure
    /// remain recorded; the in-flight segment is not rolled back.
    #[error("sink failure: {0}")]
    Sink(#[from] std::io::Error),

    /// Invalid configuration, rejected before the engine starts.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for prime-generator operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a storage-exhaustion error.
    pub fn is_storage_exhausted(&self) -> bool {
        matches!(self, Error::StorageExhausted { .. })
    }

    /// Check if this is an internal indexing defect.
    pub fn is_index_computation(&self) -> bool {
        matches!(self, Error::IndexComputation { .. })
    }

    /// Check if this is a sink failure.
    pub fn is_sink(&self) -> bool {
        matches!(self, Error::Sink(_))
    }

    /// Check if this error indicates a bug rather than an environmental
    /// condition.
    pub fn is_defect(&self) -> bool {
        matches!(self, Error::IndexComputation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_exhausted_display() {
        let err = Error::StorageExhausted {
            what: "base prime store",
            requested: 101,
        };
        assert_eq!(
            err.to_string(),
            "storage exhausted: base prime store (requested 101 entries)"
        );
        assert!(err.is_storage_exhausted());
        assert!(!err.is_defect());
    }

    #[test]
    fn index_computation_is_defect() {
        let err = Error::IndexComputation {
            lo: 11,
            hi: 20,
            detail: "offset not representable".to_string(),
        };
        assert!(err.is_index_computation());
        assert!(err.is_defect());
        assert!(err.to_string().contains("[11, 20]"));
    }

    #[test]
    fn sink_wraps_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::WriteZero, "disk full");
        let err = Error::from(io);
        assert!(err.is_sink());
        assert!(err.to_string().starts_with("sink failure"));
    }
}
