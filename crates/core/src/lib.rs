//! Core types for the prime generator
//!
//! This crate defines the fundamental types shared by every layer of the
//! system:
//! - [`Error`] / [`Result`]: the canonical error taxonomy
//! - [`SieveConfig`]: validated engine configuration
//! - [`Segment`], [`SegmentReport`], [`EngineStats`], [`RunSummary`]:
//!   bookkeeping types exposed to hosts and diagnostics

pub mod config;
pub mod error;
pub mod types;

pub use config::SieveConfig;
pub use error::{Error, Result};
pub use types::{EngineStats, RunSummary, Segment, SegmentReport};
