//! Segmented sieve engine
//!
//! Generates primes in strictly increasing order without an upper bound,
//! one fixed-width partition at a time:
//!
//! 1. A classic sieve of Eratosthenes covers the first partition
//!    ([`base::first_partition`]).
//! 2. Every later partition is sieved against the primes discovered so far
//!    ([`segment::sieve_segment`] over the [`PrimeStore`] base), so small
//!    primes are never re-derived and no flag array larger than one
//!    partition ever exists.
//! 3. [`SieveEngine`] owns all mutable state and drives the loop, emitting
//!    each discovered prime to a [`PrimeSink`](primegen_sink::PrimeSink).
//!
//! Memory per iteration is bounded by one partition's flag array; the only
//! unbounded structure is the store of retained base primes, and even that
//! is capped by configuration.

pub mod base;
mod cancel;
mod engine;
mod iter;
pub mod segment;
mod store;

pub use cancel::CancelToken;
pub use engine::SieveEngine;
pub use iter::Primes;
pub use store::PrimeStore;
