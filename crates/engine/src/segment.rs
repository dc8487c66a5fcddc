//! Segment sieve: mark composites in `[lo, hi]` using base primes.

use primegen_core::{Error, Result};

/// Compute the primes in `[lo, hi]` using the given base primes.
///
/// One operation covers every magnitude: bounds are `u64`, base primes are
/// stored narrow (`u32`) and widened before any `p*p` arithmetic, so no
/// separate narrow-range and wide-range variants are needed.
///
/// Preconditions (maintained by the driver):
/// - `lo <= hi`
/// - `base` is strictly increasing and contains every prime `p` with
///   `p*p <= hi`
///
/// A pure function of its inputs: re-sieving the same range with the same
/// base yields the same result.
pub fn sieve_segment(lo: u64, hi: u64, base: &[u32]) -> Result<Vec<u64>> {
    debug_assert!(lo <= hi, "segment bounds inverted: [{}, {}]", lo, hi);

    let len = match usize::try_from(hi - lo + 1) {
        Ok(len) => len,
        Err(_) => {
            return Err(Error::StorageExhausted {
                what: "segment composite map",
                requested: hi - lo + 1,
            })
        }
    };
    let mut composite = flag_array(len, "segment composite map")?;

    for &p in base {
        let p = u64::from(p);
        let p_squared = p * p;
        if p_squared > hi {
            // base is increasing, so no later prime can mark anything either
            break;
        }

        let start = if p_squared >= lo {
            p_squared
        } else {
            match first_multiple_at_or_above(p, lo) {
                Some(m) => m,
                // first multiple not representable, so certainly beyond hi
                None => continue,
            }
        };
        if start > hi {
            continue;
        }

        let mut offset = to_offset(start - lo, lo, hi, len)?;
        while offset < len {
            composite[offset] = true;
            offset += p as usize;
        }
    }

    Ok(composite
        .iter()
        .enumerate()
        .filter(|&(_, &marked)| !marked)
        .map(|(offset, _)| lo + offset as u64)
        .collect())
}

/// Smallest multiple of `p` that is `>= lo`, or `None` if it does not fit
/// in `u64`. Computed in `u128` so the ceiling division cannot overflow
/// near the top of the `u64` range.
fn first_multiple_at_or_above(p: u64, lo: u64) -> Option<u64> {
    let p = u128::from(p);
    let lo = u128::from(lo);
    let multiple = ((lo + p - 1) / p) * p;
    u64::try_from(multiple).ok()
}

fn to_offset(raw: u64, lo: u64, hi: u64, len: usize) -> Result<usize> {
    match usize::try_from(raw) {
        Ok(offset) if offset < len => Ok(offset),
        _ => Err(Error::IndexComputation {
            lo,
            hi,
            detail: format!("start offset {} outside composite map of length {}", raw, len),
        }),
    }
}

/// Allocate a zeroed composite-flag array, surfacing allocation failure as
/// `StorageExhausted` instead of aborting.
pub(crate) fn flag_array(len: usize, what: &'static str) -> Result<Vec<bool>> {
    let mut flags = Vec::new();
    flags
        .try_reserve_exact(len)
        .map_err(|_| Error::StorageExhausted {
            what,
            requested: len as u64,
        })?;
    flags.resize(len, false);
    Ok(flags)
}
