//! Initial-partition sieve (classic Eratosthenes).

use primegen_core::Result;

use crate::segment::flag_array;

/// Compute all primes in `[2, width]` with a classic sieve of
/// Eratosthenes.
///
/// Indices 0 and 1 are pre-marked composite. For each unmarked candidate
/// `i` with `i*i <= width`, multiples are marked starting at `i*i`: every
/// smaller multiple of `i` has a prime factor below `i` and was already
/// eliminated by that factor.
///
/// The caller guarantees `width >= 2` (enforced by configuration
/// validation before the engine runs).
pub fn first_partition(width: u64) -> Result<Vec<u64>> {
    debug_assert!(width >= 2, "initial partition width {} below 2", width);

    let entries = width.checked_add(1).unwrap_or(u64::MAX);
    let len = checked_len(entries)?;
    let mut composite = flag_array(len, "initial composite map")?;
    composite[0] = true;
    composite[1] = true;

    let mut i: u64 = 2;
    while i * i <= width {
        if !composite[i as usize] {
            let mut j = i * i;
            while j <= width {
                composite[j as usize] = true;
                j += i;
            }
        }
        i += 1;
    }

    Ok((2..=width)
        .filter(|&v| !composite[v as usize])
        .collect())
}

fn checked_len(entries: u64) -> Result<usize> {
    usize::try_from(entries).map_err(|_| primegen_core::Error::StorageExhausted {
        what: "initial composite map",
        requested: entries,
    })
}
