//! End-to-end tests: engine, sinks, and facade composed together.

use primegen::prelude::*;

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

fn read_output(path: &std::path::Path) -> Vec<u64> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.parse().unwrap())
        .collect()
}

#[test]
fn file_output_matches_trial_division() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("primes.txt");

    let mut generator = PrimeGenerator::builder()
        .path(&path)
        .partition_width(100)
        .create()
        .unwrap();
    let summary = generator.run_until_limit(1000).unwrap();

    let expected: Vec<u64> = (2..=1000).filter(|&n| is_prime(n)).collect();
    assert_eq!(read_output(&path), expected);
    assert_eq!(summary.stats.primes_found, 168);
    assert_eq!(summary.stats.limit, 1000);
    assert_eq!(summary.stats.max_prime, 997);
    assert!(!summary.cancelled);
}

#[test]
fn every_emission_is_unique_and_increasing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("primes.txt");

    let mut generator = PrimeGenerator::builder()
        .path(&path)
        .partition_width(37) // deliberately not a round number
        .create()
        .unwrap();
    generator.run_until_limit(2000).unwrap();

    let values = read_output(&path);
    assert!(values.windows(2).all(|w| w[0] < w[1]));
    for &v in &values {
        assert!(is_prime(v), "{} is not prime", v);
    }
    // Nothing prime below the limit is missing
    let limit = generator.stats().limit;
    let expected = (2..=limit).filter(|&n| is_prime(n)).count();
    assert_eq!(values.len(), expected);
}

#[test]
fn cancellation_from_another_thread_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("primes.txt");

    let mut generator = PrimeGenerator::builder()
        .path(&path)
        .partition_width(1000)
        .create()
        .unwrap();
    let token = generator.cancel_token();

    let canceller = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(20));
        token.cancel();
    });

    let summary = generator.run().unwrap();
    canceller.join().unwrap();

    assert!(summary.cancelled);
    // Whatever was emitted before cancellation is intact and well-formed
    let values = read_output(&path);
    assert_eq!(values.len() as u64, summary.stats.primes_found);
    assert!(values.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn exhausted_base_capacity_reports_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("primes.txt");

    let mut generator = PrimeGenerator::builder()
        .path(&path)
        .partition_width(10)
        .base_capacity(4)
        .create()
        .unwrap();

    // First partition fits exactly (2, 3, 5, 7); the next one overflows.
    generator.step().unwrap();
    let err = generator.step().unwrap_err();
    assert!(err.is_storage_exhausted());

    // Best-effort state survives for diagnostics
    let stats = generator.stats();
    assert_eq!(stats.limit, 10);
    assert_eq!(stats.primes_found, 4);
}

#[test]
fn iterator_and_file_paths_agree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("primes.txt");

    let mut generator = PrimeGenerator::builder()
        .path(&path)
        .partition_width(64)
        .create()
        .unwrap();
    generator.run_until_limit(512).unwrap();
    let from_file = read_output(&path);

    let engine = SieveEngine::new(SieveConfig::new(64)).unwrap();
    let streamed: Vec<u64> = engine
        .into_primes()
        .take(from_file.len())
        .collect::<Result<_>>()
        .unwrap();

    assert_eq!(streamed, from_file);
}

#[test]
fn builder_requires_a_path() {
    let err = PrimeGenerator::builder().create().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn fresh_runs_start_over() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("primes.txt");

    let mut first = PrimeGenerator::builder()
        .path(&path)
        .partition_width(10)
        .create()
        .unwrap();
    first.run_until_limit(100).unwrap();
    drop(first);

    // A new generator truncates and reproduces the same prefix.
    let mut second = PrimeGenerator::builder()
        .path(&path)
        .partition_width(10)
        .create()
        .unwrap();
    second.run_until_limit(30).unwrap();

    assert_eq!(read_output(&path), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn output_is_exactly_the_primes_up_to_the_limit(
            width in 2u64..200,
            partitions in 1u64..8,
        ) {
            let bound = width * partitions;
            let mut engine = SieveEngine::new(SieveConfig::new(width)).unwrap();
            let mut sink = MemorySink::new();
            let summary = engine.run_until_limit(&mut sink, bound).unwrap();

            let expected: Vec<u64> = (2..=summary.stats.limit)
                .filter(|&n| is_prime(n))
                .collect();
            prop_assert_eq!(sink.values(), expected.as_slice());
        }
    }
}
