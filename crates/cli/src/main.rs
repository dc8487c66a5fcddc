//! Primegen CLI — run the segmented sieve from the command line.
//!
//! Without `--below` the loop is unbounded, matching the engine's design:
//! it runs until interrupted or until a resource ceiling is hit. Progress
//! logging is controlled through `RUST_LOG` (e.g. `RUST_LOG=debug`).

use std::process;
use std::time::Instant;

use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use primegen::{Error, PrimeGenerator, RunSummary};

fn main() {
    let matches = build_cli().get_matches();
    init_tracing();

    let start = Instant::now();
    match run(&matches) {
        Ok(summary) => {
            report_summary(&summary, start, matches.get_flag("json"));
        }
        Err((e, stats)) => {
            report_failure(&e);
            if let Some(stats) = stats {
                eprintln!(
                    "found {} primes, highest fully-sieved boundary {}, after {:.3} seconds",
                    stats.primes_found,
                    stats.limit,
                    start.elapsed().as_secs_f64()
                );
            }
            process::exit(1);
        }
    }
}

fn build_cli() -> Command {
    Command::new("primegen")
        .about("Generate primes in increasing order, without an upper bound")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .default_value("primes.txt")
                .help("File receiving one prime per line"),
        )
        .arg(
            Arg::new("partition-width")
                .short('w')
                .long("partition-width")
                .value_name("N")
                .value_parser(clap::value_parser!(u64))
                .default_value("1000000")
                .help("Values covered by each sieving partition"),
        )
        .arg(
            Arg::new("below")
                .short('b')
                .long("below")
                .value_name("N")
                .value_parser(clap::value_parser!(u64))
                .help("Stop once every value below N has been sieved (default: run forever)"),
        )
        .arg(
            Arg::new("base-capacity")
                .long("base-capacity")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Ceiling on retained base primes before failing with storage exhaustion"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the final summary as JSON"),
        )
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

type RunError = (Error, Option<primegen::EngineStats>);

fn run(matches: &clap::ArgMatches) -> Result<RunSummary, RunError> {
    let output = matches.get_one::<String>("output").expect("has default");
    let width = *matches
        .get_one::<u64>("partition-width")
        .expect("has default");

    let mut builder = PrimeGenerator::builder()
        .path(output)
        .partition_width(width);
    if let Some(&capacity) = matches.get_one::<usize>("base-capacity") {
        builder = builder.base_capacity(capacity);
    }
    let mut generator = builder.create().map_err(|e| (e, None))?;

    let result = match matches.get_one::<u64>("below") {
        Some(&bound) => generator.run_until_limit(bound),
        None => generator.run(),
    };
    result.map_err(|e| {
        let stats = generator.stats();
        (e, Some(stats))
    })
}

fn report_summary(summary: &RunSummary, start: Instant, json: bool) {
    let elapsed = start.elapsed().as_secs_f64();
    if json {
        let value = serde_json::json!({
            "primes_found": summary.stats.primes_found,
            "limit": summary.stats.limit,
            "max_prime": summary.stats.max_prime,
            "segments_sieved": summary.stats.segments_sieved,
            "cancelled": summary.cancelled,
            "elapsed_seconds": elapsed,
        });
        println!("{}", value);
    } else {
        println!(
            "found {} primes below {} in {:.3} seconds (largest: {})",
            summary.stats.primes_found, summary.stats.limit, elapsed, summary.stats.max_prime
        );
    }
}

fn report_failure(e: &Error) {
    match e {
        Error::StorageExhausted { .. } => eprintln!("storage exhausted: {}", e),
        Error::IndexComputation { .. } => eprintln!("index computation error: {}", e),
        Error::Sink(_) => eprintln!("output sink failed: {}", e),
        Error::Config(_) => eprintln!("{}", e),
    }
}
