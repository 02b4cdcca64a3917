//! # Daily hashtag groups → temporal communities
//!
//! Loads one membership file per day (`community_tags{day}_2015_list.txt`,
//! lines of `day, community, tag`), matches the days with a memory of two,
//! and prints how many linked temporal communities were found, how long the
//! longest one lasts, and a text histogram of their lengths. Daily groups that
//! never link are left out of the count.
//!
//! ```bash
//! RUST_LOG=temporal_communities=debug \
//!     cargo run --example daily_groups --features std -- ../Daily_Groups 1 362
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use temporal_communities::loader::load_files;
use temporal_communities::report::{Summary, DEFAULT_BINS};
use temporal_communities::{temporal_communities, MatchConfig};
use tracing_subscriber::EnvFilter;

// ── Display helpers ───────────────────────────────────────────────────────────

fn bar(count: usize, max: usize) -> String {
    let filled = if max == 0 { 0 } else { (count * 40).div_ceil(max) };
    format!("{}{}", "█".repeat(filled), "░".repeat(40 - filled))
}

fn day_paths(folder: &str, first: usize, last: usize) -> Vec<PathBuf> {
    (first..=last)
        .map(|day| PathBuf::from(folder).join(format!("community_tags{day}_2015_list.txt")))
        .collect()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let folder = args.first().map(String::as_str).unwrap_or("../Daily_Groups");
    let first = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
    let last = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(362);

    let (timeseries, tags) = match load_files(day_paths(folder, first, last)) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded {} days, {} distinct tags", timeseries.len(), tags.len());

    let config = MatchConfig::with_memory(2).with_singletons(false);
    let found = match temporal_communities(&timeseries, &config) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let summary = Summary::from_communities(&found, DEFAULT_BINS);
    println!("{summary}");
    println!();

    let max = summary.histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in &summary.histogram.bins {
        println!(
            "{:>7.1} – {:>7.1}  {} {}",
            bin.lower,
            bin.upper,
            bar(bin.count, max),
            bin.count
        );
    }
    ExitCode::SUCCESS
}
