//! Series command implementation.

use super::output::{format_series_csv, format_series_text, JsonSeriesResult, SeriesStats};
use super::{CliError, SeriesFormat};
use formica::game::GameConfig;
use formica::runner::run_match;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Seed derived from the wall clock, for unseeded invocations.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn wall_clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(42, |d| d.as_nanos() as u64)
}

/// Execute the series command.
///
/// # Errors
///
/// Returns an error if any match fails.
pub(crate) fn execute(
    config: GameConfig,
    matches: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    format: SeriesFormat,
    progress: bool,
) -> Result<(), CliError> {
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(wall_clock_seed);

    let pb = if progress {
        let pb = ProgressBar::new(matches);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} matches ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    let results: Result<Vec<_>, _> = (0..matches)
        .into_par_iter()
        .map(|i| {
            let result = run_match(base_seed.wrapping_add(i), &config);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            result
        })
        .collect();
    let results = results?;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    let mut stats = SeriesStats::default();
    for result in &results {
        stats.add_result(result);
    }

    #[allow(clippy::cast_precision_loss)]
    let matches_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.matches_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        SeriesFormat::Text => {
            println!();
            print!("{}", format_series_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({matches_per_sec:.0} matches/sec)",
                duration.as_secs_f64()
            );
        }
        SeriesFormat::Json => {
            let json_result = JsonSeriesResult::from_stats(&stats);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        SeriesFormat::Csv => {
            print!("{}", format_series_csv(&results));
        }
    }

    Ok(())
}
