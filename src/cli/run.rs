//! Run command implementation.

use super::output::{format_text, JsonMatchResult};
use super::{CliError, OutputFormat};
use formica::game::GameConfig;
use formica::replay::Recording;
use formica::runner::{config_for_seed, run_match};
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the match fails to run.
pub(crate) fn execute(
    config: GameConfig,
    seed: Option<u64>,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(super::series::wall_clock_seed);

    if !quiet {
        println!("Running match with seed {seed}...");
        println!();
    }

    let result = run_match(seed, &config)?;

    if let Some(save_path) = save {
        let recording = Recording::new(config_for_seed(&config, seed));
        recording
            .save(&save_path)
            .map_err(|e| CliError::new(format!("Failed to save recording: {e}")))?;
        if !quiet {
            println!("Recording saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result));
        }
        OutputFormat::Json => {
            let json_result = JsonMatchResult::from_match_result(&result);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
