//! Formica CLI - Command-line interface for running and viewing colony matches.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Args as ClapArgs, Parser, Subcommand};
use formica::game::GameConfig;
use std::process::ExitCode;

/// Formica - A deterministic ant colony strategy engine
#[derive(Parser, Debug)]
#[command(name = "formica")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Board and rule options shared by the match-running commands.
#[derive(ClapArgs, Debug)]
struct BoardArgs {
    /// Grid width (default: 10)
    #[arg(long, default_value = "10")]
    width: u16,

    /// Grid height (default: 10)
    #[arg(long, default_value = "10")]
    height: u16,

    /// Ants per player (default: 4)
    #[arg(long, default_value = "4")]
    ants: u32,

    /// Food items on the board (default: 8)
    #[arg(long, default_value = "8")]
    food: u32,

    /// Starting health per ant (default: 3)
    #[arg(long, default_value = "3")]
    health: u32,

    /// Attack damage per hit (default: 1)
    #[arg(long, default_value = "1")]
    damage: u32,

    /// Maximum turns before deciding on score; 0 disables the limit (default: 50)
    #[arg(short, long, default_value = "50")]
    turns: u32,
}

impl BoardArgs {
    fn to_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            ants_per_player: self.ants,
            food_count: self.food,
            max_health: self.health,
            attack_damage: self.damage,
            max_turns: (self.turns > 0).then_some(self.turns),
            ..GameConfig::default()
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single scripted self-play match
    Run {
        #[command(flatten)]
        board: BoardArgs,

        /// Spawn seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save recording to file
        #[arg(long)]
        save: Option<std::path::PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Interactive TUI to watch a match unfold
    Watch {
        #[command(flatten)]
        board: BoardArgs,

        /// Spawn seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Step delay in milliseconds (default: 500)
        #[arg(long, default_value = "500")]
        speed: u64,
    },

    /// Replay a recorded match
    Replay {
        /// Recording file (.json)
        #[arg(required = true)]
        recording: std::path::PathBuf,

        /// Output format: tui or text
        #[arg(short, long, default_value = "tui")]
        format: cli::ReplayFormat,

        /// Start at a specific ply
        #[arg(short, long)]
        ply: Option<u32>,
    },

    /// Run mass parallel matches and aggregate statistics
    Series {
        #[command(flatten)]
        board: BoardArgs,

        /// Number of matches to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        matches: u64,

        /// Starting seed (increments for each match)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SeriesFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            board,
            seed,
            format,
            save,
            quiet,
        } => cli::run::execute(board.to_config(), seed, format, save, quiet),

        Commands::Watch { board, seed, speed } => {
            cli::watch::execute(board.to_config(), seed, speed)
        }

        Commands::Replay {
            recording,
            format,
            ply,
        } => cli::replay::execute(recording, format, ply),

        Commands::Series {
            board,
            matches,
            seed,
            threads,
            format,
            progress,
        } => cli::series::execute(board.to_config(), matches, seed, threads, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
