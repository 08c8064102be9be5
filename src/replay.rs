//! Match recording and playback.
//!
//! Because sessions are fully deterministic, a recording is just the
//! `GameConfig` (the spawn seed lives inside its layout). No state deltas
//! are stored. To view ply N, re-run the scripted match from the start.
//!
//! # Time travel
//!
//! - **Forward**: play the next side's turn
//! - **Backward**: re-run from the start to (current ply - 1)
//! - **Jump to ply N**: re-run from the start to N

mod render;
mod text;

pub use render::render_ascii;
pub use text::render_text;

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::{self, GameConfig, Outcome, SetupError, TurnEngine};

/// Plies allowed for recordings without a turn limit.
const UNLIMITED_PLY_CAP: u32 = 20_000;

/// Minimal recording: just the session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Configuration the match was played with.
    pub config: GameConfig,
}

impl Recording {
    /// Create a new recording.
    #[must_use]
    pub const fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Save the recording as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations or serialization fail.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a recording from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail or the JSON is invalid.
    pub fn load(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let recording = serde_json::from_reader(BufReader::new(file))?;
        Ok(recording)
    }
}

/// Error type for replay operations.
#[derive(Debug, Clone)]
pub enum ReplayError {
    /// The recorded configuration cannot produce a board.
    Setup(SetupError),
    /// Ply number out of bounds.
    PlyOutOfBounds {
        /// Requested ply.
        requested: u32,
        /// Maximum ply (inclusive).
        max_ply: u32,
    },
    /// The recorded match has already finished.
    GameOver,
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup(e) => write!(f, "{e}"),
            Self::PlyOutOfBounds { requested, max_ply } => {
                write!(f, "Ply {requested} out of bounds (max: {max_ply})")
            }
            Self::GameOver => write!(f, "Recorded match is already over"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<SetupError> for ReplayError {
    fn from(e: SetupError) -> Self {
        Self::Setup(e)
    }
}

/// Replay engine that steps through a recorded match.
///
/// One ply is one side's full scripted turn. Backward steps and jumps
/// re-run from the start, which is cheap at these board sizes.
#[derive(Debug)]
pub struct ReplayEngine {
    recording: Recording,
    engine: TurnEngine,
    current_ply: u32,
}

impl ReplayEngine {
    /// Create a replay engine from a recording, positioned at ply 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded configuration is invalid.
    pub fn new(recording: Recording) -> Result<Self, ReplayError> {
        Self::new_at_ply(recording, 0)
    }

    /// Create a replay engine positioned at a specific ply.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded configuration is invalid or the
    /// ply exceeds the recording's budget.
    pub fn new_at_ply(recording: Recording, target_ply: u32) -> Result<Self, ReplayError> {
        let max_ply = max_ply(&recording.config);
        if target_ply > max_ply {
            return Err(ReplayError::PlyOutOfBounds {
                requested: target_ply,
                max_ply,
            });
        }

        let engine = TurnEngine::new(recording.config.clone())?;
        let mut replay = Self {
            recording,
            engine,
            current_ply: 0,
        };

        for _ in 0..target_ply {
            if replay.is_game_over() {
                break;
            }
            replay.advance_ply();
        }

        Ok(replay)
    }

    /// The recording being replayed.
    #[must_use]
    pub const fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Current ply number.
    #[must_use]
    pub const fn ply(&self) -> u32 {
        self.current_ply
    }

    /// Current engine state.
    #[must_use]
    pub const fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// Whether the recorded match has finished.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.engine.outcome() != Outcome::Ongoing
    }

    /// Step forward one ply.
    ///
    /// # Errors
    ///
    /// Returns an error if the match is already over.
    pub fn step_forward(&mut self) -> Result<(), ReplayError> {
        if self.is_game_over() {
            return Err(ReplayError::GameOver);
        }
        self.advance_ply();
        Ok(())
    }

    /// Step backward one ply by re-running from the start.
    ///
    /// # Errors
    ///
    /// Returns an error if already at ply 0.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        if self.current_ply == 0 {
            return Err(ReplayError::PlyOutOfBounds {
                requested: 0,
                max_ply: 0,
            });
        }
        self.goto_ply(self.current_ply - 1)
    }

    /// Jump to a specific ply by re-running from the start.
    ///
    /// # Errors
    ///
    /// Returns an error if the ply exceeds the recording's budget.
    pub fn goto_ply(&mut self, target_ply: u32) -> Result<(), ReplayError> {
        *self = Self::new_at_ply(self.recording.clone(), target_ply)?;
        Ok(())
    }

    /// Render the current state to ASCII for terminal viewing.
    #[must_use]
    pub fn render_ascii(&self) -> String {
        render_ascii(&self.engine)
    }

    /// Render the current state as a plain text summary.
    #[must_use]
    pub fn render_text(&self) -> String {
        render_text(&self.engine)
    }

    fn advance_ply(&mut self) {
        // The scripted player never issues illegal actions, so a failure
        // here is an engine bug worth surfacing in debug builds.
        let result = game::play_turn_silent(&mut self.engine);
        debug_assert!(result.is_ok());
        self.current_ply += 1;
    }
}

/// Ply budget for a configuration: two plies per turn, plus slack for the
/// final half-turn.
fn max_ply(config: &GameConfig) -> u32 {
    config
        .max_turns
        .map_or(UNLIMITED_PLY_CAP, |turns| turns.saturating_mul(2) + 2)
}
