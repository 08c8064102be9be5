//! Formica: a deterministic two-player ant colony strategy engine.
//!
//! Two colonies compete on a small grid. Each ant moves, attacks, picks
//! up food, or delivers it once per turn; the first colony to wipe the
//! other out, or the one holding more food when the board or turn budget
//! runs dry, wins. Every session is fully determined by its
//! [`game::GameConfig`], so any match replays bit-exactly from its seed.
//!
//! The crate splits into:
//! - [`game`]: grid world, turn engine, win evaluation, scripted opponent
//! - [`runner`]: headless self-play matches and parallel series
//! - [`replay`]: seed-based recordings and step-through playback

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod game;
pub mod replay;
pub mod runner;

pub use error::{ActionError, ActionResult};
pub use game::{Coord, GameConfig, Outcome, Phase, Player, TurnEngine};
