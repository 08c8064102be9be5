//! Core game layer.
//!
//! Implements the turn-based rules:
//! - Grid world with coordinate-keyed occupancy (ants, food, anthills)
//! - Turn engine with per-unit action budgets and legality checking
//! - Two-phase food economy (pickup, then delivery to the home anthill)
//! - Win-condition evaluation
//! - The greedy scripted opponent

mod ai;
mod engine;
mod grid;
mod invariants;
mod outcome;
mod setup;
mod units;

pub use ai::{decide, greedy_step, play_turn, play_turn_silent, AiAction};
pub use engine::{Phase, TurnEngine};
pub use grid::{Coord, GridWorld, Occupant};
pub use invariants::{check_invariants, InvariantViolation};
pub use outcome::{evaluate, Outcome};
pub use setup::{FixedLayout, GameConfig, Layout, SetupError};
pub use units::{Ant, AntId, Anthill, Food, FoodId, Player};
