//! Sanity checks that detect engine bugs.
//!
//! None of these should ever trigger through the public API; a violation
//! means a core bug, not user error. Tests and debug harnesses run the
//! checker after action sequences.

use std::collections::HashMap;

use crate::game::{Coord, Outcome, Phase, Player, TurnEngine};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all engine invariants.
///
/// Returns the violations found, or empty if every invariant holds.
#[must_use]
pub fn check_invariants(engine: &TurnEngine) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let world = engine.world();

    let mut seen: HashMap<Coord, u32> = HashMap::new();
    for ant in world.ants() {
        *seen.entry(ant.pos).or_insert(0) += 1;

        if !world.is_in_bounds(ant.pos) {
            violations.push(InvariantViolation {
                message: format!("ant {:?} is out of bounds at {:?}", ant.id, ant.pos),
            });
        }
        if ant.health == 0 || ant.health > ant.max_health {
            violations.push(InvariantViolation {
                message: format!(
                    "live ant {:?} has health {} outside 1..={}",
                    ant.id, ant.health, ant.max_health
                ),
            });
        }
        if world.ant_at(ant.pos) != Some(ant.id) {
            violations.push(InvariantViolation {
                message: format!("occupancy index disagrees for ant {:?}", ant.id),
            });
        }
    }
    for (pos, count) in seen {
        if count > 1 {
            violations.push(InvariantViolation {
                message: format!("{count} ants share cell {pos:?}"),
            });
        }
    }

    for food in world.food_items() {
        if world.anthill_owner_at(food.pos).is_some() {
            violations.push(InvariantViolation {
                message: format!("food {:?} sits on an anthill tile", food.id),
            });
        }
        if world.food_at(food.pos) != Some(food.id) {
            violations.push(InvariantViolation {
                message: format!("occupancy index disagrees for food {:?}", food.id),
            });
        }
    }

    // Every food item the session started with is on the board, carried,
    // delivered, or spilled. Nothing is counted twice.
    let accounted = world.food_remaining()
        + world.carrying_count()
        + engine.scores()[0]
        + engine.scores()[1]
        + engine.food_lost();
    if accounted != engine.initial_food() {
        violations.push(InvariantViolation {
            message: format!(
                "food accounting is off: {} accounted, {} initial",
                accounted,
                engine.initial_food()
            ),
        });
    }

    // A side with no ants left only exists in terminal states.
    if engine.phase() != Phase::GameOver {
        for player in Player::both() {
            if world.ant_count(player) == 0 {
                violations.push(InvariantViolation {
                    message: format!("{player} has no ants but the game is still ongoing"),
                });
            }
        }
        if engine.outcome() != Outcome::Ongoing {
            violations.push(InvariantViolation {
                message: "terminal outcome recorded outside GameOver".to_string(),
            });
        }
    }

    violations
}
