//! Plain-text state summary, for logs and non-ANSI terminals.

use std::fmt::Write as _;

use crate::game::{Outcome, Player, TurnEngine};

/// Render the session as a structured plain-text summary.
#[must_use]
pub fn render_text(engine: &TurnEngine) -> String {
    let world = engine.world();
    let mut output = String::new();

    match engine.config().max_turns {
        Some(max) => {
            let _ = writeln!(output, "Turn: {}/{max}", engine.turn());
        }
        None => {
            let _ = writeln!(output, "Turn: {}", engine.turn());
        }
    }
    match (engine.outcome(), engine.active_player()) {
        (Outcome::Ongoing, Some(player)) => {
            let _ = writeln!(output, "To act: {player}");
        }
        (outcome, _) => {
            let _ = writeln!(output, "Result: {outcome}");
        }
    }
    let _ = writeln!(
        output,
        "Scores: P1={} P2={}",
        engine.score(Player::One),
        engine.score(Player::Two)
    );
    let _ = writeln!(output, "Food on board: {}", world.food_remaining());

    for player in Player::both() {
        let _ = writeln!(output, "{player} ants:");
        for ant in world.ants_of(player) {
            let carrying = if ant.carrying_food { " carrying" } else { "" };
            let _ = writeln!(
                output,
                "  ({},{}) hp {}/{}{carrying}",
                ant.pos.x, ant.pos.y, ant.health, ant.max_health
            );
        }
    }

    let food: Vec<String> = world
        .food_items()
        .map(|f| format!("({},{})", f.pos.x, f.pos.y))
        .collect();
    let _ = writeln!(output, "Food: {}", food.join(" "));

    output
}
