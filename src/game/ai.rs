//! The greedy scripted opponent.
//!
//! Given identical state the policy makes identical decisions: units are
//! considered in creation order, neighbors are scanned in a fixed order,
//! and distance ties are broken by list position. Known limitation, kept
//! deliberately: when the chosen greedy step is blocked the ant simply
//! does not act this turn; there is no alternative-path search.

use crate::error::{ActionError, ActionResult};
use crate::game::{AntId, Coord, Phase, TurnEngine};

/// One applied decision, reported to the pacing callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// The ant moved one step.
    Move {
        /// Acting ant.
        ant: AntId,
        /// Cell it left.
        from: Coord,
        /// Cell it entered.
        to: Coord,
    },
    /// The ant attacked an adjacent enemy.
    Attack {
        /// Acting ant.
        attacker: AntId,
        /// Cell of the defender.
        target: Coord,
    },
}

/// One greedy step from `from` toward `target`.
///
/// Steps one cell along the axis with the larger absolute delta. Ties go
/// to the y-axis: when `|dx| <= |dy|` the x delta is ignored entirely.
/// Returns `None` when the winning axis has no delta left.
#[must_use]
pub fn greedy_step(from: Coord, target: Coord) -> Option<Coord> {
    let dx = i32::from(target.x) - i32::from(from.x);
    let dy = i32::from(target.y) - i32::from(from.y);
    if dx.abs() > dy.abs() {
        let x = if dx > 0 { from.x + 1 } else { from.x - 1 };
        Some(Coord::new(x, from.y))
    } else if dy != 0 {
        let y = if dy > 0 { from.y + 1 } else { from.y - 1 };
        Some(Coord::new(from.x, y))
    } else {
        None
    }
}

/// Decide what one ant does this turn, without applying anything.
///
/// Priority order, first match wins:
/// 1. attack the first attackable enemy in the neighbor scan order
/// 2. if carrying, step toward the nearest own anthill tile
/// 3. otherwise, step toward the nearest food item
/// 4. otherwise, step toward the grid's center cell
///
/// Returns `None` for an ant that has already acted, no longer exists, or
/// whose chosen step is illegal.
#[must_use]
pub fn decide(engine: &TurnEngine, ant_id: AntId) -> Option<AiAction> {
    let world = engine.world();
    let ant = world.ant(ant_id)?;
    if ant.has_acted {
        return None;
    }

    let (neighbors, count) = ant.pos.neighbors(world.width(), world.height());
    for &target in &neighbors[..count as usize] {
        if engine.can_attack(ant_id, target).is_ok() {
            return Some(AiAction::Attack {
                attacker: ant_id,
                target,
            });
        }
    }

    if ant.carrying_food {
        if let Some(hill) = world.anthill_of(ant.owner) {
            let target = nearest(ant.pos, hill.tiles.iter().copied())?;
            return step_action(engine, ant_id, ant.pos, target);
        }
    } else if let Some(target) = nearest(ant.pos, world.food_items().map(|f| f.pos)) {
        return step_action(engine, ant_id, ant.pos, target);
    }

    let center = Coord::new(world.width() / 2, world.height() / 2);
    step_action(engine, ant_id, ant.pos, center)
}

/// Nearest candidate by Manhattan distance, ties broken by list order.
fn nearest(from: Coord, candidates: impl Iterator<Item = Coord>) -> Option<Coord> {
    let mut best: Option<(u32, Coord)> = None;
    for pos in candidates {
        let dist = from.manhattan_distance(pos);
        if best.is_none_or(|(best_dist, _)| dist < best_dist) {
            best = Some((dist, pos));
        }
    }
    best.map(|(_, pos)| pos)
}

/// The greedy step toward `target` as a move action, if it is legal.
fn step_action(
    engine: &TurnEngine,
    ant_id: AntId,
    from: Coord,
    target: Coord,
) -> Option<AiAction> {
    let to = greedy_step(from, target)?;
    if engine.can_move(ant_id, to).is_err() {
        return None;
    }
    Some(AiAction::Move { ant: ant_id, from, to })
}

/// Play out the active player's whole turn with the scripted policy.
///
/// Ants are processed in creation order; each applied action is reported
/// through `on_action` with the engine already reflecting it, which is the
/// caller's hook for presentation pacing. The delay a caller inserts there
/// has no effect on ordering. Ends with `end_turn` unless a terminal
/// outcome fired mid-turn. Returns the number of actions applied.
///
/// # Errors
///
/// `GameAlreadyOver` when invoked on a finished game. Other action errors
/// indicate an engine bug: the policy only emits decisions it has checked.
pub fn play_turn(
    engine: &mut TurnEngine,
    mut on_action: impl FnMut(&TurnEngine, AiAction),
) -> ActionResult<u32> {
    let player = engine.active_player().ok_or(ActionError::GameAlreadyOver)?;
    let roster: Vec<AntId> = engine.world().ants_of(player).map(|a| a.id).collect();

    let mut applied = 0u32;
    for ant_id in roster {
        // Delivering the last food can end the game between units.
        if engine.phase() == Phase::GameOver {
            break;
        }
        let Some(ant) = engine.world().ant(ant_id) else {
            continue;
        };
        let pos = ant.pos;
        let Some(action) = decide(engine, ant_id) else {
            continue;
        };
        engine.select(pos)?;
        match action {
            AiAction::Move { to, .. } => engine.move_to(to)?,
            AiAction::Attack { target, .. } => engine.attack(target)?,
        }
        applied += 1;
        on_action(engine, action);
    }

    if engine.phase() != Phase::GameOver {
        engine.end_turn()?;
    }
    Ok(applied)
}

/// Convenience for drivers that do not observe individual actions.
///
/// # Errors
///
/// Same as [`play_turn`].
pub fn play_turn_silent(engine: &mut TurnEngine) -> ActionResult<u32> {
    play_turn(engine, |_, _| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{FixedLayout, GameConfig, Layout, Player};

    fn engine_with(layout: FixedLayout) -> TurnEngine {
        let config = GameConfig {
            layout: Layout::Fixed(layout),
            ..GameConfig::default()
        };
        TurnEngine::new(config).expect("engine")
    }

    fn base_layout() -> FixedLayout {
        FixedLayout {
            anthills: vec![
                (Player::One, vec![Coord::new(0, 0)]),
                (Player::Two, vec![Coord::new(9, 9)]),
            ],
            ants: Vec::new(),
            food: Vec::new(),
        }
    }

    #[test]
    fn test_greedy_step_larger_axis_wins() {
        assert_eq!(
            greedy_step(Coord::new(0, 0), Coord::new(3, 1)),
            Some(Coord::new(1, 0))
        );
        assert_eq!(
            greedy_step(Coord::new(5, 5), Coord::new(2, 4)),
            Some(Coord::new(4, 5))
        );
        assert_eq!(
            greedy_step(Coord::new(0, 0), Coord::new(1, 3)),
            Some(Coord::new(0, 1))
        );
        assert_eq!(
            greedy_step(Coord::new(4, 7), Coord::new(4, 2)),
            Some(Coord::new(4, 6))
        );
    }

    #[test]
    fn test_greedy_step_tie_goes_to_y() {
        // |dx| == |dy|: the x delta is ignored entirely.
        assert_eq!(
            greedy_step(Coord::new(0, 0), Coord::new(3, 3)),
            Some(Coord::new(0, 1))
        );
        assert_eq!(
            greedy_step(Coord::new(5, 5), Coord::new(3, 3)),
            Some(Coord::new(5, 4))
        );
    }

    #[test]
    fn test_greedy_step_exhausted() {
        assert_eq!(greedy_step(Coord::new(4, 4), Coord::new(4, 4)), None);
    }

    #[test]
    fn test_attack_has_top_priority() {
        // Food sits right next door, but an adjacent enemy outranks it.
        let engine = engine_with(FixedLayout {
            ants: vec![
                (Player::One, Coord::new(4, 4)),
                (Player::Two, Coord::new(5, 4)),
            ],
            food: vec![Coord::new(3, 4)],
            ..base_layout()
        });
        let ant = engine.world().ant_at(Coord::new(4, 4)).expect("id");
        assert_eq!(
            decide(&engine, ant),
            Some(AiAction::Attack {
                attacker: ant,
                target: Coord::new(5, 4),
            })
        );
    }

    #[test]
    fn test_attack_scan_order_up_first() {
        // Enemies both above and to the right: up is scanned first.
        let engine = engine_with(FixedLayout {
            ants: vec![
                (Player::One, Coord::new(4, 4)),
                (Player::Two, Coord::new(4, 3)),
                (Player::Two, Coord::new(5, 4)),
            ],
            food: vec![Coord::new(8, 8)],
            ..base_layout()
        });
        let ant = engine.world().ant_at(Coord::new(4, 4)).expect("id");
        assert_eq!(
            decide(&engine, ant),
            Some(AiAction::Attack {
                attacker: ant,
                target: Coord::new(4, 3),
            })
        );
    }

    #[test]
    fn test_forage_nearest_food_list_order_tie() {
        // Both food items at distance 3; the first listed one wins, and the
        // step toward it obeys the y-axis tie-break.
        let engine = engine_with(FixedLayout {
            ants: vec![
                (Player::One, Coord::new(4, 4)),
                (Player::Two, Coord::new(9, 8)),
            ],
            food: vec![Coord::new(6, 6), Coord::new(2, 2)],
            ..base_layout()
        });
        let ant = engine.world().ant_at(Coord::new(4, 4)).expect("id");
        assert_eq!(
            decide(&engine, ant),
            Some(AiAction::Move {
                ant,
                from: Coord::new(4, 4),
                to: Coord::new(4, 5),
            })
        );
    }

    #[test]
    fn test_carrier_heads_home() {
        let mut engine = engine_with(FixedLayout {
            ants: vec![
                (Player::One, Coord::new(3, 3)),
                (Player::Two, Coord::new(9, 8)),
            ],
            food: vec![Coord::new(3, 4), Coord::new(8, 8)],
            ..base_layout()
        });
        engine.select(Coord::new(3, 3)).expect("select");
        engine.move_to(Coord::new(3, 4)).expect("pickup");
        engine.end_turn().expect("end");
        engine.end_turn().expect("end p2");

        let ant = engine.world().ant_at(Coord::new(3, 4)).expect("id");
        // Anthill at (0, 0): |dx| = 3 < |dy| = 4, step up.
        assert_eq!(
            decide(&engine, ant),
            Some(AiAction::Move {
                ant,
                from: Coord::new(3, 4),
                to: Coord::new(3, 3),
            })
        );
    }

    #[test]
    fn test_blocked_step_means_no_action() {
        // The greedy step toward the only food is blocked by a friendly
        // ant; the policy does not search for an alternative.
        let engine = engine_with(FixedLayout {
            ants: vec![
                (Player::One, Coord::new(2, 2)),
                (Player::One, Coord::new(2, 3)),
                (Player::Two, Coord::new(9, 8)),
            ],
            food: vec![Coord::new(2, 6)],
            ..base_layout()
        });
        let ant = engine.world().ant_at(Coord::new(2, 2)).expect("id");
        assert_eq!(decide(&engine, ant), None);
    }

    #[test]
    fn test_fallback_steps_toward_center() {
        // Player 1 picks up the only food; the board is now bare but the
        // carried item keeps the game open. Player 2's ant has nothing to
        // forage and drifts toward the center cell (5, 5).
        let mut engine = engine_with(FixedLayout {
            ants: vec![
                (Player::One, Coord::new(4, 3)),
                (Player::Two, Coord::new(9, 8)),
            ],
            food: vec![Coord::new(4, 4)],
            ..base_layout()
        });
        engine.select(Coord::new(4, 3)).expect("select");
        engine.move_to(Coord::new(4, 4)).expect("pickup");
        engine.end_turn().expect("to p2");
        let p2_ant = engine.world().ant_at(Coord::new(9, 8)).expect("id");
        assert_eq!(
            decide(&engine, p2_ant),
            Some(AiAction::Move {
                ant: p2_ant,
                from: Coord::new(9, 8),
                to: Coord::new(8, 8),
            })
        );
    }

    #[test]
    fn test_play_turn_processes_in_creation_order() {
        let mut engine = engine_with(FixedLayout {
            ants: vec![
                (Player::One, Coord::new(1, 4)),
                (Player::One, Coord::new(3, 4)),
                (Player::Two, Coord::new(9, 8)),
            ],
            food: vec![Coord::new(2, 7)],
            ..base_layout()
        });
        let first = engine.world().ant_at(Coord::new(1, 4)).expect("a");
        let second = engine.world().ant_at(Coord::new(3, 4)).expect("b");

        let mut seen = Vec::new();
        let applied = play_turn(&mut engine, |_, action| seen.push(action)).expect("turn");
        assert_eq!(applied, 2);
        let actors: Vec<AntId> = seen
            .iter()
            .map(|a| match a {
                AiAction::Move { ant, .. } => *ant,
                AiAction::Attack { attacker, .. } => *attacker,
            })
            .collect();
        assert_eq!(actors, vec![first, second]);
        // The policy handed the turn over when done.
        assert_eq!(engine.active_player(), Some(Player::Two));
    }

    #[test]
    fn test_play_turn_rejected_when_over() {
        let mut engine = engine_with(FixedLayout {
            ants: vec![(Player::One, Coord::new(1, 4))],
            food: vec![Coord::new(2, 7)],
            ..base_layout()
        });
        // Player 2 has no ants; the first evaluation ends the game.
        engine.end_turn().expect("end");
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(
            play_turn_silent(&mut engine),
            Err(ActionError::GameAlreadyOver)
        );
    }
}
