//! The turn/action state machine.
//!
//! `TurnEngine` owns the world and all session state. Callers submit
//! intents (`select`, `move_to`, `attack`, `end_turn`, `restart`) and read
//! state back through accessors; an illegal intent is rejected with an
//! [`ActionError`] and mutates nothing.

use crate::error::{ActionError, ActionResult};
use crate::game::outcome::{self, Outcome};
use crate::game::setup::{self, GameConfig, SetupError};
use crate::game::{AntId, Coord, GridWorld, Player};

/// Which side may act, or whether the game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Player 1 is acting.
    Player1Turn,
    /// Player 2 is acting.
    Player2Turn,
    /// A terminal outcome has been recorded.
    GameOver,
}

/// The game session: world, phase, scores, and transient selection.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    config: GameConfig,
    world: GridWorld,
    phase: Phase,
    turn: u32,
    scores: [u32; 2],
    selected: Option<AntId>,
    outcome: Outcome,
    initial_food: u32,
    food_lost: u32,
}

impl TurnEngine {
    /// Start a new session from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot produce a valid world.
    pub fn new(config: GameConfig) -> Result<Self, SetupError> {
        let world = setup::build_world(&config)?;
        let initial_food = world.food_remaining();
        Ok(Self {
            config,
            world,
            phase: Phase::Player1Turn,
            turn: 1,
            scores: [0, 0],
            selected: None,
            outcome: Outcome::Ongoing,
            initial_food,
            food_lost: 0,
        })
    }

    /// The world, read-only. Renderers and policies query state here.
    #[must_use]
    pub const fn world(&self) -> &GridWorld {
        &self.world
    }

    /// The configuration this session was built from.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The side whose turn it is, or `None` once the game is over.
    #[must_use]
    pub const fn active_player(&self) -> Option<Player> {
        match self.phase {
            Phase::Player1Turn => Some(Player::One),
            Phase::Player2Turn => Some(Player::Two),
            Phase::GameOver => None,
        }
    }

    /// Turn counter. Starts at 1 and increments each time control returns
    /// to player 1.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// A side's delivered-food score.
    #[must_use]
    pub const fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    /// Both scores, player 1 first.
    #[must_use]
    pub const fn scores(&self) -> [u32; 2] {
        self.scores
    }

    /// The recorded outcome; `Ongoing` until the game ends, then fixed.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The currently selected ant, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<AntId> {
        self.selected
    }

    /// Food items the session started with.
    #[must_use]
    pub const fn initial_food(&self) -> u32 {
        self.initial_food
    }

    /// Carried food destroyed by attacks on the carrier.
    #[must_use]
    pub const fn food_lost(&self) -> u32 {
        self.food_lost
    }

    const fn ensure_ongoing(&self) -> ActionResult<()> {
        match self.phase {
            Phase::GameOver => Err(ActionError::GameAlreadyOver),
            Phase::Player1Turn | Phase::Player2Turn => Ok(()),
        }
    }

    /// Select the ant standing at `pos` for a subsequent move or attack.
    ///
    /// Succeeds only for an ant of the active player that has not acted
    /// yet; replaces any previous selection.
    ///
    /// # Errors
    ///
    /// Rejected with the reason the selection is illegal.
    pub fn select(&mut self, pos: Coord) -> ActionResult<AntId> {
        self.ensure_ongoing()?;
        if !self.world.is_in_bounds(pos) {
            return Err(ActionError::OutOfBounds);
        }
        let id = self.world.ant_at(pos).ok_or(ActionError::NoSuchUnit)?;
        let ant = self.world.ant(id).ok_or(ActionError::NoSuchUnit)?;
        if Some(ant.owner) != self.active_player() {
            return Err(ActionError::NotYourTurn);
        }
        if ant.has_acted {
            return Err(ActionError::AlreadyActed);
        }
        self.selected = Some(id);
        Ok(id)
    }

    /// Clear the selection unconditionally.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Move legality: target in bounds, the ant has not acted, the target
    /// is cardinally adjacent, and no ant occupies it.
    ///
    /// Pure: calling this any number of times mutates nothing.
    ///
    /// # Errors
    ///
    /// Returns the first violated clause.
    pub fn can_move(&self, ant: AntId, target: Coord) -> ActionResult<()> {
        if !self.world.is_in_bounds(target) {
            return Err(ActionError::OutOfBounds);
        }
        let ant = self.world.ant(ant).ok_or(ActionError::NoSuchUnit)?;
        if ant.has_acted {
            return Err(ActionError::AlreadyActed);
        }
        if !ant.pos.is_adjacent(target) {
            return Err(ActionError::NotAdjacent);
        }
        if self.world.ant_at(target).is_some() {
            return Err(ActionError::CellOccupied);
        }
        Ok(())
    }

    /// Attack legality: target in bounds, the attacker has not acted, the
    /// target is cardinally adjacent and holds an enemy ant.
    ///
    /// Pure, like [`TurnEngine::can_move`].
    ///
    /// # Errors
    ///
    /// Returns the first violated clause.
    pub fn can_attack(&self, attacker: AntId, target: Coord) -> ActionResult<()> {
        if !self.world.is_in_bounds(target) {
            return Err(ActionError::OutOfBounds);
        }
        let attacker = self.world.ant(attacker).ok_or(ActionError::NoSuchUnit)?;
        if attacker.has_acted {
            return Err(ActionError::AlreadyActed);
        }
        if !attacker.pos.is_adjacent(target) {
            return Err(ActionError::NotAdjacent);
        }
        let defender_id = self.world.ant_at(target).ok_or(ActionError::NoSuchUnit)?;
        let defender = self.world.ant(defender_id).ok_or(ActionError::NoSuchUnit)?;
        if defender.owner == attacker.owner {
            return Err(ActionError::NoSuchUnit);
        }
        Ok(())
    }

    /// Move the selected ant to `target`.
    ///
    /// On success, in this fixed order: the ant relocates; if the target
    /// held food and the ant was not carrying, the food is consumed and the
    /// ant carries it; if the target is the owner's anthill tile and the
    /// ant was carrying, the food is delivered for one point and the win
    /// condition re-checked; the ant's action is spent; the selection is
    /// cleared.
    ///
    /// # Errors
    ///
    /// Rejected without side effects if no ant is selected or any move
    /// legality clause fails.
    pub fn move_to(&mut self, target: Coord) -> ActionResult<()> {
        self.ensure_ongoing()?;
        let id = self.selected.ok_or(ActionError::NoSuchUnit)?;
        self.can_move(id, target)?;

        let (owner, was_carrying) = {
            let ant = self.world.ant(id).ok_or(ActionError::NoSuchUnit)?;
            (ant.owner, ant.carrying_food)
        };

        let relocated = self.world.relocate_ant(id, target);
        debug_assert!(relocated, "legality was checked above");

        // Pickup and delivery both key off the carrying flag as it was at
        // move start, so at most one of them fires per move.
        if !was_carrying {
            if let Some(food_id) = self.world.food_at(target) {
                let consumed = self.world.remove_food(food_id);
                debug_assert!(consumed);
                if let Some(ant) = self.world.ant_mut(id) {
                    ant.carrying_food = true;
                }
            }
        }
        if was_carrying && self.world.anthill_owner_at(target) == Some(owner) {
            if let Some(ant) = self.world.ant_mut(id) {
                ant.carrying_food = false;
            }
            self.scores[owner.index()] += 1;
            self.refresh_outcome();
        }

        if let Some(ant) = self.world.ant_mut(id) {
            ant.has_acted = true;
        }
        self.selected = None;
        Ok(())
    }

    /// Attack the enemy ant at `target` with the selected ant.
    ///
    /// The defender loses the attacker's damage, clamped at 0 health. A
    /// carrying defender spills its food, which is destroyed. A defender at
    /// 0 health is removed in the same transaction and the win condition
    /// re-checked. The attacker's action is spent and the selection
    /// cleared.
    ///
    /// # Errors
    ///
    /// Rejected without side effects if no ant is selected or any attack
    /// legality clause fails.
    pub fn attack(&mut self, target: Coord) -> ActionResult<()> {
        self.ensure_ongoing()?;
        let attacker_id = self.selected.ok_or(ActionError::NoSuchUnit)?;
        self.can_attack(attacker_id, target)?;

        let damage = self
            .world
            .ant(attacker_id)
            .ok_or(ActionError::NoSuchUnit)?
            .attack_damage;
        let defender_id = self.world.ant_at(target).ok_or(ActionError::NoSuchUnit)?;

        let mut defender_dead = false;
        if let Some(defender) = self.world.ant_mut(defender_id) {
            defender.health = defender.health.saturating_sub(damage);
            if defender.carrying_food {
                // Spilled food is destroyed, never re-placed on the board.
                defender.carrying_food = false;
                self.food_lost += 1;
            }
            defender_dead = defender.health == 0;
        }

        if let Some(attacker) = self.world.ant_mut(attacker_id) {
            attacker.has_acted = true;
        }

        if defender_dead {
            let removed = self.world.remove_ant(defender_id);
            debug_assert!(removed);
            self.refresh_outcome();
        }

        self.selected = None;
        Ok(())
    }

    /// End the active player's turn.
    ///
    /// Clears the selection, resets the acted flag on every ant the
    /// currently active player owns, hands control to the other side, and
    /// increments the turn counter when control returns to player 1.
    ///
    /// # Errors
    ///
    /// Rejected once the game is over.
    pub fn end_turn(&mut self) -> ActionResult<()> {
        self.ensure_ongoing()?;
        self.selected = None;

        match self.phase {
            Phase::Player1Turn => {
                self.world.reset_actions(Player::One);
                self.phase = Phase::Player2Turn;
            }
            Phase::Player2Turn => {
                self.world.reset_actions(Player::Two);
                self.phase = Phase::Player1Turn;
                self.turn += 1;
            }
            Phase::GameOver => unreachable!("ensure_ongoing rejected this"),
        }

        self.refresh_outcome();
        Ok(())
    }

    /// Reset the session wholesale to a fresh start of the same
    /// configuration. With a seeded random layout this reproduces the
    /// identical board.
    ///
    /// # Errors
    ///
    /// Propagates setup failure, which cannot occur for a configuration
    /// that built once already.
    pub fn restart(&mut self) -> Result<(), SetupError> {
        *self = Self::new(self.config.clone())?;
        Ok(())
    }

    /// Re-evaluate the win conditions and record the first terminal
    /// outcome. Once terminal, the outcome is never overwritten.
    fn refresh_outcome(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        let result = outcome::evaluate(
            &self.world,
            self.scores,
            self.turn,
            self.config.max_turns,
        );
        if result.is_terminal() {
            self.outcome = result;
            self.phase = Phase::GameOver;
            self.selected = None;
        }
    }
}
