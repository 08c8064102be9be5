//! Entity records: players, ants, food, anthills.
//!
//! These are pure data. All state transitions (movement, damage, pickup,
//! delivery) are applied by the engine; nothing here mutates itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Coord;

/// One of the two sides in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player 1, spawning along the bottom rows.
    One,
    /// Player 2, spawning along the top rows.
    Two,
}

impl Player {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Zero-based index, for score arrays and the like.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// One-based player number, as shown to users.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Both players, in turn order.
    #[must_use]
    pub const fn both() -> [Player; 2] {
        [Player::One, Player::Two]
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Stable identity of an ant, assigned in creation order.
///
/// Identities are never reused within a session; the creation order is what
/// the scripted opponent iterates in, so it must stay stable across the
/// ant's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AntId(pub(crate) u32);

impl AntId {
    /// Index into the world's ant slot table.
    #[must_use]
    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }
}

/// Stable identity of a food item, assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FoodId(pub(crate) u32);

impl FoodId {
    /// Index into the world's food slot table.
    #[must_use]
    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }
}

/// A player-owned mobile unit occupying one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ant {
    /// Identity in creation order.
    pub id: AntId,
    /// Owning side.
    pub owner: Player,
    /// Current cell.
    pub pos: Coord,
    /// Remaining health. Always in `1..=max_health` for a live ant; the
    /// engine removes an ant in the same transaction that reduces it to 0.
    pub health: u32,
    /// Health the ant was created with.
    pub max_health: u32,
    /// Damage dealt per attack.
    pub attack_damage: u32,
    /// Whether the ant has spent its one action this owner-turn.
    pub has_acted: bool,
    /// Whether the ant picked up food it has not yet delivered.
    pub carrying_food: bool,
}

impl Ant {
    pub(crate) const fn new(
        id: AntId,
        owner: Player,
        pos: Coord,
        max_health: u32,
        attack_damage: u32,
    ) -> Self {
        Self {
            id,
            owner,
            pos,
            health: max_health,
            max_health,
            attack_damage,
            has_acted: false,
            carrying_food: false,
        }
    }
}

/// A food item sitting on the board, waiting to be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    /// Identity in creation order.
    pub id: FoodId,
    /// Cell the item occupies.
    pub pos: Coord,
}

/// A fixed, player-owned base. Delivering food to any of its tiles scores
/// a point. Anthills are created at setup and never destroyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anthill {
    /// Owning side.
    pub owner: Player,
    /// The cells the anthill occupies, in authored order. Observed layouts
    /// are a single cell or a 2x3 block of 6 cells; any non-empty list of
    /// distinct in-bounds cells is accepted.
    pub tiles: Vec<Coord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent_roundtrip() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        for p in Player::both() {
            assert_eq!(p.opponent().opponent(), p);
        }
    }

    #[test]
    fn test_player_display() {
        assert_eq!(Player::One.to_string(), "Player 1");
        assert_eq!(Player::Two.to_string(), "Player 2");
    }

    #[test]
    fn test_new_ant_starts_fresh() {
        let ant = Ant::new(AntId(0), Player::One, Coord::new(3, 4), 3, 1);
        assert_eq!(ant.health, 3);
        assert!(!ant.has_acted);
        assert!(!ant.carrying_food);
    }
}
