//! Win-condition evaluation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{GridWorld, Player};

/// The result of evaluating the win conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// No terminal condition has fired.
    Ongoing,
    /// Player 1 has won.
    Player1Wins,
    /// Player 2 has won.
    Player2Wins,
    /// The game ended with neither side ahead.
    Tie,
}

impl Outcome {
    /// Whether this is a terminal outcome.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// The winning side, if there is one.
    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::Player1Wins => Some(Player::One),
            Outcome::Player2Wins => Some(Player::Two),
            Outcome::Ongoing | Outcome::Tie => None,
        }
    }

    const fn win_for(player: Player) -> Self {
        match player {
            Player::One => Outcome::Player1Wins,
            Player::Two => Outcome::Player2Wins,
        }
    }

    /// Decide a finished game purely on score.
    const fn from_scores(scores: [u32; 2]) -> Self {
        if scores[0] > scores[1] {
            Outcome::Player1Wins
        } else if scores[1] > scores[0] {
            Outcome::Player2Wins
        } else {
            Outcome::Tie
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "Ongoing"),
            Outcome::Player1Wins => write!(f, "Game Over - Player 1 Wins!"),
            Outcome::Player2Wins => write!(f, "Game Over - Player 2 Wins!"),
            Outcome::Tie => write!(f, "Game Over - Tie!"),
        }
    }
}

/// Evaluate the win conditions for the given world and scores.
///
/// Pure: never mutates anything, and the engine records the first terminal
/// result it returns, ignoring later evaluations. Conditions are checked in
/// priority order, first match wins:
///
/// 1. A side has no ants left: the other side wins; both empty is a tie.
/// 2. No food remains, on the board or in transit: higher score wins.
/// 3. The turn counter has exceeded the configured maximum: higher score
///    wins.
#[must_use]
pub fn evaluate(world: &GridWorld, scores: [u32; 2], turn: u32, max_turns: Option<u32>) -> Outcome {
    let p1_wiped = world.ant_count(Player::One) == 0;
    let p2_wiped = world.ant_count(Player::Two) == 0;
    match (p1_wiped, p2_wiped) {
        (true, true) => return Outcome::Tie,
        (true, false) => return Outcome::win_for(Player::Two),
        (false, true) => return Outcome::win_for(Player::One),
        (false, false) => {}
    }

    if world.food_remaining() == 0 && world.carrying_count() == 0 {
        return Outcome::from_scores(scores);
    }

    if let Some(max_turns) = max_turns {
        if turn > max_turns {
            return Outcome::from_scores(scores);
        }
    }

    Outcome::Ongoing
}
