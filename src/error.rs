//! Error types for the game engine.

use std::fmt;

/// Reasons an intended action is rejected by the engine.
///
/// All of these are recoverable classification errors: the engine rejects
/// the action without mutating any state and the caller decides what to do
/// next (for a human player, typically re-prompt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// The target coordinate lies outside the grid.
    OutOfBounds,
    /// The addressed unit is not owned by the active player.
    NotYourTurn,
    /// The unit already spent its action this turn.
    AlreadyActed,
    /// The target cell is not cardinally adjacent to the unit.
    NotAdjacent,
    /// The target cell already holds an ant.
    CellOccupied,
    /// No unit exists where one was expected (empty selection, empty cell,
    /// or no enemy at the attack target).
    NoSuchUnit,
    /// A terminal outcome has been recorded; no further actions are accepted.
    GameAlreadyOver,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::OutOfBounds => write!(f, "target is out of bounds"),
            ActionError::NotYourTurn => write!(f, "unit is not owned by the active player"),
            ActionError::AlreadyActed => write!(f, "unit has already acted this turn"),
            ActionError::NotAdjacent => write!(f, "target is not adjacent"),
            ActionError::CellOccupied => write!(f, "target cell is occupied"),
            ActionError::NoSuchUnit => write!(f, "no such unit"),
            ActionError::GameAlreadyOver => write!(f, "the game is already over"),
        }
    }
}

impl std::error::Error for ActionError {}

/// Result type for engine actions.
pub type ActionResult<T> = Result<T, ActionError>;
