//! Rejections reported back to whoever drives the game.
//!
//! None of these are fatal: a rejected call leaves the session exactly as it
//! was, and the caller may simply try again with different input.

use thiserror::Error;

use crate::game_engine::models::PhaseKind;

/// The player pointed at a container that can't be used for this action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("container {index} does not exist")]
    OutOfRange { index: usize },

    #[error("container {index} is your own and can't be opened")]
    OwnContainer { index: usize },

    #[error("container {index} has already been opened")]
    AlreadyOpened { index: usize },

    #[error("container {current} is already yours")]
    AlreadyPicked { current: usize },

    #[error("container {index} can't be swapped with itself")]
    SameContainer { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    #[error("`{action}` is not allowed while {phase}")]
    OutOfTurn { action: &'static str, phase: PhaseKind },

    #[error("option {choice} is not one of the {available} on offer")]
    NoSuchOption { choice: usize, available: usize },

    #[error("{requested} item containers requested, at most {max} allowed")]
    TooManyItems { requested: usize, max: usize },
}
