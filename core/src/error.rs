use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one cell")]
    EmptyBoard,
    #[error("Board side {0} does not fit the coordinate range")]
    BoardTooLarge(usize),
    #[error("Level must start with at least one life")]
    NoLives,
    #[error("Too many mines, requested {requested} but only {available} cells can hold one")]
    TooManyMines {
        requested: CellCount,
        available: CellCount,
    },
    #[error("No level with index {0}")]
    UnknownLevel(usize),
    #[error("Invalid coordinates {0:?}")]
    InvalidCoords(Coord2),
}

pub type Result<T> = core::result::Result<T, GameError>;
