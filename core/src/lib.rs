#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use evaluator::*;
pub use generator::*;
pub use level::*;
pub use mark::*;
pub use presenter::*;
pub use reveal::*;
pub use session::*;
pub use state::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod evaluator;
mod generator;
mod level;
mod mark;
mod presenter;
mod reveal;
mod session;
mod state;
mod types;

/// A cell whose displayed value changed, in the order the changes happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub coords: Coord2,
    pub view: CellView,
}

impl CellUpdate {
    pub const fn new(coords: Coord2, view: CellView) -> Self {
        Self { coords, view }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoOp,
    RevealedMine,
    RevealedNumber,
    RevealedCascade,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoOp => false,
            RevealedMine => true,
            RevealedNumber => true,
            RevealedCascade => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoOp,
    Marked,
    Unmarked,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoOp => false,
            Self::Marked | Self::Unmarked => true,
        }
    }
}
