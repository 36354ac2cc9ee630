use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of a session.
///
/// Valid transitions:
/// - Ready -> Running (first reveal)
/// - Running -> Won
/// - Running -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Mines not yet placed, waiting for the first reveal.
    #[default]
    Ready,
    Running,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Counters and lifecycle of one session, replaced together with its board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub shown_count: CellCount,
    pub marked_count: CellCount,
    pub lives_remaining: u8,
    pub elapsed_secs: u32,
}

impl GameState {
    pub fn new(level: &LevelConfig) -> Self {
        Self {
            phase: Phase::Ready,
            shown_count: 0,
            marked_count: 0,
            lives_remaining: level.lives,
            elapsed_secs: 0,
        }
    }

    /// Whether the session still accepts moves.
    pub const fn is_on(&self) -> bool {
        !self.phase.is_finished()
    }

    pub const fn is_first_click(&self) -> bool {
        self.phase.is_ready()
    }

    pub(crate) fn start_running(&mut self) {
        if self.phase.is_ready() {
            log::debug!("Session running");
            self.phase = Phase::Running;
        }
    }

    pub(crate) fn finish(&mut self, won: bool) {
        if self.phase.is_finished() {
            return;
        }
        self.phase = if won { Phase::Won } else { Phase::Lost };
        log::debug!("Session finished: {:?}", self.phase);
    }

    /// Takes one life, returning how many are left.
    pub(crate) fn lose_life(&mut self) -> u8 {
        self.lives_remaining = self.lives_remaining.saturating_sub(1);
        self.lives_remaining
    }
}
