use crate::*;

/// A board is won once every safe cell is shown *and* exactly as many cells as there are mines
/// are marked. Revealing all safe cells alone does not win.
pub fn check_victory(state: &GameState, level: &LevelConfig) -> bool {
    state.shown_count == level.safe_cells() && state.marked_count == level.mines
}

/// The session is lost once the last life is gone.
pub fn check_loss(state: &GameState) -> bool {
    state.lives_remaining == 0
}
