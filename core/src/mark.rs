use alloc::vec::Vec;

use crate::*;

/// Flips the flag on a hidden cell. Finished games, shown cells and out-of-range coordinates
/// are left untouched.
pub fn toggle_mark(
    board: &mut Board,
    state: &mut GameState,
    coords: Coord2,
    updates: &mut Vec<CellUpdate>,
) -> MarkOutcome {
    if !state.is_on() || !board.get(coords).is_some_and(|cell| !cell.is_shown) {
        return MarkOutcome::NoOp;
    }

    let cell = &mut board[coords];
    cell.is_marked = !cell.is_marked;
    let outcome = if cell.is_marked {
        state.marked_count += 1;
        MarkOutcome::Marked
    } else {
        state.marked_count -= 1;
        MarkOutcome::Unmarked
    };
    updates.push(CellUpdate::new(coords, cell.view()));
    outcome
}
