use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::*;

/// Reveals a single cell, flood-filling outward from cells with no adjacent mines.
///
/// Mines must already be placed and counted. Acting on a finished game, an out-of-range
/// coordinate, or a shown or marked cell is a no-op. Striking a mine shows it and takes a
/// life; deciding between a flash and a loss is left to the caller.
pub fn reveal_cell(
    board: &mut Board,
    state: &mut GameState,
    coords: Coord2,
    updates: &mut Vec<CellUpdate>,
) -> RevealOutcome {
    if !state.is_on() || !board.get(coords).is_some_and(|cell| cell.is_concealed()) {
        return RevealOutcome::NoOp;
    }

    if board[coords].is_mine {
        show(board, state, coords, updates);
        let remaining = state.lose_life();
        log::debug!("Mine struck at {:?}, {} lives left", coords, remaining);
        return RevealOutcome::RevealedMine;
    }

    show(board, state, coords, updates);
    if board[coords].mines_around > 0 {
        return RevealOutcome::RevealedNumber;
    }

    let mut to_visit: VecDeque<_> = board.iter_neighbors(coords).collect();
    log::trace!("Starting flood-fill from {:?}", coords);

    while let Some(visit_coords) = to_visit.pop_front() {
        let cell = board[visit_coords];
        if !cell.is_concealed() || cell.is_mine {
            continue;
        }

        show(board, state, visit_coords, updates);
        if cell.mines_around == 0 {
            to_visit.extend(
                board
                    .iter_neighbors(visit_coords)
                    .filter(|&pos| board[pos].is_concealed()),
            );
        }
    }

    RevealOutcome::RevealedCascade
}

fn show(board: &mut Board, state: &mut GameState, coords: Coord2, updates: &mut Vec<CellUpdate>) {
    let cell = &mut board[coords];
    cell.is_shown = true;
    state.shown_count += 1;
    updates.push(CellUpdate::new(coords, cell.view()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: Coord, mines: &[Coord2]) -> Board {
        let mut board = build_board(size);
        for &pos in mines {
            board[pos].is_mine = true;
        }
        compute_adjacency(&mut board);
        board
    }

    fn running(lives: u8) -> GameState {
        GameState {
            phase: Phase::Running,
            shown_count: 0,
            marked_count: 0,
            lives_remaining: lives,
            elapsed_secs: 0,
        }
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let mut board = board_with(3, &[(0, 0)]);
        let mut state = running(1);
        let mut updates = Vec::new();

        let outcome = reveal_cell(&mut board, &mut state, (1, 1), &mut updates);

        assert_eq!(outcome, RevealOutcome::RevealedNumber);
        assert_eq!(state.shown_count, 1);
        assert_eq!(updates, [CellUpdate::new((1, 1), CellView::Number(1))]);
    }

    #[test]
    fn cascade_stops_at_numbers_and_skips_mines() {
        let mut board = board_with(4, &[(3, 3)]);
        let mut state = running(1);
        let mut updates = Vec::new();

        let outcome = reveal_cell(&mut board, &mut state, (0, 0), &mut updates);

        assert_eq!(outcome, RevealOutcome::RevealedCascade);
        assert_eq!(state.shown_count, 15);
        assert_eq!(updates.len(), 15);
        assert!(!board[(3, 3)].is_shown);
        assert_eq!(board[(2, 2)].view(), CellView::Number(1));
    }

    #[test]
    fn cascade_region_is_bounded_by_numbers() {
        // wall of mines down column 2 splits the board
        let mut board = board_with(5, &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);
        let mut state = running(1);
        let mut updates = Vec::new();

        reveal_cell(&mut board, &mut state, (0, 0), &mut updates);

        for pos in board.iter_coords() {
            let cell = board[pos];
            assert!(!(cell.is_mine && cell.is_shown));
            if pos.1 < 2 {
                assert!(cell.is_shown, "{pos:?} should be shown");
            } else {
                assert!(!cell.is_shown, "{pos:?} should stay hidden");
            }
        }
        for pos in board.iter_coords().filter(|&pos| board[pos].is_shown) {
            let cell = board[pos];
            if cell.mines_around == 0 {
                assert!(board.iter_neighbors(pos).all(|n| board[n].is_shown));
            }
        }
    }

    #[test]
    fn cascade_leaves_marked_cells_alone() {
        let mut board = board_with(3, &[]);
        board[(2, 2)].is_marked = true;
        let mut state = running(1);
        let mut updates = Vec::new();

        reveal_cell(&mut board, &mut state, (0, 0), &mut updates);

        assert_eq!(state.shown_count, 8);
        assert!(!board[(2, 2)].is_shown);
        assert_eq!(board[(2, 2)].view(), CellView::Marked);
    }

    #[test]
    fn mine_takes_a_life() {
        let mut board = board_with(2, &[(0, 1)]);
        let mut state = running(2);
        let mut updates = Vec::new();

        let outcome = reveal_cell(&mut board, &mut state, (0, 1), &mut updates);

        assert_eq!(outcome, RevealOutcome::RevealedMine);
        assert_eq!(state.lives_remaining, 1);
        assert_eq!(state.shown_count, 1);
        assert_eq!(updates, [CellUpdate::new((0, 1), CellView::Mine)]);
    }

    #[test]
    fn preconditions_make_reveal_a_noop() {
        let mut board = board_with(2, &[]);
        board[(0, 0)].is_marked = true;
        let mut state = running(1);
        let mut updates = Vec::new();

        assert_eq!(
            reveal_cell(&mut board, &mut state, (0, 0), &mut updates),
            RevealOutcome::NoOp
        );
        assert_eq!(
            reveal_cell(&mut board, &mut state, (5, 0), &mut updates),
            RevealOutcome::NoOp
        );

        state.finish(true);
        assert_eq!(
            reveal_cell(&mut board, &mut state, (1, 1), &mut updates),
            RevealOutcome::NoOp
        );
        assert!(updates.is_empty());
        assert_eq!(state.shown_count, 0);
    }
}
