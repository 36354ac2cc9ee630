use alloc::collections::BTreeSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Deferred mine placement, run once on the first reveal of a session.
pub trait MinePlacer {
    /// Lays `mines` mines on a blank board, keeping every cell in `excluded` safe.
    fn place(
        &mut self,
        board: &mut Board,
        mines: CellCount,
        excluded: &BTreeSet<Coord2>,
    ) -> Result<()>;
}

/// Which cells around the first reveal are guaranteed to be mine-free.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafeStart {
    /// Only the clicked cell.
    Cell,
    /// The clicked cell and all its neighbours, so the opening always cascades.
    #[default]
    Neighborhood,
}

impl SafeStart {
    /// Largest exclusion set this policy can produce on a board of side `size`.
    pub fn worst_case_excluded(self, size: Coord) -> CellCount {
        match self {
            Self::Cell => square(size.min(1)),
            Self::Neighborhood => square(size.min(3)),
        }
    }

    pub fn excluded_cells(self, first: Coord2, size: Coord) -> BTreeSet<Coord2> {
        let mut excluded = BTreeSet::from([first]);
        if self == Self::Neighborhood {
            excluded.extend(NeighborIter::new(first, size));
        }
        excluded
    }
}

/// Builds a blank square board.
pub fn build_board(size: Coord) -> Board {
    Board::new(size)
}

/// Scatters `mines` mines by sampling uniform coordinates until enough distinct, non-excluded
/// cells are mined.
pub fn place_mines<R: Rng>(
    board: &mut Board,
    mines: CellCount,
    excluded: &BTreeSet<Coord2>,
    rng: &mut R,
) -> Result<()> {
    let available = board
        .iter_coords()
        .filter(|pos| !board[*pos].is_mine && !excluded.contains(pos))
        .count() as CellCount;
    if mines > available {
        log::warn!(
            "Refusing to place {} mines, only {} cells are free",
            mines,
            available
        );
        return Err(GameError::TooManyMines {
            requested: mines,
            available,
        });
    }

    let size = board.size();
    let mut placed = 0;
    while placed < mines {
        let coords = (rng.random_range(0..size), rng.random_range(0..size));
        if board[coords].is_mine || excluded.contains(&coords) {
            continue;
        }
        board[coords].is_mine = true;
        placed += 1;
    }

    Ok(())
}

/// Stores the number of mined Moore neighbours in every cell.
pub fn compute_adjacency(board: &mut Board) {
    for coords in board.iter_coords() {
        board[coords].mines_around = board.count_adjacent_mines(coords);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn neighborhood_exclusion_is_clipped_at_edges() {
        assert_eq!(SafeStart::Neighborhood.excluded_cells((0, 0), 4).len(), 4);
        assert_eq!(SafeStart::Neighborhood.excluded_cells((0, 1), 4).len(), 6);
        assert_eq!(SafeStart::Neighborhood.excluded_cells((1, 1), 4).len(), 9);
        assert_eq!(SafeStart::Cell.excluded_cells((1, 1), 4).len(), 1);
    }

    #[test]
    fn worst_case_exclusion_by_side() {
        assert_eq!(SafeStart::Neighborhood.worst_case_excluded(1), 1);
        assert_eq!(SafeStart::Neighborhood.worst_case_excluded(2), 4);
        assert_eq!(SafeStart::Neighborhood.worst_case_excluded(12), 9);
        assert_eq!(SafeStart::Cell.worst_case_excluded(12), 1);
    }

    #[test]
    fn place_mines_respects_count_and_exclusion() {
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut board = build_board(4);
            let excluded = SafeStart::Neighborhood.excluded_cells((0, 0), 4);

            place_mines(&mut board, 2, &excluded, &mut rng).unwrap();

            assert_eq!(board.mine_count(), 2);
            for pos in board.mine_coords() {
                assert!(!excluded.contains(&pos));
                assert!(chebyshev(pos, (0, 0)) >= 2);
            }
        }
    }

    #[test]
    fn place_mines_can_fill_every_free_cell() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = build_board(3);
        let excluded = SafeStart::Cell.excluded_cells((1, 1), 3);

        place_mines(&mut board, 8, &excluded, &mut rng).unwrap();

        assert_eq!(board.mine_count(), 8);
        assert!(!board[(1, 1)].is_mine);
    }

    #[test]
    fn place_mines_rejects_overfull_request() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut board = build_board(3);
        let excluded = SafeStart::Neighborhood.excluded_cells((1, 1), 3);

        let result = place_mines(&mut board, 1, &excluded, &mut rng);

        assert_eq!(
            result,
            Err(GameError::TooManyMines {
                requested: 1,
                available: 0
            })
        );
        assert_eq!(board.mine_count(), 0);
    }

    #[test]
    fn adjacency_counts_in_bound_neighbors_only() {
        let mut board = build_board(3);
        for pos in board.iter_coords().filter(|&pos| pos != (1, 1)) {
            board[pos].is_mine = true;
        }
        compute_adjacency(&mut board);

        assert_eq!(board[(1, 1)].mines_around, 8);
        assert_eq!(board[(0, 0)].mines_around, 2);
        assert_eq!(board[(0, 1)].mines_around, 4);

        let mut full = build_board(4);
        for pos in full.iter_coords() {
            full[pos].is_mine = true;
        }
        compute_adjacency(&mut full);

        assert_eq!(full[(0, 0)].mines_around, 3);
        assert_eq!(full[(0, 2)].mines_around, 5);
        assert_eq!(full[(2, 2)].mines_around, 8);
    }

    #[test]
    fn adjacency_matches_neighbor_scan() {
        let mut rng = SmallRng::seed_from_u64(99);
        let mut board = build_board(8);
        let excluded = SafeStart::Neighborhood.excluded_cells((4, 4), 8);
        place_mines(&mut board, 14, &excluded, &mut rng).unwrap();
        compute_adjacency(&mut board);

        for pos in board.iter_coords() {
            let expected = board
                .iter_neighbors(pos)
                .filter(|&n| board[n].is_mine)
                .count() as u8;
            assert_eq!(board[pos].mines_around, expected);
        }
    }
}
