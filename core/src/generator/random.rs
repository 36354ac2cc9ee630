use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random placement from a seeded generator.
#[derive(Clone, Debug)]
pub struct RandomPlacer {
    rng: SmallRng,
}

impl RandomPlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinePlacer for RandomPlacer {
    fn place(
        &mut self,
        board: &mut Board,
        mines: CellCount,
        excluded: &BTreeSet<Coord2>,
    ) -> Result<()> {
        place_mines(board, mines, excluded, &mut self.rng)
    }
}

/// Lays a predetermined set of mines, for replays and deterministic play.
///
/// The layout is used verbatim: the requested count and the exclusion set are only checked
/// and logged, never enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayout {
    mines: Vec<Coord2>,
}

impl FixedLayout {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinePlacer for FixedLayout {
    fn place(
        &mut self,
        board: &mut Board,
        mines: CellCount,
        excluded: &BTreeSet<Coord2>,
    ) -> Result<()> {
        if let Some(&coords) = self.mines.iter().find(|&&pos| !board.contains(pos)) {
            return Err(GameError::InvalidCoords(coords));
        }

        for &coords in &self.mines {
            if excluded.contains(&coords) {
                log::warn!("Fixed layout puts a mine on protected cell {:?}", coords);
            }
            board[coords].is_mine = true;
        }

        let count = board.mine_count();
        if count != mines {
            log::warn!(
                "Fixed layout count mismatch, actual: {}, requested: {}",
                count,
                mines
            );
        }
        Ok(())
    }
}
