/// Single coordinate axis used for the board side length and positions.
pub type Coord = u8;

/// Count type used for mine counts, cell counts and reveal tallies.
pub type CellCount = u16;

/// Board coordinates as `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a square board with the given side.
pub const fn square(side: Coord) -> CellCount {
    let side = side as CellCount;
    side.saturating_mul(side)
}

/// Chebyshev (king-move) distance between two cells.
pub const fn chebyshev((r0, c0): Coord2, (r1, c1): Coord2) -> Coord {
    let dr = r0.abs_diff(r1);
    let dc = c0.abs_diff(c1);
    if dr > dc { dr } else { dc }
}

const MOORE_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Shifts `coords` by `offset`, returning a value only when it stays on a board of side `side`.
fn offset_within((row, col): Coord2, (dr, dc): (i8, i8), side: Coord) -> Option<Coord2> {
    let row = row.checked_add_signed(dr)?;
    let col = col.checked_add_signed(dc)?;
    (row < side && col < side).then_some((row, col))
}

/// Iterates the in-bounds Moore neighbours of a cell, never the cell itself.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    side: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, side: Coord) -> Self {
        Self {
            center,
            side,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = MOORE_OFFSETS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(coords) = offset_within(self.center, offset, self.side) {
                return Some(coords);
            }
        }
        None
    }
}
