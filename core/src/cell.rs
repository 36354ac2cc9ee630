use serde::{Deserialize, Serialize};

/// One square of the board.
///
/// `is_mine` is fixed once mines are placed. `is_shown` only goes from `false` to `true`,
/// except while a struck mine flashes. `is_marked` can only change while the cell is hidden.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_shown: bool,
    pub is_marked: bool,
    pub mines_around: u8,
}

impl Cell {
    /// Hidden and not flagged, the only state a reveal acts on.
    pub const fn is_concealed(self) -> bool {
        !self.is_shown && !self.is_marked
    }

    /// What the player should currently see for this cell.
    pub const fn view(self) -> CellView {
        match (self.is_shown, self.is_mine, self.is_marked) {
            (true, true, _) => CellView::Mine,
            (true, false, _) => CellView::Number(self.mines_around),
            (false, _, true) => CellView::Marked,
            (false, _, false) => CellView::Hidden,
        }
    }
}

/// Player-visible value of a cell, handed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Marked,
    /// Revealed safe cell, `Number(0)` renders as an empty square.
    Number(u8),
    Mine,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
