use std::fmt::{self, Write as _};

use ndarray::Array2;
use sapper_core::{Board, CellUpdate, CellView, Coord2, FlashTask, GameState, Presenter, ToNdIndex};

/// Text rendering of a session, buffered until the caller flushes it.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    views: Array2<CellView>,
    out: String,
}

impl TerminalPresenter {
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.out)
    }

    pub fn view_at(&self, coords: Coord2) -> Option<CellView> {
        self.views.get(coords.to_nd_index()).copied()
    }

    pub fn draw(&mut self, state: &GameState, mines_left: isize) -> fmt::Result {
        let size = self.views.nrows();

        self.out.push_str("   ");
        for col in 0..size {
            write!(self.out, "{:>2}", col % 100)?;
        }
        self.out.push('\n');

        for (row, cells) in self.views.rows().into_iter().enumerate() {
            write!(self.out, "{:>2} ", row % 100)?;
            for &view in cells {
                write!(self.out, " {}", glyph(view))?;
            }
            self.out.push('\n');
        }

        writeln!(
            self.out,
            "lives: {}  mines left: {}  time: {}s",
            "♥".repeat(state.lives_remaining.into()),
            mines_left,
            state.elapsed_secs
        )
    }

    fn say(&mut self, message: &str) {
        self.out.push_str(message);
        self.out.push('\n');
    }
}

fn glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Marked => 'F',
        CellView::Number(0) => '.',
        CellView::Number(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Mine => '*',
    }
}

impl Presenter for TerminalPresenter {
    fn render_board(&mut self, board: &Board) {
        let size = usize::from(board.size());
        self.views = Array2::from_shape_fn((size, size), |(row, col)| {
            board[(row as u8, col as u8)].view()
        });
    }

    fn update_cells(&mut self, updates: &[CellUpdate]) {
        for update in updates {
            if let Some(view) = self.views.get_mut(update.coords.to_nd_index()) {
                *view = update.view;
            }
        }
    }

    fn life_lost(&mut self, remaining: u8) {
        self.say(&format!("Boom! {remaining} lives left."));
    }

    fn flash_scheduled(&mut self, task: FlashTask) {
        log::debug!("Mine at {:?} hides again in {:?}", task.coords, task.delay);
    }

    fn session_won(&mut self) {
        self.say("All mines found, you win!");
    }

    fn session_lost(&mut self, exposed_mines: &[Coord2]) {
        log::debug!("Exposed mines: {:?}", exposed_mines);
        self.say("Game over.");
    }
}
