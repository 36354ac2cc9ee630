use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle signal raised by a session action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A fresh board was dealt and should be drawn from scratch.
    Started,
    LifeLost { remaining: u8 },
    /// A struck mine is on display and should be hidden again once the task is due.
    FlashScheduled(FlashTask),
    Won,
    /// Mines that were hidden until the loss, now shown.
    Lost { exposed_mines: Vec<Coord2> },
}

/// Everything a single action changed, for the presentation layer to render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report<O = ()> {
    pub outcome: O,
    pub updates: Vec<CellUpdate>,
    pub events: Vec<SessionEvent>,
}

impl<O> Report<O> {
    pub fn new(outcome: O) -> Self {
        Self {
            outcome,
            updates: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.events.is_empty()
    }

    pub fn has_event(&self, event: &SessionEvent) -> bool {
        self.events.contains(event)
    }

    /// Flash tasks the caller has to schedule.
    pub fn flash_tasks(&self) -> impl Iterator<Item = FlashTask> + '_ {
        self.events.iter().filter_map(|event| match event {
            SessionEvent::FlashScheduled(task) => Some(*task),
            _ => None,
        })
    }

    /// Replays this report against a presenter: cell updates first, then lifecycle signals.
    pub fn dispatch<T: Presenter + ?Sized>(&self, board: &Board, presenter: &mut T) {
        if self.has_event(&SessionEvent::Started) {
            presenter.render_board(board);
        }
        if !self.updates.is_empty() {
            presenter.update_cells(&self.updates);
        }
        for event in &self.events {
            match event {
                SessionEvent::Started => {}
                SessionEvent::LifeLost { remaining } => presenter.life_lost(*remaining),
                SessionEvent::FlashScheduled(task) => presenter.flash_scheduled(*task),
                SessionEvent::Won => presenter.session_won(),
                SessionEvent::Lost { exposed_mines } => presenter.session_lost(exposed_mines),
            }
        }
    }
}

/// Rendering side of a session. Every hook defaults to doing nothing.
pub trait Presenter {
    fn render_board(&mut self, _board: &Board) {}

    fn update_cells(&mut self, _updates: &[CellUpdate]) {}

    fn life_lost(&mut self, _remaining: u8) {}

    fn flash_scheduled(&mut self, _task: FlashTask) {}

    fn session_won(&mut self) {}

    fn session_lost(&mut self, _exposed_mines: &[Coord2]) {}
}
