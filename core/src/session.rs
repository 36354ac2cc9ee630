use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// How long a struck mine stays on display when the player survives it.
pub const FLASH_DURATION: Duration = Duration::from_millis(600);

/// Deferred hide of a flashing mine, only honoured by the session generation that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashTask {
    pub epoch: u32,
    pub coords: Coord2,
    pub delay: Duration,
}

/// One game from deal to win or loss, owning its board and counters.
///
/// Every action is synchronous and returns a [`Report`] describing what to redraw. The session
/// never keeps time itself: the caller feeds [`Session::on_tick`] once per second and calls
/// [`Session::end_flash`] when a scheduled [`FlashTask`] is due.
#[derive(Clone, Debug)]
pub struct Session<P = RandomPlacer> {
    level: LevelConfig,
    board: Board,
    state: GameState,
    placer: P,
    epoch: u32,
    pending_flashes: BTreeSet<Coord2>,
}

impl Session<RandomPlacer> {
    pub fn with_seed(level: LevelConfig, seed: u64) -> Result<Self> {
        Self::new(level, RandomPlacer::new(seed))
    }
}

impl<P: MinePlacer> Session<P> {
    pub fn new(level: LevelConfig, placer: P) -> Result<Self> {
        level.validate()?;
        Ok(Self {
            board: build_board(level.size),
            state: GameState::new(&level),
            level,
            placer,
            epoch: 0,
            pending_flashes: BTreeSet::new(),
        })
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn placer_mut(&mut self) -> &mut P {
        &mut self.placer
    }

    pub fn cell_view(&self, coords: Coord2) -> Option<CellView> {
        self.board.get(coords).map(|cell| cell.view())
    }

    /// How many mines have not been flagged yet.
    pub fn mines_left(&self) -> isize {
        (self.level.mines as isize) - (self.state.marked_count as isize)
    }

    /// Deals a fresh board for `level`, discarding the current one and every pending task.
    pub fn start(&mut self, level: LevelConfig) -> Result<Report> {
        level.validate()?;
        self.level = level;
        Ok(self.restart())
    }

    /// Deals a fresh board for the current level.
    pub fn restart(&mut self) -> Report {
        self.board = build_board(self.level.size);
        self.state = GameState::new(&self.level);
        self.epoch = self.epoch.wrapping_add(1);
        self.pending_flashes.clear();
        log::debug!(
            "Session {} started: {} {}x{}, {} mines, {} lives",
            self.epoch,
            self.level.name,
            self.level.size,
            self.level.size,
            self.level.mines,
            self.level.lives
        );

        let mut report = Report::new(());
        report.events.push(SessionEvent::Started);
        report
    }

    pub fn reveal(&mut self, coords: Coord2) -> Report<RevealOutcome> {
        let mut report = Report::new(RevealOutcome::NoOp);
        if !self.state.is_on() || !self.board.get(coords).is_some_and(|cell| cell.is_concealed())
        {
            return report;
        }

        if self.state.is_first_click() {
            if let Err(err) = self.lay_mines(coords) {
                log::error!("Could not place mines around {:?}: {}", coords, err);
                return report;
            }
            self.state.start_running();
        }

        report.outcome = reveal_cell(
            &mut self.board,
            &mut self.state,
            coords,
            &mut report.updates,
        );
        match report.outcome {
            RevealOutcome::NoOp => {}
            RevealOutcome::RevealedMine => self.struck_mine(coords, &mut report),
            RevealOutcome::RevealedNumber | RevealOutcome::RevealedCascade => {
                self.evaluate_victory(&mut report)
            }
        }
        report
    }

    pub fn toggle_mark(&mut self, coords: Coord2) -> Report<MarkOutcome> {
        let mut report = Report::new(MarkOutcome::NoOp);
        report.outcome = toggle_mark(
            &mut self.board,
            &mut self.state,
            coords,
            &mut report.updates,
        );
        if report.outcome.has_update() {
            self.evaluate_victory(&mut report);
        }
        report
    }

    /// Hides a flashing mine again. Tasks from an earlier deal, or cancelled by the end of the
    /// game, do nothing.
    pub fn end_flash(&mut self, task: FlashTask) -> Report {
        let mut report = Report::new(());
        if task.epoch != self.epoch || !self.pending_flashes.remove(&task.coords) {
            log::trace!("Ignoring stale flash task {:?}", task);
            return report;
        }

        let cell = &mut self.board[task.coords];
        cell.is_shown = false;
        self.state.shown_count -= 1;
        report.updates.push(CellUpdate::new(task.coords, cell.view()));
        report
    }

    /// Advances the game clock by one second while the game is running.
    pub fn on_tick(&mut self) -> u32 {
        if self.state.phase == Phase::Running {
            self.state.elapsed_secs += 1;
        }
        self.state.elapsed_secs
    }

    fn lay_mines(&mut self, first: Coord2) -> Result<()> {
        let excluded = self.level.safe_start.excluded_cells(first, self.level.size);
        self.placer.place(&mut self.board, self.level.mines, &excluded)?;
        compute_adjacency(&mut self.board);
        log::debug!(
            "Placed {} mines after first click at {:?}",
            self.board.mine_count(),
            first
        );
        Ok(())
    }

    fn struck_mine<O>(&mut self, coords: Coord2, report: &mut Report<O>) {
        let remaining = self.state.lives_remaining;
        report.events.push(SessionEvent::LifeLost { remaining });

        if check_loss(&self.state) {
            self.lose(report);
        } else {
            let task = FlashTask {
                epoch: self.epoch,
                coords,
                delay: FLASH_DURATION,
            };
            self.pending_flashes.insert(coords);
            report.events.push(SessionEvent::FlashScheduled(task));
        }
    }

    fn lose<O>(&mut self, report: &mut Report<O>) {
        self.state.finish(false);
        self.pending_flashes.clear();

        let mut exposed_mines = Vec::new();
        for coords in self.board.iter_coords() {
            let cell = &mut self.board[coords];
            if cell.is_mine && !cell.is_shown {
                cell.is_shown = true;
                self.state.shown_count += 1;
                report.updates.push(CellUpdate::new(coords, cell.view()));
                exposed_mines.push(coords);
            }
        }
        report.events.push(SessionEvent::Lost { exposed_mines });
    }

    fn evaluate_victory<O>(&mut self, report: &mut Report<O>) {
        // flashing mines are only on display, they are not revealed
        let mut settled = self.state;
        settled.shown_count -= self.pending_flashes.len() as CellCount;
        if check_victory(&settled, &self.level) {
            self.state.finish(true);
            self.pending_flashes.clear();
            report.events.push(SessionEvent::Won);
        }
    }
}
