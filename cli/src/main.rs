use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sapper_core::{LevelConfig, Phase, RandomPlacer, Report, Session};
use tracing_subscriber::filter::LevelFilter;
use web_time::Instant;

use command::{Command, HELP};
use render::TerminalPresenter;

mod command;
mod config;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Level to start on, by position in the level list
    #[arg(short, long, default_value_t = 0)]
    level: usize,

    /// TOML file with `[[level]]` tables replacing the built-in levels
    #[arg(long)]
    level_file: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) -> anyhow::Result<()> {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Error initializing logger")
}

/// Wall clock feeding one tick per elapsed second into the session.
struct Clock {
    last: Instant,
}

impl Clock {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    fn reset(&mut self) {
        self.last = Instant::now();
    }

    fn due_ticks(&mut self) -> u64 {
        let secs = self.last.elapsed().as_secs();
        self.last += Duration::from_secs(secs);
        secs
    }
}

struct Game {
    levels: Vec<LevelConfig>,
    session: Session<RandomPlacer>,
    presenter: TerminalPresenter,
    clock: Clock,
}

impl Game {
    fn show<O>(&mut self, report: &Report<O>) {
        report.dispatch(self.session.board(), &mut self.presenter);
    }

    fn new_session(&mut self, report: Report) {
        self.clock.reset();
        self.show(&report);
    }

    fn catch_up_clock(&mut self) {
        for _ in 0..self.clock.due_ticks() {
            self.session.on_tick();
        }
    }

    /// Keeps a struck mine on screen for its flash, then hides it again.
    fn run_flashes<O>(&mut self, report: &Report<O>, out: &mut impl Write) -> anyhow::Result<()> {
        for task in report.flash_tasks() {
            self.presenter
                .draw(self.session.state(), self.session.mines_left())?;
            out.write_all(self.presenter.take_output().as_bytes())?;
            out.flush()?;

            thread::sleep(task.delay);
            let hidden = self.session.end_flash(task);
            self.show(&hidden);
        }
        Ok(())
    }

    /// Applies one command, returning `false` when the player quits.
    fn handle(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<bool> {
        match command {
            Command::Reveal(coords) => {
                let report = self.session.reveal(coords);
                if !report.outcome.has_update() {
                    writeln!(out, "Nothing to reveal at {coords:?}")?;
                }
                self.show(&report);
                self.run_flashes(&report, out)?;
            }
            Command::Mark(coords) => {
                let report = self.session.toggle_mark(coords);
                if !report.outcome.has_update() {
                    writeln!(out, "Cannot mark {coords:?}")?;
                }
                self.show(&report);
            }
            Command::Restart => {
                let report = self.session.restart();
                self.new_session(report);
            }
            Command::Level(index) => match self.levels.get(index).cloned() {
                Some(level) => {
                    let report = self.session.start(level)?;
                    self.new_session(report);
                }
                None => writeln!(out, "No level {index}, pick 0..{}", self.levels.len())?,
            },
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn prompt(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        self.presenter
            .draw(self.session.state(), self.session.mines_left())?;
        out.write_all(self.presenter.take_output().as_bytes())?;
        match self.session.phase() {
            Phase::Won | Phase::Lost => writeln!(out, "`n` for a new game, `q` to quit")?,
            Phase::Ready | Phase::Running => {}
        }
        write!(out, "> ")?;
        out.flush()?;
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose)?;

    let levels = match &args.level_file {
        Some(path) => config::load_levels(path)?,
        None => config::builtin_levels(),
    };
    let level = levels
        .get(args.level)
        .cloned()
        .with_context(|| format!("No level {}, pick 0..{}", args.level, levels.len()))?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let session = Session::with_seed(level, seed)?;
    let mut game = Game {
        levels,
        session,
        presenter: TerminalPresenter::default(),
        clock: Clock::new(),
    };
    let report = game.session.restart();
    game.new_session(report);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{HELP}")?;
    game.prompt(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        game.catch_up_clock();

        match Command::parse(&line) {
            Ok(Some(command)) => {
                if !game.handle(command, &mut out)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => writeln!(out, "{err}")?,
        }
        game.prompt(&mut out)?;
    }

    Ok(())
}
