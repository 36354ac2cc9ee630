use sapper_core::Coord2;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command {0:?}, type `h` for help")]
    Unknown(String),
    #[error("`{0}` expects {1} argument(s)")]
    WrongArity(&'static str, usize),
    #[error("{0:?} is not a valid number")]
    BadNumber(String),
}

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Mark(Coord2),
    Restart,
    Level(usize),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell
  m <row> <col>   flag or unflag a cell
  n               new game on the current level
  l <index>       switch level
  h               show this help
  q               quit";

impl Command {
    /// Parses a line, `None` for a blank one.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match name {
            "r" | "reveal" => Self::Reveal(coords("reveal", &args)?),
            "m" | "mark" | "f" | "flag" => Self::Mark(coords("mark", &args)?),
            "n" | "new" => {
                arity("new", &args, 0)?;
                Self::Restart
            }
            "l" | "level" => {
                arity("level", &args, 1)?;
                Self::Level(number(args[0])?)
            }
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn arity(name: &'static str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CommandError::WrongArity(name, expected))
    }
}

fn coords(name: &'static str, args: &[&str]) -> Result<Coord2, CommandError> {
    arity(name, args, 2)?;
    Ok((number(args[0])?, number(args[1])?))
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse()
        .map_err(|_| CommandError::BadNumber(word.to_string()))
}
