use alloc::borrow::Cow;
use serde::{Deserialize, Serialize};

use crate::*;

/// A difficulty: board side, mine count, starting lives and opening policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: Cow<'static, str>,
    pub size: Coord,
    pub mines: CellCount,
    #[serde(default = "default_lives")]
    pub lives: u8,
    #[serde(default)]
    pub safe_start: SafeStart,
}

const fn default_lives() -> u8 {
    1
}

pub const LEVELS: [LevelConfig; 3] = [
    LevelConfig::new_unchecked("Beginner", 4, 2, 1),
    LevelConfig::new_unchecked("Medium", 8, 14, 2),
    LevelConfig::new_unchecked("Expert", 12, 32, 3),
];

impl LevelConfig {
    pub const fn new_unchecked(
        name: &'static str,
        size: Coord,
        mines: CellCount,
        lives: u8,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            size,
            mines,
            lives,
            safe_start: SafeStart::Neighborhood,
        }
    }

    /// Builds and validates a custom level.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        size: usize,
        mines: CellCount,
        lives: u8,
        safe_start: SafeStart,
    ) -> Result<Self> {
        let size = Coord::try_from(size).map_err(|_| GameError::BoardTooLarge(size))?;
        let level = Self {
            name: name.into(),
            size,
            mines,
            lives,
            safe_start,
        };
        level.validate()?;
        Ok(level)
    }

    /// Built-in level by position in [`LEVELS`].
    pub fn by_index(index: usize) -> Result<Self> {
        LEVELS.get(index).cloned().ok_or(GameError::UnknownLevel(index))
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Rejects levels whose deferred mine placement could not complete.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.lives == 0 {
            return Err(GameError::NoLives);
        }

        let available = self.total_cells() - self.safe_start.worst_case_excluded(self.size);
        if self.mines >= available {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                available,
            });
        }
        Ok(())
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        LEVELS[0].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_levels_are_valid() {
        for level in &LEVELS {
            assert_eq!(level.validate(), Ok(()), "{}", level.name);
        }
    }

    #[test]
    fn by_index_rejects_out_of_range() {
        assert_eq!(LevelConfig::by_index(1).unwrap().name, "Medium");
        assert_eq!(LevelConfig::by_index(3), Err(GameError::UnknownLevel(3)));
    }

    #[test]
    fn validate_leaves_room_for_safe_opening() {
        // 16 cells, 9 protected around an interior click
        assert!(LevelConfig::new("ok", 4, 6, 1, SafeStart::Neighborhood).is_ok());
        assert_eq!(
            LevelConfig::new("full", 4, 7, 1, SafeStart::Neighborhood),
            Err(GameError::TooManyMines {
                requested: 7,
                available: 7
            })
        );
        assert!(LevelConfig::new("cell", 4, 14, 1, SafeStart::Cell).is_ok());
        assert!(LevelConfig::new("cell", 4, 15, 1, SafeStart::Cell).is_err());
    }

    #[test]
    fn validate_rejects_degenerate_levels() {
        assert_eq!(
            LevelConfig::new("empty", 0, 0, 1, SafeStart::Cell),
            Err(GameError::EmptyBoard)
        );
        assert_eq!(
            LevelConfig::new("dead", 4, 2, 0, SafeStart::Cell),
            Err(GameError::NoLives)
        );
        assert_eq!(
            LevelConfig::new("huge", 300, 2, 1, SafeStart::Cell),
            Err(GameError::BoardTooLarge(300))
        );
    }
}
