use std::fs;
use std::path::Path;

use anyhow::{Context, ensure};
use sapper_core::{LEVELS, LevelConfig};
use serde::Deserialize;

/// Level list loaded from a TOML file, one `[[level]]` table per entry.
#[derive(Debug, Deserialize)]
struct LevelTable {
    level: Vec<LevelConfig>,
}

pub fn builtin_levels() -> Vec<LevelConfig> {
    LEVELS.to_vec()
}

pub fn load_levels(path: &Path) -> anyhow::Result<Vec<LevelConfig>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read level file {}", path.display()))?;
    parse_levels(&text).with_context(|| format!("Invalid level file {}", path.display()))
}

pub fn parse_levels(text: &str) -> anyhow::Result<Vec<LevelConfig>> {
    let table: LevelTable = toml::from_str(text)?;
    ensure!(!table.level.is_empty(), "No levels defined");

    for level in &table.level {
        level
            .validate()
            .with_context(|| format!("Level {:?} is not playable", level.name))?;
    }
    Ok(table.level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapper_core::SafeStart;

    #[test]
    fn parses_levels_with_defaults() {
        let levels = parse_levels(
            r#"
            [[level]]
            name = "Tiny"
            size = 5
            mines = 3

            [[level]]
            name = "Roomy"
            size = 20
            mines = 60
            lives = 4
            safe_start = "Cell"
            "#,
        )
        .unwrap();

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].lives, 1);
        assert_eq!(levels[0].safe_start, SafeStart::Neighborhood);
        assert_eq!(levels[1].lives, 4);
        assert_eq!(levels[1].safe_start, SafeStart::Cell);
    }

    #[test]
    fn rejects_unplayable_level() {
        let err = parse_levels(
            r#"
            [[level]]
            name = "Packed"
            size = 3
            mines = 1
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("Packed"));
    }

    #[test]
    fn rejects_empty_table() {
        assert!(parse_levels("level = []").is_err());
    }
}
