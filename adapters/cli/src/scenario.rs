//! TOML scenario files describing grids and the actors scripted onto them.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

const DEMO_SCENARIO: &str = r#"
[[grids]]
rows = 5
cols = 8
cell_size = 32
origin = [64.0, 32.0]
placements = [
    { row = 0, col = 0, actor = 1 },
    { row = 2, col = 3, actor = 2 },
    { row = 4, col = 7, actor = 3 },
]
moves = [
    { actor = 1, to = [1, 1] },
    { actor = 3, to = [2, 3] },
]
clicks = [[80.0, 48.0], [10.0, 10.0]]
"#;

/// Grids to create, in creation order.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    pub(crate) grids: Vec<GridScenario>,
}

/// One grid together with its scripted placements, moves and clicks.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GridScenario {
    pub(crate) rows: u32,
    pub(crate) cols: u32,
    pub(crate) cell_size: u32,
    #[serde(default)]
    pub(crate) origin: [f32; 2],
    #[serde(default)]
    pub(crate) placements: Vec<Placement>,
    #[serde(default)]
    pub(crate) moves: Vec<Move>,
    #[serde(default)]
    pub(crate) clicks: Vec<[f32; 2]>,
}

/// Initial actor placement at a zero-based cell.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Placement {
    pub(crate) row: i32,
    pub(crate) col: i32,
    pub(crate) actor: i64,
}

/// Moves an already placed actor to a `[row, col]` cell.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Move {
    pub(crate) actor: i64,
    pub(crate) to: [i32; 2],
}

impl Scenario {
    /// Reads and parses the scenario stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid scenario at {}", path.display()))
    }

    /// Scenario used when no file is supplied.
    pub(crate) fn demo() -> Result<Self> {
        Self::parse(DEMO_SCENARIO).context("built-in demo scenario is invalid")
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let scenario: Self =
            toml::from_str(contents).context("failed to parse scenario toml contents")?;
        if scenario.grids.is_empty() {
            bail!("scenario defines no grids");
        }
        Ok(scenario)
    }
}
