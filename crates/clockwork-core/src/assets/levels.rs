use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::api::error::{Error, Result};
use crate::components::hex::{HexCoord, LAYOUTS};

/// One hex in a level: where it goes and which connector layout it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row: i32,
    pub col: i32,
    /// Connector layout 1..=8; `None` deals a random layout from 1..=7.
    #[serde(default)]
    pub configuration: Option<u8>,
}

impl Placement {
    pub fn new(row: i32, col: i32, configuration: u8) -> Self {
        Self {
            row,
            col,
            configuration: Some(configuration),
        }
    }

    pub fn coord(&self) -> HexCoord {
        HexCoord::new(self.row, self.col)
    }
}

/// A hand-authored level with explicit seed and goal roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    #[serde(default)]
    pub name: String,
    pub placements: Vec<Placement>,
    /// Power source; always lit.
    pub seed: HexCoord,
    /// Lighting this hex completes the level.
    pub goal: HexCoord,
}

impl LevelDef {
    /// Build a level from an ordered placement list using the classic role
    /// convention: the second placement is the goal, the last is the seed.
    pub fn from_placements(name: impl Into<String>, placements: Vec<Placement>) -> Result<Self> {
        let (Some(first), Some(last)) = (placements.first(), placements.last()) else {
            return Err(Error::EmptyBoard);
        };
        let goal = placements.get(1).unwrap_or(first);
        Ok(Self {
            name: name.into(),
            seed: HexCoord::new(last.row, last.col),
            goal: HexCoord::new(goal.row, goal.col),
            placements,
        })
    }

    /// Parse the `row, col, configuration` text format, one hex per line.
    /// A line with only `row, col` gets a random layout. Blank lines and `#`
    /// comments are skipped. Roles follow [`LevelDef::from_placements`].
    pub fn from_text(name: impl Into<String>, text: &str) -> Result<Self> {
        let mut placements = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            placements.push(parse_placement(line).map_err(|reason| Error::Parse {
                line: i + 1,
                reason,
            })?);
        }
        Self::from_placements(name, placements)
    }

    /// Check the level can be built into a board: placements present,
    /// configurations in range, no shared coordinates, roles on placed hexes.
    /// Reports the same errors, in the same order, as building the board.
    pub fn validate(&self) -> Result<()> {
        if self.placements.is_empty() {
            return Err(Error::EmptyBoard);
        }
        let mut placed = HashSet::with_capacity(self.placements.len());
        for p in &self.placements {
            if let Some(configuration) = p.configuration {
                if !(1..=LAYOUTS.len() as u8).contains(&configuration) {
                    return Err(Error::InvalidConfiguration(configuration));
                }
            }
            if !placed.insert(p.coord()) {
                return Err(Error::DuplicatePlacement {
                    row: p.row,
                    col: p.col,
                });
            }
        }
        for (role, coord) in [("seed", self.seed), ("goal", self.goal)] {
            if !placed.contains(&coord) {
                return Err(Error::RoleNotOnBoard {
                    role,
                    row: coord.row,
                    col: coord.col,
                });
            }
        }
        Ok(())
    }

    pub fn to_text(&self) -> String {
        self.placements
            .iter()
            .map(|p| match p.configuration {
                Some(configuration) => format!("{}, {}, {}\n", p.row, p.col, configuration),
                None => format!("{}, {}\n", p.row, p.col),
            })
            .collect()
    }
}

fn parse_placement(line: &str) -> std::result::Result<Placement, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let (row, col, configuration) = match fields.as_slice() {
        &[row, col] => (row, col, None),
        &[row, col, configuration] => (row, col, Some(configuration)),
        _ => return Err(format!("expected `row, col, configuration`, got `{line}`")),
    };
    let int = |name: &str, s: &str| {
        s.parse::<i32>()
            .map_err(|e| format!("bad {name} `{s}`: {e}"))
    };
    let configuration = configuration
        .map(|c| {
            c.parse::<u8>()
                .map_err(|e| format!("bad configuration `{c}`: {e}"))
        })
        .transpose()?;
    Ok(Placement {
        row: int("row", row)?,
        col: int("col", col)?,
        configuration,
    })
}

/// The ordered sequence of levels a session plays through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelPack {
    pub levels: Vec<LevelDef>,
}

/// The six levels shipped with the game, as `(row, col, configuration)`.
/// All share one board shape; only the configurations differ.
const BUILTIN: [[(i32, i32, u8); 20]; 6] = [
    [
        (0, 1, 7), (0, 2, 8), (0, 3, 7), (1, 0, 7), (1, 1, 6), (1, 2, 4), (1, 3, 6),
        (1, 4, 4), (2, 0, 6), (2, 1, 3), (2, 2, 2), (2, 3, 2), (2, 4, 6), (3, 0, 6),
        (3, 1, 4), (3, 2, 3), (3, 3, 4), (3, 4, 2), (4, 2, 4), (5, 2, 4),
    ],
    [
        (0, 1, 1), (0, 2, 8), (0, 3, 1), (1, 0, 7), (1, 1, 2), (1, 2, 4), (1, 3, 6),
        (1, 4, 4), (2, 0, 6), (2, 1, 4), (2, 2, 2), (2, 3, 5), (2, 4, 6), (3, 0, 6),
        (3, 1, 4), (3, 2, 4), (3, 3, 6), (3, 4, 2), (4, 2, 4), (5, 2, 4),
    ],
    [
        (0, 1, 7), (0, 2, 8), (0, 3, 7), (1, 0, 2), (1, 1, 6), (1, 2, 4), (1, 3, 6),
        (1, 4, 6), (2, 0, 6), (2, 1, 4), (2, 2, 2), (2, 3, 2), (2, 4, 3), (3, 0, 6),
        (3, 1, 4), (3, 2, 3), (3, 3, 7), (3, 4, 2), (4, 2, 4), (5, 2, 4),
    ],
    [
        (0, 1, 5), (0, 2, 8), (0, 3, 7), (1, 0, 2), (1, 1, 7), (1, 2, 4), (1, 3, 6),
        (1, 4, 4), (2, 0, 6), (2, 1, 3), (2, 2, 2), (2, 3, 2), (2, 4, 6), (3, 0, 1),
        (3, 1, 5), (3, 2, 3), (3, 3, 4), (3, 4, 2), (4, 2, 5), (5, 2, 1),
    ],
    [
        (0, 1, 7), (0, 2, 8), (0, 3, 7), (1, 0, 7), (1, 1, 6), (1, 2, 6), (1, 3, 2),
        (1, 4, 6), (2, 0, 6), (2, 1, 3), (2, 2, 6), (2, 3, 6), (2, 4, 6), (3, 0, 7),
        (3, 1, 5), (3, 2, 6), (3, 3, 4), (3, 4, 3), (4, 2, 5), (5, 2, 5),
    ],
    [
        (0, 1, 7), (0, 2, 8), (0, 3, 7), (1, 0, 2), (1, 1, 7), (1, 2, 4), (1, 3, 2),
        (1, 4, 4), (2, 0, 6), (2, 1, 5), (2, 2, 3), (2, 3, 3), (2, 4, 7), (3, 0, 6),
        (3, 1, 5), (3, 2, 7), (3, 3, 4), (3, 4, 2), (4, 2, 6), (5, 2, 4),
    ],
];

impl LevelPack {
    pub fn builtin() -> Self {
        let levels = BUILTIN
            .iter()
            .enumerate()
            .map(|(i, rows)| LevelDef {
                name: format!("Level {}", i + 1),
                placements: rows
                    .iter()
                    .map(|&(row, col, configuration)| Placement::new(row, col, configuration))
                    .collect(),
                // Seed is the lone hex at the bottom, goal the full-layout hex at the top.
                seed: HexCoord::new(5, 2),
                goal: HexCoord::new(0, 2),
            })
            .collect();
        Self { levels }
    }

    /// Parse a pack from JSON, rejecting it if any level cannot be built.
    pub fn from_json(json: &str) -> Result<Self> {
        let pack: LevelPack = serde_json::from_str(json)?;
        pack.validate()?;
        Ok(pack)
    }

    /// Check every level up front so a bad one cannot surface mid-session.
    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(Error::EmptyBoard);
        }
        for (i, level) in self.levels.iter().enumerate() {
            level.validate().map_err(|e| {
                log::warn!("Level {} ({}) rejected: {e}", i + 1, level.name);
                e
            })?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelDef> {
        self.levels.get(index)
    }
}

impl Default for LevelPack {
    fn default() -> Self {
        Self::builtin()
    }
}
