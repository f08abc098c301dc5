use std::collections::HashMap;
use std::fmt::Write as _;

use glam::Vec2;

use crate::api::error::{Error, Result};
use crate::assets::levels::LevelDef;
use crate::components::hex::{Hex, HexCoord, HexMetrics};
use crate::components::rotation::RotationStep;
use crate::core::rng::Rng;
use crate::systems::connectivity::{propagate, ConnectivityReport};

/// A pointer hit on a hex: which one, and which way to turn it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub coord: HexCoord,
    /// Right half of the hex turns clockwise, left half counter-clockwise.
    pub clockwise: bool,
}

/// The puzzle board: placed hexes plus the seed (power source) and goal roles.
///
/// Hexes keep their insertion order (used by the text dump); lookups go through
/// a coordinate index.
#[derive(Debug, Clone)]
pub struct Board {
    hexes: Vec<Hex>,
    index: HashMap<HexCoord, usize>,
    seed: HexCoord,
    goal: HexCoord,
    metrics: HexMetrics,
    report: ConnectivityReport,
}

impl Board {
    pub fn new(seed: HexCoord, goal: HexCoord, metrics: HexMetrics) -> Self {
        Self {
            hexes: Vec::new(),
            index: HashMap::new(),
            seed,
            goal,
            metrics,
            report: ConnectivityReport::default(),
        }
    }

    /// Build a board from level data. Rejects bad configurations, duplicate
    /// coordinates, and seed/goal roles that point at empty cells. Placements
    /// without a configuration draw one from `rng`.
    pub fn from_level(level: &LevelDef, metrics: HexMetrics, rng: &mut Rng) -> Result<Self> {
        if level.placements.is_empty() {
            return Err(Error::EmptyBoard);
        }
        let mut board = Board::new(level.seed, level.goal, metrics);
        for p in &level.placements {
            let hex = match p.configuration {
                Some(configuration) => Hex::new(p.coord(), configuration)?,
                None => Hex::random(p.coord(), rng),
            };
            board.place(hex)?;
        }
        for (role, coord) in [("seed", level.seed), ("goal", level.goal)] {
            if !board.index.contains_key(&coord) {
                return Err(Error::RoleNotOnBoard {
                    role,
                    row: coord.row,
                    col: coord.col,
                });
            }
        }
        log::debug!(
            "Board built: {} hexes, seed {:?}, goal {:?}",
            board.len(),
            board.seed,
            board.goal
        );
        Ok(board)
    }

    /// Add a hex. Fails if its coordinate is already taken.
    pub fn place(&mut self, mut hex: Hex) -> Result<()> {
        let coord = hex.coord();
        if self.index.contains_key(&coord) {
            log::warn!("Rejected duplicate placement at {:?}", coord);
            return Err(Error::DuplicatePlacement {
                row: coord.row,
                col: coord.col,
            });
        }
        hex.set_metrics(self.metrics);
        self.index.insert(coord, self.hexes.len());
        self.hexes.push(hex);
        Ok(())
    }

    /// Move a hex to an empty coordinate, rebuilding its adjacency.
    pub fn move_hex(&mut self, from: HexCoord, to: HexCoord) -> Result<()> {
        let Some(&i) = self.index.get(&from) else {
            return Err(Error::UnknownHex {
                row: from.row,
                col: from.col,
            });
        };
        if from == to {
            return Ok(());
        }
        if self.index.contains_key(&to) {
            return Err(Error::DuplicatePlacement {
                row: to.row,
                col: to.col,
            });
        }
        self.index.remove(&from);
        self.index.insert(to, i);
        self.hexes[i].move_to(to);
        if self.seed == from {
            self.seed = to;
        }
        if self.goal == from {
            self.goal = to;
        }
        Ok(())
    }

    pub fn seed(&self) -> HexCoord {
        self.seed
    }

    pub fn goal(&self) -> HexCoord {
        self.goal
    }

    pub fn metrics(&self) -> HexMetrics {
        self.metrics
    }

    pub fn hex_at(&self, coord: HexCoord) -> Option<&Hex> {
        self.index.get(&coord).map(|&i| &self.hexes[i])
    }

    fn hex_at_mut(&mut self, coord: HexCoord) -> Result<&mut Hex> {
        match self.index.get(&coord) {
            Some(&i) => Ok(&mut self.hexes[i]),
            None => Err(Error::UnknownHex {
                row: coord.row,
                col: coord.col,
            }),
        }
    }

    /// Hexes in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &Hex> {
        self.hexes.iter()
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    /// Run a connectivity pass from the seed and keep the result.
    pub fn resolve(&mut self) -> &ConnectivityReport {
        match (self.index.get(&self.seed), self.index.get(&self.goal)) {
            (Some(&seed), Some(&goal)) => {
                self.report = propagate(&mut self.hexes, &self.index, seed, goal);
            }
            _ => {
                log::warn!("Connectivity pass skipped: seed or goal missing from board");
                for hex in &mut self.hexes {
                    hex.lit = false;
                }
                self.report = ConnectivityReport::default();
            }
        }
        log::debug!(
            "Connectivity pass: {} lit, goal {}",
            self.report.lit,
            if self.report.goal_lit { "lit" } else { "dark" }
        );
        &self.report
    }

    /// The most recent connectivity pass.
    pub fn report(&self) -> &ConnectivityReport {
        &self.report
    }

    /// Goal lit as of the last pass.
    pub fn is_complete(&self) -> bool {
        self.report.goal_lit
    }

    pub fn lit_count(&self) -> usize {
        self.report.lit
    }

    /// Start an animated rotation. `Ok(false)` means the hex was already turning
    /// and the request was ignored.
    pub fn begin_rotation(&mut self, coord: HexCoord, clockwise: bool) -> Result<bool> {
        Ok(self.hex_at_mut(coord)?.begin_rotation(clockwise))
    }

    /// Rotate instantly, skipping the animation. Returns the settled angle, or
    /// `None` if the hex is mid-rotation and the request was ignored.
    pub fn rotate_now(&mut self, coord: HexCoord, clockwise: bool) -> Result<Option<i32>> {
        let hex = self.hex_at_mut(coord)?;
        if hex.is_rotating() {
            return Ok(None);
        }
        hex.rotate(clockwise);
        hex.normalise_angle();
        Ok(Some(hex.angle()))
    }

    /// Advance every rotating hex by `step` degrees. Returns how many settled this tick.
    pub fn advance_rotations(&mut self, step: i32) -> usize {
        self.hexes
            .iter_mut()
            .map(|hex| hex.advance_rotation(step))
            .filter(|outcome| *outcome == RotationStep::Settled)
            .count()
    }

    /// No hex is mid-rotation.
    pub fn is_settled(&self) -> bool {
        self.hexes.iter().all(|hex| !hex.is_rotating())
    }

    /// Find the hex under `point` (pixels), where `origin` is the board's top-left.
    /// A hit must land within half a hex height of the centre.
    pub fn hit_test(&self, point: Vec2, origin: Vec2) -> Option<Hit> {
        let radius = self.metrics.h / 2.0;
        self.hexes.iter().find_map(|hex| {
            let center = origin + hex.center();
            (center.distance(point) < radius).then(|| Hit {
                coord: hex.coord(),
                clockwise: point.x > center.x,
            })
        })
    }

    /// One `row, col, configuration` line per hex, in placement order.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for hex in &self.hexes {
            let _ = writeln!(out, "{}, {}, {}", hex.row(), hex.col(), hex.configuration());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::levels::{LevelPack, Placement};

    fn level(placements: &[(i32, i32, u8)]) -> LevelDef {
        LevelDef::from_placements(
            "test",
            placements
                .iter()
                .map(|&(row, col, configuration)| Placement::new(row, col, configuration))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn builds_every_builtin_level() {
        for def in &LevelPack::builtin().levels {
            let board = Board::from_level(def, HexMetrics::from_width(100.0), &mut Rng::new(1)).unwrap();
            assert_eq!(board.len(), 20);
            assert_eq!(board.seed(), HexCoord::new(5, 2));
            assert_eq!(board.goal(), HexCoord::new(0, 2));
        }
    }

    #[test]
    fn duplicate_placement_rejected() {
        let def = level(&[(0, 0, 1), (1, 0, 2), (0, 0, 3)]);
        assert!(matches!(
            Board::from_level(&def, HexMetrics::default(), &mut Rng::new(1)),
            Err(Error::DuplicatePlacement { row: 0, col: 0 })
        ));
    }

    #[test]
    fn bad_configuration_rejected() {
        let def = level(&[(0, 0, 1), (1, 0, 9)]);
        assert!(matches!(
            Board::from_level(&def, HexMetrics::default(), &mut Rng::new(1)),
            Err(Error::InvalidConfiguration(9))
        ));
    }

    #[test]
    fn role_must_be_on_board() {
        let mut def = level(&[(0, 0, 1), (1, 0, 2)]);
        def.goal = HexCoord::new(7, 7);
        assert!(matches!(
            Board::from_level(&def, HexMetrics::default(), &mut Rng::new(1)),
            Err(Error::RoleNotOnBoard { role: "goal", .. })
        ));
    }

    #[test]
    fn move_hex_reindexes_and_follows_roles() {
        let def = level(&[(0, 0, 1), (1, 0, 2)]);
        let mut board = Board::from_level(&def, HexMetrics::default(), &mut Rng::new(1)).unwrap();
        board.move_hex(HexCoord::new(1, 0), HexCoord::new(1, 1)).unwrap();

        assert!(board.hex_at(HexCoord::new(1, 0)).is_none());
        let moved = board.hex_at(HexCoord::new(1, 1)).unwrap();
        assert_eq!(moved.adjacency()[0].row_offset, 0);
        assert_eq!(board.seed(), HexCoord::new(1, 1));

        assert!(matches!(
            board.move_hex(HexCoord::new(1, 1), HexCoord::new(0, 0)),
            Err(Error::DuplicatePlacement { .. })
        ));
        assert!(matches!(
            board.move_hex(HexCoord::new(9, 9), HexCoord::new(8, 8)),
            Err(Error::UnknownHex { .. })
        ));
    }

    #[test]
    fn rotation_blocks_until_settled() {
        let def = level(&[(0, 0, 1), (1, 0, 2)]);
        let mut board = Board::from_level(&def, HexMetrics::default(), &mut Rng::new(1)).unwrap();
        let at = HexCoord::new(0, 0);

        assert!(board.begin_rotation(at, true).unwrap());
        assert!(!board.begin_rotation(at, true).unwrap());
        assert!(!board.is_settled());

        let mut settled = 0;
        for _ in 0..12 {
            settled += board.advance_rotations(5);
        }
        assert_eq!(settled, 1);
        assert!(board.is_settled());
        assert_eq!(board.hex_at(at).unwrap().angle(), 60);
        assert!(board.begin_rotation(at, false).unwrap());
    }

    #[test]
    fn rotate_now_ignored_while_animating() {
        let def = level(&[(0, 0, 8), (1, 0, 2)]);
        let mut board = Board::from_level(&def, HexMetrics::default(), &mut Rng::new(1)).unwrap();
        let at = HexCoord::new(0, 0);

        assert_eq!(board.rotate_now(at, false).unwrap(), Some(300));
        assert!(board.begin_rotation(at, true).unwrap());
        let values = board.hex_at(at).unwrap().values();
        assert_eq!(board.rotate_now(at, true).unwrap(), None);
        assert_eq!(board.hex_at(at).unwrap().values(), values);

        for _ in 0..12 {
            board.advance_rotations(5);
        }
        assert_eq!(board.hex_at(at).unwrap().angle(), 0);
        assert_eq!(board.rotate_now(at, true).unwrap(), Some(60));
    }

    #[test]
    fn hit_test_picks_half() {
        let def = level(&[(0, 0, 1), (0, 1, 2)]);
        let board = Board::from_level(&def, HexMetrics::from_width(100.0), &mut Rng::new(1)).unwrap();
        let origin = Vec2::new(40.0, 64.0);

        // Centre of (0, 0) is origin + (50, 43.3).
        let right = board.hit_test(Vec2::new(100.0, 107.0), origin).unwrap();
        assert_eq!(right, Hit { coord: HexCoord::new(0, 0), clockwise: true });
        let left = board.hit_test(Vec2::new(80.0, 107.0), origin).unwrap();
        assert!(!left.clockwise);

        // (0, 1) sits 75 px right and half a hex lower.
        let odd = board.hit_test(Vec2::new(165.0, 150.0), origin).unwrap();
        assert_eq!(odd.coord, HexCoord::new(0, 1));

        assert!(board.hit_test(Vec2::new(0.0, 0.0), origin).is_none());
    }

    #[test]
    fn open_configuration_is_dealt_from_rng() {
        let mut def = level(&[(0, 0, 8), (1, 0, 2)]);
        def.placements[1].configuration = None;
        let a = Board::from_level(&def, HexMetrics::default(), &mut Rng::new(9)).unwrap();
        let b = Board::from_level(&def, HexMetrics::default(), &mut Rng::new(9)).unwrap();
        let dealt = a.hex_at(HexCoord::new(1, 0)).unwrap().configuration();
        assert!((1..=7).contains(&dealt));
        assert_eq!(dealt, b.hex_at(HexCoord::new(1, 0)).unwrap().configuration());
    }

    #[test]
    fn text_dump_lists_placements_in_order() {
        let def = level(&[(0, 1, 7), (0, 2, 8), (5, 2, 4)]);
        let board = Board::from_level(&def, HexMetrics::default(), &mut Rng::new(1)).unwrap();
        assert_eq!(board.to_text(), "0, 1, 7\n0, 2, 8\n5, 2, 4\n");
    }
}
