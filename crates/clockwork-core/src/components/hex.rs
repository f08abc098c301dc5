//! A single hexagonal cell: position, connectors, rotation and geometry.
//!
//! The board uses offset coordinates with staggered columns: odd columns sit
//! half a cell lower than even ones.
//!
//! ```text
//!      _____         _____
//!     /     \       /     \
//!    /  0,0  \_____/  0,2  \
//!    \       /     \       /
//!     \_____/  0,1  \_____/
//!     /     \       /     \
//!    /  1,0  \_____/  1,2  \
//!    \       /     \       /
//!     \_____/  1,1  \_____/
//! ```
//!
//! Sides are indexed clockwise from the north-west edge: NW, N, NE, SE, S, SW.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::api::error::{Error, Result};
use crate::components::rotation::{Direction, RotationState, RotationStep};
use crate::core::rng::Rng;

/// Number of sides (and connectors) on a hex.
pub const SIDES: usize = 6;

/// Connector values for each configuration, in side order 0..5. Zero means no connector.
pub const LAYOUTS: [[u8; SIDES]; 8] = [
    [1, 0, 2, 0, 3, 0],
    [4, 0, 5, 0, 6, 0],
    [3, 0, 2, 0, 1, 0],
    [6, 0, 5, 0, 4, 0],
    [1, 2, 0, 3, 4, 0],
    [3, 4, 0, 5, 6, 0],
    [5, 6, 0, 1, 2, 0],
    [1, 2, 3, 4, 5, 6],
];

/// Normalise any angle in degrees into `[0, 360)`.
pub fn normalise_angle(angle: i32) -> i32 {
    angle.rem_euclid(360)
}

/// Row/column position on the offset grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HexCoord {
    pub row: i32,
    pub col: i32,
}

impl HexCoord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// 0 for even columns, 1 for odd ones (negative columns included).
    pub fn parity(&self) -> i32 {
        self.col.rem_euclid(2)
    }

    pub fn offset(&self, row_offset: i32, col_offset: i32) -> Self {
        Self::new(self.row + row_offset, self.col + col_offset)
    }
}

/// One of the six connector slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connector {
    /// Printed side label, 1..=6. Travels with the value when the hex turns.
    pub side: u8,
    /// Channel id; 0 = no connector on this side.
    pub value: u8,
}

/// Where the hex abutting one side sits, and which of its sides faces back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacent {
    pub row_offset: i32,
    pub col_offset: i32,
    pub opposite: usize,
}

impl Adjacent {
    const fn new(row_offset: i32, col_offset: i32, opposite: usize) -> Self {
        Self {
            row_offset,
            col_offset,
            opposite,
        }
    }
}

/// Neighbour offsets for a hex in column `col`. Four of the six row offsets
/// depend on column parity, so this must be rebuilt whenever the column changes.
pub fn adjacency_for(col: i32) -> [Adjacent; SIDES] {
    let p = col.rem_euclid(2);
    [
        Adjacent::new(p - 1, -1, 3), // NW
        Adjacent::new(-1, 0, 4),     // N
        Adjacent::new(p - 1, 1, 5),  // NE
        Adjacent::new(p, 1, 0),      // SE
        Adjacent::new(1, 0, 1),      // S
        Adjacent::new(p, -1, 2),     // SW
    ]
}

/// Radius, width, height and separation of a hex, all derived from one scale.
///
/// ```text
///   +-------w-------+
///   +-----s-----+
///     _________      -+
///    /    \    \      |
///   /__r__\     \     h
///   \           /     |
///    \_________/     -+
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexMetrics {
    pub r: f32,
    pub w: f32,
    pub h: f32,
    pub s: f32,
}

impl HexMetrics {
    pub fn from_radius(r: f32) -> Self {
        Self {
            r,
            w: 2.0 * r,
            h: 3f32.sqrt() * r,
            s: 1.5 * r,
        }
    }

    pub fn from_width(w: f32) -> Self {
        Self::from_radius(w / 2.0)
    }

    pub fn from_height(h: f32) -> Self {
        Self::from_radius(h / 3f32.sqrt())
    }

    pub fn from_separation(s: f32) -> Self {
        Self::from_radius(s / 1.5)
    }
}

impl Default for HexMetrics {
    fn default() -> Self {
        Self::from_radius(1.0)
    }
}

/// A placed hex tile.
#[derive(Debug, Clone)]
pub struct Hex {
    coord: HexCoord,
    configuration: u8,
    connectors: [Connector; SIDES],
    adjacency: [Adjacent; SIDES],
    angle: i32,
    rotation: RotationState,
    metrics: HexMetrics,
    /// Part of the powered circuit as of the last connectivity pass.
    pub lit: bool,
}

impl Hex {
    /// Create a hex using connector layout `configuration` (1..=8).
    pub fn new(coord: HexCoord, configuration: u8) -> Result<Self> {
        if !(1..=LAYOUTS.len() as u8).contains(&configuration) {
            return Err(Error::InvalidConfiguration(configuration));
        }
        Ok(Self::from_layout(coord, configuration))
    }

    /// Create a hex with a random configuration from 1..=7.
    pub fn random(coord: HexCoord, rng: &mut Rng) -> Self {
        Self::from_layout(coord, rng.range_inclusive(1, 7))
    }

    fn from_layout(coord: HexCoord, configuration: u8) -> Self {
        let layout = LAYOUTS[configuration as usize - 1];
        Self {
            coord,
            configuration,
            connectors: std::array::from_fn(|i| Connector {
                side: i as u8 + 1,
                value: layout[i],
            }),
            adjacency: adjacency_for(coord.col),
            angle: 0,
            rotation: RotationState::Idle,
            metrics: HexMetrics::default(),
            lit: false,
        }
    }

    pub fn with_metrics(mut self, metrics: HexMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    pub fn row(&self) -> i32 {
        self.coord.row
    }

    pub fn col(&self) -> i32 {
        self.coord.col
    }

    pub fn configuration(&self) -> u8 {
        self.configuration
    }

    pub fn connectors(&self) -> &[Connector; SIDES] {
        &self.connectors
    }

    /// Connector values in current side order.
    pub fn values(&self) -> [u8; SIDES] {
        self.connectors.map(|c| c.value)
    }

    pub fn adjacency(&self) -> &[Adjacent; SIDES] {
        &self.adjacency
    }

    pub fn metrics(&self) -> HexMetrics {
        self.metrics
    }

    pub fn set_metrics(&mut self, metrics: HexMetrics) {
        self.metrics = metrics;
    }

    /// Current rotation in degrees. Unnormalised while a rotation is in flight.
    pub fn angle(&self) -> i32 {
        self.angle
    }

    /// Move to a new coordinate and rebuild the parity-dependent adjacency.
    pub fn move_to(&mut self, coord: HexCoord) {
        self.coord = coord;
        self.adjacency = adjacency_for(coord.col);
    }

    /// The coordinate abutting `side`, and the index of the side on that hex facing back.
    pub fn neighbor(&self, side: usize) -> (HexCoord, usize) {
        let adj = self.adjacency[side];
        (
            self.coord.offset(adj.row_offset, adj.col_offset),
            adj.opposite,
        )
    }

    /// Turn the connectors one side and return the new, unnormalised target angle.
    ///
    /// Clockwise moves the last connector to the front; counter-clockwise moves
    /// the first to the back.
    pub fn rotate(&mut self, clockwise: bool) -> i32 {
        if clockwise {
            self.angle += 60;
            self.connectors.rotate_right(1);
        } else {
            self.angle -= 60;
            self.connectors.rotate_left(1);
        }
        self.angle
    }

    pub fn normalise_angle(&mut self) {
        self.angle = normalise_angle(self.angle);
    }

    /// Start an animated rotation. Returns `false` (and does nothing) if the hex
    /// is already turning.
    pub fn begin_rotation(&mut self, clockwise: bool) -> bool {
        if self.rotation.is_rotating() {
            return false;
        }
        let from = self.angle;
        let target = self.rotate(clockwise);
        self.rotation = RotationState::start(from, target, Direction::from_clockwise(clockwise));
        true
    }

    /// Advance the rotation animation by `step` degrees. Normalises the angle once settled.
    pub fn advance_rotation(&mut self, step: i32) -> RotationStep {
        let outcome = self.rotation.advance(step);
        if outcome == RotationStep::Settled {
            self.normalise_angle();
        }
        outcome
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.is_rotating()
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Angle to draw: the animated angle while turning, otherwise the settled one.
    pub fn display_angle(&self) -> i32 {
        match self.rotation {
            RotationState::Rotating { display, .. } => display,
            RotationState::Idle => self.angle,
        }
    }

    /// Top-left of the hex's bounding cell, rounded to whole pixels.
    pub fn position(&self) -> IVec2 {
        let m = self.metrics;
        let x = (self.coord.col as f32 * m.s).round();
        let y = (self.coord.row as f32 * m.h + self.coord.parity() as f32 * (m.h / 2.0)).round();
        IVec2::new(x as i32, y as i32)
    }

    /// Centre of the bounding cell, unrounded.
    pub fn center(&self) -> Vec2 {
        let m = self.metrics;
        self.position().as_vec2() + Vec2::new(m.w / 2.0, m.h / 2.0)
    }

    /// Outline vertices relative to the bounding cell, clockwise from the top-left,
    /// with the first vertex repeated to close the path.
    pub fn corners(&self) -> [IVec2; SIDES + 1] {
        let HexMetrics { r, h, .. } = self.metrics;
        let px = |v: f32| v.round() as i32;
        let first = IVec2::new(px(r / 2.0), 0);
        [
            first,
            IVec2::new(px(r + r / 2.0), 0),
            IVec2::new(px(r * 2.0), px(h / 2.0)),
            IVec2::new(px(r + r / 2.0), px(h)),
            IVec2::new(px(r / 2.0), px(h)),
            IVec2::new(0, px(h / 2.0)),
            first,
        ]
    }
}
