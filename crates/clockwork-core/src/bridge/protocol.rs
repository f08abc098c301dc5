/// Flat buffers read by the page each frame.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values f32):
/// ```text
/// [Hexes:  hex_count × 8 floats]   x, y, angle, lit, configuration, rotating, row, col
/// [Events: event_count × 4 floats] kind, a, b, c
/// ```
use bytemuck::{Pod, Zeroable};

use crate::api::types::SessionEvent;
use crate::components::hex::Hex;
use crate::core::session::Session;

/// Floats per hex instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = 8;

/// Floats per session event (wire format, never changes).
pub const EVENT_FLOATS: usize = SessionEvent::FLOATS;

/// Per-hex draw data. `x`/`y` is the bounding-cell centre in board pixels.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct HexInstance {
    pub x: f32,
    pub y: f32,
    /// Display angle in degrees.
    pub angle: f32,
    /// 1.0 when powered.
    pub lit: f32,
    pub configuration: f32,
    /// 1.0 while a rotation animation runs.
    pub rotating: f32,
    pub row: f32,
    pub col: f32,
}

impl HexInstance {
    pub const STRIDE_BYTES: usize = INSTANCE_FLOATS * 4;

    pub fn from_hex(hex: &Hex) -> Self {
        let center = hex.center();
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        Self {
            x: center.x,
            y: center.y,
            angle: hex.display_angle() as f32,
            lit: flag(hex.lit),
            configuration: hex.configuration() as f32,
            rotating: flag(hex.is_rotating()),
            row: hex.row() as f32,
            col: hex.col() as f32,
        }
    }
}

/// Hex instances and packed events, rebuilt from a session once per frame.
#[derive(Debug, Default)]
pub struct StateBuffer {
    hexes: Vec<HexInstance>,
    events: Vec<f32>,
}

impl StateBuffer {
    pub fn new() -> Self {
        Self {
            hexes: Vec::with_capacity(32),
            events: Vec::with_capacity(8 * EVENT_FLOATS),
        }
    }

    /// Snapshot every hex and take the session's pending events.
    pub fn rebuild(&mut self, session: &mut Session) {
        self.hexes.clear();
        self.hexes
            .extend(session.board().iter().map(HexInstance::from_hex));
        self.events.clear();
        for event in session.drain_events() {
            self.events.extend_from_slice(&event.to_record());
        }
    }

    pub fn hexes(&self) -> &[HexInstance] {
        &self.hexes
    }

    pub fn hex_count(&self) -> u32 {
        self.hexes.len() as u32
    }

    /// Raw pointer to hex instance data for the page to read from wasm memory.
    pub fn hexes_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<HexInstance, f32>(&self.hexes).as_ptr()
    }

    pub fn events(&self) -> &[f32] {
        &self.events
    }

    /// Number of packed events (not floats).
    pub fn event_count(&self) -> u32 {
        (self.events.len() / EVENT_FLOATS) as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr()
    }
}
