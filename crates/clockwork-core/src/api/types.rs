use crate::components::hex::HexCoord;

/// Event kinds as written into the event buffer (first float of each record).
pub const EVENT_LEVEL_STARTED: f32 = 1.0;
pub const EVENT_HEX_ROTATED: f32 = 2.0;
pub const EVENT_CIRCUIT_CHANGED: f32 = 3.0;
pub const EVENT_LEVEL_COMPLETE: f32 = 4.0;
pub const EVENT_OUT_OF_TIME: f32 = 5.0;
pub const EVENT_GAME_WON: f32 = 6.0;

/// Something the presentation layer should react to (banners, sounds, dial).
/// Levels are reported 1-based, the way players see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LevelStarted { level: usize },
    HexRotated { at: HexCoord, clockwise: bool },
    /// A connectivity pass finished with `lit` hexes powered.
    CircuitChanged { lit: usize },
    LevelComplete { level: usize },
    OutOfTime { level: usize },
    GameWon,
}

impl SessionEvent {
    /// Floats per packed event record: kind, a, b, c.
    pub const FLOATS: usize = 4;

    /// Pack into the `[kind, a, b, c]` wire record.
    pub fn to_record(&self) -> [f32; 4] {
        match *self {
            SessionEvent::LevelStarted { level } => [EVENT_LEVEL_STARTED, level as f32, 0.0, 0.0],
            SessionEvent::HexRotated { at, clockwise } => [
                EVENT_HEX_ROTATED,
                at.row as f32,
                at.col as f32,
                if clockwise { 1.0 } else { -1.0 },
            ],
            SessionEvent::CircuitChanged { lit } => [EVENT_CIRCUIT_CHANGED, lit as f32, 0.0, 0.0],
            SessionEvent::LevelComplete { level } => [EVENT_LEVEL_COMPLETE, level as f32, 0.0, 0.0],
            SessionEvent::OutOfTime { level } => [EVENT_OUT_OF_TIME, level as f32, 0.0, 0.0],
            SessionEvent::GameWon => [EVENT_GAME_WON, 0.0, 0.0, 0.0],
        }
    }
}
