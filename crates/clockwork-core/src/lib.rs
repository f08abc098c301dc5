pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::GameConfig;
pub use api::error::{Error, Result};
pub use api::types::SessionEvent;
pub use components::hex::{Connector, Hex, HexCoord, HexMetrics, LAYOUTS, SIDES};
pub use components::rotation::{Direction, RotationState, RotationStep};
pub use core::board::{Board, Hit};
pub use core::rng::Rng;
pub use core::session::{Phase, Session};
pub use core::time::{Countdown, FixedTimestep};
pub use systems::connectivity::{propagate, ConnectivityReport};
pub use input::queue::{InputEvent, InputQueue, CUSTOM_NEXT, CUSTOM_RESTART};
pub use assets::levels::{LevelDef, LevelPack, Placement};
pub use bridge::protocol::{HexInstance, StateBuffer, EVENT_FLOATS, INSTANCE_FLOATS};
