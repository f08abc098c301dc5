use serde::{Deserialize, Serialize};

use crate::api::error::{Error, Result};

/// Configuration for a puzzle session, provided by the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum catch-up ticks run for a single frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Hex width in pixels; every other hex dimension derives from it (default: 100).
    pub tile_width: f32,
    /// Pixel offset of the board's top-left corner.
    pub board_origin_x: f32,
    pub board_origin_y: f32,
    /// Correction added to the raw pointer y before hit-testing (default: -16).
    pub pointer_offset_y: f32,
    /// Degrees a rotating hex turns per tick. Must divide 60 (default: 5).
    pub rotation_step_degrees: i32,
    /// Countdown units per level (default: 300).
    pub level_duration: u32,
    /// Seconds per countdown unit (default: 0.1, so a level lasts 30 s).
    pub countdown_unit_secs: f32,
    /// Seed for hexes created without an explicit configuration.
    pub random_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            tile_width: 100.0,
            board_origin_x: 40.0,
            board_origin_y: 64.0,
            pointer_offset_y: -16.0,
            rotation_step_degrees: 5,
            level_duration: 300,
            countdown_unit_secs: 0.1,
            random_seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values a session cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.tile_width > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "tile_width must be positive, got {}",
                self.tile_width
            )));
        }
        if !(self.fixed_dt > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        let step = self.rotation_step_degrees;
        if step <= 0 || 60 % step != 0 {
            return Err(Error::InvalidConfig(format!(
                "rotation_step_degrees must divide 60, got {step}"
            )));
        }
        if self.level_duration == 0 {
            return Err(Error::InvalidConfig("level_duration must be non-zero".into()));
        }
        if !(self.countdown_unit_secs > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "countdown_unit_secs must be positive, got {}",
                self.countdown_unit_secs
            )));
        }
        Ok(())
    }
}
