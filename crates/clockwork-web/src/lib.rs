pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use clockwork_core::{GameConfig, InputEvent, LevelPack};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

/// Start a session. `config_json` may be empty for defaults; `levels_json`
/// replaces the built-in level pack when given.
#[wasm_bindgen]
pub fn game_init(config_json: &str, levels_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let to_js = |e: clockwork_core::Error| JsValue::from_str(&e.to_string());
    let config = if config_json.trim().is_empty() {
        GameConfig::default()
    } else {
        GameConfig::from_json(config_json).map_err(to_js)?
    };
    let pack = match levels_json {
        Some(json) => LevelPack::from_json(&json).map_err(to_js)?,
        None => LevelPack::builtin(),
    };
    let runner = GameRunner::new(config, pack).map_err(to_js)?;
    log::info!("clockwork: initialized with {} levels", runner.session().level_count());

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    Ok(())
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_hexes_ptr() -> *const f32 {
    with_runner(|r| r.hexes_ptr())
}

#[wasm_bindgen]
pub fn get_hex_count() -> u32 {
    with_runner(|r| r.hex_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.event_count())
}

#[wasm_bindgen]
pub fn get_level() -> u32 {
    with_runner(|r| r.level())
}

#[wasm_bindgen]
pub fn get_level_count() -> u32 {
    with_runner(|r| r.level_count())
}

/// 0 playing, 1 level complete, 2 out of time, 3 game won.
#[wasm_bindgen]
pub fn get_phase() -> u32 {
    with_runner(|r| r.phase())
}

#[wasm_bindgen]
pub fn get_dial_angle() -> f32 {
    with_runner(|r| r.dial_angle())
}

#[wasm_bindgen]
pub fn get_time_remaining() -> u32 {
    with_runner(|r| r.remaining())
}

/// Current board in the `row, col, configuration` text format.
#[wasm_bindgen]
pub fn get_board_text() -> String {
    with_runner(|r| r.board_text())
}
