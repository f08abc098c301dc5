use clockwork_core::{
    FixedTimestep, GameConfig, InputEvent, InputQueue, LevelPack, Result, Session, StateBuffer,
};

/// Wires a [`Session`] to the page's frame loop.
///
/// The page pushes input as it happens and calls [`GameRunner::tick`] once per
/// animation frame; the runner turns the frame delta into fixed steps and then
/// refreshes the buffers the page reads back.
pub struct GameRunner {
    session: Session,
    input: InputQueue,
    timestep: FixedTimestep,
    buffer: StateBuffer,
}

impl GameRunner {
    pub fn new(config: GameConfig, pack: LevelPack) -> Result<Self> {
        let timestep = FixedTimestep::new(config.fixed_dt, config.max_steps_per_frame);
        let mut session = Session::new(config, pack)?;
        let mut buffer = StateBuffer::new();
        buffer.rebuild(&mut session);
        Ok(Self {
            session,
            input: InputQueue::new(),
            timestep,
            buffer,
        })
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed steps, then rebuild the read-back buffers.
    /// Input waits in the queue until a frame runs at least one step.
    pub fn tick(&mut self, dt: f32) {
        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            let outcome = if step == 0 {
                self.session.update(&mut self.input)
            } else {
                self.session.tick();
                Ok(())
            };
            if let Err(e) = outcome {
                log::error!("Session update failed: {e}");
            }
        }
        self.buffer.rebuild(&mut self.session);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ---- Pointer accessors for wasm memory reads ----

    pub fn hexes_ptr(&self) -> *const f32 {
        self.buffer.hexes_ptr()
    }

    pub fn hex_count(&self) -> u32 {
        self.buffer.hex_count()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.buffer.events_ptr()
    }

    pub fn event_count(&self) -> u32 {
        self.buffer.event_count()
    }

    pub fn level(&self) -> u32 {
        self.session.level() as u32
    }

    pub fn level_count(&self) -> u32 {
        self.session.level_count() as u32
    }

    pub fn phase(&self) -> u32 {
        self.session.phase().id()
    }

    pub fn dial_angle(&self) -> f32 {
        self.session.dial_angle()
    }

    pub fn remaining(&self) -> u32 {
        self.session.countdown().remaining()
    }

    pub fn board_text(&self) -> String {
        self.session.board().to_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clockwork_core::{Phase, CUSTOM_NEXT};

    fn runner() -> GameRunner {
        GameRunner::new(GameConfig::default(), LevelPack::builtin()).unwrap()
    }

    #[test]
    fn init_publishes_board_and_start_event() {
        let r = runner();
        assert_eq!(r.hex_count(), 20);
        assert_eq!(r.event_count(), 1);
        assert_eq!(r.level(), 1);
        assert_eq!(r.level_count(), 6);
        assert_eq!(r.phase(), Phase::Playing.id());
    }

    #[test]
    fn short_frame_keeps_input_queued() {
        let mut r = runner();
        r.push_input(InputEvent::Custom { kind: CUSTOM_NEXT, a: 0.0, b: 0.0, c: 0.0 });
        r.tick(0.001);
        assert_eq!(r.event_count(), 0);
        assert_eq!(r.remaining(), 300);

        r.tick(1.0 / 60.0);
        assert_eq!(r.level(), 1);
    }

    #[test]
    fn frames_run_the_countdown() {
        let mut r = runner();
        for _ in 0..60 {
            r.tick(1.0 / 60.0);
        }
        assert!(r.remaining() < 300);
        assert!(r.dial_angle() > 0.0);
        assert_eq!(r.board_text().lines().count(), 20);
    }
}
