use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::error::{Error, Result};
use crate::api::types::SessionEvent;
use crate::assets::levels::LevelPack;
use crate::components::hex::HexMetrics;
use crate::core::board::{Board, Hit};
use crate::core::rng::Rng;
use crate::core::time::Countdown;
use crate::input::queue::{InputEvent, InputQueue, CUSTOM_NEXT, CUSTOM_RESTART};

/// Session state machine phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Goal lit; waiting for the player to continue.
    LevelComplete,
    /// Countdown ran out; continuing retries the level.
    OutOfTime,
    /// Last level completed.
    GameWon,
}

impl Phase {
    /// Numeric phase id for the page.
    pub fn id(self) -> u32 {
        match self {
            Phase::Playing => 0,
            Phase::LevelComplete => 1,
            Phase::OutOfTime => 2,
            Phase::GameWon => 3,
        }
    }
}

/// One play-through of a level pack.
pub struct Session {
    config: GameConfig,
    pack: LevelPack,
    metrics: HexMetrics,
    rng: Rng,
    level: usize,
    board: Board,
    countdown: Countdown,
    phase: Phase,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Validate `config` and every level in `pack`, then start on the first level.
    pub fn new(config: GameConfig, pack: LevelPack) -> Result<Self> {
        config.validate()?;
        pack.validate()?;
        let metrics = HexMetrics::from_width(config.tile_width);
        let mut rng = Rng::new(config.random_seed);
        let first = pack.get(0).ok_or(Error::EmptyBoard)?;
        let board = Board::from_level(first, metrics, &mut rng)?;
        let countdown = Countdown::new(config.level_duration, config.countdown_unit_secs);
        let mut session = Self {
            config,
            pack,
            metrics,
            rng,
            level: 0,
            board,
            countdown,
            phase: Phase::Playing,
            events: Vec::new(),
        };
        session.enter_level(0);
        Ok(session)
    }

    /// Load level `index` (0-based) fresh: new board, full countdown, first pass.
    pub fn start_level(&mut self, index: usize) -> Result<()> {
        let def = self.pack.get(index).ok_or(Error::LevelOutOfRange(index))?;
        self.board = Board::from_level(def, self.metrics, &mut self.rng)?;
        self.enter_level(index);
        Ok(())
    }

    /// Start play on the board already built for level `index`.
    fn enter_level(&mut self, index: usize) {
        self.board.resolve();
        self.level = index;
        self.countdown.reset();
        self.phase = Phase::Playing;
        log::info!(
            "Level {} of {} started ({}): {} hexes",
            index + 1,
            self.pack.len(),
            self.pack.levels[index].name,
            self.board.len()
        );
        self.events.push(SessionEvent::LevelStarted { level: index + 1 });
    }

    /// Handle a click at raw canvas pixels. Returns the hex that started turning, if any.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<Hit> {
        if self.phase != Phase::Playing {
            return None;
        }
        let point = Vec2::new(x, y + self.config.pointer_offset_y);
        let origin = Vec2::new(self.config.board_origin_x, self.config.board_origin_y);
        let hit = self.board.hit_test(point, origin)?;
        match self.board.begin_rotation(hit.coord, hit.clockwise) {
            Ok(true) => {
                log::debug!(
                    "Rotating {:?} {}",
                    hit.coord,
                    if hit.clockwise { "clockwise" } else { "counter-clockwise" }
                );
                self.events.push(SessionEvent::HexRotated {
                    at: hit.coord,
                    clockwise: hit.clockwise,
                });
                Some(hit)
            }
            Ok(false) => None,
            Err(e) => {
                log::warn!("Pointer hit a hex the board cannot rotate: {e}");
                None
            }
        }
    }

    /// Run one fixed simulation step.
    pub fn tick(&mut self) {
        let settled = self.board.advance_rotations(self.config.rotation_step_degrees);
        if settled > 0 && self.board.is_settled() {
            let lit = self.board.resolve().lit;
            self.events.push(SessionEvent::CircuitChanged { lit });
        }

        if self.phase != Phase::Playing {
            return;
        }

        let level = self.level + 1;
        if self.countdown.tick(self.config.fixed_dt) {
            log::info!("Level {level} out of time");
            self.phase = Phase::OutOfTime;
            self.events.push(SessionEvent::OutOfTime { level });
        } else if self.board.is_complete() && self.board.is_settled() {
            if level == self.pack.len() {
                log::info!("Level {level} complete, game won");
                self.phase = Phase::GameWon;
                self.events.push(SessionEvent::LevelComplete { level });
                self.events.push(SessionEvent::GameWon);
            } else {
                log::info!("Level {level} complete");
                self.phase = Phase::LevelComplete;
                self.events.push(SessionEvent::LevelComplete { level });
            }
        }
    }

    /// Continue past a banner: advance after a completed level, retry after
    /// running out of time. Does nothing while playing or once the game is won.
    pub fn next(&mut self) -> Result<()> {
        match self.phase {
            Phase::LevelComplete => self.start_level(self.level + 1),
            Phase::OutOfTime => self.start_level(self.level),
            Phase::Playing | Phase::GameWon => Ok(()),
        }
    }

    /// Back to the first level.
    pub fn restart(&mut self) -> Result<()> {
        self.start_level(0)
    }

    /// Apply a batch of page input. A failing event is logged and the rest of
    /// the batch still runs; the first failure is returned.
    pub fn handle_input(&mut self, events: impl IntoIterator<Item = InputEvent>) -> Result<()> {
        let mut first_error = None;
        for event in events {
            let outcome = match event {
                InputEvent::PointerDown { x, y } => {
                    self.pointer_down(x, y);
                    Ok(())
                }
                InputEvent::Custom { kind: CUSTOM_NEXT, .. } => self.next(),
                InputEvent::Custom { kind: CUSTOM_RESTART, .. } => self.restart(),
                InputEvent::Custom { kind, .. } => {
                    log::warn!("Ignoring unknown custom event {kind}");
                    Ok(())
                }
            };
            if let Err(e) = outcome {
                log::warn!("Input event {event:?} failed: {e}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Drain `input`, apply it, then run one step. The step runs even if some
    /// input failed.
    pub fn update(&mut self, input: &mut InputQueue) -> Result<()> {
        let handled = self.handle_input(input.drain());
        self.tick();
        handled
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current level, 1-based.
    pub fn level(&self) -> usize {
        self.level + 1
    }

    pub fn level_count(&self) -> usize {
        self.pack.len()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn dial_angle(&self) -> f32 {
        self.countdown.dial_angle()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::levels::{LevelDef, Placement};
    use crate::components::hex::HexCoord;

    // The goal sits below the seed. Seed layout 8 has 5 on its south side; the
    // goal (layout 2) needs one counter-clockwise turn to show 5 on its north side.
    fn pack(levels: usize) -> LevelPack {
        let level = LevelDef {
            name: "pair".into(),
            placements: vec![Placement::new(0, 0, 8), Placement::new(1, 0, 2)],
            seed: HexCoord::new(0, 0),
            goal: HexCoord::new(1, 0),
        };
        LevelPack {
            levels: vec![level; levels],
        }
    }

    fn session(levels: usize) -> Session {
        Session::new(GameConfig::default(), pack(levels)).unwrap()
    }

    // Raw pointer just left of the goal's centre (90, 194.3 after the y offset).
    const GOAL_LEFT: (f32, f32) = (80.0, 210.0);

    fn solve(session: &mut Session) {
        let hit = session.pointer_down(GOAL_LEFT.0, GOAL_LEFT.1).unwrap();
        assert_eq!(hit, Hit { coord: HexCoord::new(1, 0), clockwise: false });
        for _ in 0..12 {
            session.tick();
        }
    }

    #[test]
    fn starts_on_first_level() {
        let mut s = session(2);
        assert_eq!(s.level(), 1);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(!s.board().is_complete());
        assert_eq!(s.drain_events(), vec![SessionEvent::LevelStarted { level: 1 }]);
    }

    #[test]
    fn solving_completes_then_advances() {
        let mut s = session(2);
        s.drain_events();
        solve(&mut s);

        assert_eq!(s.phase(), Phase::LevelComplete);
        assert_eq!(
            s.drain_events(),
            vec![
                SessionEvent::HexRotated { at: HexCoord::new(1, 0), clockwise: false },
                SessionEvent::CircuitChanged { lit: 2 },
                SessionEvent::LevelComplete { level: 1 },
            ]
        );

        // Clicks are ignored behind the banner.
        assert!(s.pointer_down(GOAL_LEFT.0, GOAL_LEFT.1).is_none());

        s.next().unwrap();
        assert_eq!(s.level(), 2);
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.countdown().remaining(), 300);

        solve(&mut s);
        assert_eq!(s.phase(), Phase::GameWon);
        assert!(s.drain_events().ends_with(&[
            SessionEvent::LevelComplete { level: 2 },
            SessionEvent::GameWon,
        ]));

        s.next().unwrap();
        assert_eq!(s.phase(), Phase::GameWon);
    }

    #[test]
    fn no_pass_while_the_solving_turn_animates() {
        let mut s = session(2);
        s.drain_events();
        s.pointer_down(GOAL_LEFT.0, GOAL_LEFT.1).unwrap();
        for _ in 0..6 {
            s.tick();
        }
        // Connectors already match; the pass must wait for the turn to finish.
        assert!(!s.board().is_complete());
        assert!(!s.board().hex_at(HexCoord::new(1, 0)).unwrap().lit);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(!s
            .events()
            .iter()
            .any(|e| matches!(e, SessionEvent::CircuitChanged { .. })));
    }

    #[test]
    fn pass_waits_for_every_hex_to_settle() {
        let mut s = session(2);
        s.drain_events();
        s.pointer_down(GOAL_LEFT.0, GOAL_LEFT.1).unwrap();
        for _ in 0..3 {
            s.tick();
        }
        // Right half of the seed turns it clockwise, moving its 5 off the south side.
        let hit = s.pointer_down(100.0, 123.0).unwrap();
        assert_eq!(hit, Hit { coord: HexCoord::new(0, 0), clockwise: true });

        let passes = |s: &Session| {
            s.events()
                .iter()
                .filter(|e| matches!(e, SessionEvent::CircuitChanged { .. }))
                .count()
        };
        for _ in 0..9 {
            s.tick();
        }
        // The goal has settled but the seed is still turning.
        assert!(!s.board().hex_at(HexCoord::new(1, 0)).unwrap().is_rotating());
        assert!(!s.board().is_settled());
        assert_eq!(passes(&s), 0);

        for _ in 0..3 {
            s.tick();
        }
        assert!(s.board().is_settled());
        assert_eq!(passes(&s), 1);
        assert!(s.events().contains(&SessionEvent::CircuitChanged { lit: 1 }));
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn first_board_is_dealt_once() {
        let mut pack = pack(1);
        pack.levels[0].placements[1].configuration = None;
        let expected = Board::from_level(
            &pack.levels[0],
            HexMetrics::from_width(100.0),
            &mut Rng::new(GameConfig::default().random_seed),
        )
        .unwrap();
        let s = Session::new(GameConfig::default(), pack).unwrap();
        let at = HexCoord::new(1, 0);
        assert_eq!(
            s.board().hex_at(at).unwrap().configuration(),
            expected.hex_at(at).unwrap().configuration()
        );
    }

    #[test]
    fn bad_later_level_rejected_at_start() {
        let mut pack = pack(2);
        pack.levels[1].placements.push(Placement::new(0, 0, 1));
        assert!(matches!(
            Session::new(GameConfig::default(), pack),
            Err(Error::DuplicatePlacement { row: 0, col: 0 })
        ));
    }

    #[test]
    fn failed_next_keeps_processing_the_batch() {
        let mut s = session(2);
        solve(&mut s);
        assert_eq!(s.phase(), Phase::LevelComplete);
        s.drain_events();

        // Break the next level after the pack was checked.
        s.pack.levels[1].placements.push(Placement::new(0, 0, 1));
        let mut input = InputQueue::new();
        input.push(InputEvent::Custom { kind: CUSTOM_NEXT, a: 0.0, b: 0.0, c: 0.0 });
        input.push(InputEvent::Custom { kind: CUSTOM_RESTART, a: 0.0, b: 0.0, c: 0.0 });

        assert!(matches!(
            s.update(&mut input),
            Err(Error::DuplicatePlacement { row: 0, col: 0 })
        ));
        assert!(input.is_empty());
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.level(), 1);
        assert_eq!(s.drain_events(), vec![SessionEvent::LevelStarted { level: 1 }]);
    }

    #[test]
    fn second_click_while_turning_is_ignored() {
        let mut s = session(1);
        assert!(s.pointer_down(GOAL_LEFT.0, GOAL_LEFT.1).is_some());
        s.tick();
        assert!(s.pointer_down(GOAL_LEFT.0, GOAL_LEFT.1).is_none());
        for _ in 0..11 {
            s.tick();
        }
        assert_eq!(s.board().hex_at(HexCoord::new(1, 0)).unwrap().angle(), 300);
    }

    #[test]
    fn out_of_time_then_retry() {
        let config = GameConfig {
            level_duration: 3,
            countdown_unit_secs: 0.1,
            fixed_dt: 0.05,
            ..GameConfig::default()
        };
        let mut s = Session::new(config, pack(2)).unwrap();
        for _ in 0..6 {
            s.tick();
        }
        assert_eq!(s.phase(), Phase::OutOfTime);
        assert!(s.drain_events().contains(&SessionEvent::OutOfTime { level: 1 }));
        assert_eq!(s.dial_angle(), 360.0);

        s.next().unwrap();
        assert_eq!(s.level(), 1);
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.dial_angle(), 0.0);
    }

    #[test]
    fn input_queue_drives_the_session() {
        let mut s = session(2);
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { x: GOAL_LEFT.0, y: GOAL_LEFT.1 });
        s.update(&mut input).unwrap();
        assert!(input.is_empty());
        for _ in 0..11 {
            s.update(&mut input).unwrap();
        }
        assert_eq!(s.phase(), Phase::LevelComplete);

        input.push(InputEvent::Custom { kind: CUSTOM_NEXT, a: 0.0, b: 0.0, c: 0.0 });
        s.update(&mut input).unwrap();
        assert_eq!(s.level(), 2);

        input.push(InputEvent::Custom { kind: CUSTOM_RESTART, a: 0.0, b: 0.0, c: 0.0 });
        s.update(&mut input).unwrap();
        assert_eq!(s.level(), 1);
    }

    #[test]
    fn bad_level_index_is_rejected() {
        let mut s = session(1);
        assert!(matches!(s.start_level(5), Err(Error::LevelOutOfRange(5))));
        assert_eq!(s.level(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            tile_width: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(Session::new(config, pack(1)), Err(Error::InvalidConfig(_))));
    }
}
