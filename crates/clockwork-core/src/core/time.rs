/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of simulation ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    max_steps: u32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns the number of ticks to run, at most `max_steps`;
    /// time beyond that is dropped so a stalled tab does not replay a burst.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator = (self.accumulator + frame_dt.max(0.0)).min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Level countdown measured in whole units (by default tenths of a second).
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    unit_secs: f32,
    elapsed: f32,
    expired: bool,
}

impl Countdown {
    pub fn new(duration: u32, unit_secs: f32) -> Self {
        Self {
            duration,
            remaining: duration,
            unit_secs,
            elapsed: 0.0,
            expired: duration == 0,
        }
    }

    /// Start over with the full duration.
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.elapsed = 0.0;
        self.expired = self.duration == 0;
    }

    /// Advance by `dt` seconds. Returns true on the tick the countdown expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.expired {
            return false;
        }
        self.elapsed += dt;
        while self.elapsed >= self.unit_secs && self.remaining > 0 {
            self.elapsed -= self.unit_secs;
            self.remaining -= 1;
        }
        if self.remaining == 0 {
            self.expired = true;
            return true;
        }
        false
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Fraction of the level time used, 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        (self.duration - self.remaining) as f32 / self.duration as f32
    }

    /// Angle of the timer dial pointer in degrees: a full turn over the level.
    pub fn dial_angle(&self) -> f32 {
        self.progress() * 360.0
    }
}
