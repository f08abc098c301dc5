/// Which way a hex is being turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn from_clockwise(clockwise: bool) -> Self {
        if clockwise {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    pub fn is_clockwise(self) -> bool {
        self == Direction::Clockwise
    }

    /// +1 for clockwise, -1 for counter-clockwise.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Per-hex rotation animation.
///
/// The connector order is permuted the moment a rotation starts; `display` then
/// walks toward `target` one step per tick so the sprite can catch up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationState {
    #[default]
    Idle,
    Rotating {
        target: i32,
        direction: Direction,
        display: i32,
    },
}

/// Outcome of advancing a rotation by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStep {
    /// Nothing was rotating.
    Idle,
    /// Still turning; carries the angle to draw this tick.
    Turning(i32),
    /// Reached the target on this tick.
    Settled,
}

impl RotationState {
    pub fn start(from: i32, target: i32, direction: Direction) -> Self {
        RotationState::Rotating {
            target,
            direction,
            display: from,
        }
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self, RotationState::Rotating { .. })
    }

    /// Nudge the displayed angle by `step` degrees toward the target.
    pub fn advance(&mut self, step: i32) -> RotationStep {
        let RotationState::Rotating {
            target,
            direction,
            display,
        } = self
        else {
            return RotationStep::Idle;
        };

        *display += step * direction.sign();
        let reached = match direction {
            Direction::Clockwise => *display >= *target,
            Direction::CounterClockwise => *display <= *target,
        };
        if reached {
            *self = RotationState::Idle;
            RotationStep::Settled
        } else {
            RotationStep::Turning(*display)
        }
    }
}
