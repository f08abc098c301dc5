/// Custom event: continue after a banner (next level, or retry after running out of time).
pub const CUSTOM_NEXT: u32 = 1;
/// Custom event: go back to the first level.
pub const CUSTOM_RESTART: u32 = 2;

/// Input the session understands. Coordinates are canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click/touch began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A button in the page UI; `kind` is one of the `CUSTOM_*` constants.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events written by the page and drained by the session once per frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
