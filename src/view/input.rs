use kurbo::Point;

use crate::config::PIXELS_PER_WHEEL_STEP;

/// Wheel rotation, relative to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDirection {
    /// Rotated away from the user
    Up,
    /// Rotated toward the user
    Down,
}

/// Pointer, keyboard and surface events in screen coordinates
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Press(Point),
    Release(Point),
    Move(Point),
    Wheel(WheelDirection),
    /// A typed character
    Key(char),
    Resize { width: u32, height: u32 },
}

/// Turns smooth pixel scrolling into discrete wheel notches.
///
/// Touchpads report many small deltas per gesture; one notch is emitted per
/// `PIXELS_PER_WHEEL_STEP` scrolled. Reversing direction drops the remainder.
#[derive(Clone, Debug, Default)]
pub struct WheelAccumulator {
    pending: f64,
}

impl WheelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line deltas are already notches; positive is away from the user
    pub fn lines(&mut self, dy: f64) -> Vec<WheelDirection> {
        self.pending = 0.0;
        if !dy.is_finite() {
            return Vec::new();
        }
        // A fractional line still counts as one notch
        let steps = if dy != 0.0 && dy.abs() < 1.0 { dy.signum() } else { dy.round() };
        notches(steps as i64)
    }

    /// Add a pixel delta and return the notches it completes
    pub fn pixels(&mut self, dy: f64) -> Vec<WheelDirection> {
        if !dy.is_finite() {
            return Vec::new();
        }
        if self.pending * dy < 0.0 {
            self.pending = 0.0;
        }
        self.pending += dy;
        let steps = (self.pending / PIXELS_PER_WHEEL_STEP).trunc();
        self.pending -= steps * PIXELS_PER_WHEEL_STEP;
        notches(steps as i64)
    }
}

/// Upper bound on notches from a single event
const MAX_NOTCHES: i64 = 16;

fn notches(steps: i64) -> Vec<WheelDirection> {
    let steps = steps.clamp(-MAX_NOTCHES, MAX_NOTCHES);
    let direction = if steps > 0 {
        WheelDirection::Up
    } else {
        WheelDirection::Down
    };
    vec![direction; steps.unsigned_abs() as usize]
}
