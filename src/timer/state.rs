//! Timer state structure and its synchronous transitions

/// Display orientation of a timer face, in right-angle steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Upright,
    Right,
    UpsideDown,
    Left,
}

impl Orientation {
    /// Angle in degrees, one of 0, 90, 180 or 270
    pub fn degrees(&self) -> u16 {
        match self {
            Orientation::Upright => 0,
            Orientation::Right => 90,
            Orientation::UpsideDown => 180,
            Orientation::Left => 270,
        }
    }

    /// The orientation a quarter turn clockwise from this one
    pub fn rotated(&self) -> Self {
        match self {
            Orientation::Upright => Orientation::Right,
            Orientation::Right => Orientation::UpsideDown,
            Orientation::UpsideDown => Orientation::Left,
            Orientation::Left => Orientation::Upright,
        }
    }
}

/// Countdown progress of a single timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    initial_seconds: u64,
    remaining_seconds: u64,
    orientation: Orientation,
}

impl TimerState {
    /// Create a timer state with a full countdown
    pub fn new(initial_seconds: u64) -> Self {
        Self {
            initial_seconds,
            remaining_seconds: initial_seconds,
            orientation: Orientation::default(),
        }
    }

    pub fn initial_seconds(&self) -> u64 {
        self.initial_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Take one second off the countdown, stopping at zero.
    ///
    /// Returns the remaining seconds after the step.
    pub fn tick(&mut self) -> u64 {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds
    }

    /// Adopt a new starting value, resetting the countdown if it differs
    /// from the recorded one. Returns whether a reset happened.
    pub fn reconfigure(&mut self, initial_seconds: u64) -> bool {
        if initial_seconds == self.initial_seconds {
            return false;
        }
        self.initial_seconds = initial_seconds;
        self.remaining_seconds = initial_seconds;
        true
    }

    /// Turn the face a quarter turn clockwise
    pub fn rotate(&mut self) -> Orientation {
        self.orientation = self.orientation.rotated();
        self.orientation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_stops_at_zero() {
        let mut state = TimerState::new(2);
        assert_eq!(state.tick(), 1);
        assert_eq!(state.tick(), 0);
        assert_eq!(state.tick(), 0);
        assert!(state.is_expired());
    }

    #[test]
    fn reconfigure_resets_only_on_change() {
        let mut state = TimerState::new(10);
        state.tick();
        state.tick();

        assert!(!state.reconfigure(10));
        assert_eq!(state.remaining_seconds(), 8);

        assert!(state.reconfigure(30));
        assert_eq!(state.initial_seconds(), 30);
        assert_eq!(state.remaining_seconds(), 30);
    }

    #[test]
    fn rotation_cycles_through_right_angles() {
        let mut state = TimerState::new(5);
        let angles: Vec<u16> = (0..5).map(|_| state.rotate().degrees()).collect();
        assert_eq!(angles, vec![90, 180, 270, 0, 90]);
        assert_eq!(state.remaining_seconds(), 5);
    }
}
