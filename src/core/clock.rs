use std::time::Instant;

/// Default viewer time base: one unit per 20 ms.
pub const DEFAULT_UNITS_PER_SECOND: f32 = 50.0;

/// Frame clock - measures elapsed time between ticks in viewer time units
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    units_per_second: f32,
}

impl Clock {
    /// Create new clock starting now
    pub fn new(units_per_second: f32) -> Self {
        Self {
            last_tick: Instant::now(),
            units_per_second,
        }
    }

    /// Get elapsed time since last tick and advance clock
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let seconds = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        seconds * self.units_per_second
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_UNITS_PER_SECOND)
    }
}
