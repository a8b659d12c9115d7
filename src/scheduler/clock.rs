/// Simulation clock owned by the host loop.
///
/// Time only moves when [`SimClock::advance`] is called, so every consumer
/// within one tick sees the same `now`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    pub now: f64,
    pub tick_count: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` time units. Negative or non-finite steps only count
    /// the tick.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.now += dt;
        }
        self.tick_count += 1;
    }
}
