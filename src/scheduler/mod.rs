mod clock;
mod round;

pub use clock::SimClock;
pub use round::{Phase, RoundCallback, RoundConfig, RoundEvent, RoundScheduler, TimerId};
