use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

/// Schedule label for one simulation step.
/// Run manually via `app.world_mut().run_schedule(RumorTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RumorTick;

/// Ordered phases within each step: PreUpdate < Update < Gossip < Last.
///
/// The round scheduler advances in `Update`, queued rumors spread in
/// `Gossip`, and consumers read results in `Last`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RumorPhase {
    PreUpdate,
    Update,
    Gossip,
    Last,
}

/// Build a `RumorTick` schedule with phase ordering.
///
/// Single-threaded: callbacks and gossip mutate one shared context.
pub fn configure_rumor_schedule() -> Schedule {
    let mut schedule = Schedule::new(RumorTick);
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.configure_sets(
        (
            RumorPhase::PreUpdate,
            RumorPhase::Update,
            RumorPhase::Gossip,
            RumorPhase::Last,
        )
            .chain(),
    );
    schedule
}
