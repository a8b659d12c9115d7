//! Bevy integration: the [`Simulation`](crate::sim::Simulation) as a
//! resource, driven by a `RumorTick` schedule.

pub mod app;
pub mod schedule;

pub use app::{
    GossipReports, GossipRequest, PhaseEntered, RumorPlugin, TickDelta, build_rumor_app,
};
pub use schedule::{RumorPhase, RumorTick, configure_rumor_schedule};
