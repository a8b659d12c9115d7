use bevy_app::{App, Plugin};
use bevy_ecs::message::{Message, MessageReader, MessageRegistry, MessageWriter};
use bevy_ecs::resource::Resource;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Res, ResMut};

use super::schedule::{RumorPhase, RumorTick, configure_rumor_schedule};
use crate::gossip::{GossipEvent, GossipReport};
use crate::scheduler::Phase;
use crate::sim::{Simulation, SimulationConfig};

/// Simulated time that passes per `RumorTick`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct TickDelta(pub f64);

/// A rumor to spread during the next `Gossip` phase.
#[derive(Message, Clone, Debug)]
pub struct GossipRequest(pub GossipEvent);

/// Emitted whenever the round scheduler enters a new phase.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct PhaseEntered {
    pub phase: Phase,
    pub round: u64,
    pub now: f64,
}

/// Reports for the rumors spread during the latest tick, in request order.
#[derive(Resource, Debug, Clone, Default)]
pub struct GossipReports(pub Vec<GossipReport>);

/// Build a headless Bevy app holding a [`Simulation`] resource.
///
/// Add [`RumorPlugin`] to get the systems that drive it:
/// ```no_run
/// # use rumor_mill::ecs::{build_rumor_app, RumorPlugin, RumorTick};
/// # use rumor_mill::sim::SimulationConfig;
/// let mut app = build_rumor_app(SimulationConfig::default(), 0.1);
/// app.add_plugins(RumorPlugin);
/// for _ in 0..600 {
///     app.world_mut().run_schedule(RumorTick);
/// }
/// ```
pub fn build_rumor_app(config: SimulationConfig, dt: f64) -> App {
    let mut app = App::empty();

    app.insert_resource(Simulation::new(config));
    app.insert_resource(TickDelta(dt));
    app.init_resource::<GossipReports>();

    MessageRegistry::register_message::<GossipRequest>(app.world_mut());
    MessageRegistry::register_message::<PhaseEntered>(app.world_mut());

    let mut schedule = configure_rumor_schedule();
    schedule.add_systems(bevy_ecs::message::message_update_system.in_set(RumorPhase::PreUpdate));
    app.add_schedule(schedule);
    app
}

/// Advances the round scheduler and spreads requested rumors each tick.
pub struct RumorPlugin;

impl Plugin for RumorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(RumorTick, advance_simulation.in_set(RumorPhase::Update));
        app.add_systems(RumorTick, spread_requested_gossip.in_set(RumorPhase::Gossip));
    }
}

fn advance_simulation(
    mut sim: ResMut<Simulation>,
    delta: Res<TickDelta>,
    mut entered: MessageWriter<PhaseEntered>,
) {
    if let Some(phase) = sim.tick(delta.0) {
        entered.write(PhaseEntered {
            phase,
            round: sim.scheduler().round(),
            now: sim.now(),
        });
    }
}

fn spread_requested_gossip(
    mut sim: ResMut<Simulation>,
    mut requests: MessageReader<GossipRequest>,
    mut reports: ResMut<GossipReports>,
) {
    reports.0.clear();
    for GossipRequest(event) in requests.read() {
        let report = sim.spread(event);
        reports.0.push(report);
    }
}
