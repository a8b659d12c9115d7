//! The simulation context owned by the host.
//!
//! Holds everything the rumor core needs between ticks: the NPC roster,
//! the round scheduler and the clock that drives it. The host calls
//! [`Simulation::initialize`] once per session and [`Simulation::tick`] once
//! per step of its own loop.

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::gossip::{GossipConfig, GossipEvent, GossipReport, spread_gossip};
use crate::npc::{Npc, NpcId, Position, Roster};
use crate::procgen::{make_rng, populate};
use crate::scheduler::{Phase, RoundCallback, RoundConfig, RoundScheduler, SimClock, TimerId};

/// Tunables for one simulation session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub round: RoundConfig,
    pub gossip: GossipConfig,
    /// Seed for generated populations.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            round: RoundConfig::default(),
            gossip: GossipConfig::default(),
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Resource, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    clock: SimClock,
    roster: Roster,
    scheduler: RoundScheduler,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            clock: SimClock::new(),
            roster: Roster::new(),
            scheduler: RoundScheduler::new(config.round),
        }
    }

    /// Start a fresh session: empty roster, no callbacks, clock at zero.
    pub fn initialize(&mut self) {
        self.clock = SimClock::new();
        self.roster = Roster::new();
        self.scheduler.reset();
        tracing::info!(seed = self.config.seed, "simulation initialized");
    }

    /// Advance the clock by `dt` and run the scheduler once.
    ///
    /// A failing tick is logged and skipped; the next tick proceeds normally.
    pub fn tick(&mut self, dt: f64) -> Option<Phase> {
        self.clock.advance(dt);
        match self.scheduler.tick(self.clock.now) {
            Ok(entered) => entered,
            Err(err) => {
                tracing::error!(tick = self.clock.tick_count, now = self.clock.now, %err, "scheduler tick failed");
                None
            }
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn now(&self) -> f64 {
        self.clock.now
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    pub fn scheduler(&self) -> &RoundScheduler {
        &self.scheduler
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn npc(&self, id: NpcId) -> Option<&Npc> {
        self.roster.get(id)
    }

    pub fn register_npc(&mut self, npc: Npc) -> NpcId {
        self.roster.register(npc)
    }

    /// Register `count` generated NPCs around the origin, seeded from the config.
    pub fn populate(&mut self, count: usize, extent: f64) -> Vec<NpcId> {
        let mut rng = make_rng(self.config.seed, "population");
        populate(&mut rng, count, extent)
            .into_iter()
            .map(|npc| self.roster.register(npc))
            .collect()
    }

    /// Report a new position for an NPC. Returns false for unknown ids.
    pub fn move_npc(&mut self, id: NpcId, position: Position) -> bool {
        match self.roster.get_mut(id) {
            Some(npc) => {
                npc.set_position(position);
                true
            }
            None => false,
        }
    }

    pub fn add_start_callback(&mut self, callback: RoundCallback, priority: f64) -> Result<(), SimError> {
        Ok(self.scheduler.add_start_callback(callback, priority)?)
    }

    pub fn add_end_callback(&mut self, callback: RoundCallback, priority: f64) -> Result<(), SimError> {
        Ok(self.scheduler.add_end_callback(callback, priority)?)
    }

    /// Fire `callback` once, `delay` time units from now.
    pub fn schedule_after(&mut self, delay: f64, callback: RoundCallback) -> Result<TimerId, SimError> {
        Ok(self.scheduler.schedule_once(self.clock.now + delay, callback)?)
    }

    pub fn trigger_gossip(
        &mut self,
        importance: f64,
        rebellion: f64,
        scariness: f64,
        origin: Position,
    ) -> GossipReport {
        let event = GossipEvent::new(importance, rebellion, scariness, origin);
        self.spread(&event)
    }

    pub fn spread(&mut self, event: &GossipEvent) -> GossipReport {
        spread_gossip(&mut self.roster, event, &self.config.gossip)
    }
}
