//! Rumor diffusion over the NPC roster.
//!
//! One call to [`spread_gossip`] does a single O(N) pass to measure how far
//! an event reaches, then updates the opinions of whoever hears about it:
//!
//! | magnitude                        | who is updated                         |
//! |----------------------------------|----------------------------------------|
//! | `< lower_limit`                  | nobody, the rumor dies out             |
//! | `> upper_limit`                  | every NPC in the roster                |
//! | otherwise                        | NPCs sharing a category with the reach |

use serde::{Deserialize, Serialize};

use crate::npc::{CategoryMask, Npc, NpcTraits, Opinion, Position, Roster};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GossipConfig {
    /// Distance direct word of mouth can cover.
    pub gossip_range: f64,
    /// Magnitude under which a rumor dies out.
    pub lower_limit: f64,
    /// Magnitude over which everyone hears about it.
    pub upper_limit: f64,
}

impl Default for GossipConfig {
    fn default() -> Self {
        Self {
            gossip_range: 20.0,
            lower_limit: 0.3,
            upper_limit: 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Event and report
// ---------------------------------------------------------------------------

/// Something the player did that people may talk about. Lives for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GossipEvent {
    /// In `[0, 1]`.
    pub importance: f64,
    /// Rebellion of whoever the rumor is about, in `[0, 1]`.
    pub rebellion: f64,
    /// In `[-1, 1]`; negative values reassure.
    pub scariness: f64,
    pub origin: Position,
}

impl GossipEvent {
    pub fn new(importance: f64, rebellion: f64, scariness: f64, origin: Position) -> Self {
        Self {
            importance,
            rebellion,
            scariness,
            origin,
        }
    }

    /// Parameters clamped to their domains, or `None` if any is not finite.
    fn normalized(&self) -> Option<GossipEvent> {
        let finite = [self.importance, self.rebellion, self.scariness]
            .iter()
            .all(|v| v.is_finite());
        finite.then(|| GossipEvent {
            importance: self.importance.clamp(0.0, 1.0),
            rebellion: self.rebellion.clamp(0.0, 1.0),
            scariness: self.scariness.clamp(-1.0, 1.0),
            origin: self.origin,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GossipOutcome {
    DiedOut,
    Local,
    Viral,
}

/// Popularity-weighted reach of an event around its origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GossipReach {
    pub reach: f64,
    pub categories: CategoryMask,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GossipReport {
    pub magnitude: f64,
    pub reached: CategoryMask,
    pub outcome: GossipOutcome,
    pub updated: usize,
}

// ---------------------------------------------------------------------------
// Diffusion
// ---------------------------------------------------------------------------

/// Sum popularity and collect categories of NPCs strictly within `range`.
pub fn measure_reach<'a>(npcs: impl IntoIterator<Item = &'a Npc>, origin: Position, range: f64) -> GossipReach {
    let mut out = GossipReach::default();
    for npc in npcs {
        if npc.position().distance(origin) < range {
            out.reach += npc.traits().popularity;
            out.categories.insert(npc.category());
        }
    }
    out
}

/// Run one rumor through the roster, mutating opinions in place.
pub fn spread_gossip(roster: &mut Roster, event: &GossipEvent, config: &GossipConfig) -> GossipReport {
    let Some(event) = event.normalized() else {
        tracing::warn!(?event, "gossip event with non-finite parameters ignored");
        return GossipReport {
            magnitude: 0.0,
            reached: CategoryMask::EMPTY,
            outcome: GossipOutcome::DiedOut,
            updated: 0,
        };
    };

    let reach = measure_reach(roster.iter().map(|(_, npc)| npc), event.origin, config.gossip_range);
    let magnitude = reach.reach * event.importance;

    let outcome = if magnitude < config.lower_limit {
        GossipOutcome::DiedOut
    } else if magnitude > config.upper_limit {
        GossipOutcome::Viral
    } else {
        GossipOutcome::Local
    };

    let mut updated = 0;
    if outcome != GossipOutcome::DiedOut {
        for npc in roster.npcs_mut() {
            if outcome == GossipOutcome::Local && !reach.categories.contains(npc.category()) {
                continue;
            }
            let traits = *npc.traits();
            apply_gossip(npc.opinion_mut(), &traits, &event);
            updated += 1;
        }
    }

    tracing::debug!(
        magnitude,
        reached = reach.categories.bits(),
        ?outcome,
        updated,
        "gossip spread"
    );

    GossipReport {
        magnitude,
        reached: reach.categories,
        outcome,
        updated,
    }
}

/// Resonance between the rumor's subject and the listener, in `[0, 1]`.
///
/// Zero when the two sit on opposite sides of 0.5 rebellion.
pub fn political_match(source_rebellion: f64, listener_rebellion: f64) -> f64 {
    ((1.0 - 2.0 * source_rebellion) * (1.0 - 2.0 * listener_rebellion))
        .max(0.0)
        .sqrt()
}

/// Nudge one listener's opinion toward the rumor.
///
/// Each step is scaled by the remaining headroom `1 - |x|`, so a single
/// event moves a value toward ±1 without reaching it.
pub fn apply_gossip(opinion: &mut Opinion, traits: &NpcTraits, event: &GossipEvent) {
    let matched = political_match(event.rebellion, traits.rebellion);
    let importance = event.importance;

    opinion.political_agreement += matched * headroom(opinion.political_agreement) * importance;
    opinion.fear += event.scariness * headroom(opinion.fear) * importance;
    opinion.animosity +=
        traits.calm * (matched + event.scariness) / 2.0 * headroom(opinion.animosity) * importance;

    opinion.political_agreement = opinion.political_agreement.clamp(-1.0, 1.0);
    opinion.fear = opinion.fear.clamp(-1.0, 1.0);
    opinion.animosity = opinion.animosity.clamp(-1.0, 1.0);
}

fn headroom(value: f64) -> f64 {
    1.0 - value.abs()
}
