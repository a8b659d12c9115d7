//! Seeded random populations for tests, demos and hosts without authored NPCs.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::npc::{Category, Npc, NpcTraits, Position};

/// Half-width cap that keeps the span `2 * extent` finite.
const MAX_EXTENT: f64 = f64::MAX / 4.0;

/// Deterministic RNG for one generation pass.
pub fn make_rng(seed: u64, discriminator: &str) -> SmallRng {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    discriminator.hash(&mut hasher);
    SmallRng::seed_from_u64(hasher.finish())
}

/// `count` NPCs with uniform traits and categories, scattered on the
/// `[-extent, extent]` square of the ground plane.
///
/// A non-finite `extent` yields no NPCs.
pub fn populate(rng: &mut impl Rng, count: usize, extent: f64) -> Vec<Npc> {
    if !extent.is_finite() {
        tracing::warn!(extent, count, "population extent is not finite, nothing generated");
        return Vec::new();
    }
    let extent = extent.abs().min(MAX_EXTENT);
    (0..count)
        .map(|_| {
            let traits = NpcTraits::new(
                rng.random_range(0.0..=1.0),
                rng.random_range(0.0..=1.0),
                rng.random_range(0.0..=1.0),
                rng.random_range(0.0..=1.0),
                rng.random_range(0.0..=1.0),
            );
            let category = Category::ALL[rng.random_range(0..Category::ALL.len())];
            let position = Position::new(
                rng.random_range(-extent..=extent),
                0.0,
                rng.random_range(-extent..=extent),
            );
            Npc::new(traits, category, position)
        })
        .collect()
}
