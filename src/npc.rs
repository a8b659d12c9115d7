//! Non-player characters: fixed personality traits, a social category and a
//! mutable opinion state, kept in an append-only roster.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Social role of an NPC. Each role owns one bit of a [`CategoryMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Merchant,
    Bum,
    Politic,
    Religious,
    LowWorker,
    HighWorker,
    Government,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Merchant,
        Category::Bum,
        Category::Politic,
        Category::Religious,
        Category::LowWorker,
        Category::HighWorker,
        Category::Government,
    ];

    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Set of categories combined by bitwise OR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryMask(u32);

impl CategoryMask {
    pub const EMPTY: CategoryMask = CategoryMask(0);

    pub fn insert(&mut self, category: Category) {
        self.0 |= category.bit();
    }

    pub fn contains(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl FromIterator<Category> for CategoryMask {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut mask = CategoryMask::EMPTY;
        for category in iter {
            mask.insert(category);
        }
        mask
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(self, other: Position) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

// ---------------------------------------------------------------------------
// Traits and opinion
// ---------------------------------------------------------------------------

/// Personality constants, each in `[0, 1]`. Fixed for the NPC's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpcTraits {
    pub fear_propension: f64,
    pub rebellion: f64,
    pub calm: f64,
    pub popularity: f64,
    pub perception: f64,
}

impl NpcTraits {
    /// Build a trait set, clamping every value into `[0, 1]`.
    pub fn new(fear_propension: f64, rebellion: f64, calm: f64, popularity: f64, perception: f64) -> Self {
        Self {
            fear_propension: unit(fear_propension),
            rebellion: unit(rebellion),
            calm: unit(calm),
            popularity: unit(popularity),
            perception: unit(perception),
        }
    }
}

impl Default for NpcTraits {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5, 0.5)
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Player-dependent opinion, each value in `[-1, 1]`. Starts neutral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    pub political_agreement: f64,
    pub fear: f64,
    pub animosity: f64,
}

// ---------------------------------------------------------------------------
// Npc
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    traits: NpcTraits,
    category: Category,
    position: Position,
    opinion: Opinion,
}

impl Npc {
    pub fn new(traits: NpcTraits, category: Category, position: Position) -> Self {
        Self {
            traits,
            category,
            position,
            opinion: Opinion::default(),
        }
    }

    pub fn traits(&self) -> &NpcTraits {
        &self.traits
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Movement is owned by the host; it reports where the NPC now stands.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn opinion(&self) -> &Opinion {
        &self.opinion
    }

    pub(crate) fn opinion_mut(&mut self) -> &mut Opinion {
        &mut self.opinion
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NpcId(pub usize);

/// Append-only population. Ids are dense and never reused.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    npcs: Vec<Npc>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, npc: Npc) -> NpcId {
        let id = NpcId(self.npcs.len());
        tracing::debug!(id = id.0, category = ?npc.category, "npc registered");
        self.npcs.push(npc);
        id
    }

    pub fn get(&self, id: NpcId) -> Option<&Npc> {
        self.npcs.get(id.0)
    }

    pub fn get_mut(&mut self, id: NpcId) -> Option<&mut Npc> {
        self.npcs.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NpcId, &Npc)> {
        self.npcs.iter().enumerate().map(|(i, npc)| (NpcId(i), npc))
    }

    pub(crate) fn npcs_mut(&mut self) -> &mut [Npc] {
        &mut self.npcs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_bits_are_distinct() {
        let mask: CategoryMask = Category::ALL.into_iter().collect();
        assert_eq!(mask.bits(), 0b111_1111);
        for (i, a) in Category::ALL.iter().enumerate() {
            for b in &Category::ALL[i + 1..] {
                assert_eq!(a.bit() & b.bit(), 0);
            }
        }
    }

    #[test]
    fn mask_contains_only_inserted() {
        let mut mask = CategoryMask::EMPTY;
        assert!(mask.is_empty());
        mask.insert(Category::Merchant);
        mask.insert(Category::Religious);
        assert!(mask.contains(Category::Merchant));
        assert!(mask.contains(Category::Religious));
        assert!(!mask.contains(Category::Bum));
    }

    #[test]
    fn traits_are_clamped() {
        let traits = NpcTraits::new(-1.0, 2.0, 0.3, f64::NAN, 1.0);
        assert_eq!(traits.fear_propension, 0.0);
        assert_eq!(traits.rebellion, 1.0);
        assert_eq!(traits.calm, 0.3);
        assert_eq!(traits.popularity, 0.0);
        assert_eq!(traits.perception, 1.0);
    }

    #[test]
    fn new_npc_has_neutral_opinion() {
        let npc = Npc::new(NpcTraits::default(), Category::Bum, Position::default());
        assert_eq!(*npc.opinion(), Opinion::default());
    }

    #[test]
    fn roster_ids_are_sequential() {
        let mut roster = Roster::new();
        let a = roster.register(Npc::new(NpcTraits::default(), Category::Bum, Position::default()));
        let b = roster.register(Npc::new(NpcTraits::default(), Category::Politic, Position::default()));
        assert_eq!(a, NpcId(0));
        assert_eq!(b, NpcId(1));
        assert_eq!(roster.get(b).map(Npc::category), Some(Category::Politic));
        assert!(roster.get(NpcId(2)).is_none());
    }

    #[test]
    fn position_distance() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance(b), 5.0);
    }
}
