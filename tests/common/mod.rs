#![allow(dead_code)]

use rumor_mill::npc::{Category, Npc, NpcTraits, Position, Roster};

/// An NPC on the x axis with neutral traits apart from the given ones.
pub fn npc(x: f64, popularity: f64, rebellion: f64, category: Category) -> Npc {
    Npc::new(
        NpcTraits::new(0.5, rebellion, 0.5, popularity, 0.5),
        category,
        Position::new(x, 0.0, 0.0),
    )
}

pub fn roster_of(npcs: impl IntoIterator<Item = Npc>) -> Roster {
    let mut roster = Roster::new();
    for npc in npcs {
        roster.register(npc);
    }
    roster
}

/// Three merchants at the origin and one far-away official.
pub fn market_square(popularity: f64) -> Roster {
    roster_of([
        npc(0.0, popularity, 0.2, Category::Merchant),
        npc(1.0, popularity, 0.2, Category::Merchant),
        npc(2.0, popularity, 0.8, Category::Merchant),
        npc(500.0, 0.9, 0.2, Category::Government),
    ])
}
