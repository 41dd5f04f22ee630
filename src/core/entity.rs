//! Entity identification.
//!
//! Every game object (card, pile, player) has a unique `EntityId`,
//! assigned once at creation by the [`Registry`](crate::registry::Registry)
//! and never reused or changed.
//!
//! Ownership is modeled with the `OwnerId` sum type: a card belongs
//! either to a player's hand or to one of the three reserved piles.
//! This replaces string-keyed owners, so a typo can't silently create
//! a fourth pile.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Unique identifier for any game entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// The three reserved shared piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    /// Pre-shuffle universe of all cards, emptied once dealing completes.
    Dealer,
    /// Face-down pile players draw unseen cards from.
    Draw,
    /// Face-up pile of played cards; its last entry is the "top card".
    Discard,
}

impl PileKind {
    /// All pile kinds, in registration order.
    pub const ALL: [PileKind; 3] = [PileKind::Dealer, PileKind::Draw, PileKind::Discard];

    /// Human-readable pile name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PileKind::Dealer => "dealer pile",
            PileKind::Draw => "draw pile",
            PileKind::Discard => "discard pile",
        }
    }
}

impl std::fmt::Display for PileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Owner of a card or a pile: a player's hand, or a reserved pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerId {
    Player(PlayerId),
    Pile(PileKind),
}

impl OwnerId {
    /// Get the player, if this owner is a player.
    #[must_use]
    pub const fn as_player(self) -> Option<PlayerId> {
        match self {
            OwnerId::Player(p) => Some(p),
            OwnerId::Pile(_) => None,
        }
    }

    /// Check whether this owner is the given pile.
    #[must_use]
    pub fn is_pile(self, kind: PileKind) -> bool {
        self == OwnerId::Pile(kind)
    }
}

impl From<PlayerId> for OwnerId {
    fn from(player: PlayerId) -> Self {
        OwnerId::Player(player)
    }
}

impl From<PileKind> for OwnerId {
    fn from(pile: PileKind) -> Self {
        OwnerId::Pile(pile)
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerId::Player(p) => write!(f, "{p}"),
            OwnerId::Pile(k) => write!(f, "{k}"),
        }
    }
}
