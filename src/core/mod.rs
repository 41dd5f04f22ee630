//! Core types: entity IDs, players, actions, RNG.

pub mod action;
pub mod entity;
pub mod player;
pub mod rng;

pub use action::{ActionOutcome, ActionRecord, ParseActionError, PlayerAction};
pub use entity::{EntityId, OwnerId, PileKind};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
