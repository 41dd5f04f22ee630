//! # uno-engine
//!
//! A turn-based card game engine for an Uno-style shedding game.
//!
//! ## Design Principles
//!
//! 1. **One Mutating Entry Point**: The presentation layer submits raw
//!    action strings through [`GameController::submit_action`]; every
//!    rule check and state change happens behind it.
//!
//! 2. **Rejected Means Untouched**: A rejected action leaves the game
//!    exactly as it was. The caller re-prompts the same player.
//!
//! 3. **Data Over Dispatch**: Card behavior is a tagged union
//!    ([`CardKind`]), ownership a sum type ([`OwnerId`]). No string
//!    keys, no downcasting.
//!
//! 4. **Deterministic**: All randomness flows through a seeded
//!    [`GameRng`]; the same seed and action sequence replays the same
//!    game.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, actions, RNG
//! - `registry`: Entity store and the shared-pile directory
//! - `cards`: Card model and deck composition
//! - `stack`: Ordered card piles (hands, draw, discard)
//! - `game`: Legality rules, turn state, and the controller

pub mod cards;
pub mod core;
pub mod game;
pub mod registry;
pub mod stack;

// Re-export commonly used types
pub use crate::core::{
    ActionOutcome, ActionRecord, EntityId, GameRng, OwnerId, PileKind, Player, PlayerAction,
    PlayerId, PlayerMap,
};

pub use crate::cards::{Card, CardColor, CardEffect, CardKind, Deck, STANDARD_DECK_SIZE};

pub use crate::game::{
    is_legal_play, DrawStacking, GameBuilder, GameController, GameError, RulesConfig,
};

pub use crate::registry::{PileDirectory, Registry, RegistryError};

pub use crate::stack::{Pile, StackError};
