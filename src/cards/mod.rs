//! Card model: kinds, colors, effects, and deck composition.

pub mod card;
pub mod deck;

pub use card::{Card, CardColor, CardEffect, CardKind, ParseColorError};
pub use deck::{Deck, STANDARD_DECK_SIZE};
