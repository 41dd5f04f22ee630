//! The card model.
//!
//! Cards are a tagged union over {Number, Wild, Draw-N, Reverse} — the
//! engine dispatches effects by tag, never by downcasting. A card's
//! color is `CardColor::None` only for the wild family.
//!
//! ## Ownership
//!
//! A card belongs to exactly one pile at all times after dealing;
//! `owner` mirrors the owning pile's `OwnerId` and is `None` only in
//! the brief window between creation and first placement.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::entity::{EntityId, OwnerId};

/// Card color. `None` is legal only for wild-family cards.
///
/// The derived order is the sort key for color-sorted hands.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CardColor {
    Red,
    Green,
    Blue,
    Yellow,
    None,
}

impl CardColor {
    /// The four playable colors, excluding `None`.
    pub const COLORS: [CardColor; 4] = [
        CardColor::Red,
        CardColor::Green,
        CardColor::Blue,
        CardColor::Yellow,
    ];

    /// Lowercase color word, empty for `None`.
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            CardColor::Red => "red",
            CardColor::Green => "green",
            CardColor::Blue => "blue",
            CardColor::Yellow => "yellow",
            CardColor::None => "",
        }
    }
}

/// A color word failed to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown color: {0}")]
pub struct ParseColorError(pub String);

impl std::str::FromStr for CardColor {
    type Err = ParseColorError;

    /// Parses the four playable color words. `None` is deliberately not
    /// parseable: a player can never declare a wild colorless.
    fn from_str(word: &str) -> Result<Self, Self::Err> {
        match word {
            "red" => Ok(CardColor::Red),
            "green" => Ok(CardColor::Green),
            "blue" => Ok(CardColor::Blue),
            "yellow" => Ok(CardColor::Yellow),
            other => Err(ParseColorError(other.to_string())),
        }
    }
}

impl std::fmt::Display for CardColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.word())
    }
}

/// Card kind: the tag the engine dispatches effects on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Numbered card, 1–9.
    Number(u8),
    /// Plain colorless joker with no payload.
    Wild,
    /// Forces the next player to draw `n` cards (2 or 4).
    Draw(u8),
    /// Flips the turn direction.
    Reverse,
}

impl CardKind {
    /// Is this a wild-family (non-number) card?
    #[must_use]
    pub const fn is_wild_family(self) -> bool {
        !matches!(self, CardKind::Number(_))
    }

    /// The number on a number card.
    #[must_use]
    pub const fn number(self) -> Option<u8> {
        match self {
            CardKind::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Label without the color prefix: `"7"`, `"wild"`, `"draw 2"`, `"reverse"`.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            CardKind::Number(n) => n.to_string(),
            CardKind::Wild => "wild".to_string(),
            CardKind::Draw(n) => format!("draw {n}"),
            CardKind::Reverse => "reverse".to_string(),
        }
    }
}

/// Special effect carried by a card, dispatched by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    /// The next player must draw `n` cards or stack another draw card.
    ForceDraw(u8),
    /// The turn direction flips.
    ReverseDirection,
}

/// A single card in the game universe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique entity ID, stable for the card's lifetime.
    pub id: EntityId,

    /// Kind tag.
    pub kind: CardKind,

    /// Color; reassigned only when a wild is played with a declared color.
    pub color: CardColor,

    /// Owner of the pile currently holding this card.
    pub owner: Option<OwnerId>,

    /// Transient display flag, set when the card is acquired and
    /// cleared at the end of the acquiring turn.
    pub newly_acquired: bool,
}

impl Card {
    /// Create a card. Wild-family cards may be colorless; number cards
    /// must be colored (checked by the deck builder, not here).
    #[must_use]
    pub fn new(id: EntityId, kind: CardKind, color: CardColor) -> Self {
        Self {
            id,
            kind,
            color,
            owner: None,
            newly_acquired: false,
        }
    }

    /// Render the card as `color + label`, e.g. `"red 7"`, `"draw 4"`,
    /// `"green reverse"`. Colorless cards render the bare label.
    #[must_use]
    pub fn render(&self) -> String {
        if self.color == CardColor::None {
            self.kind.label()
        } else {
            format!("{} {}", self.color, self.kind.label())
        }
    }

    /// The special effect this card carries, if any.
    #[must_use]
    pub const fn effect(&self) -> Option<CardEffect> {
        match self.kind {
            CardKind::Draw(n) => Some(CardEffect::ForceDraw(n)),
            CardKind::Reverse => Some(CardEffect::ReverseDirection),
            CardKind::Number(_) | CardKind::Wild => None,
        }
    }

    /// Build the player-facing messages for this card's effect.
    ///
    /// `pending_total` is the accumulated forced-draw amount after this
    /// play. Returns `(message for current player, message for next
    /// player)`, either of which may be absent.
    #[must_use]
    pub fn resolve_effect(&self, pending_total: u8) -> (Option<String>, Option<String>) {
        match self.effect() {
            Some(CardEffect::ForceDraw(_)) => (
                Some(format!("you played {}", self.render())),
                Some(format!(
                    "draw {pending_total} cards, or stack another draw card"
                )),
            ),
            Some(CardEffect::ReverseDirection) => {
                (Some("play direction reversed".to_string()), None)
            }
            None => (None, None),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
