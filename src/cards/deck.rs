//! Deck composition.
//!
//! The standard universe, per color: numbers 1 through 9, one draw 2,
//! one draw 4, one reverse; plus four colorless draw 4 wilds. 52 cards
//! total. The controller instantiates this list into the dealer pile.

use serde::{Deserialize, Serialize};

use super::card::{CardColor, CardKind};

/// Number of cards in [`Deck::standard`].
pub const STANDARD_DECK_SIZE: usize = 52;

/// A deck composition: the (kind, color) pairs to instantiate.
///
/// Compositions are data, not card instances — entity IDs are assigned
/// when the controller builds the universe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    specs: Vec<(CardKind, CardColor)>,
}

impl Deck {
    /// The standard composition.
    #[must_use]
    pub fn standard() -> Self {
        let mut specs = Vec::with_capacity(STANDARD_DECK_SIZE);

        for color in CardColor::COLORS {
            for number in 1..=9 {
                specs.push((CardKind::Number(number), color));
            }
            specs.push((CardKind::Draw(2), color));
            specs.push((CardKind::Draw(4), color));
            specs.push((CardKind::Reverse, color));

            specs.push((CardKind::Draw(4), CardColor::None));
        }

        Self { specs }
    }

    /// A custom composition. Colorless specs are only legal for
    /// wild-family kinds.
    ///
    /// Panics on a colorless number card — that is a malformed
    /// composition, not a recoverable condition.
    #[must_use]
    pub fn custom(specs: Vec<(CardKind, CardColor)>) -> Self {
        for (kind, color) in &specs {
            if !kind.is_wild_family() && *color == CardColor::None {
                panic!("number card {kind:?} cannot be colorless");
            }
        }
        Self { specs }
    }

    /// Number of cards in this composition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Is the composition empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Iterate the (kind, color) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CardKind, CardColor)> + '_ {
        self.specs.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_size() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), STANDARD_DECK_SIZE);
        assert!(!deck.is_empty());
    }

    #[test]
    fn test_standard_composition() {
        let deck = Deck::standard();

        let numbers = deck
            .iter()
            .filter(|(kind, _)| matches!(kind, CardKind::Number(_)))
            .count();
        assert_eq!(numbers, 36); // 9 per color

        let colorless_draw4 = deck
            .iter()
            .filter(|&(kind, color)| kind == CardKind::Draw(4) && color == CardColor::None)
            .count();
        assert_eq!(colorless_draw4, 4);

        let reverses = deck
            .iter()
            .filter(|(kind, _)| matches!(kind, CardKind::Reverse))
            .count();
        assert_eq!(reverses, 4);

        // One colored draw 2 and one colored draw 4 per color.
        for color in CardColor::COLORS {
            for n in [2u8, 4] {
                let count = deck
                    .iter()
                    .filter(|&(kind, c)| kind == CardKind::Draw(n) && c == color)
                    .count();
                assert_eq!(count, 1, "expected one {color} draw {n}");
            }
        }
    }

    #[test]
    fn test_standard_has_no_plain_wilds() {
        // The plain wild kind exists in the model, but the standard
        // composition carries none.
        let deck = Deck::standard();
        assert!(deck.iter().all(|(kind, _)| kind != CardKind::Wild));
    }

    #[test]
    fn test_standard_number_cards_are_colored() {
        let deck = Deck::standard();
        for (kind, color) in deck.iter() {
            if !kind.is_wild_family() {
                assert_ne!(color, CardColor::None);
            }
        }
    }

    #[test]
    fn test_custom() {
        let deck = Deck::custom(vec![
            (CardKind::Wild, CardColor::None),
            (CardKind::Number(1), CardColor::Red),
        ]);
        assert_eq!(deck.len(), 2);
    }

    #[test]
    #[should_panic(expected = "cannot be colorless")]
    fn test_custom_rejects_colorless_number() {
        Deck::custom(vec![(CardKind::Number(5), CardColor::None)]);
    }
}
