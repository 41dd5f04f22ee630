//! Ordered card collections (piles and hands).
//!
//! A `Pile` holds the cards of exactly one owner — a player's hand or
//! one of the three shared piles. Insertion order is preserved unless
//! `sort_by_color` is enabled (hands), in which case color is the sort
//! key. `last_added` tracks the most recently inserted card, which is
//! the "top of pile" for discard semantics.
//!
//! The pile stores entity IDs only; card state lives in the
//! [`Registry`]. Operations that touch card state (ownership tags,
//! new-card flags, color sorting) take the card registry explicitly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::Card;
use crate::core::entity::{EntityId, OwnerId};
use crate::core::rng::GameRng;
use crate::registry::Registry;

/// Pile operation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StackError {
    /// The card is not in this pile.
    #[error("card {0} is not in this pile")]
    CardNotInStack(EntityId),

    /// Index past the end of the pile.
    #[error("index {index} out of range for pile of {len} cards")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An ordered collection of cards bound to one owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    /// This pile's own entity ID.
    pub id: EntityId,

    /// Owner every contained card is tagged with.
    pub owner: OwnerId,

    cards: Vec<EntityId>,
    last_added: Option<EntityId>,
    sort_by_color: bool,
}

impl Pile {
    /// Create an empty pile preserving insertion order.
    #[must_use]
    pub fn new(id: EntityId, owner: OwnerId) -> Self {
        Self {
            id,
            owner,
            cards: Vec::new(),
            last_added: None,
            sort_by_color: false,
        }
    }

    /// Create an empty color-sorted pile (player hands).
    #[must_use]
    pub fn sorted(id: EntityId, owner: OwnerId) -> Self {
        Self {
            sort_by_color: true,
            ..Self::new(id, owner)
        }
    }

    /// Add a card. Retags the card's owner, updates `last_added`, and
    /// re-sorts if this pile is color-sorted. `mark_new` flags the card
    /// as newly acquired for display.
    pub fn add_card(&mut self, cards: &mut Registry<Card>, card_id: EntityId, mark_new: bool) {
        {
            let card = cards.get_mut(card_id).expect("card missing from registry");
            card.owner = Some(self.owner);
            if mark_new {
                card.newly_acquired = true;
            }
        }

        self.cards.push(card_id);
        self.last_added = Some(card_id);

        if self.sort_by_color {
            self.cards
                .sort_by_key(|&id| cards.get(id).expect("card missing from registry").color);
        }
    }

    /// Remove a specific card.
    pub fn remove_card(&mut self, card_id: EntityId) -> Result<(), StackError> {
        let pos = self
            .cards
            .iter()
            .position(|&id| id == card_id)
            .ok_or(StackError::CardNotInStack(card_id))?;
        self.cards.remove(pos);

        if self.last_added == Some(card_id) {
            self.last_added = self.cards.last().copied();
        }
        Ok(())
    }

    /// Get the card at `index` (0-based, in display order).
    pub fn card_at(&self, index: usize) -> Result<EntityId, StackError> {
        self.cards
            .get(index)
            .copied()
            .ok_or(StackError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            })
    }

    /// Remove and return the top card (the end of the sequence).
    pub fn pop_top(&mut self) -> Option<EntityId> {
        let card = self.cards.pop()?;
        if self.last_added == Some(card) {
            self.last_added = self.cards.last().copied();
        }
        Some(card)
    }

    /// Randomly permute the pile.
    ///
    /// With `keep_last`, the `last_added` card is held out of the
    /// shuffle and re-appended at the end — used to keep the visible
    /// top of discard stable when recycling it into the draw pile.
    pub fn shuffle(&mut self, rng: &mut GameRng, keep_last: bool) {
        if keep_last {
            if let Some(kept) = self.last_added {
                self.cards.retain(|&id| id != kept);
                rng.shuffle(&mut self.cards);
                self.cards.push(kept);
                return;
            }
        }
        rng.shuffle(&mut self.cards);
        self.last_added = self.cards.last().copied();
    }

    /// Clear the transient "newly acquired" flag on every contained
    /// card. Called once per completed turn.
    pub fn clear_new_flags(&self, cards: &mut Registry<Card>) {
        for &id in &self.cards {
            cards
                .get_mut(id)
                .expect("card missing from registry")
                .newly_acquired = false;
        }
    }

    /// Remove and return all cards, emptying the pile.
    pub fn drain(&mut self) -> Vec<EntityId> {
        self.last_added = None;
        std::mem::take(&mut self.cards)
    }

    /// The most recently inserted card.
    #[must_use]
    pub fn last_added(&self) -> Option<EntityId> {
        self.last_added
    }

    /// Card IDs in display order.
    #[must_use]
    pub fn cards(&self) -> &[EntityId] {
        &self.cards
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the pile empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
