//! Legality rules and rule configuration.
//!
//! `is_legal_play` is a pure function of the top discard and the
//! candidate card — repeated calls with the same pair always agree.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardColor, CardKind};

/// How consecutive draw cards interact with a pending forced draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawStacking {
    /// Stacking a draw card adds its amount to the pending total.
    #[default]
    Accumulate,
    /// Stacking a draw card replaces the pending total.
    Replace,
}

/// Tunable game rules. `Default` is the primary rule set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Cards dealt to each player.
    pub hand_size: usize,

    /// Reshuffle the discard into the draw pile when the draw pile
    /// drops below this many cards at the start of a turn.
    pub reshuffle_threshold: usize,

    /// Draw-card chaining behavior.
    pub draw_stacking: DrawStacking,

    /// Enable the `del` debug action. Destroying a card breaks the
    /// conservation invariant; off by default.
    pub debug_actions: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: 7,
            reshuffle_threshold: 10,
            draw_stacking: DrawStacking::Accumulate,
            debug_actions: false,
        }
    }
}

impl RulesConfig {
    /// Set the dealt hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the draw-pile reshuffle threshold.
    #[must_use]
    pub fn with_reshuffle_threshold(mut self, threshold: usize) -> Self {
        self.reshuffle_threshold = threshold;
        self
    }

    /// Set the draw-stacking variant.
    #[must_use]
    pub fn with_draw_stacking(mut self, stacking: DrawStacking) -> Self {
        self.draw_stacking = stacking;
        self
    }

    /// Enable debug actions.
    #[must_use]
    pub fn with_debug_actions(mut self) -> Self {
        self.debug_actions = true;
        self
    }
}

/// Is `candidate` a legal play on top of `top`?
///
/// - A colorless card (wild family) is always legal.
/// - A colored special card matches on color, on an unlocked
///   (colorless) top, or — for draw cards — on an identical draw
///   amount across colors.
/// - A number card matches on color, or on number when the top is
///   itself a number card.
#[must_use]
pub fn is_legal_play(top: &Card, candidate: &Card) -> bool {
    if candidate.color == CardColor::None {
        return true;
    }

    if candidate.kind.is_wild_family() {
        if candidate.color == top.color || top.color == CardColor::None {
            return true;
        }
        matches!((candidate.kind, top.kind),
            (CardKind::Draw(a), CardKind::Draw(b)) if a == b)
    } else {
        if candidate.color == top.color {
            return true;
        }
        match (candidate.kind.number(), top.kind.number()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
