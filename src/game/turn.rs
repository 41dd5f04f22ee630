//! Per-turn sub-state.
//!
//! A turn runs `AwaitingAction -> {Drew, Played} -> TurnComplete`. The
//! flags here encode where in that progression the current player is:
//! at most one voluntary draw and one play per turn, and the turn can
//! only end once the player has acted at least once. Forced draws
//! (resolving an opponent's draw card) are tracked separately from the
//! voluntary draw but still count as having acted.

use serde::{Deserialize, Serialize};

/// State of the current player's turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Player voluntarily drew this turn.
    pub drew: bool,

    /// Player played a card this turn.
    pub played: bool,

    /// Player resolved a pending forced draw at turn start.
    pub forced_drew: bool,
}

impl TurnState {
    /// Fresh state for a new turn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// May the player take a voluntary draw?
    #[must_use]
    pub fn can_draw(self) -> bool {
        !self.drew && !self.played
    }

    /// May the player play a card?
    #[must_use]
    pub fn can_play(self) -> bool {
        !self.played
    }

    /// May the player end the turn? Requires at least one action, so a
    /// no-op turn is impossible.
    #[must_use]
    pub fn can_end(self) -> bool {
        self.drew || self.played || self.forced_drew
    }
}
