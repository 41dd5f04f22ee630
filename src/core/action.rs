//! Player actions and outcomes.
//!
//! Raw action strings from the presentation layer are parsed into the
//! `PlayerAction` enum at the boundary; the engine never dispatches on
//! strings internally. Unrecognized tokens fail to parse and become a
//! rejected [`ActionOutcome`] — the caller re-prompts.
//!
//! ## Grammar
//!
//! - `draw` — take the top card of the draw pile
//! - `next` — end the turn
//! - `<k>` — play the k-th card of the hand (1-based)
//! - `<k> <color>` — play a wild, declaring its new color
//! - `del` — debug: destroy the top discard (only if enabled in rules)

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardColor;

use super::player::PlayerId;

/// A parsed player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Voluntarily draw one card (or resolve a pending forced draw).
    Draw,
    /// End the turn, handing play to the next seat.
    EndTurn,
    /// Play the card at `index` (0-based into the hand).
    Play {
        index: usize,
        /// Declared color for a wild; `None` leaves it colorless.
        declared_color: Option<CardColor>,
    },
    /// Debug affordance: destroy the top discard card.
    DeleteTop,
}

/// Raw action string failed to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid action: {0}")]
pub struct ParseActionError(pub String);

impl std::str::FromStr for PlayerAction {
    type Err = ParseActionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut tokens = raw.split_whitespace();
        let head = tokens.next().ok_or_else(|| ParseActionError(raw.to_string()))?;

        let action = match head {
            "draw" => PlayerAction::Draw,
            "next" => PlayerAction::EndTurn,
            "del" => PlayerAction::DeleteTop,
            _ => {
                // 1-based hand index, optionally followed by a color word.
                let k: usize = head.parse().map_err(|_| ParseActionError(raw.to_string()))?;
                if k == 0 {
                    return Err(ParseActionError(raw.to_string()));
                }
                let declared_color = match tokens.next() {
                    Some(word) => Some(
                        word.parse::<CardColor>()
                            .map_err(|_| ParseActionError(raw.to_string()))?,
                    ),
                    None => None,
                };
                PlayerAction::Play {
                    index: k - 1,
                    declared_color,
                }
            }
        };

        if tokens.next().is_some() {
            return Err(ParseActionError(raw.to_string()));
        }
        Ok(action)
    }
}

/// Result of submitting an action to the controller.
///
/// `accepted == false` always means the game state is unchanged and the
/// caller should re-prompt the same player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Did the action mutate the game?
    pub accepted: bool,

    /// Feedback for the acting player, if any.
    pub message: Option<String>,

    /// Did the turn pass to another player?
    pub turn_advanced: bool,
}

impl ActionOutcome {
    /// An accepted action that did not end the turn.
    #[must_use]
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            accepted: true,
            message: Some(message.into()),
            turn_advanced: false,
        }
    }

    /// An accepted end-turn action.
    #[must_use]
    pub fn turn_over() -> Self {
        Self {
            accepted: true,
            message: None,
            turn_advanced: true,
        }
    }

    /// A rejected action; state is unchanged.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            accepted: false,
            message: Some(message.into()),
            turn_advanced: false,
        }
    }
}

/// A recorded accepted action, for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: PlayerAction,

    /// Turn number when the action was taken (starts at 1).
    pub turn: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: PlayerAction, turn: u32) -> Self {
        Self {
            player,
            action,
            turn,
        }
    }
}
