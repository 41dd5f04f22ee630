//! The game layer: rules, turn state, and the controller.

pub mod controller;
pub mod rules;
pub mod turn;

pub use controller::{GameBuilder, GameController, GameError};
pub use rules::{is_legal_play, DrawStacking, RulesConfig};
pub use turn::TurnState;
