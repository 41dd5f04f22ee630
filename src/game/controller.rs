//! The game controller: setup, turn engine, and action dispatch.
//!
//! `GameController` owns everything for one game: the players, the card
//! registry, the three shared piles plus one hand pile per player, the
//! turn order and direction, and the per-turn sub-state. It is built
//! once per game by [`GameBuilder`] and driven by a presentation layer
//! through [`GameController::submit_action`], the single mutating entry
//! point.
//!
//! ## Entity ID layout
//!
//! Piles and cards live in separate typed registries; pile IDs are
//! allocated first (3 shared piles, then one hand per seat), card IDs
//! after. References across the two spaces always go through the
//! [`OwnerId`] sum type, so they can never be confused.
//!
//! ## Failure semantics
//!
//! Player mistakes (bad token, wrong card, acting twice) come back as
//! rejected [`ActionOutcome`]s with the state untouched. Violated
//! internal invariants (a card or pile missing from its registry)
//! panic: continuing would corrupt the game.

use im::Vector;
use smallvec::SmallVec;
use thiserror::Error;

use crate::cards::{Card, CardColor, CardEffect, CardKind, Deck};
use crate::core::action::{ActionOutcome, ActionRecord, PlayerAction};
use crate::core::entity::{EntityId, OwnerId, PileKind};
use crate::core::player::{Player, PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::registry::{PileDirectory, Registry};
use crate::stack::Pile;

use super::rules::{is_legal_play, DrawStacking, RulesConfig};
use super::turn::TurnState;

/// Game construction failure. Reported before any state is mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Fewer than 2 player names given.
    #[error("a game needs at least 2 players, got {got}")]
    InsufficientPlayers { got: usize },

    /// More than 5 player names given.
    #[error("a game seats at most 5 players, got {got}")]
    TooManyPlayers { got: usize },

    /// The deck cannot cover the opening deal.
    #[error("deck of {cards} cards cannot cover a deal of {needed}")]
    DeckTooSmall { cards: usize, needed: usize },

    /// The deck holds no number card to flip as the first discard.
    #[error("deck contains no number card to flip as the first discard")]
    NoFlippableCard,
}

/// Builder for a [`GameController`].
///
/// ## Example
///
/// ```
/// use uno_engine::game::GameBuilder;
///
/// let game = GameBuilder::new(["Ada", "Bo"]).build(42).unwrap();
/// assert_eq!(game.current_player().name, "Ada");
/// ```
pub struct GameBuilder {
    names: Vec<String>,
    rules: RulesConfig,
    deck: Deck,
}

impl GameBuilder {
    /// Start building a game for the given player names (seated in
    /// order).
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            rules: RulesConfig::default(),
            deck: Deck::standard(),
        }
    }

    /// Override the rule configuration.
    #[must_use]
    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Override the deck composition.
    #[must_use]
    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    /// Build the game: create the universe, shuffle it into the dealer
    /// pile, deal, flip a non-wild first discard, and move the
    /// remainder to the draw pile.
    pub fn build(self, seed: u64) -> Result<GameController, GameError> {
        let GameBuilder { names, rules, deck } = self;

        let player_count = names.len();
        if player_count < 2 {
            return Err(GameError::InsufficientPlayers { got: player_count });
        }
        if player_count > 5 {
            return Err(GameError::TooManyPlayers { got: player_count });
        }
        let needed = player_count * rules.hand_size + 1;
        if deck.len() < needed {
            return Err(GameError::DeckTooSmall {
                cards: deck.len(),
                needed,
            });
        }

        let mut rng = GameRng::new(seed);
        let mut cards: Registry<Card> = Registry::new();
        let mut piles: Registry<Pile> = Registry::new();
        let mut directory = PileDirectory::new();

        for kind in PileKind::ALL {
            let id = piles.create(|id| Pile::new(id, OwnerId::Pile(kind)));
            directory.register(kind, id);
        }

        let mut hand_ids = Vec::with_capacity(player_count);
        for player in PlayerId::all(player_count) {
            let id = piles.create(|id| Pile::sorted(id, OwnerId::Player(player)));
            hand_ids.push(id);
        }
        let players = PlayerMap::new(player_count, |p| {
            Player::new(names[p.index()].clone(), p, hand_ids[p.index()])
        });

        // Build the card universe into the dealer pile and shuffle it.
        let dealer_id = directory.get(PileKind::Dealer);
        for (kind, color) in deck.iter() {
            let card_id = cards.create(|id| Card::new(id, kind, color));
            piles
                .get_mut(dealer_id)
                .expect("dealer pile missing from registry")
                .add_card(&mut cards, card_id, false);
        }
        piles
            .get_mut(dealer_id)
            .expect("dealer pile missing from registry")
            .shuffle(&mut rng, false);

        // Flip the first non-wild card onto the discard pile.
        let first = piles
            .get(dealer_id)
            .expect("dealer pile missing from registry")
            .cards()
            .iter()
            .rev()
            .copied()
            .find(|&id| {
                !cards
                    .get(id)
                    .expect("card missing from registry")
                    .kind
                    .is_wild_family()
            })
            .ok_or(GameError::NoFlippableCard)?;
        piles
            .get_mut(dealer_id)
            .expect("dealer pile missing from registry")
            .remove_card(first)
            .expect("first discard vanished from the dealer pile");
        let discard_id = directory.get(PileKind::Discard);
        piles
            .get_mut(discard_id)
            .expect("discard pile missing from registry")
            .add_card(&mut cards, first, false);

        // Deal.
        for player in PlayerId::all(player_count) {
            for _ in 0..rules.hand_size {
                let card_id = piles
                    .get_mut(dealer_id)
                    .expect("dealer pile missing from registry")
                    .pop_top()
                    .expect("dealer pile exhausted during the deal");
                piles
                    .get_mut(hand_ids[player.index()])
                    .expect("hand pile missing from registry")
                    .add_card(&mut cards, card_id, false);
            }
        }

        // The rest of the universe becomes the draw pile; the dealer
        // pile stays empty for the rest of the game.
        let remainder = piles
            .get_mut(dealer_id)
            .expect("dealer pile missing from registry")
            .drain();
        let draw_id = directory.get(PileKind::Draw);
        let draw = piles
            .get_mut(draw_id)
            .expect("draw pile missing from registry");
        for card_id in remainder {
            draw.add_card(&mut cards, card_id, false);
        }

        let mut game = GameController {
            rules,
            players,
            cards,
            piles,
            directory,
            rng,
            turn_player: PlayerId::new(0),
            direction: 1,
            turn: TurnState::new(),
            pending_draw: 0,
            winner: None,
            turn_number: 1,
            history: Vector::new(),
            messages_for_next: SmallVec::new(),
            messages_for_current: Vec::new(),
        };
        game.begin_turn();
        Ok(game)
    }
}

/// One running game: state, rules, and the turn engine.
#[derive(Clone, Debug)]
pub struct GameController {
    rules: RulesConfig,
    players: PlayerMap<Player>,
    cards: Registry<Card>,
    piles: Registry<Pile>,
    directory: PileDirectory,
    rng: GameRng,

    turn_player: PlayerId,
    /// +1 or -1.
    direction: i8,
    turn: TurnState,
    /// Accumulated forced-draw amount owed by the turn player.
    pending_draw: u8,
    winner: Option<PlayerId>,
    turn_number: u32,

    history: Vector<ActionRecord>,
    messages_for_next: SmallVec<[String; 2]>,
    messages_for_current: Vec<String>,
}

impl GameController {
    /// Create a game with default rules and the standard deck.
    pub fn new_game<I, S>(names: I, seed: u64) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GameBuilder::new(names).build(seed)
    }

    // === Read-only state queries ===

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.turn_player]
    }

    /// The player after the current one, in the current direction.
    #[must_use]
    pub fn next_player(&self) -> &Player {
        &self.players[self.next_seat()]
    }

    /// Iterate all players in seat order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().map(|(_, p)| p)
    }

    /// The visible top card of the discard pile.
    ///
    /// Panics if the discard pile is empty — impossible after setup.
    #[must_use]
    pub fn top_discard(&self) -> &Card {
        let id = self
            .pile(PileKind::Discard)
            .last_added()
            .expect("discard pile is empty");
        self.card(id)
    }

    /// A player's hand, in display order (color-sorted).
    #[must_use]
    pub fn hand_of(&self, player: PlayerId) -> Vec<&Card> {
        self.hand_pile(player)
            .cards()
            .iter()
            .map(|&id| self.card(id))
            .collect()
    }

    /// Number of cards in a player's hand.
    #[must_use]
    pub fn hand_count(&self, player: PlayerId) -> usize {
        self.hand_pile(player).len()
    }

    /// Number of cards in a shared pile.
    #[must_use]
    pub fn pile_len(&self, kind: PileKind) -> usize {
        self.pile(kind).len()
    }

    /// Total cards in the universe. Constant for the life of a game,
    /// unless the debug delete action destroys one.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    /// Turn direction: +1 or -1.
    #[must_use]
    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Accumulated forced-draw amount owed by the current player.
    #[must_use]
    pub fn pending_draw(&self) -> u8 {
        self.pending_draw
    }

    /// Current turn number, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// The winner, if the game has ended.
    #[must_use]
    pub fn is_game_over(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Accepted actions so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Drain the messages queued for the current player (effect
    /// announcements from the previous turn, forced-draw notices).
    pub fn take_turn_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages_for_current)
    }

    // === The single mutating entry point ===

    /// Validate and apply one raw action string for `player`.
    ///
    /// Rejected outcomes leave the game untouched; the caller
    /// re-prompts. Accepted outcomes are recorded in the history.
    pub fn submit_action(&mut self, player: PlayerId, raw: &str) -> ActionOutcome {
        if self.winner.is_some() {
            return ActionOutcome::rejected("the game is over");
        }
        if player != self.turn_player {
            return ActionOutcome::rejected("it is not your turn");
        }

        let action: PlayerAction = match raw.parse() {
            Ok(action) => action,
            Err(err) => return ActionOutcome::rejected(err.to_string()),
        };

        let turn = self.turn_number;
        let outcome = match action {
            PlayerAction::Draw => self.handle_draw(),
            PlayerAction::EndTurn => self.handle_end_turn(),
            PlayerAction::Play {
                index,
                declared_color,
            } => self.handle_play(index, declared_color),
            PlayerAction::DeleteTop => self.handle_delete_top(),
        };

        if outcome.accepted {
            self.history.push_back(ActionRecord::new(player, action, turn));
        }
        outcome
    }

    // === Action handlers ===

    fn handle_draw(&mut self) -> ActionOutcome {
        // A pending draw effect resolves before anything else. After
        // the player counter-stacks, the pending belongs to the next
        // seat and no longer gates this one.
        if self.pending_draw > 0 && !self.turn.played {
            let count = self.pending_draw as usize;
            self.pending_draw = 0;
            let drawn = self.draw_to_hand(self.turn_player, count);
            self.turn.forced_drew = true;
            return ActionOutcome::accepted(format!(
                "you drew {} cards to resolve the draw effect",
                drawn.len()
            ));
        }

        if !self.turn.can_draw() {
            let reason = if self.turn.played {
                "you already played a card this turn"
            } else {
                "you already drew this turn"
            };
            return ActionOutcome::rejected(reason);
        }

        let drawn = self.draw_to_hand(self.turn_player, 1);
        match drawn.first() {
            Some(&card_id) => {
                self.turn.drew = true;
                ActionOutcome::accepted(format!("you drew {}", self.card(card_id).render()))
            }
            None => ActionOutcome::rejected("the draw pile is empty"),
        }
    }

    fn handle_end_turn(&mut self) -> ActionOutcome {
        if !self.turn.can_end() {
            return ActionOutcome::rejected("draw or play a card before ending your turn");
        }

        // The newly-acquired flags only last for the acquiring turn.
        let hand_id = self.players[self.turn_player].hand;
        self.piles
            .get(hand_id)
            .expect("hand pile missing from registry")
            .clear_new_flags(&mut self.cards);

        self.turn_player = self.next_seat();
        self.turn_number += 1;
        self.turn = TurnState::new();
        self.messages_for_current = self.messages_for_next.drain(..).collect();
        self.begin_turn();

        ActionOutcome::turn_over()
    }

    fn handle_play(&mut self, index: usize, declared_color: Option<CardColor>) -> ActionOutcome {
        if !self.turn.can_play() {
            return ActionOutcome::rejected("you already played a card this turn");
        }

        let hand_id = self.players[self.turn_player].hand;
        let card_id = match self
            .piles
            .get(hand_id)
            .expect("hand pile missing from registry")
            .card_at(index)
        {
            Ok(id) => id,
            Err(_) => return ActionOutcome::rejected(format!("no card at position {}", index + 1)),
        };
        let candidate = self.card(card_id).clone();
        let top = self.top_discard().clone();

        if declared_color.is_some() && candidate.color != CardColor::None {
            return ActionOutcome::rejected("only a colorless card can be given a color");
        }
        if self.pending_draw > 0 && !matches!(candidate.kind, CardKind::Draw(_)) {
            return ActionOutcome::rejected(format!(
                "you must draw {} cards, or stack a draw card",
                self.pending_draw
            ));
        }
        if !is_legal_play(&top, &candidate) {
            return ActionOutcome::rejected(format!(
                "your card {} doesn't match the top card {}",
                candidate.render(),
                top.render()
            ));
        }

        // Transfer hand -> discard.
        self.piles
            .get_mut(hand_id)
            .expect("hand pile missing from registry")
            .remove_card(card_id)
            .expect("card vanished from hand during play");
        let discard_id = self.directory.get(PileKind::Discard);
        self.piles
            .get_mut(discard_id)
            .expect("discard pile missing from registry")
            .add_card(&mut self.cards, card_id, false);

        if let Some(color) = declared_color {
            self.cards
                .get_mut(card_id)
                .expect("card missing from registry")
                .color = color;
        }

        self.turn.played = true;

        let mut message = format!("you played {}", self.card(card_id).render());
        match candidate.effect() {
            Some(CardEffect::ForceDraw(amount)) => {
                self.pending_draw = match self.rules.draw_stacking {
                    DrawStacking::Accumulate => self.pending_draw + amount,
                    DrawStacking::Replace => amount,
                };
                let (current, next) = self.card(card_id).resolve_effect(self.pending_draw);
                if let Some(text) = current {
                    message = text;
                }
                if let Some(text) = next {
                    self.messages_for_next.push(text);
                }
            }
            Some(CardEffect::ReverseDirection) => {
                // With two players this still flips the flag but lands
                // on the same next seat, so it is a turn-order no-op.
                self.direction = -self.direction;
                let (current, _) = self.card(card_id).resolve_effect(0);
                if let Some(text) = current {
                    message = text;
                }
            }
            None => {}
        }

        if self
            .piles
            .get(hand_id)
            .expect("hand pile missing from registry")
            .is_empty()
        {
            self.winner = Some(self.turn_player);
            let name = self.players[self.turn_player].name.clone();
            return ActionOutcome::accepted(format!("{name} has won the game"));
        }
        ActionOutcome::accepted(message)
    }

    fn handle_delete_top(&mut self) -> ActionOutcome {
        if !self.rules.debug_actions {
            return ActionOutcome::rejected("debug actions are disabled");
        }

        let discard = self.pile(PileKind::Discard);
        let top_id = match discard.last_added() {
            Some(id) => id,
            None => return ActionOutcome::rejected("the discard pile is empty"),
        };
        if discard.len() <= 1 {
            return ActionOutcome::rejected("cannot delete the only discard card");
        }

        let render = self.card(top_id).render();
        let discard_id = self.directory.get(PileKind::Discard);
        self.piles
            .get_mut(discard_id)
            .expect("discard pile missing from registry")
            .remove_card(top_id)
            .expect("top discard vanished");
        self.cards
            .remove(top_id)
            .expect("card missing from registry");

        ActionOutcome::accepted(format!("deleted {render}"))
    }

    // === Turn maintenance ===

    /// Start-of-turn upkeep: recycle the discard into a low draw pile,
    /// then resolve a pending draw effect the player cannot counter.
    fn begin_turn(&mut self) {
        if self.pile(PileKind::Draw).len() < self.rules.reshuffle_threshold {
            self.recycle_discard();
        }

        if self.pending_draw > 0 && !self.holds_draw_counter(self.turn_player) {
            let count = self.pending_draw as usize;
            self.pending_draw = 0;
            let drawn = self.draw_to_hand(self.turn_player, count);
            self.turn.forced_drew = true;
            self.messages_for_current
                .push(format!("you drew {} cards from the draw effect", drawn.len()));
        }
    }

    /// Does the player hold a draw card that could legally stack on the
    /// current top of discard?
    fn holds_draw_counter(&self, player: PlayerId) -> bool {
        let top = self.top_discard();
        self.hand_pile(player).cards().iter().any(|&id| {
            let card = self.card(id);
            matches!(card.kind, CardKind::Draw(_)) && is_legal_play(top, card)
        })
    }

    /// Move up to `count` cards from the draw pile to a hand, marking
    /// them newly acquired. Recycles the discard pile if the draw pile
    /// runs dry mid-draw.
    fn draw_to_hand(&mut self, player: PlayerId, count: usize) -> Vec<EntityId> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            if self.pile(PileKind::Draw).is_empty() {
                self.recycle_discard();
            }
            let draw_id = self.directory.get(PileKind::Draw);
            let card_id = match self
                .piles
                .get_mut(draw_id)
                .expect("draw pile missing from registry")
                .pop_top()
            {
                Some(id) => id,
                None => break,
            };
            let hand_id = self.players[player].hand;
            self.piles
                .get_mut(hand_id)
                .expect("hand pile missing from registry")
                .add_card(&mut self.cards, card_id, true);
            drawn.push(card_id);
        }
        drawn
    }

    /// Shuffle the discard pile (keeping its visible top) back into the
    /// draw pile. No-op when the discard holds at most one card.
    fn recycle_discard(&mut self) {
        let discard_id = self.directory.get(PileKind::Discard);
        let moved: Vec<EntityId> = {
            let discard = self
                .piles
                .get_mut(discard_id)
                .expect("discard pile missing from registry");
            if discard.len() <= 1 {
                return;
            }
            discard.shuffle(&mut self.rng, true);
            let kept = discard.last_added().expect("discard pile is empty");
            let mut recycled = discard.drain();
            recycled.retain(|&id| id != kept);
            discard.add_card(&mut self.cards, kept, false);
            recycled
        };

        let draw_id = self.directory.get(PileKind::Draw);
        let draw = self
            .piles
            .get_mut(draw_id)
            .expect("draw pile missing from registry");
        for card_id in moved {
            draw.add_card(&mut self.cards, card_id, false);
        }
    }

    // === Internal lookups (structural failures panic) ===

    fn next_seat(&self) -> PlayerId {
        let count = self.player_count() as i32;
        let next = (self.turn_player.index() as i32 + i32::from(self.direction)).rem_euclid(count);
        PlayerId::new(next as u8)
    }

    fn pile(&self, kind: PileKind) -> &Pile {
        self.piles
            .get(self.directory.get(kind))
            .expect("pile missing from registry")
    }

    fn hand_pile(&self, player: PlayerId) -> &Pile {
        self.piles
            .get(self.players[player].hand)
            .expect("hand pile missing from registry")
    }

    fn card(&self, id: EntityId) -> &Card {
        self.cards.get(id).expect("card missing from registry")
    }
}
