//! Full-game integration tests driven through the public API only.

use uno_engine::{
    CardColor, CardKind, Deck, GameBuilder, GameController, PileKind, PlayerId, RulesConfig,
    STANDARD_DECK_SIZE,
};

/// Cards across all piles and hands must always sum to the universe.
fn assert_conserved(game: &GameController) {
    let mut total = 0;
    for kind in PileKind::ALL {
        total += game.pile_len(kind);
    }
    for player in PlayerId::all(game.player_count()) {
        total += game.hand_count(player);
    }
    assert_eq!(total, game.total_cards());
}

/// Play one full turn for the current player: try every hand position,
/// fall back to drawing, then end the turn. Returns false if the turn
/// could not be completed (empty draw pile stalemate).
fn play_one_turn(game: &mut GameController) -> bool {
    let player = game.current_player().seat;
    let _ = game.take_turn_messages();

    for pass in 0..2 {
        let hand_size = game.hand_count(player);
        for position in 1..=hand_size {
            let outcome = game.submit_action(player, &position.to_string());
            assert_conserved(game);
            if outcome.accepted {
                if game.is_game_over().is_some() {
                    return false;
                }
                return game.submit_action(player, "next").turn_advanced;
            }
        }
        if pass == 0 && !game.submit_action(player, "draw").accepted {
            break;
        }
        assert_conserved(game);
    }

    game.submit_action(player, "next").turn_advanced
}

fn drive(game: &mut GameController, max_turns: usize) {
    for _ in 0..max_turns {
        if game.is_game_over().is_some() || !play_one_turn(game) {
            return;
        }
    }
}

#[test]
fn test_full_game_preserves_invariants() {
    for seed in 0..5 {
        let mut game = GameBuilder::new(["Ada", "Bo"]).build(seed).unwrap();
        let mut last_turn = game.turn_number();

        for _ in 0..500 {
            if game.is_game_over().is_some() {
                break;
            }
            if !play_one_turn(&mut game) {
                break;
            }
            let turn = game.turn_number();
            assert_eq!(turn, last_turn + 1, "turns advance one at a time");
            last_turn = turn;
            assert!(game.direction() == 1 || game.direction() == -1);
            assert_conserved(&game);
        }

        assert_eq!(game.total_cards(), STANDARD_DECK_SIZE);
        if let Some(winner) = game.is_game_over() {
            assert_eq!(game.hand_count(winner), 0);
        }
    }
}

#[test]
fn test_all_player_counts() {
    let names = ["Ada", "Bo", "Cy", "Dee", "Eli"];
    for count in 2..=5 {
        let mut game = GameBuilder::new(names[..count].iter().copied())
            .build(7)
            .unwrap();

        assert_eq!(game.player_count(), count);
        for player in PlayerId::all(count) {
            assert_eq!(game.hand_count(player), 7);
        }
        assert_eq!(
            game.pile_len(PileKind::Draw),
            STANDARD_DECK_SIZE - 7 * count - 1
        );

        drive(&mut game, 200);
        assert_conserved(&game);
    }
}

#[test]
fn test_replay_determinism() {
    let mut first = GameBuilder::new(["Ada", "Bo", "Cy"]).build(99).unwrap();
    let mut second = GameBuilder::new(["Ada", "Bo", "Cy"]).build(99).unwrap();

    drive(&mut first, 150);
    drive(&mut second, 150);

    assert_eq!(first.history(), second.history());
    assert_eq!(first.is_game_over(), second.is_game_over());
    assert_eq!(first.turn_number(), second.turn_number());
    for player in PlayerId::all(3) {
        let hands_first: Vec<String> = first.hand_of(player).iter().map(|c| c.render()).collect();
        let hands_second: Vec<String> = second.hand_of(player).iter().map(|c| c.render()).collect();
        assert_eq!(hands_first, hands_second);
    }
}

#[test]
fn test_rejections_leave_observable_state_unchanged() {
    let mut game = GameBuilder::new(["Ada", "Bo"]).build(3).unwrap();
    let current = game.current_player().seat;
    let other = game.next_player().seat;

    let hand_before: Vec<String> = game.hand_of(current).iter().map(|c| c.render()).collect();
    let top_before = game.top_discard().render();
    let draw_before = game.pile_len(PileKind::Draw);
    let turn_before = game.turn_number();

    for raw in ["gibberish", "0", "99", "next", "del", "1 plaid"] {
        assert!(!game.submit_action(current, raw).accepted, "{raw}");
    }
    assert!(!game.submit_action(other, "draw").accepted);

    let hand_after: Vec<String> = game.hand_of(current).iter().map(|c| c.render()).collect();
    assert_eq!(hand_before, hand_after);
    assert_eq!(game.top_discard().render(), top_before);
    assert_eq!(game.pile_len(PileKind::Draw), draw_before);
    assert_eq!(game.turn_number(), turn_before);
    assert!(game.history().is_empty());
}

#[test]
fn test_one_card_hands_end_quickly() {
    // All-red deck, one-card hands: the opener always has a legal play
    // and wins immediately.
    let deck = Deck::custom((1..=9).map(|n| (CardKind::Number(n), CardColor::Red)).collect());
    let rules = RulesConfig::default().with_hand_size(1);
    let mut game = GameBuilder::new(["Ada", "Bo"])
        .rules(rules)
        .deck(deck)
        .build(11)
        .unwrap();

    let opener = game.current_player().seat;
    let outcome = game.submit_action(opener, "1");
    assert!(outcome.accepted);
    assert_eq!(game.is_game_over(), Some(opener));

    // A finished game accepts nothing further.
    assert!(!game.submit_action(opener, "next").accepted);
    assert!(!game.submit_action(game.next_player().seat, "draw").accepted);
}

#[test]
fn test_hands_stay_color_sorted_throughout() {
    let mut game = GameBuilder::new(["Ada", "Bo"]).build(21).unwrap();

    for _ in 0..60 {
        if game.is_game_over().is_some() || !play_one_turn(&mut game) {
            break;
        }
        for player in PlayerId::all(2) {
            let hand = game.hand_of(player);
            for pair in hand.windows(2) {
                assert!(pair[0].color <= pair[1].color);
            }
        }
    }
}

#[test]
fn test_messages_start_empty() {
    let mut game = GameBuilder::new(["Ada", "Bo"]).build(0).unwrap();
    assert!(game.take_turn_messages().is_empty());
}
