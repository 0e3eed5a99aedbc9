//! Full games between computer players.
//!
//! These tests verify that games finish for every supported table size,
//! that no card is ever created or lost, and that a seed fully determines
//! a game.

use virus_engine::{
    Card, CardId, CardKind, Color, DecisionProvider, Deck, EngineError, Game, GameBuilder, GameConfig, GameRng,
    GameState, LookaheadStrategy, Organ, OrganState, PlayerId, RandomProvider, RuleBasedStrategy, TurnAction,
};

fn mixed_table(seed: u64, players: usize) -> Game {
    let mut builder = GameBuilder::new().seed(seed);
    for seat in 0..players {
        let provider: Box<dyn DecisionProvider> = match seat % 3 {
            0 => Box::new(LookaheadStrategy::default()),
            1 => Box::new(RuleBasedStrategy::new()),
            _ => Box::new(RandomProvider::new(GameRng::new(seed).for_context(&format!("seat-{seat}")))),
        };
        builder = builder.boxed_seat(format!("seat{seat}"), provider);
    }
    builder.build().unwrap()
}

/// Every card is in exactly one place: draw pile, discard pile, a hand or a body.
fn assert_cards_conserved(state: &GameState) {
    let total = state.config.deck.total();
    assert_eq!(state.card_count(), total, "card count drifted on turn {}", state.turn_number);

    let mut ids: Vec<u16> = state.deck.cards().chain(state.deck.discard_pile()).map(|c| c.id.raw()).collect();
    for (_, player) in state.players() {
        ids.extend(player.hand().iter().map(|c| c.id.raw()));
        for organ in player.body() {
            ids.push(organ.id().raw());
            ids.extend(organ.viruses().iter().chain(organ.medicines()).map(|c| c.id.raw()));
        }
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total, "duplicate card on turn {}", state.turn_number);
}

/// Bodies never hold two organs of one color, and every organ is in a real state.
fn assert_bodies_valid(state: &GameState) {
    for (_, player) in state.players() {
        let colors = player.colors();
        for (i, color) in colors.iter().enumerate() {
            assert!(!colors[i + 1..].contains(color), "duplicate {color} organ");
        }
        for organ in player.body() {
            assert!(organ.state().is_ok());
        }
    }
}

#[test]
fn test_games_finish_for_every_table_size() {
    for players in 2..=6 {
        for seed in 0..3 {
            let mut game = mixed_table(seed, players);
            let summary = game.run().unwrap();

            assert!(summary.winner.index() < players);
            assert!(game.state().has_won(summary.winner).unwrap());
            assert!(game.state().player(summary.winner).unwrap().healthy_organ_count() >= 4);
            assert_cards_conserved(game.state());
        }
    }
}

#[test]
fn test_invariants_hold_every_turn() {
    let mut game = mixed_table(77, 4);
    loop {
        let winner = game.step().unwrap();
        assert_cards_conserved(game.state());
        assert_bodies_valid(game.state());
        if winner.is_some() {
            break;
        }
    }
}

#[test]
fn test_hands_full_before_acting() {
    let mut game = mixed_table(12, 3);
    for _ in 0..30 {
        if game.step().unwrap().is_some() {
            break;
        }
        for (_, player) in game.state().players() {
            assert!(player.hand().len() <= 3);
        }
    }
}

#[test]
fn test_seed_determines_game() {
    for players in [2, 5] {
        let a = mixed_table(31, players).run().unwrap();
        let b = mixed_table(31, players).run().unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_move_history_covers_every_turn() {
    let mut game = mixed_table(8, 3);
    let summary = game.run().unwrap();

    let recorded: usize = game.state().players().map(|(_, p)| p.move_history().count()).sum();
    assert_eq!(recorded, summary.turns as usize);

    let last = game
        .state()
        .player(summary.winner)
        .unwrap()
        .move_history()
        .last()
        .copied()
        .unwrap();
    assert_eq!(last.turn, summary.turns);
    assert_eq!(last.action, TurnAction::Play);
    assert!(last.succeeded);
}

#[test]
fn test_lookahead_beats_random_more_often_than_not() {
    let mut wins = 0;
    for seed in 0..20 {
        let mut game = GameBuilder::new()
            .seed(seed)
            .seat("look", LookaheadStrategy::default())
            .seat("rand", RandomProvider::new(GameRng::new(seed)))
            .build()
            .unwrap();
        if game.run().unwrap().winner == PlayerId::new(0) {
            wins += 1;
        }
    }
    assert!(wins > 10, "lookahead won only {wins} of 20");
}

#[test]
fn test_turn_ceiling_is_a_fault() {
    let mut game = GameBuilder::new()
        .seed(1)
        .config(GameConfig::default().with_max_turns(5))
        .seat("a", RuleBasedStrategy::new())
        .seat("b", RuleBasedStrategy::new())
        .build()
        .unwrap();
    assert_eq!(game.run().unwrap_err(), EngineError::TurnLimitExceeded { turns: 5 });
}

#[test]
fn test_small_target_ends_quickly() {
    let config = GameConfig::default().with_organs_to_win(1);
    let mut game = GameBuilder::new()
        .seed(4)
        .config(config)
        .seat("a", RuleBasedStrategy::new())
        .seat("b", RuleBasedStrategy::new())
        .build()
        .unwrap();
    let summary = game.run().unwrap();
    assert!(summary.turns < 20);
}

#[test]
fn test_feature_vector_shape() {
    let mut game = mixed_table(2, 4);
    for _ in 0..10 {
        if game.step().unwrap().is_some() {
            break;
        }
    }
    let features = game.state().feature_vector();
    assert_eq!(features.len(), GameState::feature_len(4));
    assert!(features.iter().all(|&f| (0.0..=1.0).contains(&f)));
}

#[test]
fn test_fitness_rewards_the_winner_body() {
    let mut game = mixed_table(19, 2);
    let summary = game.run().unwrap();
    let winner = game.state().player(summary.winner).unwrap();
    assert!(winner.fitness() >= 20 * 4 - 10 * winner.failed_moves() as i64);
}

#[test]
fn test_vaccinated_and_immunised_organs_count_toward_win() {
    let mut state = GameState::new(["a", "b"], GameConfig::default(), GameRng::new(6));
    state.deck = Deck::from_cards([]);
    let me = PlayerId::new(0);
    let body = [(1, Color::Red), (2, Color::Blue), (3, Color::Green), (4, Color::Yellow)];
    for (id, color) in body {
        let organ = Organ::from_card(Card::new(CardId(id), CardKind::Organ(color))).unwrap();
        state.player_mut(me).unwrap().add_organ_to_body(organ);
    }

    let player = state.player_mut(me).unwrap();
    let blue = player.organ_mut(CardId(2)).unwrap();
    blue.apply_medicine(Card::new(CardId(10), CardKind::Medicine(Color::Blue))).unwrap();
    let green = player.organ_mut(CardId(3)).unwrap();
    green.apply_medicine(Card::new(CardId(11), CardKind::Medicine(Color::Green))).unwrap();
    green.apply_medicine(Card::new(CardId(12), CardKind::Medicine(Color::Wild))).unwrap();
    let yellow = player.organ_mut(CardId(4)).unwrap();
    yellow.apply_virus(Card::new(CardId(13), CardKind::Virus(Color::Yellow))).unwrap();

    let states: Vec<OrganState> = state.player(me).unwrap().body().map(|o| o.state().unwrap()).collect();
    assert_eq!(states, vec![
        OrganState::Healthy,
        OrganState::Vaccinated,
        OrganState::Immunised,
        OrganState::Infected,
    ]);
    assert!(!state.has_won(me).unwrap());

    let cured = state.player_mut(me).unwrap().organ_mut(CardId(4)).unwrap().remove_virus().unwrap();
    assert_eq!(cured.id, CardId(13));
    assert!(state.has_won(me).unwrap());
}
