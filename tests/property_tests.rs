//! Property tests for the organ state machine and whole games.

use proptest::prelude::*;

use virus_engine::{
    transition, Card, CardId, CardKind, Color, EngineError, GameBuilder, GameRng, Organ, OrganEvent, OrganOutcome,
    OrganState, RandomProvider, RuleBasedStrategy,
};

fn color() -> impl Strategy<Value = Color> {
    prop::sample::select(Color::ALL.to_vec())
}

fn event() -> impl Strategy<Value = (bool, Color)> {
    (any::<bool>(), color())
}

proptest! {
    #[test]
    fn prop_state_from_counts_matches_table(viruses in 0usize..4, medicines in 0usize..4) {
        let result = OrganState::from_counts(viruses, medicines);
        let valid = matches!((viruses, medicines), (0, 0..=2) | (1..=2, 0));
        prop_assert_eq!(result.is_ok(), valid);
        if let Ok(state) = result {
            prop_assert_eq!(state.value() as usize, match state {
                OrganState::Infected => 1,
                OrganState::Healthy => 2,
                OrganState::Vaccinated => 3,
                OrganState::Immunised => 4,
            });
        }
    }

    /// Feeding an organ any sequence of viruses and medicines keeps it in a
    /// valid state until it is destroyed, and never loses a card.
    #[test]
    fn prop_organ_stays_consistent(organ_color in color(), events in prop::collection::vec(event(), 0..12)) {
        let mut organ = Organ::from_card(Card::new(CardId(0), CardKind::Organ(organ_color))).unwrap();
        let mut accepted = 0usize;
        let mut released = 0usize;

        for (i, (is_virus, card_color)) in events.into_iter().enumerate() {
            if !organ.accepts(card_color) {
                continue;
            }
            let id = CardId(i as u16 + 1);
            let change = if is_virus {
                organ.apply_virus(Card::new(id, CardKind::Virus(card_color)))
            } else {
                organ.apply_medicine(Card::new(id, CardKind::Medicine(card_color)))
            };
            let change = change.unwrap();
            accepted += 1;
            released += change.discarded.len();
            prop_assert_eq!(accepted, released + organ.viruses().len() + organ.medicines().len());

            match change.outcome {
                OrganOutcome::Destroyed => break,
                OrganOutcome::Changed(state) => {
                    prop_assert_eq!(organ.state().unwrap(), state);
                    prop_assert!(organ.viruses().len() + organ.medicines().len() <= 2);
                    if organ.viruses().is_empty() && organ.medicines().is_empty() {
                        prop_assert_eq!(organ.color(), organ.original_color());
                    }
                }
            }
        }
        prop_assert!(organ.state().is_ok());
    }

    /// Every (state, event) pair either has a row or faults; nothing panics.
    #[test]
    fn prop_transition_total(state_index in 0usize..4, event_index in 0usize..4) {
        let state = OrganState::ALL[state_index];
        let event = [
            OrganEvent::ApplyVirus,
            OrganEvent::ApplyMedicine,
            OrganEvent::RemoveVirus,
            OrganEvent::RemoveMedicine,
        ][event_index];
        match transition(state, event) {
            Ok(t) => prop_assert_eq!(t.destroys(), state == OrganState::Infected && event == OrganEvent::ApplyVirus),
            Err(e) => prop_assert_eq!(e, EngineError::InvalidTransition { state, event }),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Seeded games conserve all 68 cards and finish with a real winner.
    #[test]
    fn prop_seeded_games_conserve_cards(seed in any::<u64>(), players in 2usize..=6) {
        let mut builder = GameBuilder::new().seed(seed);
        for seat in 0..players {
            builder = if seat % 2 == 0 {
                builder.seat(format!("r{seat}"), RuleBasedStrategy::new())
            } else {
                builder.seat(format!("x{seat}"), RandomProvider::new(GameRng::new(seed ^ seat as u64)))
            };
        }
        let mut game = builder.build().unwrap();

        loop {
            let winner = game.step().unwrap();
            prop_assert_eq!(game.state().card_count(), 68);
            if let Some(winner) = winner {
                prop_assert!(game.state().has_won(winner).unwrap());
                break;
            }
        }
    }

    /// Asking whether a card is playable never changes the answer.
    #[test]
    fn prop_legality_is_idempotent(seed in any::<u64>()) {
        let mut game = GameBuilder::new()
            .seed(seed)
            .seat("a", RuleBasedStrategy::new())
            .seat("b", RuleBasedStrategy::new())
            .seat("c", RuleBasedStrategy::new())
            .build()
            .unwrap();
        for _ in 0..15 {
            if game.step().unwrap().is_some() {
                break;
            }
        }

        let state = game.state();
        for (id, player) in state.players() {
            for card in player.hand() {
                let first = card.can_be_played(state, id);
                prop_assert_eq!(first, card.can_be_played(state, id));
            }
        }
    }
}
