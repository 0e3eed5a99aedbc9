//! Card resolution scenarios played through the public API.
//!
//! Each test sets up a small table by hand, plays one card and checks the
//! bodies, hands and piles afterwards.

use virus_engine::{
    resolve_play, Card, CardId, CardKind, Color, Deck, GameConfig, GameRng, GameState, Move, Organ, OrganState,
    PlayerId, Treatment,
};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);

fn table(players: usize) -> GameState {
    let names: Vec<String> = (0..players).map(|i| format!("p{i}")).collect();
    let mut state = GameState::new(names, GameConfig::default(), GameRng::new(3));
    state.deck = Deck::from_cards([]);
    state
}

fn card(id: u16, kind: CardKind) -> Card {
    Card::new(CardId(id), kind)
}

fn give_organ(state: &mut GameState, player: PlayerId, id: u16, color: Color) {
    let organ = Organ::from_card(card(id, CardKind::Organ(color))).unwrap();
    state.player_mut(player).unwrap().add_organ_to_body(organ);
}

fn give_card(state: &mut GameState, player: PlayerId, id: u16, kind: CardKind) {
    state.player_mut(player).unwrap().add_card_to_hand(card(id, kind));
}

fn organ_state(state: &GameState, player: PlayerId, id: u16) -> Option<OrganState> {
    state.player(player).unwrap().organ(CardId(id)).map(|o| o.state().unwrap())
}

/// Play the first hand card of `player` with one move.
fn play_first(state: &mut GameState, player: PlayerId, mv: Move) -> bool {
    resolve_play(state, player, 0, &[mv]).unwrap()
}

#[test]
fn test_organ_lifecycle_to_destruction() {
    let mut state = table(2);
    give_organ(&mut state, P1, 1, Color::Red);

    give_card(&mut state, P0, 10, CardKind::Virus(Color::Red));
    assert!(play_first(&mut state, P0, Move::against(P1, CardId(1))));
    assert_eq!(organ_state(&state, P1, 1), Some(OrganState::Infected));
    assert_eq!(state.deck.discard_len(), 0);

    give_card(&mut state, P0, 11, CardKind::Virus(Color::Red));
    assert!(play_first(&mut state, P0, Move::against(P1, CardId(1))));
    assert_eq!(organ_state(&state, P1, 1), None);

    // Both viruses and the organ itself.
    assert_eq!(state.deck.discard_len(), 3);
    assert_eq!(state.player(P0).unwrap().hand().len(), 0);
}

#[test]
fn test_medicine_then_virus_cancels() {
    let mut state = table(2);
    give_organ(&mut state, P0, 1, Color::Blue);

    give_card(&mut state, P0, 10, CardKind::Medicine(Color::Blue));
    assert!(play_first(&mut state, P0, Move::on_own(CardId(1))));
    assert_eq!(organ_state(&state, P0, 1), Some(OrganState::Vaccinated));

    give_card(&mut state, P1, 11, CardKind::Virus(Color::Blue));
    assert!(play_first(&mut state, P1, Move::against(P0, CardId(1))));
    assert_eq!(organ_state(&state, P0, 1), Some(OrganState::Healthy));
    assert_eq!(state.deck.discard_len(), 2);
}

#[test]
fn test_immunised_organ_is_untouchable() {
    let mut state = table(2);
    give_organ(&mut state, P0, 1, Color::Green);
    give_card(&mut state, P0, 10, CardKind::Medicine(Color::Green));
    give_card(&mut state, P0, 11, CardKind::Medicine(Color::Wild));
    assert!(play_first(&mut state, P0, Move::on_own(CardId(1))));
    assert!(play_first(&mut state, P0, Move::on_own(CardId(1))));
    assert_eq!(organ_state(&state, P0, 1), Some(OrganState::Immunised));

    give_card(&mut state, P1, 12, CardKind::Virus(Color::Green));
    assert!(!play_first(&mut state, P1, Move::against(P0, CardId(1))));
    assert_eq!(state.player(P1).unwrap().hand().len(), 1);

    give_card(&mut state, P1, 13, CardKind::Treatment(Treatment::OrganThief));
    assert!(!resolve_play(&mut state, P1, 1, &[Move::against(P0, CardId(1))]).unwrap());
    assert_eq!(state.player(P0).unwrap().body_len(), 1);
}

#[test]
fn test_third_medicine_on_immunised_organ_fails() {
    let mut state = table(2);
    give_organ(&mut state, P0, 1, Color::Red);
    for id in 10..13 {
        give_card(&mut state, P0, id, CardKind::Medicine(Color::Red));
    }
    assert!(play_first(&mut state, P0, Move::on_own(CardId(1))));
    assert!(play_first(&mut state, P0, Move::on_own(CardId(1))));
    let discarded = state.deck.discard_len();

    assert!(!play_first(&mut state, P0, Move::on_own(CardId(1))));
    assert_eq!(organ_state(&state, P0, 1), Some(OrganState::Immunised));
    assert_eq!(state.player(P0).unwrap().hand(), &[card(12, CardKind::Medicine(Color::Red))]);
    assert_eq!(state.deck.discard_len(), discarded);
}

#[test]
fn test_wild_organ_adopts_and_resets_color() {
    let mut state = table(2);
    give_organ(&mut state, P1, 1, Color::Wild);

    give_card(&mut state, P0, 10, CardKind::Virus(Color::Yellow));
    assert!(play_first(&mut state, P0, Move::against(P1, CardId(1))));
    let organ = state.player(P1).unwrap().organ(CardId(1)).unwrap().clone();
    assert_eq!(organ.color(), Color::Yellow);
    assert_eq!(organ.original_color(), Color::Wild);

    give_card(&mut state, P1, 11, CardKind::Medicine(Color::Wild));
    assert!(play_first(&mut state, P1, Move::on_own(CardId(1))));
    let organ = state.player(P1).unwrap().organ(CardId(1)).unwrap().clone();
    assert_eq!(organ.state().unwrap(), OrganState::Healthy);
    assert_eq!(organ.color(), Color::Wild);
}

#[test]
fn test_wild_organ_cannot_duplicate_body_color() {
    let mut state = table(2);
    give_organ(&mut state, P1, 1, Color::Wild);
    give_organ(&mut state, P1, 2, Color::Red);

    give_card(&mut state, P0, 10, CardKind::Virus(Color::Red));
    assert!(!play_first(&mut state, P0, Move::against(P1, CardId(1))));
    assert!(play_first(&mut state, P0, Move::against(P1, CardId(2))));
}

#[test]
fn test_transplant_swaps_organs_and_discards_card() {
    let mut state = table(2);
    give_organ(&mut state, P0, 1, Color::Red);
    give_organ(&mut state, P1, 2, Color::Blue);
    give_card(&mut state, P0, 10, CardKind::Treatment(Treatment::Transplant));

    assert!(play_first(&mut state, P0, Move::exchange(P1, CardId(1), CardId(2))));
    assert!(state.player(P0).unwrap().has_color(Color::Blue));
    assert!(state.player(P1).unwrap().has_color(Color::Red));
    assert_eq!(state.deck.discard_pile().copied().collect::<Vec<_>>(), vec![
        card(10, CardKind::Treatment(Treatment::Transplant))
    ]);
}

#[test]
fn test_transplant_rejects_color_collision() {
    let mut state = table(2);
    give_organ(&mut state, P0, 1, Color::Red);
    give_organ(&mut state, P0, 2, Color::Blue);
    give_organ(&mut state, P1, 3, Color::Blue);
    give_card(&mut state, P0, 10, CardKind::Treatment(Treatment::Transplant));

    assert!(!play_first(&mut state, P0, Move::exchange(P1, CardId(1), CardId(3))));
    assert_eq!(state.player(P0).unwrap().hand().len(), 1);
    assert_eq!(state.deck.discard_len(), 0);
}

#[test]
fn test_contagion_spreads_to_several_opponents() {
    let mut state = table(3);
    give_organ(&mut state, P0, 1, Color::Red);
    give_organ(&mut state, P0, 2, Color::Blue);
    give_card(&mut state, P1, 20, CardKind::Virus(Color::Red));
    give_card(&mut state, P1, 21, CardKind::Virus(Color::Blue));
    assert!(play_first(&mut state, P1, Move::against(P0, CardId(1))));
    assert!(play_first(&mut state, P1, Move::against(P0, CardId(2))));

    give_organ(&mut state, P1, 3, Color::Red);
    give_organ(&mut state, P2, 4, Color::Blue);
    give_card(&mut state, P0, 10, CardKind::Treatment(Treatment::Contagion));

    let moves = [
        Move::exchange(P1, CardId(1), CardId(3)),
        Move::exchange(P2, CardId(2), CardId(4)),
    ];
    assert!(resolve_play(&mut state, P0, 0, &moves).unwrap());

    assert_eq!(organ_state(&state, P0, 1), Some(OrganState::Healthy));
    assert_eq!(organ_state(&state, P0, 2), Some(OrganState::Healthy));
    assert_eq!(organ_state(&state, P1, 3), Some(OrganState::Infected));
    assert_eq!(organ_state(&state, P2, 4), Some(OrganState::Infected));
    assert_eq!(state.deck.discard_len(), 1);
}

#[test]
fn test_contagion_partial_success_counts() {
    let mut state = table(2);
    give_organ(&mut state, P0, 1, Color::Red);
    give_card(&mut state, P1, 20, CardKind::Virus(Color::Red));
    assert!(play_first(&mut state, P1, Move::against(P0, CardId(1))));
    give_organ(&mut state, P1, 3, Color::Red);
    give_card(&mut state, P0, 10, CardKind::Treatment(Treatment::Contagion));

    let moves = [
        Move::exchange(P1, CardId(1), CardId(3)),
        Move::exchange(P1, CardId(99), CardId(3)),
    ];
    assert!(resolve_play(&mut state, P0, 0, &moves).unwrap());
    assert_eq!(organ_state(&state, P1, 3), Some(OrganState::Infected));
}

#[test]
fn test_latex_glove_empties_every_other_hand() {
    let mut state = table(3);
    give_card(&mut state, P0, 10, CardKind::Treatment(Treatment::LatexGlove));
    give_card(&mut state, P0, 11, CardKind::Organ(Color::Red));
    give_card(&mut state, P1, 12, CardKind::Virus(Color::Red));
    give_card(&mut state, P1, 13, CardKind::Virus(Color::Blue));
    give_card(&mut state, P2, 14, CardKind::Medicine(Color::Red));

    assert!(play_first(&mut state, P0, Move::untargeted()));
    assert_eq!(state.player(P0).unwrap().hand().len(), 1);
    assert!(state.player(P1).unwrap().hand().is_empty());
    assert!(state.player(P2).unwrap().hand().is_empty());
    assert_eq!(state.deck.discard_len(), 4);
}

#[test]
fn test_medical_error_swaps_bodies() {
    let mut state = table(2);
    give_organ(&mut state, P0, 1, Color::Red);
    give_organ(&mut state, P1, 2, Color::Blue);
    give_organ(&mut state, P1, 3, Color::Green);
    give_card(&mut state, P0, 10, CardKind::Treatment(Treatment::MedicalError));

    assert!(play_first(&mut state, P0, Move::with_opponent(P1)));
    assert_eq!(state.player(P0).unwrap().body_len(), 2);
    assert_eq!(state.player(P1).unwrap().body_len(), 1);
    assert!(state.player(P1).unwrap().has_color(Color::Red));
}

#[test]
fn test_failed_play_keeps_card() {
    let mut state = table(2);
    give_card(&mut state, P0, 10, CardKind::Virus(Color::Red));

    assert!(!play_first(&mut state, P0, Move::against(P1, CardId(5))));
    assert!(!resolve_play(&mut state, P0, 0, &[]).unwrap());
    assert_eq!(state.player(P0).unwrap().hand(), &[card(10, CardKind::Virus(Color::Red))]);
}

#[test]
fn test_hand_index_out_of_range_is_fault() {
    let mut state = table(2);
    give_card(&mut state, P0, 10, CardKind::Organ(Color::Red));
    assert!(resolve_play(&mut state, P0, 3, &[Move::untargeted()]).is_err());
}
