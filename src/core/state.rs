//! Game state: players, deck and turn bookkeeping.
//!
//! ## Player
//!
//! One seat's hand, body and move history. Fields are private; everything
//! that changes a player goes through its methods so the body never holds
//! two organs of the same current color.
//!
//! ## GameState
//!
//! Complete game state:
//! - Players (per seat, `PlayerMap`)
//! - Shared deck and discard pile
//! - Current seat and turn counter
//! - Configuration and RNG
//!
//! All collections are `im` persistent structures, so [`GameState::clone_state`]
//! is O(1) and the clone shares nothing observable with the original.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::MoveRecord;
use super::config::GameConfig;
use super::entity::CardId;
use super::error::EngineError;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, CardKind, Color, Deck, Organ, Treatment};
use crate::rules::OrganState;

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    hand: SmallVec<[Card; 3]>,
    body: Vector<Organ>,
    move_history: Vector<MoveRecord>,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: SmallVec::new(),
            body: Vector::new(),
            move_history: Vector::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Hand ===

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn add_card_to_hand(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// The card at `index`.
    pub fn hand_card(&self, index: usize) -> Result<Card, EngineError> {
        self.hand.get(index).copied().ok_or(EngineError::HandIndexOutOfRange {
            index,
            hand_size: self.hand.len(),
        })
    }

    /// Remove and return the card at `index`.
    pub fn remove_hand_card(&mut self, index: usize) -> Result<Card, EngineError> {
        if index >= self.hand.len() {
            return Err(EngineError::HandIndexOutOfRange {
                index,
                hand_size: self.hand.len(),
            });
        }
        Ok(self.hand.remove(index))
    }

    /// Empty the hand.
    pub fn take_hand(&mut self) -> SmallVec<[Card; 3]> {
        std::mem::take(&mut self.hand)
    }

    /// Index of the first card in hand matching `pred`.
    pub fn find_in_hand(&self, pred: impl Fn(&Card) -> bool) -> Option<usize> {
        self.hand.iter().position(pred)
    }

    /// Index of the first copy of `treatment` in hand.
    #[must_use]
    pub fn treatment_index(&self, treatment: Treatment) -> Option<usize> {
        self.find_in_hand(|card| card.is_treatment(treatment))
    }

    // === Body ===

    pub fn body(&self) -> impl Iterator<Item = &Organ> {
        self.body.iter()
    }

    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn add_organ_to_body(&mut self, organ: Organ) {
        debug_assert!(!self.has_color(organ.color()), "duplicate organ color in body");
        self.body.push_back(organ);
    }

    /// Remove an organ by id.
    pub fn remove_organ_from_body(&mut self, organ: CardId) -> Option<Organ> {
        let index = self.body.iter().position(|o| o.id() == organ)?;
        Some(self.body.remove(index))
    }

    #[must_use]
    pub fn organ(&self, organ: CardId) -> Option<&Organ> {
        self.body.iter().find(|o| o.id() == organ)
    }

    pub fn organ_mut(&mut self, organ: CardId) -> Option<&mut Organ> {
        self.body.iter_mut().find(|o| o.id() == organ)
    }

    /// The organ whose current color is `color`.
    #[must_use]
    pub fn organ_by_color(&self, color: Color) -> Option<&Organ> {
        self.body.iter().find(|o| o.color() == color)
    }

    #[must_use]
    pub fn has_color(&self, color: Color) -> bool {
        self.organ_by_color(color).is_some()
    }

    /// Does any organ other than `except` currently have `color`?
    #[must_use]
    pub fn has_color_besides(&self, color: Color, except: CardId) -> bool {
        self.body.iter().any(|o| o.id() != except && o.color() == color)
    }

    /// Current colors, in body order.
    #[must_use]
    pub fn colors(&self) -> SmallVec<[Color; 5]> {
        self.body.iter().map(Organ::color).collect()
    }

    /// Can a virus or medicine of `color` land on `organ`?
    ///
    /// Besides the organ's own check, a wild organ may not adopt a color
    /// another organ in this body already has.
    #[must_use]
    pub fn can_receive(&self, organ: CardId, color: Color) -> bool {
        match self.organ(organ) {
            Some(o) => o.accepts(color) && !(o.would_adopt(color) && self.has_color_besides(color, organ)),
            None => false,
        }
    }

    /// Organs that are not infected.
    #[must_use]
    pub fn healthy_organ_count(&self) -> usize {
        self.body.iter().filter(|o| !o.is_infected()).count()
    }

    /// Organs in the given state.
    #[must_use]
    pub fn count_in_state(&self, state: OrganState) -> usize {
        self.body.iter().filter(|o| o.state() == Ok(state)).count()
    }

    /// Sum of the state values of every organ.
    pub fn state_total(&self) -> Result<i32, EngineError> {
        self.body.iter().try_fold(0, |acc, o| Ok(acc + o.state()?.value()))
    }

    /// Attached cards plus organ cards.
    #[must_use]
    pub fn cards_in_body(&self) -> usize {
        self.body
            .iter()
            .map(|o| 1 + o.viruses().len() + o.medicines().len())
            .sum()
    }

    // === History ===

    pub fn record(&mut self, record: MoveRecord) {
        self.move_history.push_back(record);
    }

    pub fn move_history(&self) -> impl Iterator<Item = &MoveRecord> {
        self.move_history.iter()
    }

    #[must_use]
    pub fn successful_moves(&self) -> usize {
        self.move_history.iter().filter(|r| r.succeeded).count()
    }

    #[must_use]
    pub fn failed_moves(&self) -> usize {
        self.move_history.len() - self.successful_moves()
    }

    /// Heuristic score of how well this seat played.
    ///
    /// Ten points per successful move and per vaccinated organ, twenty per
    /// organ and forty per immunised organ; failed moves and infected organs
    /// cost ten each.
    #[must_use]
    pub fn fitness(&self) -> i64 {
        let count = |n: usize| n as i64;
        10 * count(self.successful_moves()) - 10 * count(self.failed_moves())
            + 20 * count(self.body.len())
            + 40 * count(self.count_in_state(OrganState::Immunised))
            + 10 * count(self.count_in_state(OrganState::Vaccinated))
            - 10 * count(self.count_in_state(OrganState::Infected))
    }
}

/// Full game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    players: PlayerMap<Player>,

    /// Seat whose turn it is.
    current: PlayerId,

    /// Shared draw and discard piles.
    pub deck: Deck,

    /// Turns taken so far.
    pub turn_number: u32,

    pub config: GameConfig,

    /// Deterministic RNG.
    #[serde(skip, default = "default_rng")]
    pub rng: GameRng,
}

fn default_rng() -> GameRng {
    GameRng::new(0)
}

impl GameState {
    /// Create a game with an unshuffled deck built from `config.deck`.
    ///
    /// Seat 0 moves first; the builder picks the real starting seat.
    #[must_use]
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>, config: GameConfig, rng: GameRng) -> Self {
        let players = PlayerMap::from_vec(names.into_iter().map(Player::new).collect());
        let deck = Deck::new(&config.deck);
        Self {
            players,
            current: PlayerId::new(0),
            deck,
            turn_number: 0,
            config,
            rng,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, EngineError> {
        self.players.get(id).ok_or(EngineError::UnknownPlayer(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, EngineError> {
        self.players.get_mut(id).ok_or(EngineError::UnknownPlayer(id))
    }

    /// Iterate over (seat, player) pairs.
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        self.players.player_ids()
    }

    /// Every seat except `player`, in seat order.
    pub fn opponents(&self, player: PlayerId) -> impl Iterator<Item = PlayerId> {
        self.players.player_ids().filter(move |&p| p != player)
    }

    // === Turn order ===

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn set_current_player(&mut self, player: PlayerId) -> Result<(), EngineError> {
        self.player(player)?;
        self.current = player;
        Ok(())
    }

    /// Pass the turn to the next seat.
    pub fn next_player(&mut self) {
        self.current = self.current.next(self.player_count());
    }

    // === Cards ===

    /// Draw until `player` holds a full hand. Returns the number drawn.
    pub fn complete_hand(&mut self, player: PlayerId) -> Result<usize, EngineError> {
        let missing = self.config.hand_size.saturating_sub(self.player(player)?.hand.len());
        for _ in 0..missing {
            let card = self.deck.draw()?;
            self.player_mut(player)?.add_card_to_hand(card);
        }
        Ok(missing)
    }

    /// Exchange the whole bodies of two seats.
    pub fn swap_bodies(&mut self, a: PlayerId, b: PlayerId) -> Result<(), EngineError> {
        let body_a = self.player(a)?.body.clone();
        let body_b = self.player(b)?.body.clone();
        self.player_mut(a)?.body = body_b;
        self.player_mut(b)?.body = body_a;
        Ok(())
    }

    /// Has `player` reached the organ count needed to win?
    pub fn has_won(&self, player: PlayerId) -> Result<bool, EngineError> {
        Ok(self.player(player)?.healthy_organ_count() >= self.config.organs_to_win)
    }

    /// Every card in the game, wherever it is. Constant for a whole game.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let held: usize = self
            .players
            .iter()
            .map(|(_, p)| p.hand.len() + p.cards_in_body())
            .sum();
        self.deck.len() + self.deck.discard_len() + held
    }

    // === Cloning ===

    /// Copy-on-write clone for simulating a move.
    ///
    /// The clone gets its own RNG stream so nothing it draws can leak into
    /// or mirror the live game.
    #[must_use]
    pub fn clone_state(&self) -> Self {
        let mut clone = self.clone();
        clone.rng = self.rng.for_context(&format!("clone-{}", self.turn_number));
        clone
    }

    // === Observation ===

    /// Length of [`GameState::feature_vector`] for `player_count` seats.
    #[must_use]
    pub fn feature_len(player_count: usize) -> usize {
        player_count * OrganState::ALL.len() * Color::ALL.len()
            + player_count
            + 3 * Color::ALL.len()
            + Treatment::ALL.len()
            + 2
    }

    /// Flat observation of the table from the current seat's view.
    ///
    /// Layout, in order:
    /// - per seat, one slot per (organ state, color) set to 1 when present
    /// - current seat one-hot
    /// - current hand: organs, medicines, viruses by color
    /// - current hand: treatments by identity
    /// - draw pile and discard pile sizes as a fraction of the deck
    #[must_use]
    pub fn feature_vector(&self) -> Vec<f32> {
        let players = self.player_count();
        let colors = Color::ALL.len();
        let body_block = OrganState::ALL.len() * colors;

        let seat_index = players * body_block;
        let hand_index = seat_index + players;
        let treatment_index = hand_index + 3 * colors;
        let deck_index = treatment_index + Treatment::ALL.len();

        let mut features = vec![0.0; Self::feature_len(players)];

        for (id, player) in self.players.iter() {
            for organ in player.body() {
                if let Ok(state) = organ.state() {
                    features[id.index() * body_block + state.index() * colors + organ.color().index()] = 1.0;
                }
            }
        }

        features[seat_index + self.current.index()] = 1.0;

        if let Some(player) = self.players.get(self.current) {
            for card in player.hand() {
                let slot = match card.kind {
                    CardKind::Organ(c) => hand_index + c.index(),
                    CardKind::Medicine(c) => hand_index + colors + c.index(),
                    CardKind::Virus(c) => hand_index + 2 * colors + c.index(),
                    CardKind::Treatment(t) => treatment_index + t.index(),
                };
                features[slot] = 1.0;
            }
        }

        let total = self.config.deck.total().max(1) as f32;
        features[deck_index] = self.deck.len() as f32 / total;
        features[deck_index + 1] = self.deck.discard_len() as f32 / total;

        features
    }
}
