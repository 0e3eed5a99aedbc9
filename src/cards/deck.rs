//! Draw pile and discard pile.
//!
//! The top of the draw pile is the end of the vector. When the draw pile
//! runs dry the discard pile is reversed into it, so the first card
//! discarded is the first one drawn again. Cards are never created or
//! destroyed after the deck is built.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::definition::{Card, CardKind, Color, Treatment};
use crate::core::config::DeckComposition;
use crate::core::entity::CardId;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;

/// The shared draw and discard piles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
    discard_pile: Vector<Card>,
}

impl Deck {
    /// Build an unshuffled deck. Ids are assigned in build order from 0.
    ///
    /// ```
    /// use virus_engine::cards::Deck;
    /// use virus_engine::core::DeckComposition;
    ///
    /// let deck = Deck::new(&DeckComposition::standard());
    /// assert_eq!(deck.len(), 68);
    /// ```
    #[must_use]
    pub fn new(composition: &DeckComposition) -> Self {
        let mut kinds = Vec::with_capacity(composition.total());

        for color in Color::CONCRETE {
            kinds.extend(std::iter::repeat(CardKind::Organ(color)).take(composition.organs_per_color));
            kinds.extend(std::iter::repeat(CardKind::Virus(color)).take(composition.viruses_per_color));
            kinds.extend(std::iter::repeat(CardKind::Medicine(color)).take(composition.medicines_per_color));
        }
        kinds.extend(std::iter::repeat(CardKind::Organ(Color::Wild)).take(composition.wild_organs));
        kinds.extend(std::iter::repeat(CardKind::Virus(Color::Wild)).take(composition.wild_viruses));
        kinds.extend(std::iter::repeat(CardKind::Medicine(Color::Wild)).take(composition.wild_medicines));

        let treatments = [
            (Treatment::Contagion, composition.contagions),
            (Treatment::OrganThief, composition.organ_thieves),
            (Treatment::Transplant, composition.transplants),
            (Treatment::LatexGlove, composition.latex_gloves),
            (Treatment::MedicalError, composition.medical_errors),
        ];
        for (treatment, count) in treatments {
            kinds.extend(std::iter::repeat(CardKind::Treatment(treatment)).take(count));
        }

        let cards = CardId::range(kinds.len())
            .zip(kinds)
            .map(|(id, kind)| Card::new(id, kind))
            .collect();

        Self { cards, discard_pile: Vector::new() }
    }

    /// A deck whose draw pile is exactly `cards`, last element on top.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            discard_pile: Vector::new(),
        }
    }

    /// Shuffle the draw pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self.cards.iter().copied().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Draw the top card, refilling from the discard pile if needed.
    pub fn draw(&mut self) -> Result<Card, EngineError> {
        if self.cards.is_empty() {
            self.refill();
        }
        self.cards.pop_back().ok_or(EngineError::DeckExhausted)
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push_back(card);
    }

    /// Discard several cards in order.
    pub fn discard_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard_pile.extend(cards);
    }

    fn refill(&mut self) {
        debug!(cards = self.discard_pile.len(), "refilling deck from discard pile");
        self.cards = self.discard_pile.iter().rev().copied().collect();
        self.discard_pile.clear();
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in the discard pile.
    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Draw pile, bottom first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Discard pile, oldest first.
    pub fn discard_pile(&self) -> impl Iterator<Item = &Card> {
        self.discard_pile.iter()
    }
}
