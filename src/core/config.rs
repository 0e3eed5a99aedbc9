//! Game configuration.
//!
//! Everything the rules treat as a constant lives here so tests and the
//! simulator can vary it:
//! - `DeckComposition`: how many of each card the deck holds
//! - `GameConfig`: player bounds, hand size, win threshold, turn ceiling
//!
//! The defaults reproduce the standard 68-card game.

use serde::{Deserialize, Serialize};

/// Card counts for building a deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckComposition {
    /// Organs per concrete color.
    pub organs_per_color: usize,
    /// Viruses per concrete color.
    pub viruses_per_color: usize,
    /// Medicines per concrete color.
    pub medicines_per_color: usize,

    pub wild_organs: usize,
    pub wild_viruses: usize,
    pub wild_medicines: usize,

    pub contagions: usize,
    pub organ_thieves: usize,
    pub transplants: usize,
    pub latex_gloves: usize,
    pub medical_errors: usize,
}

impl DeckComposition {
    /// The standard deck: 68 cards.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            organs_per_color: 5,
            viruses_per_color: 4,
            medicines_per_color: 4,
            wild_organs: 1,
            wild_viruses: 1,
            wild_medicines: 4,
            contagions: 2,
            organ_thieves: 3,
            transplants: 3,
            latex_gloves: 1,
            medical_errors: 1,
        }
    }

    /// Total number of cards.
    #[must_use]
    pub const fn total(&self) -> usize {
        4 * (self.organs_per_color + self.viruses_per_color + self.medicines_per_color)
            + self.wild_organs
            + self.wild_viruses
            + self.wild_medicines
            + self.contagions
            + self.organ_thieves
            + self.transplants
            + self.latex_gloves
            + self.medical_errors
    }
}

impl Default for DeckComposition {
    fn default() -> Self {
        Self::standard()
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Fewest seats a game may start with.
    pub min_players: usize,

    /// Most seats a game may start with.
    pub max_players: usize,

    /// Cards a player holds when their hand is full.
    pub hand_size: usize,

    /// Non-infected organs needed to win.
    pub organs_to_win: usize,

    /// Turn ceiling; passing it is an engine fault.
    pub max_turns: u32,

    /// Deck contents.
    pub deck: DeckComposition,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 6,
            hand_size: 3,
            organs_to_win: 4,
            max_turns: 10_000,
            deck: DeckComposition::standard(),
        }
    }
}

impl GameConfig {
    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the number of healthy organs needed to win.
    #[must_use]
    pub fn with_organs_to_win(mut self, organs: usize) -> Self {
        self.organs_to_win = organs;
        self
    }

    /// Set the turn ceiling.
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    /// Set the deck composition.
    #[must_use]
    pub fn with_deck(mut self, deck: DeckComposition) -> Self {
        self.deck = deck;
        self
    }

    /// Is `count` an allowed number of seats?
    #[must_use]
    pub fn accepts_player_count(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_deck_total() {
        assert_eq!(DeckComposition::standard().total(), 68);
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.hand_size, 3);
        assert_eq!(config.organs_to_win, 4);
        assert_eq!(config.max_turns, 10_000);
        assert!(config.accepts_player_count(2));
        assert!(config.accepts_player_count(6));
        assert!(!config.accepts_player_count(1));
        assert!(!config.accepts_player_count(7));
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_hand_size(5)
            .with_organs_to_win(3)
            .with_max_turns(50);

        assert_eq!(config.hand_size, 5);
        assert_eq!(config.organs_to_win, 3);
        assert_eq!(config.max_turns, 50);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_max_turns(123);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
