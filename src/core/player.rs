//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are 0-based and stable for a whole game.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `im::Vector`, so cloning a map for a lookahead
//! simulation shares structure with the original until one side writes.

use im::Vector;
use serde::{Deserialize, Serialize};

/// Seat identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that acts after this one.
    #[must_use]
    pub const fn next(self, player_count: usize) -> Self {
        Self(((self.0 as usize + 1) % player_count) as u8)
    }

    /// Iterate over all seats of a `player_count` game.
    ///
    /// ```
    /// use virus_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data, indexed by seat, with cheap cloning.
///
/// ## Example
///
/// ```
/// use virus_engine::core::{PlayerId, PlayerMap};
///
/// let names = PlayerMap::from_vec(vec!["ana", "bo", "cy"]);
/// assert_eq!(names.get(PlayerId::new(1)), Some(&"bo"));
/// assert_eq!(names.get(PlayerId::new(3)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T: Clone> {
    seats: Vector<T>,
}

impl<T: Clone> PlayerMap<T> {
    /// Build a map from per-seat values in seat order.
    pub fn from_vec(values: Vec<T>) -> Self {
        assert!(!values.is_empty(), "Must have at least 1 player");
        assert!(values.len() <= usize::from(u8::MAX), "At most 255 players supported");
        Self {
            seats: values.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// A seat's data, or `None` for a seat not at the table.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.seats.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.seats.get_mut(player.index())
    }

    /// Iterate over (seat, value) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.player_ids().zip(self.seats.iter())
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.seats.len())
    }
}
