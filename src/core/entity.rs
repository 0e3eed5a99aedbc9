//! Card identification.
//!
//! Every physical card in the deck has a unique `CardId`, assigned once when
//! the deck is built. Ids are flat indices into the deck composition, so a
//! cloned game state refers to the same cards by the same ids without
//! sharing any memory with the original.
//!
//! ## Usage
//!
//! ```
//! use virus_engine::core::CardId;
//!
//! let ids: Vec<_> = CardId::range(3).collect();
//! assert_eq!(ids, vec![CardId(0), CardId(1), CardId(2)]);
//! assert_eq!(format!("{}", CardId(7)), "Card(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Iterate over the first `count` card ids.
    pub fn range(count: usize) -> impl Iterator<Item = CardId> {
        (0..count as u16).map(CardId)
    }
}

impl From<u16> for CardId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}
