//! Card system: definitions, organs in play, and the deck.
//!
//! ## Key Types
//!
//! - `Card`: Stable id plus `CardKind` (organ, virus, medicine, treatment)
//! - `Color` / `Treatment`: The closed sets card kinds are built from
//! - `Organ`: An organ card in a body, with its attached viruses and medicines
//! - `Deck`: Shared draw pile and discard pile

pub mod deck;
pub mod definition;
pub mod organ;

pub use deck::Deck;
pub use definition::{Card, CardKind, CardType, Color, Treatment};
pub use organ::{Organ, OrganChange, OrganOutcome};
