//! Card definitions - the static identity of every card in the deck.
//!
//! A card is a `CardId` plus a `CardKind`. Kinds are a closed set, so every
//! rule that dispatches on a card matches exhaustively:
//!
//! - `Organ(color)`: placed in a player's body
//! - `Virus(color)`: attacks an opponent's organ
//! - `Medicine(color)`: protects or cures one of the owner's organs
//! - `Treatment(treatment)`: a one-shot special effect

use serde::{Deserialize, Serialize};

use crate::core::entity::CardId;

/// Card color. `Wild` matches every other color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Wild,
}

impl Color {
    /// Every color, `Wild` last.
    pub const ALL: [Color; 5] = [Color::Red, Color::Green, Color::Blue, Color::Yellow, Color::Wild];

    /// The four concrete colors.
    pub const CONCRETE: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    /// Is this the wild color?
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Color::Wild)
    }

    /// Do two colors match under wild rules?
    #[must_use]
    pub fn matches(self, other: Color) -> bool {
        self == other || self.is_wild() || other.is_wild()
    }

    /// Position in `Color::ALL`.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Wild => "Wild",
        };
        f.write_str(name)
    }
}

/// The five treatment cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Treatment {
    /// Swap one of your organs with one of an opponent's.
    Transplant,
    /// Steal an opponent's organ.
    OrganThief,
    /// Move your viruses onto opponents' organs.
    Contagion,
    /// Every opponent discards their hand.
    LatexGlove,
    /// Swap your whole body with an opponent's.
    MedicalError,
}

impl Treatment {
    pub const ALL: [Treatment; 5] = [
        Treatment::Transplant,
        Treatment::OrganThief,
        Treatment::Contagion,
        Treatment::LatexGlove,
        Treatment::MedicalError,
    ];

    /// Position in `Treatment::ALL`.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Treatment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Treatment::Transplant => "Transplant",
            Treatment::OrganThief => "OrganThief",
            Treatment::Contagion => "Contagion",
            Treatment::LatexGlove => "LatexGlove",
            Treatment::MedicalError => "MedicalError",
        };
        f.write_str(name)
    }
}

/// Broad card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Organ,
    Virus,
    Medicine,
    Treatment,
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardType::Organ => "Organ",
            CardType::Virus => "Virus",
            CardType::Medicine => "Medicine",
            CardType::Treatment => "Treatment",
        };
        f.write_str(name)
    }
}

/// What a card is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Organ(Color),
    Virus(Color),
    Medicine(Color),
    Treatment(Treatment),
}

impl CardKind {
    /// The broad category of this kind.
    #[must_use]
    pub const fn card_type(self) -> CardType {
        match self {
            CardKind::Organ(_) => CardType::Organ,
            CardKind::Virus(_) => CardType::Virus,
            CardKind::Medicine(_) => CardType::Medicine,
            CardKind::Treatment(_) => CardType::Treatment,
        }
    }

    /// Color of a colored card, `None` for treatments.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            CardKind::Organ(c) | CardKind::Virus(c) | CardKind::Medicine(c) => Some(c),
            CardKind::Treatment(_) => None,
        }
    }

    /// Treatment identity, `None` for colored cards.
    #[must_use]
    pub const fn treatment(self) -> Option<Treatment> {
        match self {
            CardKind::Treatment(t) => Some(t),
            _ => None,
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardKind::Treatment(t) => write!(f, "{}", t),
            colored => match colored.color() {
                Some(color) => write!(f, "{} {}", color, colored.card_type()),
                None => write!(f, "{}", colored.card_type()),
            },
        }
    }
}

/// A physical card: stable id plus kind.
///
/// Cards are `Copy`; moving a card between zones copies the value and the
/// zone it left forgets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, kind: CardKind) -> Self {
        Self { id, kind }
    }

    #[must_use]
    pub const fn card_type(&self) -> CardType {
        self.kind.card_type()
    }

    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        self.kind.color()
    }

    #[must_use]
    pub const fn treatment(&self) -> Option<Treatment> {
        self.kind.treatment()
    }

    /// Is this the given treatment?
    #[must_use]
    pub fn is_treatment(&self, treatment: Treatment) -> bool {
        self.treatment() == Some(treatment)
    }

    /// Human-readable name, e.g. "Red Virus" or "LatexGlove".
    #[must_use]
    pub fn name(&self) -> String {
        self.kind.to_string()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}
