//! Organs - the runtime state of an organ card sitting in a body.
//!
//! An `Organ` owns its organ card plus the viruses and medicines attached to
//! it. Attachments can only change through the state machine in
//! [`crate::rules::transitions`], so the derived state always matches one of
//! the table rows.
//!
//! ## Wild organs
//!
//! A wild organ takes the color of the first colored virus or medicine
//! attached to it and goes back to wild once its attachments are cleared.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{Card, CardKind, Color};
use crate::core::entity::CardId;
use crate::core::error::EngineError;
use crate::rules::transitions::{transition, OrganEffect, OrganEvent, OrganState};

/// What happened to an organ after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrganOutcome {
    /// The organ survives in the given state.
    Changed(OrganState),
    /// The organ must leave the body and be discarded.
    Destroyed,
}

/// Cards released by an organ transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrganChange {
    pub outcome: OrganOutcome,
    /// Cards bound for the discard pile, in order.
    pub discarded: SmallVec<[Card; 4]>,
    /// A card detached and handed back to the caller.
    pub detached: Option<Card>,
}

/// An organ in a player's body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organ {
    card: Card,
    color: Color,
    viruses: SmallVec<[Card; 2]>,
    medicines: SmallVec<[Card; 2]>,
}

impl Organ {
    /// Wrap an organ card. Returns `None` for any other kind of card.
    #[must_use]
    pub fn from_card(card: Card) -> Option<Self> {
        match card.kind {
            CardKind::Organ(color) => Some(Self {
                card,
                color,
                viruses: SmallVec::new(),
                medicines: SmallVec::new(),
            }),
            _ => None,
        }
    }

    /// The organ card itself.
    #[must_use]
    pub fn card(&self) -> Card {
        self.card
    }

    /// Id of the organ card; organs are addressed by it.
    #[must_use]
    pub fn id(&self) -> CardId {
        self.card.id
    }

    /// Printed color of the organ card.
    #[must_use]
    pub fn original_color(&self) -> Color {
        match self.card.kind {
            CardKind::Organ(color) => color,
            _ => self.color,
        }
    }

    /// Current color; differs from the printed one for a wild organ that
    /// adopted a color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn viruses(&self) -> &[Card] {
        &self.viruses
    }

    #[must_use]
    pub fn medicines(&self) -> &[Card] {
        &self.medicines
    }

    /// Current state, derived from the attachment counts.
    pub fn state(&self) -> Result<OrganState, EngineError> {
        OrganState::from_counts(self.viruses.len(), self.medicines.len())
    }

    #[must_use]
    pub fn is_infected(&self) -> bool {
        matches!(self.state(), Ok(OrganState::Infected))
    }

    #[must_use]
    pub fn is_immunised(&self) -> bool {
        matches!(self.state(), Ok(OrganState::Immunised))
    }

    /// Can a virus or medicine of `color` target this organ?
    ///
    /// Ignores the rest of the body; see `Player::can_receive` for the
    /// check that also covers wild color adoption.
    #[must_use]
    pub fn accepts(&self, color: Color) -> bool {
        !self.is_immunised() && self.color.matches(color)
    }

    /// Would attaching a card of `color` make this organ adopt a new color?
    #[must_use]
    pub fn would_adopt(&self, color: Color) -> bool {
        self.color.is_wild() && !color.is_wild()
    }

    /// Attach a virus.
    pub fn apply_virus(&mut self, virus: Card) -> Result<OrganChange, EngineError> {
        self.step(OrganEvent::ApplyVirus, Some(virus))
    }

    /// Attach a medicine.
    pub fn apply_medicine(&mut self, medicine: Card) -> Result<OrganChange, EngineError> {
        self.step(OrganEvent::ApplyMedicine, Some(medicine))
    }

    /// Detach the virus of an infected organ and return it.
    pub fn remove_virus(&mut self) -> Result<Card, EngineError> {
        let state = self.state()?;
        self.step(OrganEvent::RemoveVirus, None)?
            .detached
            .ok_or(EngineError::InvalidTransition { state, event: OrganEvent::RemoveVirus })
    }

    /// Detach the medicine of a vaccinated organ and return it.
    pub fn remove_medicine(&mut self) -> Result<Card, EngineError> {
        let state = self.state()?;
        self.step(OrganEvent::RemoveMedicine, None)?
            .detached
            .ok_or(EngineError::InvalidTransition { state, event: OrganEvent::RemoveMedicine })
    }

    fn step(&mut self, event: OrganEvent, incoming: Option<Card>) -> Result<OrganChange, EngineError> {
        let t = transition(self.state()?, event)?;
        let mut discarded = SmallVec::new();
        let mut detached = None;

        for effect in t.effects {
            match effect {
                OrganEffect::AttachIncoming => {
                    if let Some(card) = incoming {
                        self.attach(event, card);
                    }
                }
                OrganEffect::DiscardIncoming => discarded.extend(incoming),
                OrganEffect::DiscardViruses => discarded.extend(self.viruses.drain(..)),
                OrganEffect::DiscardMedicines => discarded.extend(self.medicines.drain(..)),
                OrganEffect::DetachVirus => detached = self.viruses.pop(),
                OrganEffect::DetachMedicine => detached = self.medicines.pop(),
                OrganEffect::ResetWildColor => {
                    if self.viruses.is_empty() && self.medicines.is_empty() {
                        self.color = self.original_color();
                    }
                }
                OrganEffect::DestroyOrgan => {}
            }
        }

        let outcome = match t.next {
            None => OrganOutcome::Destroyed,
            Some(expected) => {
                let reached = self.state()?;
                if reached != expected {
                    return Err(EngineError::InvalidOrganState {
                        viruses: self.viruses.len(),
                        medicines: self.medicines.len(),
                    });
                }
                OrganOutcome::Changed(reached)
            }
        };

        Ok(OrganChange { outcome, discarded, detached })
    }

    fn attach(&mut self, event: OrganEvent, card: Card) {
        if let Some(color) = card.color() {
            if self.would_adopt(color) {
                self.color = color;
            }
        }
        match event {
            OrganEvent::ApplyVirus => self.viruses.push(card),
            _ => self.medicines.push(card),
        }
    }
}

impl std::fmt::Display for Organ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.state() {
            Ok(state) => write!(f, "{} Organ ({})", self.color, state),
            Err(_) => write!(f, "{} Organ (corrupt)", self.color),
        }
    }
}
