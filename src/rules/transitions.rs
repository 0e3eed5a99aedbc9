//! Organ state machine.
//!
//! An organ's state is never stored; it is derived from how many viruses and
//! medicines are attached to it. Every change to those attachments goes
//! through [`transition`], a lookup table from `(state, event)` to the next
//! state and the ordered list of effects the organ has to carry out.
//!
//! ## Table
//!
//! | State      | ApplyVirus                     | ApplyMedicine             |
//! |------------|--------------------------------|---------------------------|
//! | Healthy    | Infected                       | Vaccinated                |
//! | Infected   | destroyed                      | Healthy (virus cured)     |
//! | Vaccinated | Healthy (medicine stripped)    | Immunised                 |
//! | Immunised  | fault                          | fault                     |
//!
//! `RemoveVirus` is only defined from `Infected` and `RemoveMedicine` only
//! from `Vaccinated`. Everything else is an [`EngineError::InvalidTransition`].

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;

/// Derived organ state. The discriminants are the scoring values used by
/// the strategies and are ordered worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrganState {
    Infected = 1,
    Healthy = 2,
    Vaccinated = 3,
    Immunised = 4,
}

impl OrganState {
    /// Every state, in value order.
    pub const ALL: [OrganState; 4] = [
        OrganState::Infected,
        OrganState::Healthy,
        OrganState::Vaccinated,
        OrganState::Immunised,
    ];

    /// Derive a state from attachment counts.
    ///
    /// ```
    /// use virus_engine::rules::OrganState;
    ///
    /// assert_eq!(OrganState::from_counts(0, 0).unwrap(), OrganState::Healthy);
    /// assert_eq!(OrganState::from_counts(0, 2).unwrap(), OrganState::Immunised);
    /// assert!(OrganState::from_counts(1, 1).is_err());
    /// ```
    pub fn from_counts(viruses: usize, medicines: usize) -> Result<Self, EngineError> {
        match (viruses, medicines) {
            (0, 0) => Ok(OrganState::Healthy),
            (v, 0) if v >= 1 => Ok(OrganState::Infected),
            (0, 1) => Ok(OrganState::Vaccinated),
            (0, 2) => Ok(OrganState::Immunised),
            _ => Err(EngineError::InvalidOrganState { viruses, medicines }),
        }
    }

    /// Numeric score of the state (1..=4).
    #[must_use]
    pub const fn value(self) -> i32 {
        self as i32
    }

    /// Position in `OrganState::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize - 1
    }
}

impl std::fmt::Display for OrganState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrganState::Infected => "Infected",
            OrganState::Healthy => "Healthy",
            OrganState::Vaccinated => "Vaccinated",
            OrganState::Immunised => "Immunised",
        };
        f.write_str(name)
    }
}

/// Something that happens to an organ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganEvent {
    ApplyVirus,
    ApplyMedicine,
    RemoveVirus,
    RemoveMedicine,
}

/// One step an organ performs while taking a transition.
///
/// Effects run in table order; the discard pile order depends on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganEffect {
    /// Attach the incoming card; a wild organ adopts its color.
    AttachIncoming,
    /// Send the incoming card to the discard pile.
    DiscardIncoming,
    /// Send every attached virus to the discard pile.
    DiscardViruses,
    /// Send every attached medicine to the discard pile.
    DiscardMedicines,
    /// Hand the last attached virus back to the caller.
    DetachVirus,
    /// Hand the last attached medicine back to the caller.
    DetachMedicine,
    /// A wild organ goes back to being wild.
    ResetWildColor,
    /// The organ leaves the body and its card is discarded.
    DestroyOrgan,
}

/// Result of a table lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State after the effects ran; `None` when the organ is destroyed.
    pub next: Option<OrganState>,
    pub effects: &'static [OrganEffect],
}

impl Transition {
    /// Does this transition remove the organ from play?
    #[must_use]
    pub fn destroys(&self) -> bool {
        self.next.is_none()
    }
}

/// Look up the transition for `event` in `state`.
pub fn transition(state: OrganState, event: OrganEvent) -> Result<Transition, EngineError> {
    use OrganEffect::*;
    use OrganEvent::*;
    use OrganState::*;

    let (next, effects): (Option<OrganState>, &'static [OrganEffect]) = match (state, event) {
        (Healthy, ApplyVirus) => (Some(Infected), &[AttachIncoming]),
        (Healthy, ApplyMedicine) => (Some(Vaccinated), &[AttachIncoming]),
        (Infected, ApplyVirus) => (
            None,
            &[DiscardViruses, DiscardMedicines, DiscardIncoming, ResetWildColor, DestroyOrgan],
        ),
        (Infected, ApplyMedicine) => (Some(Healthy), &[DiscardViruses, DiscardIncoming, ResetWildColor]),
        (Infected, RemoveVirus) => (Some(Healthy), &[DetachVirus, ResetWildColor]),
        (Vaccinated, ApplyVirus) => (Some(Healthy), &[DiscardMedicines, DiscardIncoming, ResetWildColor]),
        (Vaccinated, ApplyMedicine) => (Some(Immunised), &[AttachIncoming]),
        (Vaccinated, RemoveMedicine) => (Some(Healthy), &[DetachMedicine, ResetWildColor]),
        (state, event) => return Err(EngineError::InvalidTransition { state, event }),
    };

    Ok(Transition { next, effects })
}
