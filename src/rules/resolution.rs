//! Card resolution: legality, target selection and effects.
//!
//! Every card answers three questions:
//!
//! - [`Card::can_be_played`]: is there any legal use for it right now?
//! - [`Card::prepare_moves`]: which targets does the owner pick?
//! - [`Card::play`]: apply one move; `Ok(false)` when it does nothing.
//!
//! [`resolve_play`] ties them together for a card in hand: it plays every
//! move, takes the card out of the hand if anything happened, and discards
//! treatments. A play where nothing happened leaves the hand untouched.
//!
//! `Err` is reserved for engine faults. Pointing a move at a missing or
//! immunised organ is an ordinary failed play.

use smallvec::SmallVec;
use tracing::trace;

use crate::ai::TargetChooser;
use crate::cards::{Card, CardKind, Color, Organ, OrganChange, OrganOutcome, Treatment};
use crate::core::action::{Move, Moves};
use crate::core::entity::CardId;
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, Player};

/// Can `owner` take `organ` without breaking the one-color-per-body rule?
#[must_use]
pub fn can_steal(owner: &Player, organ: &Organ) -> bool {
    !organ.is_immunised() && !owner.has_color(organ.color())
}

/// Can `own` (in `owner`'s body) trade places with `theirs` (in
/// `opponent`'s body)?
#[must_use]
pub fn can_transplant(owner: &Player, own: &Organ, opponent: &Player, theirs: &Organ) -> bool {
    !own.is_immunised()
        && !theirs.is_immunised()
        && !owner.has_color_besides(theirs.color(), own.id())
        && !opponent.has_color_besides(own.color(), theirs.id())
}

/// Color of the virus an infected organ would pass on.
#[must_use]
pub fn transmissible_virus(organ: &Organ) -> Option<Color> {
    if organ.is_infected() {
        organ.viruses().last().and_then(Card::color)
    } else {
        None
    }
}

fn opponents<'a>(state: &'a GameState, owner: PlayerId) -> impl Iterator<Item = (PlayerId, &'a Player)> + 'a {
    state.players().filter(move |(id, _)| *id != owner)
}

impl Card {
    /// Is there any legal use of this card for `owner`? Pure.
    #[must_use]
    pub fn can_be_played(&self, state: &GameState, owner: PlayerId) -> bool {
        let Ok(player) = state.player(owner) else {
            return false;
        };

        match self.kind {
            CardKind::Organ(color) => !player.has_color(color),
            CardKind::Medicine(color) => player.body().any(|o| player.can_receive(o.id(), color)),
            CardKind::Virus(color) => {
                opponents(state, owner).any(|(_, opp)| opp.body().any(|o| opp.can_receive(o.id(), color)))
            }
            CardKind::Treatment(Treatment::OrganThief) => {
                opponents(state, owner).any(|(_, opp)| opp.body().any(|o| can_steal(player, o)))
            }
            CardKind::Treatment(Treatment::Transplant) => player.body().any(|own| {
                opponents(state, owner)
                    .any(|(_, opp)| opp.body().any(|theirs| can_transplant(player, own, opp, theirs)))
            }),
            CardKind::Treatment(Treatment::Contagion) => player.body().any(|own| {
                transmissible_virus(own).map_or(false, |color| {
                    opponents(state, owner).any(|(_, opp)| opp.body().any(|o| opp.can_receive(o.id(), color)))
                })
            }),
            CardKind::Treatment(Treatment::LatexGlove) => true,
            CardKind::Treatment(Treatment::MedicalError) => opponents(state, owner).any(|(_, opp)| opp.body_len() > 0),
        }
    }

    /// Pick targets for this card, asking `chooser` whenever the rules
    /// leave a choice open. An empty list means no target was found.
    pub fn prepare_moves<C: TargetChooser + ?Sized>(
        &self,
        state: &GameState,
        owner: PlayerId,
        chooser: &mut C,
    ) -> Moves {
        let mut moves = Moves::new();
        let Ok(player) = state.player(owner) else {
            return moves;
        };

        match self.kind {
            CardKind::Organ(_) | CardKind::Treatment(Treatment::LatexGlove) => {
                if self.can_be_played(state, owner) {
                    moves.push(Move::untargeted());
                }
            }
            CardKind::Medicine(color) => {
                let organ = self
                    .target_color(state, owner, owner, color, chooser)
                    .and_then(|c| player.organ_by_color(c));
                moves.extend(organ.map(|o| Move::on_own(o.id())));
            }
            CardKind::Virus(color) => {
                moves.extend(self.opponent_target(state, owner, Some(color), chooser));
            }
            CardKind::Treatment(Treatment::OrganThief) => {
                moves.extend(self.opponent_target(state, owner, None, chooser));
            }
            CardKind::Treatment(Treatment::Transplant) => {
                let swap = chooser.decide_opponent(state, owner, self).and_then(|opp| {
                    let own_color = chooser.decide_organ_color(state, owner, self, owner)?;
                    let their_color = chooser.decide_organ_color(state, owner, self, opp)?;
                    let own = player.organ_by_color(own_color)?;
                    let theirs = state.player(opp).ok()?.organ_by_color(their_color)?;
                    Some(Move::exchange(opp, own.id(), theirs.id()))
                });
                moves.extend(swap);
            }
            CardKind::Treatment(Treatment::Contagion) => {
                for own in player.body() {
                    let Some(color) = transmissible_virus(own) else {
                        continue;
                    };
                    let Some(opp) = chooser.decide_opponent(state, owner, self) else {
                        continue;
                    };
                    let target = self
                        .target_color(state, owner, opp, color, chooser)
                        .and_then(|c| state.player(opp).ok()?.organ_by_color(c));
                    moves.extend(target.map(|t| Move::exchange(opp, own.id(), t.id())));
                }
            }
            CardKind::Treatment(Treatment::MedicalError) => {
                moves.extend(chooser.decide_opponent(state, owner, self).map(Move::with_opponent));
            }
        }

        moves
    }

    /// Which organ color in `body_owner`'s body a colored card aims at.
    ///
    /// A colored card goes to the organ of its color unless the card or
    /// the body has a wild, in which case the chooser decides.
    fn target_color<C: TargetChooser + ?Sized>(
        &self,
        state: &GameState,
        owner: PlayerId,
        body_owner: PlayerId,
        color: Color,
        chooser: &mut C,
    ) -> Option<Color> {
        let body_has_wild = state.player(body_owner).map_or(false, |p| p.has_color(Color::Wild));
        if color.is_wild() || body_has_wild {
            chooser.decide_organ_color(state, owner, self, body_owner)
        } else {
            Some(color)
        }
    }

    fn opponent_target<C: TargetChooser + ?Sized>(
        &self,
        state: &GameState,
        owner: PlayerId,
        card_color: Option<Color>,
        chooser: &mut C,
    ) -> Option<Move> {
        let opp = chooser.decide_opponent(state, owner, self)?;
        let color = match card_color {
            Some(color) => self.target_color(state, owner, opp, color, chooser)?,
            None => chooser.decide_organ_color(state, owner, self, opp)?,
        };
        let organ = state.player(opp).ok()?.organ_by_color(color)?;
        Some(Move::against(opp, organ.id()))
    }

    /// Apply one move. `Ok(false)` means the move had no legal effect and
    /// nothing changed.
    pub fn play(&self, state: &mut GameState, owner: PlayerId, mv: &Move) -> Result<bool, EngineError> {
        match self.kind {
            CardKind::Organ(color) => {
                let player = state.player_mut(owner)?;
                if player.has_color(color) {
                    return Ok(false);
                }
                match Organ::from_card(*self) {
                    Some(organ) => {
                        player.add_organ_to_body(organ);
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            CardKind::Medicine(color) => {
                let Some(target) = mv.player_organ else {
                    return Ok(false);
                };
                if !state.player(owner)?.can_receive(target, color) {
                    return Ok(false);
                }
                let change = organ_mut(state, owner, target)?.apply_medicine(*self)?;
                settle(state, owner, target, change)?;
                Ok(true)
            }
            CardKind::Virus(color) => {
                let (Some(opp), Some(target)) = (mv.opponent, mv.opponent_organ) else {
                    return Ok(false);
                };
                if opp == owner || !state.player(opp)?.can_receive(target, color) {
                    return Ok(false);
                }
                let change = organ_mut(state, opp, target)?.apply_virus(*self)?;
                settle(state, opp, target, change)?;
                Ok(true)
            }
            CardKind::Treatment(Treatment::OrganThief) => {
                let (Some(opp), Some(target)) = (mv.opponent, mv.opponent_organ) else {
                    return Ok(false);
                };
                if opp == owner {
                    return Ok(false);
                }
                let stealable = match state.player(opp)?.organ(target) {
                    Some(organ) => can_steal(state.player(owner)?, organ),
                    None => false,
                };
                if !stealable {
                    return Ok(false);
                }
                let organ = take_organ(state, opp, target)?;
                state.player_mut(owner)?.add_organ_to_body(organ);
                Ok(true)
            }
            CardKind::Treatment(Treatment::Transplant) => {
                let (Some(opp), Some(own), Some(theirs)) = (mv.opponent, mv.player_organ, mv.opponent_organ) else {
                    return Ok(false);
                };
                if opp == owner {
                    return Ok(false);
                }
                let (player, opponent) = (state.player(owner)?, state.player(opp)?);
                let legal = match (player.organ(own), opponent.organ(theirs)) {
                    (Some(a), Some(b)) => can_transplant(player, a, opponent, b),
                    _ => false,
                };
                if !legal {
                    return Ok(false);
                }
                let mine = take_organ(state, owner, own)?;
                let other = take_organ(state, opp, theirs)?;
                state.player_mut(owner)?.add_organ_to_body(other);
                state.player_mut(opp)?.add_organ_to_body(mine);
                Ok(true)
            }
            CardKind::Treatment(Treatment::Contagion) => {
                let (Some(opp), Some(own), Some(target)) = (mv.opponent, mv.player_organ, mv.opponent_organ) else {
                    return Ok(false);
                };
                if opp == owner {
                    return Ok(false);
                }
                let Some(color) = state.player(owner)?.organ(own).and_then(transmissible_virus) else {
                    return Ok(false);
                };
                if !state.player(opp)?.can_receive(target, color) {
                    return Ok(false);
                }
                let virus = organ_mut(state, owner, own)?.remove_virus()?;
                let change = organ_mut(state, opp, target)?.apply_virus(virus)?;
                settle(state, opp, target, change)?;
                Ok(true)
            }
            CardKind::Treatment(Treatment::LatexGlove) => {
                let victims: SmallVec<[PlayerId; 6]> = state.opponents(owner).collect();
                for victim in victims {
                    let hand = state.player_mut(victim)?.take_hand();
                    state.deck.discard_all(hand);
                }
                Ok(true)
            }
            CardKind::Treatment(Treatment::MedicalError) => {
                let Some(opp) = mv.opponent else {
                    return Ok(false);
                };
                if opp == owner {
                    return Ok(false);
                }
                state.swap_bodies(owner, opp)?;
                Ok(true)
            }
        }
    }
}

fn organ_mut(state: &mut GameState, player: PlayerId, organ: CardId) -> Result<&mut Organ, EngineError> {
    state
        .player_mut(player)?
        .organ_mut(organ)
        .ok_or(EngineError::UnknownOrgan { player, organ })
}

fn take_organ(state: &mut GameState, player: PlayerId, organ: CardId) -> Result<Organ, EngineError> {
    state
        .player_mut(player)?
        .remove_organ_from_body(organ)
        .ok_or(EngineError::UnknownOrgan { player, organ })
}

/// Move released cards to the discard pile and drop a destroyed organ.
fn settle(state: &mut GameState, player: PlayerId, organ: CardId, change: OrganChange) -> Result<(), EngineError> {
    state.deck.discard_all(change.discarded);
    if change.outcome == OrganOutcome::Destroyed {
        let destroyed = take_organ(state, player, organ)?;
        trace!(player = %player, organ = %destroyed.card(), "organ destroyed");
        state.deck.discard(destroyed.card());
    }
    Ok(())
}

/// Play the card at `hand_index` with `moves`.
///
/// Only a contagion uses more than one move; every other card plays the
/// first move. Returns whether anything happened. On success the card
/// leaves the hand, and a treatment goes to the discard pile.
pub fn resolve_play(
    state: &mut GameState,
    owner: PlayerId,
    hand_index: usize,
    moves: &[Move],
) -> Result<bool, EngineError> {
    let card = state.player(owner)?.hand_card(hand_index)?;

    let succeeded = if card.is_treatment(Treatment::Contagion) {
        let mut any = false;
        for mv in moves {
            any |= card.play(state, owner, mv)?;
        }
        any
    } else {
        match moves.first() {
            Some(mv) => card.play(state, owner, mv)?,
            None => false,
        }
    };

    if succeeded {
        state.player_mut(owner)?.remove_hand_card(hand_index)?;
        if card.treatment().is_some() {
            state.deck.discard(card);
        }
    }

    Ok(succeeded)
}
