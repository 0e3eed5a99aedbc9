//! Heuristic play rules shared by the rule-based and lookahead strategies.
//!
//! Each [`Rule`] looks at the hand and the table and either proposes one
//! card play (`Candidate`) or declines. Ties between equally good targets
//! are broken by stable sorts over the listed keys, so the same state
//! always yields the same candidate.
//!
//! | Rule         | Prefers                                                        |
//! |--------------|----------------------------------------------------------------|
//! | WinningMove  | any play that reaches the organ count this turn                |
//! | MedicalError | swapping with the seat whose organs score highest, if not us   |
//! | Organ        | first playable organ                                           |
//! | OrganThief   | biggest body, most medicines, fewest viruses                   |
//! | Transplant   | biggest body, best organ taken, largest state gain             |
//! | Medicine     | organ with most medicines, then most viruses                   |
//! | Contagion    | biggest body, most medicines, most viruses; one virus each     |
//! | Virus        | biggest body, most medicines, most viruses                     |
//! | LatexGlove   | always, when held                                              |

use std::cmp::Reverse;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind, Treatment};
use crate::core::action::{Move, Moves};
use crate::core::entity::CardId;
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, Player};
use crate::rules::resolution::{can_steal, can_transplant, transmissible_virus};
use crate::rules::OrganState;

/// A proposed card play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub hand_index: usize,
    pub card: Card,
    pub moves: Moves,
}

impl Candidate {
    fn single(hand_index: usize, card: Card, mv: Move) -> Self {
        let mut moves = Moves::new();
        moves.push(mv);
        Self { hand_index, card, moves }
    }
}

/// One heuristic play rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    WinningMove,
    MedicalError,
    Organ,
    OrganThief,
    Transplant,
    Medicine,
    Contagion,
    Virus,
    LatexGlove,
}

impl Rule {
    /// Order used by the rule-based strategy.
    pub const RULE_BASED_ORDER: [Rule; 9] = [
        Rule::WinningMove,
        Rule::MedicalError,
        Rule::Organ,
        Rule::OrganThief,
        Rule::Transplant,
        Rule::Medicine,
        Rule::Contagion,
        Rule::Virus,
        Rule::LatexGlove,
    ];

    /// Order used by the lookahead strategy. Winning plays are found by
    /// scoring, so `WinningMove` is left out.
    pub const LOOKAHEAD_ORDER: [Rule; 8] = [
        Rule::MedicalError,
        Rule::Organ,
        Rule::OrganThief,
        Rule::Transplant,
        Rule::Medicine,
        Rule::Contagion,
        Rule::Virus,
        Rule::LatexGlove,
    ];

    /// Propose a play for `me`, or `None` if the rule does not apply.
    pub fn apply(self, state: &GameState, me: PlayerId) -> Result<Option<Candidate>, EngineError> {
        match self {
            Rule::WinningMove => winning_move(state, me),
            Rule::MedicalError => medical_error(state, me),
            Rule::Organ => organ(state, me),
            Rule::OrganThief => organ_thief(state, me),
            Rule::Transplant => transplant(state, me),
            Rule::Medicine => medicine(state, me),
            Rule::Contagion => contagion(state, me),
            Rule::Virus => virus(state, me),
            Rule::LatexGlove => latex_glove(state, me),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Hand cards `me` could legally play, with their indices.
fn playable<'a>(state: &'a GameState, player: &'a Player, me: PlayerId) -> impl Iterator<Item = (usize, Card)> + 'a {
    player
        .hand()
        .iter()
        .copied()
        .enumerate()
        .filter(move |(_, card)| card.can_be_played(state, me))
}

/// First playable copy of `treatment`.
fn playable_treatment(state: &GameState, player: &Player, me: PlayerId, treatment: Treatment) -> Option<(usize, Card)> {
    let index = player.treatment_index(treatment)?;
    let card = player.hand()[index];
    card.can_be_played(state, me).then_some((index, card))
}

fn winning_move(state: &GameState, me: PlayerId) -> Result<Option<Candidate>, EngineError> {
    let player = state.player(me)?;
    let target = state.config.organs_to_win;
    let healthy = player.healthy_organ_count();
    let one_short = healthy + 1 >= target;

    for (index, card) in playable(state, player, me) {
        let found = match card.kind {
            CardKind::Organ(_) if one_short => Some(Candidate::single(index, card, Move::untargeted())),
            CardKind::Medicine(color) if one_short => player
                .body()
                .find(|o| o.is_infected() && player.can_receive(o.id(), color))
                .map(|o| Candidate::single(index, card, Move::on_own(o.id()))),
            CardKind::Treatment(Treatment::OrganThief) if one_short => {
                let mut found = None;
                'thief: for opp in state.opponents(me) {
                    for theirs in state.player(opp)?.body() {
                        if !theirs.is_infected() && can_steal(player, theirs) {
                            found = Some(Candidate::single(index, card, Move::against(opp, theirs.id())));
                            break 'thief;
                        }
                    }
                }
                found
            }
            CardKind::Treatment(Treatment::Transplant) if one_short => {
                let mut own_organs: Vec<_> = player.body().collect();
                own_organs.sort_by_key(|o| Reverse(o.viruses().len()));

                let mut found = None;
                'transplant: for opp in state.opponents(me) {
                    let opponent = state.player(opp)?;
                    for theirs in opponent.body() {
                        if theirs.is_infected() {
                            continue;
                        }
                        for own in &own_organs {
                            if own.is_infected() && can_transplant(player, own, opponent, theirs) {
                                let mv = Move::exchange(opp, own.id(), theirs.id());
                                found = Some(Candidate::single(index, card, mv));
                                break 'transplant;
                            }
                        }
                    }
                }
                found
            }
            CardKind::Treatment(Treatment::Contagion) if player.body_len() >= target => {
                let mut moves = Moves::new();
                let mut used_targets = FxHashSet::default();
                for own in player.body() {
                    let Some(color) = transmissible_virus(own) else {
                        continue;
                    };
                    'target: for opp in state.opponents(me) {
                        let opponent = state.player(opp)?;
                        for theirs in opponent.body() {
                            if !used_targets.contains(&theirs.id()) && opponent.can_receive(theirs.id(), color) {
                                used_targets.insert(theirs.id());
                                moves.push(Move::exchange(opp, own.id(), theirs.id()));
                                break 'target;
                            }
                        }
                    }
                }
                (!moves.is_empty() && healthy + moves.len() >= target).then(|| Candidate { hand_index: index, card, moves })
            }
            _ => None,
        };

        if found.is_some() {
            return Ok(found);
        }
    }

    Ok(None)
}

fn medical_error(state: &GameState, me: PlayerId) -> Result<Option<Candidate>, EngineError> {
    let player = state.player(me)?;
    let Some((index, card)) = playable_treatment(state, player, me, Treatment::MedicalError) else {
        return Ok(None);
    };

    let mut best_total = player.state_total()?;
    let mut best = None;
    for opp in state.opponents(me) {
        let total = state.player(opp)?.state_total()?;
        if total > best_total {
            best_total = total;
            best = Some(opp);
        }
    }

    Ok(best.map(|opp| Candidate::single(index, card, Move::with_opponent(opp))))
}

fn organ(state: &GameState, me: PlayerId) -> Result<Option<Candidate>, EngineError> {
    let player = state.player(me)?;
    Ok(playable(state, player, me)
        .find(|(_, card)| matches!(card.kind, CardKind::Organ(_)))
        .map(|(index, card)| Candidate::single(index, card, Move::untargeted())))
}

fn organ_thief(state: &GameState, me: PlayerId) -> Result<Option<Candidate>, EngineError> {
    let player = state.player(me)?;
    let Some((index, card)) = playable_treatment(state, player, me, Treatment::OrganThief) else {
        return Ok(None);
    };

    let mut choices = Vec::new();
    for opp in state.opponents(me) {
        let opponent = state.player(opp)?;
        for theirs in opponent.body() {
            if can_steal(player, theirs) {
                let key = (Reverse(opponent.body_len()), Reverse(theirs.medicines().len()), theirs.viruses().len());
                choices.push((key, opp, theirs.id()));
            }
        }
    }
    choices.sort_by_key(|(key, _, _)| *key);

    Ok(choices
        .first()
        .map(|&(_, opp, organ)| Candidate::single(index, card, Move::against(opp, organ))))
}

fn transplant(state: &GameState, me: PlayerId) -> Result<Option<Candidate>, EngineError> {
    let player = state.player(me)?;
    let Some((index, card)) = playable_treatment(state, player, me, Treatment::Transplant) else {
        return Ok(None);
    };

    let mut choices = Vec::new();
    for opp in state.opponents(me) {
        let opponent = state.player(opp)?;
        for theirs in opponent.body() {
            let their_state = theirs.state()?;
            if their_state == OrganState::Immunised {
                continue;
            }
            for own in player.body() {
                let own_state = own.state()?;
                if own_state <= their_state && can_transplant(player, own, opponent, theirs) {
                    let key = (
                        Reverse(opponent.body_len()),
                        Reverse(their_state.value()),
                        own_state.value() - their_state.value(),
                    );
                    choices.push((key, Move::exchange(opp, own.id(), theirs.id())));
                }
            }
        }
    }
    choices.sort_by_key(|(key, _)| *key);

    Ok(choices.first().map(|&(_, mv)| Candidate::single(index, card, mv)))
}

fn medicine(state: &GameState, me: PlayerId) -> Result<Option<Candidate>, EngineError> {
    let player = state.player(me)?;
    let medicines: Vec<(usize, Card)> = playable(state, player, me)
        .filter(|(_, card)| matches!(card.kind, CardKind::Medicine(_)))
        .collect();

    let mut choices = Vec::new();
    for own in player.body() {
        for &(index, card) in &medicines {
            let Some(color) = card.color() else {
                continue;
            };
            if player.can_receive(own.id(), color) {
                let key = Reverse((own.medicines().len(), own.viruses().len()));
                choices.push((key, index, card, own.id()));
            }
        }
    }
    choices.sort_by_key(|(key, _, _, _)| *key);

    Ok(choices
        .first()
        .map(|&(_, index, card, organ)| Candidate::single(index, card, Move::on_own(organ))))
}

fn contagion(state: &GameState, me: PlayerId) -> Result<Option<Candidate>, EngineError> {
    let player = state.player(me)?;
    let Some((index, card)) = playable_treatment(state, player, me, Treatment::Contagion) else {
        return Ok(None);
    };

    let mut choices = Vec::new();
    for own in player.body() {
        let Some(color) = transmissible_virus(own) else {
            continue;
        };
        for opp in state.opponents(me) {
            let opponent = state.player(opp)?;
            for theirs in opponent.body() {
                if opponent.can_receive(theirs.id(), color) {
                    let key = Reverse((opponent.body_len(), theirs.medicines().len(), theirs.viruses().len()));
                    choices.push((key, own.id(), opp, theirs.id()));
                }
            }
        }
    }
    choices.sort_by_key(|(key, _, _, _)| *key);

    // Each target takes at most as many viruses as it needs to be destroyed.
    let mut capacity: FxHashMap<CardId, i32> = FxHashMap::default();
    for &(_, _, opp, target) in &choices {
        if let Some(organ) = state.player(opp)?.organ(target) {
            capacity.insert(target, organ.state()?.value());
        }
    }

    let mut used_sources = FxHashSet::default();
    let mut moves = Moves::new();
    for &(_, source, opp, target) in &choices {
        if used_sources.contains(&source) {
            continue;
        }
        let Some(left) = capacity.get_mut(&target) else {
            continue;
        };
        if *left <= 0 {
            continue;
        }
        *left -= 1;
        used_sources.insert(source);
        moves.push(Move::exchange(opp, source, target));
    }

    Ok((!moves.is_empty()).then(|| Candidate { hand_index: index, card, moves }))
}

fn virus(state: &GameState, me: PlayerId) -> Result<Option<Candidate>, EngineError> {
    let player = state.player(me)?;
    let viruses: Vec<(usize, Card)> = playable(state, player, me)
        .filter(|(_, card)| matches!(card.kind, CardKind::Virus(_)))
        .collect();

    let mut choices = Vec::new();
    for &(index, card) in &viruses {
        let Some(color) = card.color() else {
            continue;
        };
        for opp in state.opponents(me) {
            let opponent = state.player(opp)?;
            for theirs in opponent.body() {
                if opponent.can_receive(theirs.id(), color) {
                    let key = Reverse((opponent.body_len(), theirs.medicines().len(), theirs.viruses().len()));
                    choices.push((key, index, card, Move::against(opp, theirs.id())));
                }
            }
        }
    }
    choices.sort_by_key(|(key, _, _, _)| *key);

    Ok(choices
        .first()
        .map(|&(_, index, card, mv)| Candidate::single(index, card, mv)))
}

fn latex_glove(state: &GameState, me: PlayerId) -> Result<Option<Candidate>, EngineError> {
    let player = state.player(me)?;
    Ok(playable_treatment(state, player, me, Treatment::LatexGlove)
        .map(|(index, card)| Candidate::single(index, card, Move::untargeted())))
}

/// Cards a strategy throws away when no rule applies.
///
/// Every organ, medicine, virus, contagion or transplant with no legal use.
/// If all of those are usable, a latex glove, else an organ thief. A
/// medical error is never discarded.
pub fn discard_indices(state: &GameState, me: PlayerId) -> Result<Vec<usize>, EngineError> {
    let player = state.player(me)?;

    let indices: Vec<usize> = player
        .hand()
        .iter()
        .enumerate()
        .filter(|(_, card)| {
            let discardable = match card.kind {
                CardKind::Organ(_) | CardKind::Medicine(_) | CardKind::Virus(_) => true,
                CardKind::Treatment(t) => matches!(t, Treatment::Contagion | Treatment::Transplant),
            };
            discardable && !card.can_be_played(state, me)
        })
        .map(|(i, _)| i)
        .collect();

    if !indices.is_empty() {
        return Ok(indices);
    }

    Ok(player
        .treatment_index(Treatment::LatexGlove)
        .or_else(|| player.treatment_index(Treatment::OrganThief))
        .into_iter()
        .collect())
}
