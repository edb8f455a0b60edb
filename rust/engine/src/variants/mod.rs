//! Per-variant game rules.
//!
//! Each poker variant implements [`Variant`] once: metadata for the
//! service layer, the phase transition function, the dealing
//! configuration per phase, and the wild rule it composes. The shared
//! orchestrator in [`crate::game`] drives any `Variant` through a hand.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::evaluate_visible;
use crate::phase::{HandState, Phase};
use crate::wild::WildRule;

mod draw;
mod follow_queen;
mod kings_and_lows;
mod stud;

pub use draw::FiveCardDraw;
pub use follow_queen::FollowTheQueenStud;
pub use kings_and_lows::KingsAndLows;
pub use stud::SevenCardStud;

/// Stable identifiers for variant selection.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum VariantId {
    SevenCardStud,
    SevenCardStudHiLo,
    FollowTheQueen,
    FiveCardDraw,
    KingsAndLows,
}

/// How a variant seeds its betting: stud-style ante plus bring-in, or
/// positional blinds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum BettingKind {
    AnteBringIn {
        ante: u64,
        bring_in: u64,
        small_bet: u64,
        big_bet: u64,
    },
    Blinds {
        small_blind: u64,
        big_blind: u64,
    },
}

/// Display-facing variant metadata for the service layer. Kept consistent
/// with the orchestrator's actual behavior by being derived from the same
/// `Variant` implementation.
#[derive(Debug, Clone, Serialize)]
pub struct VariantMeta {
    pub id: VariantId,
    pub name: &'static str,
    pub min_players: usize,
    pub max_players: usize,
    /// Face-down cards a player ends the hand with.
    pub down_cards: usize,
    /// Face-up cards a player ends the hand with.
    pub up_cards: usize,
    pub has_draw: bool,
    pub wild_summary: Option<&'static str>,
    pub betting: BettingKind,
}

/// Cards dealt to each live seat on entry to a phase.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct DealConfig {
    pub down: usize,
    pub up: usize,
}

/// Whether showdown awards high only or splits high/low.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ShowdownMode {
    HighOnly,
    HiLoSplit,
}

/// One poker variant's rules. Implemented once per game and selected by
/// [`VariantId`]; the orchestrator composes the wild policy instead of a
/// variant overriding evaluation itself.
pub trait Variant: fmt::Debug {
    fn meta(&self) -> VariantMeta;

    fn initial_phase(&self) -> Phase;

    /// The next phase after `current`, given the hand state. Deterministic;
    /// the orchestrator applies the fold-win short circuit before calling.
    fn next_phase(&self, state: &HandState, current: Phase) -> Phase;

    /// Cards dealt per live seat when the phase begins.
    fn deal_for(&self, phase: Phase) -> DealConfig;

    fn wild_rule(&self) -> Option<&dyn WildRule>;

    fn showdown_mode(&self) -> ShowdownMode {
        ShowdownMode::HighOnly
    }

    /// The fixed bet size in force for a betting phase.
    fn bet_size(&self, phase: Phase) -> u64;

    /// Validates a draw-phase discard selection against the variant's
    /// table rules. Variants without a draw phase reject everything.
    fn validate_discards(&self, cards: &[Card], discards: &[usize]) -> Result<(), GameError> {
        let _ = (cards, discards);
        Err(GameError::InvalidDiscard {
            reason: "this variant has no draw phase",
        })
    }

    /// Whether stayers who show down and lose must match the pot into the
    /// next hand's carryover.
    fn losers_match_pot(&self) -> bool {
        false
    }
}

/// Builds a variant with its table stakes.
pub fn variant_for(id: VariantId, betting: BettingKind) -> Box<dyn Variant> {
    match id {
        VariantId::SevenCardStud => Box::new(SevenCardStud::high(betting)),
        VariantId::SevenCardStudHiLo => Box::new(SevenCardStud::hi_lo(betting)),
        VariantId::FollowTheQueen => Box::new(FollowTheQueenStud::new(betting)),
        VariantId::FiveCardDraw => Box::new(FiveCardDraw::new(betting)),
        VariantId::KingsAndLows => Box::new(KingsAndLows::new(betting)),
    }
}

/// The seat forced to bring in the first stud street: lowest exposed
/// card, rank first, ties broken by suit (Clubs < Diamonds < Hearts <
/// Spades).
pub fn bring_in_seat(state: &HandState) -> usize {
    state
        .players
        .iter()
        .filter(|p| p.in_hand() && !p.up_cards.is_empty())
        .min_by_key(|p| {
            let c: &Card = &p.up_cards[0];
            (c.rank.value(), c.suit)
        })
        .map(|p| p.seat)
        .expect("bring-in needs at least one exposed card")
}

/// First to act on later stud streets: the best *visible* partial hand,
/// read by rank frequency and kickers only. Ties go to the seat closest
/// to the dealer's left.
pub fn best_visible_seat(state: &HandState) -> usize {
    let mut best: Option<(usize, (crate::hand::HandCategory, [u8; 5]))> = None;
    for seat in state.seats_from_dealer() {
        let p = &state.players[seat];
        if !p.in_hand() || p.up_cards.is_empty() {
            continue;
        }
        let v = evaluate_visible(&p.up_cards);
        if best.as_ref().map_or(true, |(_, b)| v > *b) {
            best = Some((seat, v));
        }
    }
    best.expect("visible comparison needs at least one exposed hand").0
}
