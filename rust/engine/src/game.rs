//! Hand orchestration.
//!
//! [`Game`] drives one table through hands of a chosen variant: it deals
//! per the variant's configuration, runs betting rounds, declaration and
//! draw phases, and resolves showdowns through the wild-card evaluator
//! and the pot manager. All methods are synchronous and locally mutating;
//! the caller serializes access per game.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::betting::{AvailableActions, BettingRound, RoundStatus};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::evaluator::{best_low, evaluate_hand};
use crate::hand::HandValue;
use crate::phase::{HandState, Phase};
use crate::player::Action;
use crate::variants::{best_visible_seat, bring_in_seat, BettingKind, ShowdownMode, Variant};

/// One revealed hand at showdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowdownHand {
    pub seat: usize,
    pub value: HandValue,
    /// Qualifying low ranks, when the variant splits hi/lo.
    pub low: Option<[u8; 5]>,
}

/// The resolution of a completed hand: who got paid what, the hands shown,
/// and any pot left on the table for the next hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandOutcome {
    pub payouts: BTreeMap<usize, u64>,
    pub revealed: Vec<ShowdownHand>,
    /// Chips not awarded this hand (all seats dropped, or a lone stayer
    /// lost to the deck, plus any pot-matching penalties). The caller
    /// seeds the next pot with them.
    pub carryover: u64,
    /// The deck's hand, when a lone stayer played against it.
    pub deck_hand: Option<HandValue>,
}

/// A player action as the orchestrator recorded it, for hand histories.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum RecordedAction {
    Bet { seat: usize, phase: Phase, action: Action },
    Declare { seat: usize, stay: bool },
    Draw { seat: usize, discarded: usize },
}

/// A table playing one poker variant.
pub struct Game {
    variant: Box<dyn Variant>,
    deck: Deck,
    state: HandState,
    phase: Phase,
    round: Option<BettingRound>,
    /// Seats owing a declaration, front first.
    pending_declarations: Vec<usize>,
    /// Seats owing a draw decision, front first.
    pending_draws: Vec<usize>,
    actions: Vec<RecordedAction>,
    outcome: Option<HandOutcome>,
}

impl Game {
    /// A new table. `stacks` fixes the seat count for the game's life;
    /// the count must fit the variant's player range.
    pub fn new(
        variant: Box<dyn Variant>,
        stacks: &[u64],
        dealer: usize,
        seed: u64,
    ) -> Result<Self, GameError> {
        let meta = variant.meta();
        if stacks.len() < meta.min_players || stacks.len() > meta.max_players {
            return Err(GameError::WrongPlayerCount {
                min: meta.min_players,
                max: meta.max_players,
                actual: stacks.len(),
            });
        }
        Ok(Self {
            variant,
            deck: Deck::new_with_seed(seed),
            state: HandState::new(stacks, dealer),
            phase: Phase::Complete,
            round: None,
            pending_declarations: Vec::new(),
            pending_draws: Vec::new(),
            actions: Vec::new(),
            outcome: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &HandState {
        &self.state
    }

    pub fn outcome(&self) -> Option<&HandOutcome> {
        self.outcome.as_ref()
    }

    pub fn action_log(&self) -> &[RecordedAction] {
        &self.actions
    }

    /// The seat the hand is waiting on, if any.
    pub fn next_actor(&self) -> Option<usize> {
        match self.phase {
            Phase::DropOrStay => self.pending_declarations.first().copied(),
            Phase::Draw => self.pending_draws.first().copied(),
            p if p.is_betting() => self.round.as_ref().and_then(|r| r.next_to_act()),
            _ => None,
        }
    }

    /// Shuffles, collects forced money, deals the first street, and opens
    /// the first betting round.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Complete {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        self.state.reset_for_hand();
        self.actions.clear();
        self.outcome = None;
        self.deck.shuffle();

        if let BettingKind::AnteBringIn { ante, .. } = self.variant.meta().betting {
            if ante > 0 {
                for seat in self.state.seats_from_dealer() {
                    let p = &mut self.state.players[seat];
                    let paid = p.commit(ante);
                    self.state.pot.add_contribution(seat, paid);
                    // Antes buy the pot, not the betting round.
                    self.state.players[seat].end_street();
                }
            }
        }
        self.enter(self.variant.initial_phase())
    }

    /// The action menu for a seat in the current betting round.
    pub fn available_actions(&self, seat: usize) -> Result<AvailableActions, GameError> {
        match &self.round {
            Some(r) if self.phase.is_betting() => r.available_actions(&self.state.players, seat),
            _ => Err(GameError::WrongPhase { phase: self.phase }),
        }
    }

    /// Processes a betting action; when the round completes, streets
    /// advance (dealing as they go) until the hand needs another decision
    /// or resolves.
    pub fn act(&mut self, seat: usize, action: Action) -> Result<RoundStatus, GameError> {
        if !self.phase.is_betting() {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        let round = self.round.as_mut().ok_or(GameError::NoHandInProgress)?;
        let status = round.act(&mut self.state.players, &mut self.state.pot, seat, action)?;
        self.actions.push(RecordedAction::Bet {
            seat,
            phase: self.phase,
            action,
        });
        if status == RoundStatus::Complete {
            self.finish_street()?;
        }
        Ok(status)
    }

    /// Records a drop-or-stay declaration for the next seat in turn.
    pub fn declare(&mut self, seat: usize, stay: bool) -> Result<(), GameError> {
        if self.phase != Phase::DropOrStay {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        match self.pending_declarations.first().copied() {
            Some(expected) if expected == seat => {}
            Some(expected) => {
                return Err(GameError::NotPlayersTurn {
                    expected,
                    actual: seat,
                })
            }
            None => return Err(GameError::NoHandInProgress),
        }
        self.pending_declarations.remove(0);
        if !stay {
            self.state.players[seat].folded = true;
        }
        self.actions.push(RecordedAction::Declare { seat, stay });
        if self.pending_declarations.is_empty() {
            let next = self.variant.next_phase(&self.state, self.phase);
            self.enter(next)?;
        }
        Ok(())
    }

    /// Replaces the discarded cards for the next seat owing a draw.
    /// Passing no discards stands pat.
    pub fn draw(&mut self, seat: usize, discards: &[usize]) -> Result<(), GameError> {
        if self.phase != Phase::Draw {
            return Err(GameError::WrongPhase { phase: self.phase });
        }
        match self.pending_draws.first().copied() {
            Some(expected) if expected == seat => {}
            Some(expected) => {
                return Err(GameError::NotPlayersTurn {
                    expected,
                    actual: seat,
                })
            }
            None => return Err(GameError::NoHandInProgress),
        }
        let cards = self.state.players[seat].cards();
        self.variant.validate_discards(&cards, discards)?;
        // All validation runs before any cards leave the deck; a rejected
        // draw must not shift later deals.
        self.state.players[seat].check_discard_indices(discards)?;
        if self.deck.remaining() < discards.len() {
            return Err(GameError::DeckExhausted);
        }
        let replacements = self.deck.deal_n(discards.len());
        self.state.players[seat].replace_cards(discards, &replacements)?;
        self.pending_draws.remove(0);
        self.actions.push(RecordedAction::Draw {
            seat,
            discarded: discards.len(),
        });
        if self.pending_draws.is_empty() {
            let next = self.variant.next_phase(&self.state, self.phase);
            self.enter(next)?;
        }
        Ok(())
    }

    fn finish_street(&mut self) -> Result<(), GameError> {
        for p in &mut self.state.players {
            p.end_street();
        }
        self.round = None;
        if self.state.count_in_hand() <= 1 {
            // Fold-win short circuit, regardless of street.
            return self.enter(Phase::Showdown);
        }
        let next = self.variant.next_phase(&self.state, self.phase);
        self.enter(next)
    }

    fn enter(&mut self, phase: Phase) -> Result<(), GameError> {
        self.phase = phase;
        match phase {
            Phase::ThirdStreet
            | Phase::FourthStreet
            | Phase::FifthStreet
            | Phase::SixthStreet
            | Phase::SeventhStreet
            | Phase::PreDrawBet
            | Phase::PostDrawBet => {
                self.deal_street(phase)?;
                if self.state.betting_is_moot() {
                    // Everyone committed: keep dealing streets, skip betting.
                    let next = self.variant.next_phase(&self.state, phase);
                    return self.enter(next);
                }
                self.open_betting(phase);
                Ok(())
            }
            Phase::DropOrStay => {
                self.pending_declarations = self
                    .state
                    .seats_from_dealer()
                    .into_iter()
                    .filter(|&s| self.state.players[s].in_hand())
                    .collect();
                Ok(())
            }
            Phase::Draw => {
                self.pending_draws = self
                    .state
                    .seats_from_dealer()
                    .into_iter()
                    .filter(|&s| self.state.players[s].in_hand())
                    .collect();
                if self.pending_draws.is_empty() {
                    let next = self.variant.next_phase(&self.state, phase);
                    return self.enter(next);
                }
                Ok(())
            }
            Phase::PlayerVsDeck => self.resolve_player_vs_deck(),
            Phase::Showdown => self.resolve_showdown(),
            Phase::Complete => {
                self.round = None;
                if self.outcome.is_none() {
                    // Every seat dropped: the pot rides to the next hand.
                    self.outcome = Some(HandOutcome {
                        payouts: BTreeMap::new(),
                        revealed: Vec::new(),
                        carryover: self.state.pot.total(),
                        deck_hand: None,
                    });
                }
                Ok(())
            }
        }
    }

    /// Deals the phase's cards to every live seat, one card round at a
    /// time so the face-up history reflects true table deal order.
    fn deal_street(&mut self, phase: Phase) -> Result<(), GameError> {
        let cfg = self.variant.deal_for(phase);
        let seats: Vec<usize> = self
            .state
            .seats_from_dealer()
            .into_iter()
            .filter(|&s| self.state.players[s].in_hand())
            .collect();
        for _ in 0..cfg.down {
            for &seat in &seats {
                let card = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
                self.state.players[seat].down_cards.push(card);
            }
        }
        for _ in 0..cfg.up {
            for &seat in &seats {
                let card = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
                self.state.players[seat].up_cards.push(card);
                self.state.reveal(card);
            }
        }
        Ok(())
    }

    fn open_betting(&mut self, phase: Phase) {
        let order: Vec<usize> = self
            .state
            .seats_from_dealer()
            .into_iter()
            .filter(|&s| self.state.players[s].in_hand())
            .collect();
        let mut round = BettingRound::new(order, self.variant.bet_size(phase));
        match (phase, self.variant.meta().betting) {
            (Phase::ThirdStreet, BettingKind::AnteBringIn { bring_in, .. }) if bring_in > 0 => {
                let seat = bring_in_seat(&self.state);
                round.post_forced_bet(
                    &mut self.state.players,
                    &mut self.state.pot,
                    seat,
                    bring_in,
                );
            }
            (
                Phase::PreDrawBet,
                BettingKind::Blinds {
                    small_blind,
                    big_blind,
                },
            ) => {
                let (sb, bb) = self.blind_seats();
                round.post_forced_bet(&mut self.state.players, &mut self.state.pot, sb, small_blind);
                round.post_forced_bet(&mut self.state.players, &mut self.state.pot, bb, big_blind);
            }
            (Phase::FourthStreet, _)
            | (Phase::FifthStreet, _)
            | (Phase::SixthStreet, _)
            | (Phase::SeventhStreet, _) => {
                round.set_first_to_act(best_visible_seat(&self.state));
            }
            _ => {}
        }
        self.round = Some(round);
    }

    /// Small and big blind seats: heads-up the dealer posts the small
    /// blind, otherwise the two seats left of the dealer post in order.
    fn blind_seats(&self) -> (usize, usize) {
        let n = self.state.players.len();
        if n == 2 {
            (self.state.dealer, (self.state.dealer + 1) % n)
        } else {
            ((self.state.dealer + 1) % n, (self.state.dealer + 2) % n)
        }
    }

    fn resolve_showdown(&mut self) -> Result<(), GameError> {
        let live = self.state.seats_in_hand();
        assert!(!live.is_empty(), "showdown with no live seats");

        let mut revealed = Vec::new();
        let mut strengths: BTreeMap<usize, u32> = BTreeMap::new();
        let mut lows: BTreeMap<usize, [u8; 5]> = BTreeMap::new();
        let hi_lo = self.variant.showdown_mode() == ShowdownMode::HiLoSplit;

        if live.len() > 1 {
            for &seat in &live {
                let cards = self.state.players[seat].cards();
                let value =
                    evaluate_hand(&cards, self.variant.wild_rule(), &self.state.deal_history);
                strengths.insert(seat, value.strength());
                let low = if hi_lo { best_low(&cards) } else { None };
                if let Some(l) = low {
                    lows.insert(seat, l);
                }
                revealed.push(ShowdownHand { seat, value, low });
            }
        }

        let payouts = if live.len() == 1 {
            // Fold win: no cards are shown.
            self.state
                .pot
                .award_pots(&self.state.players, |_| vec![live[0]])
        } else if hi_lo {
            self.state.pot.award_pots_hilo(&self.state.players, |eligible| {
                let high = top_by(eligible, |s| strengths[&s]);
                let low_best = eligible
                    .iter()
                    .filter_map(|s| lows.get(s).copied())
                    .min();
                let low = low_best.map(|best| {
                    eligible
                        .iter()
                        .copied()
                        .filter(|s| lows.get(s) == Some(&best))
                        .collect()
                });
                (high, low)
            })
        } else {
            self.state
                .pot
                .award_pots(&self.state.players, |eligible| {
                    top_by(eligible, |s| strengths[&s])
                })
        };

        for (&seat, &amount) in &payouts {
            self.state.players[seat].add_chips(amount);
        }

        let mut carryover = 0;
        if self.variant.losers_match_pot() && live.len() > 1 {
            carryover = self.collect_pot_matches(&live, &payouts);
        }

        self.outcome = Some(HandOutcome {
            payouts,
            revealed,
            carryover,
            deck_hand: None,
        });
        self.enter(Phase::Complete)
    }

    fn resolve_player_vs_deck(&mut self) -> Result<(), GameError> {
        let live = self.state.seats_in_hand();
        assert_eq!(live.len(), 1, "player-vs-deck needs exactly one stayer");
        let seat = live[0];

        let cards = self.state.players[seat].cards();
        let player_value =
            evaluate_hand(&cards, self.variant.wild_rule(), &self.state.deal_history);

        let mut deck_cards = Vec::with_capacity(5);
        for _ in 0..5 {
            deck_cards.push(self.deck.deal_card().ok_or(GameError::DeckExhausted)?);
        }
        let deck_value =
            evaluate_hand(&deck_cards, self.variant.wild_rule(), &self.state.deal_history);

        // The stayer needs to beat the deck; a tie stays with the player.
        let mut payouts = BTreeMap::new();
        let mut carryover = 0;
        if player_value.strength() >= deck_value.strength() {
            payouts = self
                .state
                .pot
                .award_pots(&self.state.players, |_| vec![seat]);
            for (&s, &amount) in &payouts {
                self.state.players[s].add_chips(amount);
            }
        } else {
            carryover = self.state.pot.total();
            if self.variant.losers_match_pot() {
                let penalty = self.state.pot.total().min(self.state.players[seat].stack);
                self.state.players[seat].stack -= penalty;
                carryover += penalty;
            }
        }

        self.outcome = Some(HandOutcome {
            payouts,
            revealed: vec![ShowdownHand {
                seat,
                value: player_value,
                low: None,
            }],
            carryover,
            deck_hand: Some(deck_value),
        });
        self.enter(Phase::Complete)
    }

    /// Pot-matching: every stayer who showed down and won nothing pays
    /// the pot total (capped by their stack) toward the next hand's pot.
    fn collect_pot_matches(&mut self, live: &[usize], payouts: &BTreeMap<usize, u64>) -> u64 {
        let pot_total = self.state.pot.total();
        let mut carryover = 0;
        for &seat in live {
            if payouts.get(&seat).copied().unwrap_or(0) == 0 {
                let penalty = pot_total.min(self.state.players[seat].stack);
                self.state.players[seat].stack -= penalty;
                carryover += penalty;
            }
        }
        carryover
    }
}

/// All seats achieving the maximum of `key` among `seats`.
fn top_by(seats: &[usize], key: impl Fn(usize) -> u32) -> Vec<usize> {
    let best = seats.iter().map(|&s| key(s)).max().expect("nonempty seats");
    seats.iter().copied().filter(|&s| key(s) == best).collect()
}
