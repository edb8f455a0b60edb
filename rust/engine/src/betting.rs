use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Action, PlayerState};
use crate::pot::PotManager;

/// The legal moves for one seat given the round's current bet and the
/// seat's stack, with the amounts that bound them. Raise amounts are
/// increments over the current bet.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct AvailableActions {
    pub can_check: bool,
    pub can_bet: bool,
    pub can_call: bool,
    pub can_raise: bool,
    pub can_fold: bool,
    pub can_all_in: bool,
    pub call_amount: u64,
    pub min_raise: u64,
    pub max_raise: u64,
}

/// What a processed action did to the round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Betting continues with the given seat to act.
    Continue { next_to_act: usize },
    /// Every non-folded seat has matched the bet or is all-in, and action
    /// has gone a full orbit since the last aggression.
    Complete,
}

/// One street's turn and action state machine.
///
/// The round owns turn order and bet-matching bookkeeping; chips move
/// through the [`PlayerState`]s and the [`PotManager`] passed into each
/// call, which the enclosing orchestrator owns. Illegal requests are
/// rejected before any mutation, so a failed call leaves the round, the
/// players, and the pot exactly as they were.
#[derive(Debug, Clone)]
pub struct BettingRound {
    /// Seats in action order for this street.
    order: Vec<usize>,
    /// Index into `order` of the seat to act.
    to_act: usize,
    /// Bet each seat must match this round.
    current_bet: u64,
    /// Minimum opening bet and minimum raise increment.
    min_bet: u64,
    min_raise: u64,
    /// Seats that have acted since the last aggressive action.
    acted: BTreeSet<usize>,
    complete: bool,
}

impl BettingRound {
    /// A fresh round with the given action order. `min_bet` seeds both
    /// the opening bet minimum and the raise increment.
    pub fn new(order: Vec<usize>, min_bet: u64) -> Self {
        assert!(!order.is_empty(), "betting round needs at least one seat");
        Self {
            order,
            to_act: 0,
            current_bet: 0,
            min_bet,
            min_raise: min_bet,
            acted: BTreeSet::new(),
            complete: false,
        }
    }

    /// Posts a forced bet (bring-in or blind): the chips go in, the bet
    /// to match is seeded, and the first voluntary action moves to the
    /// seat after the poster. The poster is *not* marked as having acted,
    /// so action comes back around for their option.
    pub fn post_forced_bet(
        &mut self,
        players: &mut [PlayerState],
        pot: &mut PotManager,
        seat: usize,
        amount: u64,
    ) {
        let idx = self
            .order
            .iter()
            .position(|&s| s == seat)
            .expect("forced bet from a seat outside the round");
        let p = &mut players[seat];
        let paid = p.commit(amount);
        pot.add_contribution(seat, paid);
        self.current_bet = self.current_bet.max(p.bet_this_round);
        self.to_act = idx;
        self.advance(players);
    }

    /// Moves the opening action to the given seat, for streets where the
    /// first actor is determined by the board rather than position.
    pub fn set_first_to_act(&mut self, seat: usize) {
        if let Some(idx) = self.order.iter().position(|&s| s == seat) {
            self.to_act = idx;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Seat whose turn it is, while the round is live.
    pub fn next_to_act(&self) -> Option<usize> {
        if self.complete {
            None
        } else {
            Some(self.order[self.to_act])
        }
    }

    /// Computes the action menu for a seat. Works for any live seat, not
    /// just the one to act; processing still enforces turn order.
    pub fn available_actions(
        &self,
        players: &[PlayerState],
        seat: usize,
    ) -> Result<AvailableActions, GameError> {
        let p = players.get(seat).ok_or(GameError::UnknownSeat { seat })?;
        if p.folded {
            return Err(GameError::PlayerAlreadyFolded { seat });
        }
        let owed = self.current_bet.saturating_sub(p.bet_this_round);
        let call_amount = owed.min(p.stack);
        let max_raise = p.stack.saturating_sub(owed);
        Ok(AvailableActions {
            can_check: owed == 0,
            can_bet: self.current_bet == 0 && p.stack > 0,
            can_call: owed > 0 && p.stack > 0,
            can_raise: self.current_bet > 0 && p.stack > owed,
            can_fold: true,
            can_all_in: p.stack > 0,
            call_amount,
            // When the stack caps the raise below the table increment, the
            // only raise left is the all-in one, and it is legal.
            min_raise: self.min_raise.min(max_raise),
            max_raise,
        })
    }

    /// Processes one action for the seat to act.
    ///
    /// Validation happens before any chips move: out-of-turn requests, a
    /// check while owing chips, an undersized bet or raise from a stack
    /// that could afford the minimum, all come back as errors with the
    /// round untouched.
    pub fn act(
        &mut self,
        players: &mut [PlayerState],
        pot: &mut PotManager,
        seat: usize,
        action: Action,
    ) -> Result<RoundStatus, GameError> {
        if self.complete {
            return Err(GameError::InvalidAction {
                reason: "betting round is already complete",
            });
        }
        if seat >= players.len() {
            return Err(GameError::UnknownSeat { seat });
        }
        let expected = self.order[self.to_act];
        if seat != expected {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }
        if players[seat].folded {
            return Err(GameError::PlayerAlreadyFolded { seat });
        }

        let owed = self.current_bet.saturating_sub(players[seat].bet_this_round);
        let stack = players[seat].stack;

        // Validate, then mutate.
        let commit: u64 = match action {
            Action::Fold => 0,
            Action::Check => {
                if owed > 0 {
                    return Err(GameError::InvalidAction {
                        reason: "cannot check while facing a bet",
                    });
                }
                0
            }
            Action::Call => {
                if owed == 0 {
                    return Err(GameError::InvalidAction {
                        reason: "nothing to call; check instead",
                    });
                }
                owed.min(stack)
            }
            Action::Bet(amount) => {
                if self.current_bet > 0 {
                    return Err(GameError::InvalidAction {
                        reason: "bet is not available once the betting is open; raise instead",
                    });
                }
                if amount > stack {
                    return Err(GameError::InsufficientChips);
                }
                // An all-in for less than the minimum is legal.
                if amount < self.min_bet && amount < stack {
                    return Err(GameError::InvalidBetAmount {
                        amount,
                        minimum: self.min_bet,
                    });
                }
                if amount == 0 {
                    return Err(GameError::InvalidBetAmount {
                        amount,
                        minimum: self.min_bet.max(1),
                    });
                }
                amount
            }
            Action::Raise(increment) => {
                if self.current_bet == 0 {
                    return Err(GameError::InvalidAction {
                        reason: "nothing to raise; bet instead",
                    });
                }
                if owed + increment > stack {
                    return Err(GameError::InsufficientChips);
                }
                // A raise that puts the stack all-in may be under the
                // minimum, and so may completing a bring-in to one full
                // bet; a raise that leaves chips behind may not.
                let completes_bring_in =
                    self.current_bet < self.min_bet && self.current_bet + increment == self.min_bet;
                if increment < self.min_raise && owed + increment < stack && !completes_bring_in {
                    return Err(GameError::InvalidBetAmount {
                        amount: increment,
                        minimum: self.min_raise,
                    });
                }
                if increment == 0 {
                    return Err(GameError::InvalidBetAmount {
                        amount: increment,
                        minimum: self.min_raise,
                    });
                }
                owed + increment
            }
            Action::AllIn => {
                if stack == 0 {
                    return Err(GameError::InsufficientChips);
                }
                stack
            }
        };

        if let Action::Fold = action {
            players[seat].folded = true;
        } else if commit > 0 {
            let paid = players[seat].commit(commit);
            pot.add_contribution(seat, paid);
        }

        let new_level = players[seat].bet_this_round;
        if new_level > self.current_bet {
            // Aggressive action: everyone else owes a response.
            let increment = new_level - self.current_bet;
            self.min_raise = self.min_raise.max(increment);
            self.current_bet = new_level;
            self.acted.clear();
        }
        self.acted.insert(seat);

        self.advance(players);
        if self.round_settled(players) {
            self.complete = true;
            Ok(RoundStatus::Complete)
        } else {
            Ok(RoundStatus::Continue {
                next_to_act: self.order[self.to_act],
            })
        }
    }

    /// Moves the turn to the next seat that can still act.
    fn advance(&mut self, players: &[PlayerState]) {
        for _ in 0..self.order.len() {
            self.to_act = (self.to_act + 1) % self.order.len();
            if players[self.order[self.to_act]].can_act() {
                return;
            }
        }
    }

    fn round_settled(&self, players: &[PlayerState]) -> bool {
        let in_hand = self
            .order
            .iter()
            .filter(|&&s| players[s].in_hand())
            .count();
        if in_hand <= 1 {
            return true;
        }
        self.order
            .iter()
            .filter(|&&s| players[s].can_act())
            .all(|&s| players[s].bet_this_round == self.current_bet && self.acted.contains(&s))
    }
}
