use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// A betting action requested by a player. Amounts are the chips moved
/// beyond what the seat already has in for the round (a raise amount is
/// the increment over the current bet).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid when nothing is owed)
    Check,
    /// Call the current bet
    Call,
    /// Open the betting for the given amount
    Bet(u64),
    /// Raise the current bet by the given increment
    Raise(u64),
    /// Commit the whole remaining stack
    AllIn,
}

/// Per-seat betting-domain state for one hand.
///
/// Owned by the orchestrator driving that hand; it is reset between
/// hands, not rebuilt, and only the betting round and pot manager mutate
/// the chip fields while a hand runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Seat index at the table; doubles as the player identity here.
    pub seat: usize,
    /// Remaining chip stack
    pub stack: u64,
    /// Chips committed during the current betting round
    pub bet_this_round: u64,
    /// Total chips committed this hand, across all rounds
    pub contributed: u64,
    /// Folded (or dropped, in declaration games) out of the hand
    pub folded: bool,
    /// Committed the whole stack
    pub all_in: bool,
    /// Face-up cards, in the order dealt
    pub up_cards: Vec<Card>,
    /// Face-down cards, in the order dealt
    pub down_cards: Vec<Card>,
}

impl PlayerState {
    pub fn new(seat: usize, stack: u64) -> Self {
        Self {
            seat,
            stack,
            bet_this_round: 0,
            contributed: 0,
            folded: false,
            all_in: false,
            up_cards: Vec::new(),
            down_cards: Vec::new(),
        }
    }

    /// Still contesting the pot and able to act.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    /// Still contesting the pot (possibly all-in).
    pub fn in_hand(&self) -> bool {
        !self.folded
    }

    /// All cards the seat holds, down cards first.
    pub fn cards(&self) -> Vec<Card> {
        let mut v = self.down_cards.clone();
        v.extend_from_slice(&self.up_cards);
        v
    }

    /// Moves chips from the stack into the current bet, clamped to the
    /// stack. Marks the seat all-in when the stack empties. Returns the
    /// amount actually committed.
    pub fn commit(&mut self, amount: u64) -> u64 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.bet_this_round += paid;
        self.contributed += paid;
        if self.stack == 0 {
            self.all_in = true;
        }
        paid
    }

    pub fn add_chips(&mut self, amount: u64) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Clears the per-round bet at the end of a street.
    pub fn end_street(&mut self) {
        self.bet_this_round = 0;
    }

    /// Resets all per-hand state, keeping the seat and stack.
    pub fn reset_for_hand(&mut self) {
        self.bet_this_round = 0;
        self.contributed = 0;
        self.folded = false;
        self.all_in = false;
        self.up_cards.clear();
        self.down_cards.clear();
    }

    /// Checks that the given hand indices (down cards first, then up
    /// cards, matching `cards()` order) are in range and distinct.
    pub fn check_discard_indices(&self, discard_indices: &[usize]) -> Result<(), GameError> {
        let total = self.down_cards.len() + self.up_cards.len();
        let mut seen = vec![false; total];
        for &i in discard_indices {
            if i >= total {
                return Err(GameError::InvalidDiscard {
                    reason: "discard index out of range",
                });
            }
            if seen[i] {
                return Err(GameError::InvalidDiscard {
                    reason: "duplicate discard index",
                });
            }
            seen[i] = true;
        }
        Ok(())
    }

    /// Replaces the cards at the given hand indices with the replacements.
    /// Index errors reject without touching the hand.
    pub fn replace_cards(
        &mut self,
        discard_indices: &[usize],
        replacements: &[Card],
    ) -> Result<(), GameError> {
        if discard_indices.len() != replacements.len() {
            return Err(GameError::InvalidDiscard {
                reason: "replacement count does not match discard count",
            });
        }
        self.check_discard_indices(discard_indices)?;
        for (&i, &card) in discard_indices.iter().zip(replacements) {
            if i < self.down_cards.len() {
                self.down_cards[i] = card;
            } else {
                self.up_cards[i - self.down_cards.len()] = card;
            }
        }
        Ok(())
    }
}
