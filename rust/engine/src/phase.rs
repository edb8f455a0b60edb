use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::PlayerState;
use crate::pot::PotManager;

/// The tagged phase of a hand. Each variant's transition function walks a
/// subset of these; phases are replaced by the orchestrator, never
/// mutated in place.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Stud: two down, one up, bring-in betting.
    ThirdStreet,
    /// Stud: one up card then betting.
    FourthStreet,
    FifthStreet,
    SixthStreet,
    /// Stud: final down card then betting.
    SeventhStreet,
    /// Draw games: betting before the draw.
    PreDrawBet,
    /// Declaration round: each seat drops out of or stays in the hand.
    DropOrStay,
    /// Discard-and-replace round.
    Draw,
    /// Draw games: betting after the draw.
    PostDrawBet,
    /// A lone stayer draws, then plays against a fresh 5-card deck hand.
    PlayerVsDeck,
    /// Hands are revealed and the pots awarded.
    Showdown,
    /// Terminal phase.
    Complete,
}

impl Phase {
    /// Phases resolved by player betting actions.
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Phase::ThirdStreet
                | Phase::FourthStreet
                | Phase::FifthStreet
                | Phase::SixthStreet
                | Phase::SeventhStreet
                | Phase::PreDrawBet
                | Phase::PostDrawBet
        )
    }
}

/// Everything a hand in progress owns: the seats, the table-wide face-up
/// deal history, and the contribution ledger. Owned exclusively by the
/// orchestrator driving the hand and reset, not rebuilt, between hands.
#[derive(Debug, Clone)]
pub struct HandState {
    pub players: Vec<PlayerState>,
    /// Every face-up card revealed so far, in true deal order across all
    /// players and streets. History-dependent wild rules read this.
    pub deal_history: Vec<Card>,
    pub pot: PotManager,
    /// Dealer button; also the reference seat for odd-chip distribution.
    pub dealer: usize,
}

impl HandState {
    pub fn new(stacks: &[u64], dealer: usize) -> Self {
        let players = stacks
            .iter()
            .enumerate()
            .map(|(seat, &s)| PlayerState::new(seat, s))
            .collect();
        Self {
            players,
            deal_history: Vec::new(),
            pot: PotManager::new(stacks.len(), dealer),
            dealer,
        }
    }

    pub fn reset_for_hand(&mut self) {
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.deal_history.clear();
        self.pot.reset();
    }

    pub fn seats_in_hand(&self) -> Vec<usize> {
        self.players
            .iter()
            .filter(|p| p.in_hand())
            .map(|p| p.seat)
            .collect()
    }

    pub fn count_in_hand(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand()).count()
    }

    /// True when no further betting is possible: at most one seat in the
    /// hand can still act, everyone else being folded or all-in.
    pub fn betting_is_moot(&self) -> bool {
        self.players.iter().filter(|p| p.can_act()).count() <= 1
    }

    /// Seats in clockwise order starting left of the dealer.
    pub fn seats_from_dealer(&self) -> Vec<usize> {
        let n = self.players.len();
        (1..=n).map(|i| (self.dealer + i) % n).collect()
    }

    /// Records a face-up card in table-wide deal order.
    pub fn reveal(&mut self, card: Card) {
        self.deal_history.push(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_order_starts_left_of_dealer() {
        let s = HandState::new(&[100, 100, 100, 100], 2);
        assert_eq!(s.seats_from_dealer(), vec![3, 0, 1, 2]);
    }

    #[test]
    fn betting_is_moot_when_only_all_ins_remain() {
        let mut s = HandState::new(&[100, 100, 100], 0);
        s.players[0].folded = true;
        s.players[1].stack = 0;
        s.players[1].all_in = true;
        assert!(s.betting_is_moot());
    }
}
