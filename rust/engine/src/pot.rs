use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::PlayerState;

/// One pot layer: its chips and the seats still eligible to win it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u64,
    pub eligible: Vec<usize>,
}

/// Contribution ledger and pot splitter for one hand.
///
/// Contributions only grow while a hand runs. Side pots are not stored:
/// they are recomputed from the ledger snapshot on demand, so repeating
/// the calculation (or the award) over the same snapshot gives the same
/// answer and can be retried safely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotManager {
    contributions: BTreeMap<usize, u64>,
    /// Number of seats at the table, for clockwise remainder order.
    num_seats: usize,
    /// Dealer/bring-in reference seat; odd chips go to winners clockwise
    /// from the seat after this one.
    reference_seat: usize,
}

impl PotManager {
    pub fn new(num_seats: usize, reference_seat: usize) -> Self {
        assert!(reference_seat < num_seats, "reference seat out of range");
        Self {
            contributions: BTreeMap::new(),
            num_seats,
            reference_seat,
        }
    }

    /// Adds chips to a seat's total for the hand. Monotonic: totals never
    /// decrease until the hand is over and the ledger is reset.
    pub fn add_contribution(&mut self, seat: usize, amount: u64) {
        assert!(seat < self.num_seats, "unknown seat {seat}");
        *self.contributions.entry(seat).or_insert(0) += amount;
    }

    pub fn contribution(&self, seat: usize) -> u64 {
        self.contributions.get(&seat).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.contributions.values().sum()
    }

    pub fn reset(&mut self) {
        self.contributions.clear();
    }

    /// Partitions the contributions into a main pot plus side pots.
    ///
    /// Each distinct contribution level closes a layer; every seat pays
    /// into a layer up to its own cap, and a layer's eligible set is the
    /// non-folded seats whose total reaches that level. Folded chips stay
    /// in the layers they funded but buy no eligibility. The sum over all
    /// layers always equals the sum of contributions.
    pub fn side_pots(&self, players: &[PlayerState]) -> Vec<Pot> {
        let mut levels: Vec<u64> = players
            .iter()
            .filter(|p| p.in_hand() && self.contribution(p.seat) > 0)
            .map(|p| self.contribution(p.seat))
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots = Vec::new();
        let mut prev = 0u64;
        for level in levels {
            let mut amount = 0u64;
            for p in players {
                let c = self.contribution(p.seat);
                amount += c.min(level).saturating_sub(c.min(prev));
            }
            let eligible: Vec<usize> = players
                .iter()
                .filter(|p| p.in_hand() && self.contribution(p.seat) >= level)
                .map(|p| p.seat)
                .collect();
            if amount > 0 {
                pots.push(Pot { amount, eligible });
            }
            prev = level;
        }
        // Chips above the last live level (folded overage) top up the
        // final pot rather than forming a dead layer.
        let accounted: u64 = pots.iter().map(|p| p.amount).sum();
        let leftover = self.total() - accounted;
        if leftover > 0 {
            if let Some(last) = pots.last_mut() {
                last.amount += leftover;
            }
        }
        pots
    }

    /// Awards every pot layer and returns the payout per seat.
    ///
    /// `winners_of` picks the winning seats among a pot's eligible seats
    /// (several for a tie or a declared split). Each pot divides evenly;
    /// the integer remainder goes one chip at a time to winners in seat
    /// order clockwise from the reference seat.
    ///
    /// # Panics
    ///
    /// Panics if the amounts handed out do not sum to the pot total; a
    /// mismatch there is a chip-accounting bug, never a game outcome.
    pub fn award_pots(
        &self,
        players: &[PlayerState],
        mut winners_of: impl FnMut(&[usize]) -> Vec<usize>,
    ) -> BTreeMap<usize, u64> {
        let pots = self.side_pots(players);
        let mut payouts: BTreeMap<usize, u64> = BTreeMap::new();
        for pot in &pots {
            let winners = winners_of(&pot.eligible);
            assert!(
                !winners.is_empty() && winners.iter().all(|w| pot.eligible.contains(w)),
                "winners must be a nonempty subset of the pot's eligible seats"
            );
            self.split_amount(pot.amount, &winners, &mut payouts);
        }
        let awarded: u64 = payouts.values().sum();
        assert_eq!(awarded, self.total(), "pot award does not conserve chips");
        payouts
    }

    /// Awards every pot layer in a hi/lo split game.
    ///
    /// `split_of` returns the high winners and, when a qualifying low
    /// exists among the eligible seats, the low winners. With a low, the
    /// pot halves (odd chip to the high side); without one, the whole pot
    /// rolls to the high winners. That roll is an outcome, not an error.
    pub fn award_pots_hilo(
        &self,
        players: &[PlayerState],
        mut split_of: impl FnMut(&[usize]) -> (Vec<usize>, Option<Vec<usize>>),
    ) -> BTreeMap<usize, u64> {
        let pots = self.side_pots(players);
        let mut payouts: BTreeMap<usize, u64> = BTreeMap::new();
        for pot in &pots {
            let (high, low) = split_of(&pot.eligible);
            assert!(
                !high.is_empty() && high.iter().all(|w| pot.eligible.contains(w)),
                "high winners must be a nonempty subset of the pot's eligible seats"
            );
            match low {
                Some(low) if !low.is_empty() => {
                    assert!(
                        low.iter().all(|w| pot.eligible.contains(w)),
                        "low winners must be eligible for the pot"
                    );
                    let low_half = pot.amount / 2;
                    let high_half = pot.amount - low_half;
                    self.split_amount(high_half, &high, &mut payouts);
                    self.split_amount(low_half, &low, &mut payouts);
                }
                _ => self.split_amount(pot.amount, &high, &mut payouts),
            }
        }
        let awarded: u64 = payouts.values().sum();
        assert_eq!(awarded, self.total(), "pot award does not conserve chips");
        payouts
    }

    /// Splits one amount among winners: even shares, remainder clockwise
    /// from the seat after the reference seat.
    pub fn split_amount(
        &self,
        amount: u64,
        winners: &[usize],
        payouts: &mut BTreeMap<usize, u64>,
    ) {
        let share = amount / winners.len() as u64;
        let mut remainder = amount % winners.len() as u64;
        let mut ordered: Vec<usize> = winners.to_vec();
        ordered.sort_unstable_by_key(|&s| self.clockwise_distance(s));
        for &w in &ordered {
            let extra = if remainder > 0 {
                remainder -= 1;
                1
            } else {
                0
            };
            *payouts.entry(w).or_insert(0) += share + extra;
        }
    }

    fn clockwise_distance(&self, seat: usize) -> usize {
        (seat + self.num_seats - (self.reference_seat + 1) % self.num_seats) % self.num_seats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players_with(contribs: &[(u64, bool)], pm: &mut PotManager) -> Vec<PlayerState> {
        contribs
            .iter()
            .enumerate()
            .map(|(seat, &(amount, folded))| {
                let mut p = PlayerState::new(seat, 1000);
                p.folded = folded;
                pm.add_contribution(seat, amount);
                p
            })
            .collect()
    }

    #[test]
    fn all_in_splits_main_and_side_pot() {
        // Stacks [100, 50, 100]: seat 1 all-in for 50, others in for 100.
        let mut pm = PotManager::new(3, 0);
        let players = players_with(&[(100, false), (50, false), (100, false)], &mut pm);
        let pots = pm.side_pots(&players);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 150);
        assert_eq!(pots[0].eligible, vec![0, 1, 2]);
        assert_eq!(pots[1].amount, 100);
        assert_eq!(pots[1].eligible, vec![0, 2]);
    }

    #[test]
    fn folded_chips_stay_in_pot_without_eligibility() {
        let mut pm = PotManager::new(3, 0);
        let players = players_with(&[(100, false), (60, true), (100, false)], &mut pm);
        let pots = pm.side_pots(&players);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 260);
        assert_eq!(pots[0].eligible, vec![0, 2]);
    }

    #[test]
    fn award_conserves_chips_across_layers() {
        let mut pm = PotManager::new(4, 0);
        let players = players_with(
            &[(200, false), (75, false), (200, false), (40, true)],
            &mut pm,
        );
        // Seat 1 wins everything it can; seat 2 takes the rest.
        let payouts = pm.award_pots(&players, |eligible| {
            if eligible.contains(&1) {
                vec![1]
            } else {
                vec![2]
            }
        });
        let total: u64 = payouts.values().sum();
        assert_eq!(total, pm.total());
        assert_eq!(payouts[&1], 75 * 3 + 40); // layer up to 75 plus folded 40
        assert_eq!(payouts[&2], 250);
    }

    #[test]
    fn odd_chip_goes_clockwise_from_reference() {
        let mut pm = PotManager::new(3, 2);
        let players = players_with(&[(33, false), (33, false), (35, false)], &mut pm);
        // Everyone ties: 101 chips, three winners, share 33 rem 2.
        let payouts = pm.award_pots(&players, |eligible| eligible.to_vec());
        // Clockwise from seat 2's left: seat 0 first, then 1, then 2.
        assert_eq!(payouts[&0], 34);
        assert_eq!(payouts[&1], 34);
        assert_eq!(payouts[&2], 33);
    }

    #[test]
    fn repeated_side_pot_calls_are_idempotent() {
        let mut pm = PotManager::new(3, 0);
        let players = players_with(&[(100, false), (50, false), (100, false)], &mut pm);
        assert_eq!(pm.side_pots(&players), pm.side_pots(&players));
    }
}
