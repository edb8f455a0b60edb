use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A shuffled 52-card deck with a dealing cursor.
///
/// Shuffling is driven by a seeded ChaCha20 RNG so that a whole hand is
/// reproducible from the seed alone.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    pub fn deal_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.deal_card()).collect()
    }

    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_order() {
        let mut a = Deck::new_with_seed(42);
        let mut b = Deck::new_with_seed(42);
        a.shuffle();
        b.shuffle();
        for _ in 0..52 {
            assert_eq!(a.deal_card(), b.deal_card());
        }
        assert_eq!(a.deal_card(), None);
    }

    #[test]
    fn burn_consumes_a_card() {
        let mut d = Deck::new_with_seed(7);
        d.shuffle();
        d.burn_card();
        assert_eq!(d.remaining(), 51);
    }
}
