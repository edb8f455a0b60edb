use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// The set of ranks that count as wild for one evaluation pass.
///
/// Every rule in scope is expressible by ranks (ties on "lowest card" are
/// all included by construction), so the selection is rank-based rather
/// than card-based.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WildSelection {
    pub ranks: BTreeSet<Rank>,
}

impl WildSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(ranks: &[Rank]) -> Self {
        Self {
            ranks: ranks.iter().copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn is_wild(&self, card: Card) -> bool {
        self.ranks.contains(&card.rank)
    }

    /// Splits a card set into its natural cards and its wild-card count.
    pub fn split(&self, cards: &[Card]) -> (Vec<Card>, usize) {
        let naturals: Vec<Card> = cards.iter().copied().filter(|&c| !self.is_wild(c)).collect();
        let wilds = cards.len() - naturals.len();
        (naturals, wilds)
    }
}

/// A per-variant wildness policy.
///
/// `history` is the ordered list of face-up cards revealed table-wide so
/// far, in true deal order across all players and streets. Static rules
/// ignore it; Follow-the-Queen style rules are a pure function of it.
///
/// A rule may return more than one selection when the hand admits
/// alternative readings (the ace-low reinterpretation of "lowest card");
/// the evaluator scores each and keeps the strongest result.
pub trait WildRule: fmt::Debug {
    /// Human-readable summary, surfaced through variant metadata.
    fn summary(&self) -> &'static str;

    fn determine_wild(&self, cards: &[Card], history: &[Card]) -> Vec<WildSelection>;
}

/// One rank is always wild, optionally only while the holder also has a
/// designated qualifier card in hand.
#[derive(Debug, Clone)]
pub struct FixedRankWild {
    pub rank: Rank,
    pub qualifier: Option<Card>,
    summary: &'static str,
}

impl FixedRankWild {
    pub fn new(rank: Rank, summary: &'static str) -> Self {
        Self {
            rank,
            qualifier: None,
            summary,
        }
    }

    pub fn with_qualifier(rank: Rank, qualifier: Card, summary: &'static str) -> Self {
        Self {
            rank,
            qualifier: Some(qualifier),
            summary,
        }
    }
}

impl WildRule for FixedRankWild {
    fn summary(&self) -> &'static str {
        self.summary
    }

    fn determine_wild(&self, cards: &[Card], _history: &[Card]) -> Vec<WildSelection> {
        if let Some(q) = self.qualifier {
            if !cards.contains(&q) {
                return vec![WildSelection::none()];
            }
        }
        vec![WildSelection::of(&[self.rank])]
    }
}

/// The holder's lowest natural card is wild, ties included. An optional
/// always-wild rank (Kings in Kings-and-Lows) is excluded from the
/// "lowest" scan, since those cards are already wild.
///
/// Hands containing an Ace get two readings: Ace high (the Ace is the
/// highest card and something else is lowest) and Ace low (the Ace itself
/// is the lowest card and therefore wild). The evaluator keeps whichever
/// reading produces the stronger final hand.
#[derive(Debug, Clone)]
pub struct LowestCardWild {
    pub always: Option<Rank>,
    summary: &'static str,
}

impl LowestCardWild {
    pub fn new(summary: &'static str) -> Self {
        Self {
            always: None,
            summary,
        }
    }

    pub fn with_always_wild(always: Rank, summary: &'static str) -> Self {
        Self {
            always: Some(always),
            summary,
        }
    }

    fn selection_with_lowest(&self, lowest: Option<Rank>) -> WildSelection {
        let mut ranks = BTreeSet::new();
        if let Some(a) = self.always {
            ranks.insert(a);
        }
        if let Some(l) = lowest {
            ranks.insert(l);
        }
        WildSelection { ranks }
    }
}

impl WildRule for LowestCardWild {
    fn summary(&self) -> &'static str {
        self.summary
    }

    fn determine_wild(&self, cards: &[Card], _history: &[Card]) -> Vec<WildSelection> {
        let naturals: Vec<Card> = cards
            .iter()
            .copied()
            .filter(|c| Some(c.rank) != self.always)
            .collect();
        let high_lowest = naturals.iter().map(|c| c.rank).min_by_key(|r| r.value());
        let low_lowest = naturals.iter().map(|c| c.rank).min_by_key(|r| r.low_value());
        let first = self.selection_with_lowest(high_lowest);
        let second = self.selection_with_lowest(low_lowest);
        if first == second {
            vec![first]
        } else {
            vec![first, second]
        }
    }
}

/// Queens are always wild, plus the rank immediately following the most
/// recently revealed face-up Queen in table-wide deal order.
///
/// When the most recent face-up Queen is the last card revealed so far
/// (including a Queen dealt right after another Queen, which becomes the
/// new "most recent" trigger), there is no additional wild rank until the
/// next face-up card lands.
#[derive(Debug, Clone, Default)]
pub struct FollowTheQueen;

impl FollowTheQueen {
    pub fn new() -> Self {
        Self
    }

    /// The rank following the last face-up Queen, if any card follows it.
    pub fn chaser_rank(history: &[Card]) -> Option<Rank> {
        let last_queen = history.iter().rposition(|c| c.rank == Rank::Queen)?;
        history.get(last_queen + 1).map(|c| c.rank)
    }
}

impl WildRule for FollowTheQueen {
    fn summary(&self) -> &'static str {
        "Queens wild, plus the rank dealt face-up after the last Queen"
    }

    fn determine_wild(&self, _cards: &[Card], history: &[Card]) -> Vec<WildSelection> {
        let mut ranks = BTreeSet::new();
        ranks.insert(Rank::Queen);
        if let Some(r) = Self::chaser_rank(history) {
            ranks.insert(r);
        }
        vec![WildSelection { ranks }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn c(s: Suit, r: Rank) -> Card {
        Card::new(s, r)
    }

    #[test]
    fn fixed_rank_without_qualifier() {
        let rule = FixedRankWild::new(Rank::King, "Kings wild");
        let hand = [c(Suit::Clubs, Rank::King), c(Suit::Hearts, Rank::Two)];
        let sel = rule.determine_wild(&hand, &[]);
        assert_eq!(sel.len(), 1);
        assert!(sel[0].is_wild(c(Suit::Clubs, Rank::King)));
        assert!(!sel[0].is_wild(c(Suit::Hearts, Rank::Two)));
    }

    #[test]
    fn fixed_rank_qualifier_gates_wildness() {
        let q = c(Suit::Spades, Rank::Jack);
        let rule = FixedRankWild::with_qualifier(Rank::Two, q, "Deuces wild with the black Jack");
        let without = [c(Suit::Clubs, Rank::Two), c(Suit::Hearts, Rank::Nine)];
        assert!(rule.determine_wild(&without, &[])[0].is_empty());
        let with = [c(Suit::Clubs, Rank::Two), q];
        assert!(rule.determine_wild(&with, &[])[0].is_wild(c(Suit::Clubs, Rank::Two)));
    }

    #[test]
    fn lowest_card_ties_all_included() {
        let rule = LowestCardWild::new("low hole card wild");
        let hand = [
            c(Suit::Clubs, Rank::Three),
            c(Suit::Hearts, Rank::Three),
            c(Suit::Spades, Rank::Nine),
        ];
        let sel = rule.determine_wild(&hand, &[]);
        assert_eq!(sel.len(), 1);
        assert!(sel[0].is_wild(c(Suit::Clubs, Rank::Three)));
        assert!(sel[0].is_wild(c(Suit::Hearts, Rank::Three)));
    }

    #[test]
    fn ace_hand_gets_both_readings() {
        let rule = LowestCardWild::with_always_wild(Rank::King, "Kings and low card wild");
        let hand = [
            c(Suit::Clubs, Rank::Ace),
            c(Suit::Hearts, Rank::King),
            c(Suit::Spades, Rank::Four),
            c(Suit::Diamonds, Rank::Nine),
            c(Suit::Clubs, Rank::Jack),
        ];
        let sels = rule.determine_wild(&hand, &[]);
        assert_eq!(sels.len(), 2);
        // Ace-high reading: the Four is lowest. Ace-low reading: the Ace is.
        assert!(sels[0].ranks.contains(&Rank::Four));
        assert!(sels[1].ranks.contains(&Rank::Ace));
        for s in &sels {
            assert!(s.ranks.contains(&Rank::King));
        }
    }

    #[test]
    fn follow_the_queen_tracks_table_deal_order() {
        let rule = FollowTheQueen::new();
        let history = [
            c(Suit::Hearts, Rank::Queen),
            c(Suit::Diamonds, Rank::Five),
            c(Suit::Spades, Rank::Eight),
            c(Suit::Spades, Rank::Ten),
        ];
        let sel = &rule.determine_wild(&[], &history)[0];
        assert!(sel.ranks.contains(&Rank::Queen));
        assert!(sel.ranks.contains(&Rank::Five));
        assert_eq!(sel.ranks.len(), 2);
    }

    #[test]
    fn queen_as_last_card_leaves_no_chaser() {
        let history = [
            c(Suit::Hearts, Rank::Queen),
            c(Suit::Diamonds, Rank::Five),
            c(Suit::Clubs, Rank::Queen),
        ];
        assert_eq!(FollowTheQueen::chaser_rank(&history), None);
        let sel = &FollowTheQueen::new().determine_wild(&[], &history)[0];
        assert_eq!(sel.ranks.len(), 1);
    }

    #[test]
    fn queen_following_queen_becomes_the_new_trigger() {
        let history = [
            c(Suit::Hearts, Rank::Queen),
            c(Suit::Clubs, Rank::Queen),
            c(Suit::Diamonds, Rank::Seven),
        ];
        assert_eq!(FollowTheQueen::chaser_rank(&history), Some(Rank::Seven));
    }
}
