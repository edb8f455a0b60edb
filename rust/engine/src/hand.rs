use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Hand categories in ascending order of strength.
///
/// FiveOfAKind is reachable only through wild-card substitution and ranks
/// above StraightFlush.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    FiveOfAKind = 9,
}

/// The evaluated value of a 5-card hand: category, tie-break ranks, and a
/// concrete representative ordering of the five cards for display.
///
/// For wild hands `best_five` holds the cards as *played* (a wild card shown
/// at the rank it was substituted to), so "three Queens plus a wild" reads
/// as four Queens, not as whatever the wild physically was.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandValue {
    pub category: HandCategory,
    /// Tie-break ranks, high to low significance (2..=14, 0 padding).
    pub kickers: [u8; 5],
    pub best_five: [Card; 5],
}

impl HandValue {
    /// Packs category and kickers into one monotonically comparable integer.
    /// For any two 5-card hands, `strength(a) > strength(b)` iff a beats b;
    /// equal strength means a genuine tie.
    pub fn strength(&self) -> u32 {
        let mut v = (self.category as u32) << 20;
        for (i, &k) in self.kickers.iter().enumerate() {
            v |= (k as u32) << (16 - 4 * i);
        }
        v
    }
}

pub fn compare_hands(a: &HandValue, b: &HandValue) -> Ordering {
    a.strength().cmp(&b.strength())
}

/// Evaluates exactly five natural (non-wild) cards.
///
/// Wheel handling: A-2-3-4-5 is a 5-high straight, strictly below
/// 2-3-4-5-6 and below any Ace-high straight.
///
/// # Panics
///
/// Panics if `cards` does not contain exactly 5 cards. Callers own that
/// contract; this sits under real chip accounting and must not guess.
pub fn evaluate_five(cards: &[Card]) -> HandValue {
    assert!(
        cards.len() == 5,
        "evaluate_five requires exactly 5 cards, got {}",
        cards.len()
    );

    let mut rank_counts = [0u8; 15]; // 2..=14 used
    for c in cards {
        rank_counts[c.rank.value() as usize] += 1;
    }
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = straight_high_of(cards);

    if is_flush {
        if let Some(high) = straight_high {
            return HandValue {
                category: HandCategory::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
                best_five: straight_order(cards, high),
            };
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandValue {
            category: HandCategory::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
            best_five: grouped_order(cards),
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandValue {
            category: HandCategory::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
            best_five: grouped_order(cards),
        };
    }

    if is_flush {
        let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks);
        return HandValue {
            category: HandCategory::Flush,
            kickers: k,
            best_five: grouped_order(cards),
        };
    }

    if let Some(high) = straight_high {
        return HandValue {
            category: HandCategory::Straight,
            kickers: [high, 0, 0, 0, 0],
            best_five: straight_order(cards, high),
        };
    }

    let (trips, pairs, singles) = classify_multiples(&rank_counts);
    if let Some(t) = trips.first().copied() {
        let mut k = [t, 0, 0, 0, 0];
        k[1] = *singles.first().unwrap_or(&0);
        k[2] = *singles.get(1).unwrap_or(&0);
        return HandValue {
            category: HandCategory::ThreeOfAKind,
            kickers: k,
            best_five: grouped_order(cards),
        };
    }
    if pairs.len() >= 2 {
        let k = [pairs[0], pairs[1], *singles.first().unwrap_or(&0), 0, 0];
        return HandValue {
            category: HandCategory::TwoPair,
            kickers: k,
            best_five: grouped_order(cards),
        };
    }
    if let Some(p) = pairs.first().copied() {
        let mut k = [p, 0, 0, 0, 0];
        for i in 0..3 {
            k[i + 1] = *singles.get(i).unwrap_or(&0);
        }
        return HandValue {
            category: HandCategory::OnePair,
            kickers: k,
            best_five: grouped_order(cards),
        };
    }

    let mut k = [0u8; 5];
    for (i, &s) in singles.iter().take(5).enumerate() {
        k[i] = s;
    }
    HandValue {
        category: HandCategory::HighCard,
        kickers: k,
        best_five: grouped_order(cards),
    }
}

/// Straight high card for an exact 5-card hand, if the ranks form one.
/// Returns 5 for the wheel.
fn straight_high_of(cards: &[Card]) -> Option<u8> {
    let mut v: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    v.sort_unstable();
    v.dedup();
    if v.len() != 5 {
        return None;
    }
    if v[4] - v[0] == 4 {
        return Some(v[4]);
    }
    // wheel: A-2-3-4-5
    if v == [2, 3, 4, 5, 14] {
        return Some(5);
    }
    None
}

/// Orders a straight high-to-low for display, with the Ace last in a wheel.
pub(crate) fn straight_order(cards: &[Card], high: u8) -> [Card; 5] {
    let mut v = cards.to_vec();
    if high == 5 && v.iter().any(|c| c.rank == Rank::Ace) {
        v.sort_unstable_by_key(|c| std::cmp::Reverse(c.rank.low_value()));
    } else {
        v.sort_unstable_by_key(|c| std::cmp::Reverse(c.rank.value()));
    }
    let mut out = [v[0]; 5];
    out.copy_from_slice(&v);
    out
}

/// Orders cards by (rank multiplicity, rank) descending so that the cards
/// that define the hand come first (pairs before kickers and so on).
pub(crate) fn grouped_order(cards: &[Card]) -> [Card; 5] {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    let mut v = cards.to_vec();
    v.sort_unstable_by(|a, b| {
        let ca = counts[a.rank.value() as usize];
        let cb = counts[b.rank.value() as usize];
        cb.cmp(&ca).then(b.rank.value().cmp(&a.rank.value()))
    });
    let mut out = [v[0]; 5];
    out.copy_from_slice(&v);
    out
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut quad = 0u8;
    for r in (2..=14u8).rev() {
        if rank_counts[r as usize] == 4 {
            quad = r;
            break;
        }
    }
    if quad == 0 {
        return None;
    }
    let mut kicker = 0u8;
    for r in (2..=14u8).rev() {
        if r != quad && rank_counts[r as usize] > 0 {
            kicker = r;
            break;
        }
    }
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trip = 0u8;
    let mut pair = 0u8;
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 if trip == 0 => trip = r,
            2 if pair == 0 => pair = r,
            _ => {}
        }
    }
    if trip != 0 && pair != 0 {
        Some((trip, pair))
    } else {
        None
    }
}

fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}

/// Rank-frequency evaluation of a *partial* hand (1..=4 visible cards),
/// used to pick the first actor on later stud streets. Straights and
/// flushes are not considered; only pairs/trips/quads and kickers, which
/// matches how open cards are read at the table.
pub fn evaluate_visible(cards: &[Card]) -> (HandCategory, [u8; 5]) {
    assert!(
        !cards.is_empty() && cards.len() <= 4,
        "visible evaluation covers 1 to 4 up-cards, got {}",
        cards.len()
    );
    let mut rank_counts = [0u8; 15];
    for c in cards {
        rank_counts[c.rank.value() as usize] += 1;
    }
    let (trips, pairs, singles) = classify_multiples(&rank_counts);
    let mut k = [0u8; 5];
    if rank_counts.iter().any(|&c| c == 4) {
        let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4);
        k[0] = quad.unwrap_or(0);
        return (HandCategory::FourOfAKind, k);
    }
    if let Some(t) = trips.first().copied() {
        k[0] = t;
        k[1] = *singles.first().unwrap_or(&0);
        return (HandCategory::ThreeOfAKind, k);
    }
    if pairs.len() >= 2 {
        k[0] = pairs[0];
        k[1] = pairs[1];
        return (HandCategory::TwoPair, k);
    }
    if let Some(p) = pairs.first().copied() {
        k[0] = p;
        k[1] = *singles.first().unwrap_or(&0);
        k[2] = *singles.get(1).unwrap_or(&0);
        return (HandCategory::OnePair, k);
    }
    for (i, &s) in singles.iter().take(4).enumerate() {
        k[i] = s;
    }
    (HandCategory::HighCard, k)
}

/// Ace-to-five low evaluation with the eight-or-better qualifier.
///
/// Returns the low ranks sorted high-to-low (so that a lexicographically
/// *smaller* array is a better low), or None when the hand does not
/// qualify: any pair, or any card above an Eight, disqualifies it.
/// Straights and flushes do not count against the low.
pub fn low_eight_or_better(cards: &[Card]) -> Option<[u8; 5]> {
    assert!(
        cards.len() == 5,
        "low evaluation requires exactly 5 cards, got {}",
        cards.len()
    );
    let mut v: Vec<u8> = cards.iter().map(|c| c.rank.low_value()).collect();
    v.sort_unstable_by(|a, b| b.cmp(a));
    if v[0] > 8 {
        return None;
    }
    for w in v.windows(2) {
        if w[0] == w[1] {
            return None;
        }
    }
    let mut out = [0u8; 5];
    out.copy_from_slice(&v);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn c(s: Suit, r: Rank) -> Card {
        Card::new(s, r)
    }

    #[test]
    fn wheel_is_five_high() {
        let wheel = [
            c(Suit::Clubs, Rank::Ace),
            c(Suit::Hearts, Rank::Two),
            c(Suit::Spades, Rank::Three),
            c(Suit::Diamonds, Rank::Four),
            c(Suit::Clubs, Rank::Five),
        ];
        let six_high = [
            c(Suit::Clubs, Rank::Two),
            c(Suit::Hearts, Rank::Three),
            c(Suit::Spades, Rank::Four),
            c(Suit::Diamonds, Rank::Five),
            c(Suit::Clubs, Rank::Six),
        ];
        let a = evaluate_five(&wheel);
        let b = evaluate_five(&six_high);
        assert_eq!(a.category, HandCategory::Straight);
        assert_eq!(a.kickers[0], 5);
        assert!(a.strength() < b.strength());
    }

    #[test]
    fn wheel_display_puts_ace_last() {
        let wheel = [
            c(Suit::Clubs, Rank::Ace),
            c(Suit::Hearts, Rank::Two),
            c(Suit::Spades, Rank::Three),
            c(Suit::Diamonds, Rank::Four),
            c(Suit::Clubs, Rank::Five),
        ];
        let v = evaluate_five(&wheel);
        assert_eq!(v.best_five[0].rank, Rank::Five);
        assert_eq!(v.best_five[4].rank, Rank::Ace);
    }

    #[test]
    fn quads_kicker_breaks_tie() {
        let a = evaluate_five(&[
            c(Suit::Clubs, Rank::Nine),
            c(Suit::Diamonds, Rank::Nine),
            c(Suit::Hearts, Rank::Nine),
            c(Suit::Spades, Rank::Nine),
            c(Suit::Clubs, Rank::King),
        ]);
        let b = evaluate_five(&[
            c(Suit::Clubs, Rank::Nine),
            c(Suit::Diamonds, Rank::Nine),
            c(Suit::Hearts, Rank::Nine),
            c(Suit::Spades, Rank::Nine),
            c(Suit::Clubs, Rank::Queen),
        ]);
        assert!(a.strength() > b.strength());
    }

    #[test]
    fn five_card_flush_not_straight_flush() {
        let v = evaluate_five(&[
            c(Suit::Hearts, Rank::Two),
            c(Suit::Hearts, Rank::Seven),
            c(Suit::Hearts, Rank::Nine),
            c(Suit::Hearts, Rank::Jack),
            c(Suit::Hearts, Rank::Ace),
        ]);
        assert_eq!(v.category, HandCategory::Flush);
        assert_eq!(v.kickers, [14, 11, 9, 7, 2]);
    }

    #[test]
    fn grouped_order_leads_with_pair() {
        let v = evaluate_five(&[
            c(Suit::Clubs, Rank::Four),
            c(Suit::Hearts, Rank::Ace),
            c(Suit::Spades, Rank::Four),
            c(Suit::Diamonds, Rank::Nine),
            c(Suit::Clubs, Rank::Two),
        ]);
        assert_eq!(v.category, HandCategory::OnePair);
        assert_eq!(v.best_five[0].rank, Rank::Four);
        assert_eq!(v.best_five[1].rank, Rank::Four);
        assert_eq!(v.best_five[2].rank, Rank::Ace);
    }

    #[test]
    fn visible_pair_beats_visible_high_card() {
        let pair = evaluate_visible(&[c(Suit::Clubs, Rank::Three), c(Suit::Hearts, Rank::Three)]);
        let high = evaluate_visible(&[c(Suit::Clubs, Rank::Ace), c(Suit::Hearts, Rank::King)]);
        assert!(pair > high);
    }

    #[test]
    fn low_qualifier_rejects_nines_and_pairs() {
        let nine_low = [
            c(Suit::Clubs, Rank::Nine),
            c(Suit::Hearts, Rank::Five),
            c(Suit::Spades, Rank::Four),
            c(Suit::Diamonds, Rank::Three),
            c(Suit::Clubs, Rank::Two),
        ];
        assert_eq!(low_eight_or_better(&nine_low), None);
        let paired = [
            c(Suit::Clubs, Rank::Five),
            c(Suit::Hearts, Rank::Five),
            c(Suit::Spades, Rank::Four),
            c(Suit::Diamonds, Rank::Three),
            c(Suit::Clubs, Rank::Two),
        ];
        assert_eq!(low_eight_or_better(&paired), None);
    }

    #[test]
    fn wheel_is_best_low() {
        let wheel = [
            c(Suit::Clubs, Rank::Ace),
            c(Suit::Hearts, Rank::Two),
            c(Suit::Spades, Rank::Three),
            c(Suit::Diamonds, Rank::Four),
            c(Suit::Clubs, Rank::Five),
        ];
        let six_low = [
            c(Suit::Clubs, Rank::Ace),
            c(Suit::Hearts, Rank::Two),
            c(Suit::Spades, Rank::Three),
            c(Suit::Diamonds, Rank::Four),
            c(Suit::Clubs, Rank::Six),
        ];
        let a = low_eight_or_better(&wheel).unwrap();
        let b = low_eight_or_better(&six_low).unwrap();
        assert!(a < b);
        assert_eq!(a, [5, 4, 3, 2, 1]);
    }
}
