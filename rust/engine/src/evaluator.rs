//! Wild-card hand evaluation.
//!
//! Given 5 to 7 cards and the wild ranks in force, finds the
//! maximum-strength 5-card hand reachable by substitution. Subsets are
//! walked lazily (at most C(7,5) = 21 of them) with a running best; within
//! a subset the achievable categories are probed in strictly descending
//! order and the search stops at the first hit.
//!
//! Two rules keep substitution honest:
//! - a flush or straight flush is only claimed when the *natural* cards
//!   involved already share the suit; wilds fill gaps, they never justify
//!   a suit comparison among cards that were never in that suit;
//! - the representative hand shows each wild at the rank it was played as,
//!   so three natural Queens plus a wild reads "four Queens".

use crate::cards::{all_suits, Card, Rank, Suit};
use crate::hand::{evaluate_five, grouped_order, straight_order, HandCategory, HandValue};
use crate::wild::{WildRule, WildSelection};

/// Evaluates a hand under an optional wild rule, trying every wild
/// interpretation the rule offers (ace-low rereads) and keeping the best.
///
/// `history` is the table-wide face-up deal order, passed through to the
/// rule untouched.
pub fn evaluate_hand(
    cards: &[Card],
    rule: Option<&dyn WildRule>,
    history: &[Card],
) -> HandValue {
    match rule {
        None => evaluate_best(cards, &WildSelection::none()),
        Some(rule) => rule
            .determine_wild(cards, history)
            .iter()
            .map(|sel| evaluate_best(cards, sel))
            .max_by_key(|v| v.strength())
            .expect("wild rule returned no interpretation"),
    }
}

/// Evaluates 5 to 7 cards against a fixed wild selection, maximizing over
/// all 5-card subsets.
///
/// # Panics
///
/// Panics when given fewer than 5 or more than 7 cards; that is a caller
/// contract failure, not a game outcome.
pub fn evaluate_best(cards: &[Card], wild: &WildSelection) -> HandValue {
    assert!(
        (5..=7).contains(&cards.len()),
        "wild evaluation covers 5 to 7 cards, got {}",
        cards.len()
    );
    let mut best: Option<HandValue> = None;
    let mut idx = [0usize, 1, 2, 3, 4];
    loop {
        let subset = [
            cards[idx[0]],
            cards[idx[1]],
            cards[idx[2]],
            cards[idx[3]],
            cards[idx[4]],
        ];
        let value = evaluate_subset(&subset, wild);
        if best.as_ref().map_or(true, |b| value.strength() > b.strength()) {
            best = Some(value);
        }
        if !next_combination(&mut idx, cards.len()) {
            break;
        }
    }
    best.expect("at least one 5-card subset")
}

/// Best qualifying ace-to-five low over 5 to 7 cards, as the lexicographic
/// minimum of [`crate::hand::low_eight_or_better`] across 5-card subsets.
/// None when no subset qualifies; in hi/lo games that rolls the pot to the
/// high side, which is an outcome rather than an error.
pub fn best_low(cards: &[Card]) -> Option<[u8; 5]> {
    assert!(
        (5..=7).contains(&cards.len()),
        "low evaluation covers 5 to 7 cards, got {}",
        cards.len()
    );
    let mut best: Option<[u8; 5]> = None;
    let mut idx = [0usize, 1, 2, 3, 4];
    loop {
        let subset = [
            cards[idx[0]],
            cards[idx[1]],
            cards[idx[2]],
            cards[idx[3]],
            cards[idx[4]],
        ];
        if let Some(low) = crate::hand::low_eight_or_better(&subset) {
            if best.map_or(true, |b| low < b) {
                best = Some(low);
            }
        }
        if !next_combination(&mut idx, cards.len()) {
            break;
        }
    }
    best
}

/// Advances a sorted index combination in lexicographic order.
fn next_combination(idx: &mut [usize; 5], n: usize) -> bool {
    let k = idx.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if idx[i] != i + n - k {
            idx[i] += 1;
            for j in i + 1..k {
                idx[j] = idx[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

fn evaluate_subset(subset: &[Card; 5], wild: &WildSelection) -> HandValue {
    let (naturals, wilds) = wild.split(subset);
    if wilds == 0 {
        evaluate_five(subset)
    } else {
        best_with_wilds(&naturals, wilds)
    }
}

/// The best hand type reachable for `wilds` wild cards plus the given
/// naturals (together exactly 5 cards), probed high to low.
fn best_with_wilds(naturals: &[Card], wilds: usize) -> HandValue {
    assert!(wilds >= 1 && naturals.len() + wilds == 5);

    let mut rank_counts = [0u8; 15];
    for c in naturals {
        rank_counts[c.rank.value() as usize] += 1;
    }
    let suited = !naturals.is_empty() && naturals.iter().all(|c| c.suit == naturals[0].suit);
    let distinct = naturals
        .iter()
        .all(|c| rank_counts[c.rank.value() as usize] == 1);

    // Five of a kind: every natural the same rank (or no naturals at all).
    if naturals.is_empty() || naturals.iter().all(|c| c.rank == naturals[0].rank) {
        let rank = naturals.first().map(|c| c.rank).unwrap_or(Rank::Ace);
        return make_n_of_a_kind(naturals, wilds, rank, 5, &[]);
    }

    // Straight flush: naturals share a suit and fit one 5-rank window.
    if suited && distinct {
        if let Some(high) = best_straight_window(naturals) {
            let five = fill_straight(naturals, high, |_| naturals[0].suit);
            return HandValue {
                category: HandCategory::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
                best_five: straight_order(&five, high),
            };
        }
    }

    // Four of a kind.
    if let Some(rank) = best_rank_reaching(&rank_counts, wilds, 4) {
        let kicker = top_naturals_excluding(naturals, rank, 1);
        return make_n_of_a_kind(naturals, wilds, rank, 4, &kicker);
    }

    // Full house: wilds go to the trips, the pair must be natural.
    if let Some(trip) = best_rank_reaching(&rank_counts, wilds, 3) {
        let pair = (2..=14u8)
            .rev()
            .map(Rank::from_u8)
            .find(|&r| r != trip && rank_counts[r.value() as usize] >= 2);
        if let Some(pair) = pair {
            let mut five: Vec<Card> = naturals.to_vec();
            add_played_wilds(&mut five, naturals, trip, wilds);
            return HandValue {
                category: HandCategory::FullHouse,
                kickers: [trip.value(), pair.value(), 0, 0, 0],
                best_five: grouped_order(&five),
            };
        }
    }

    // Flush: only when the naturals already share the suit.
    if suited {
        let suit = naturals[0].suit;
        let fills = flush_fill_ranks(&rank_counts, wilds);
        let mut five: Vec<Card> = naturals.to_vec();
        for r in &fills {
            five.push(Card::new(suit, *r));
        }
        let mut ks: Vec<u8> = five.iter().map(|c| c.rank.value()).collect();
        ks.sort_unstable_by(|a, b| b.cmp(a));
        let mut kickers = [0u8; 5];
        kickers.copy_from_slice(&ks);
        return HandValue {
            category: HandCategory::Flush,
            kickers,
            best_five: grouped_order(&five),
        };
    }

    // Straight: wilds fill rank gaps; suits are assigned off-suit so the
    // substitution never manufactures a flush on the side.
    if distinct {
        if let Some(high) = best_straight_window(naturals) {
            let off_suit = |r: Rank| off_suit_for(naturals, r);
            let five = fill_straight(naturals, high, off_suit);
            return HandValue {
                category: HandCategory::Straight,
                kickers: [high, 0, 0, 0, 0],
                best_five: straight_order(&five, high),
            };
        }
    }

    // Three of a kind.
    if let Some(rank) = best_rank_reaching(&rank_counts, wilds, 3) {
        let kickers = top_naturals_excluding(naturals, rank, 2);
        return make_n_of_a_kind(naturals, wilds, rank, 3, &kickers);
    }

    // With a wild in hand, a lone pair is always reachable; two pair never
    // beats the trips the same wild would make, so the search lands here.
    let rank = naturals
        .iter()
        .map(|c| c.rank)
        .max_by_key(|r| r.value())
        .expect("naturals nonempty below five of a kind");
    let kickers = top_naturals_excluding(naturals, rank, 3);
    make_n_of_a_kind(naturals, wilds, rank, 2, &kickers)
}

/// Highest rank whose natural count plus wilds reaches `target` copies.
fn best_rank_reaching(rank_counts: &[u8; 15], wilds: usize, target: u8) -> Option<Rank> {
    (2..=14u8)
        .rev()
        .find(|&r| rank_counts[r as usize] > 0 && rank_counts[r as usize] + wilds as u8 >= target)
        .map(Rank::from_u8)
}

/// The `take` highest natural cards not of the given rank, high to low.
fn top_naturals_excluding(naturals: &[Card], rank: Rank, take: usize) -> Vec<Card> {
    let mut rest: Vec<Card> = naturals
        .iter()
        .copied()
        .filter(|c| c.rank != rank)
        .collect();
    rest.sort_unstable_by_key(|c| std::cmp::Reverse(c.rank.value()));
    rest.truncate(take);
    rest
}

/// Builds an n-of-a-kind hand: the naturals of `rank`, wilds played as
/// `rank` in leftover suits, and the given kicker cards.
fn make_n_of_a_kind(
    naturals: &[Card],
    wilds: usize,
    rank: Rank,
    n: usize,
    kickers: &[Card],
) -> HandValue {
    let mut five: Vec<Card> = naturals
        .iter()
        .copied()
        .filter(|c| c.rank == rank)
        .collect();
    add_played_wilds(&mut five, naturals, rank, wilds);
    debug_assert_eq!(five.len(), n);
    five.extend_from_slice(kickers);
    let category = match n {
        5 => HandCategory::FiveOfAKind,
        4 => HandCategory::FourOfAKind,
        3 => HandCategory::ThreeOfAKind,
        _ => HandCategory::OnePair,
    };
    let mut ks = [0u8; 5];
    ks[0] = rank.value();
    for (i, c) in kickers.iter().enumerate() {
        ks[i + 1] = c.rank.value();
    }
    HandValue {
        category,
        kickers: ks,
        best_five: grouped_order(&five),
    }
}

/// Appends the wild cards played as `rank`, choosing suits the naturals of
/// that rank do not already occupy (wrapping when more than four copies
/// are shown, which only happens for five of a kind).
fn add_played_wilds(five: &mut Vec<Card>, naturals: &[Card], rank: Rank, wilds: usize) {
    let used: Vec<Suit> = naturals
        .iter()
        .filter(|c| c.rank == rank)
        .map(|c| c.suit)
        .collect();
    let unused: Vec<Suit> = all_suits()
        .into_iter()
        .filter(|s| !used.contains(s))
        .collect();
    let mut pool = unused.into_iter().chain(all_suits().into_iter().cycle());
    for _ in 0..wilds {
        let suit = pool.next().expect("suit pool is never empty");
        five.push(Card::new(suit, rank));
    }
}

/// A suit for a wild straight card that differs from the first natural's
/// suit. The naturals here are mixed-suit (a suited straight would have
/// been caught as a straight flush), so the result can never end up as
/// five of one suit.
fn off_suit_for(naturals: &[Card], _rank: Rank) -> Suit {
    let avoid = naturals[0].suit;
    all_suits()
        .into_iter()
        .find(|&s| s != avoid)
        .expect("four suits exist")
}

/// Highest straight window covering every natural rank, with wilds for the
/// gaps. Returns the straight's high card value, 5 for the wheel.
fn best_straight_window(naturals: &[Card]) -> Option<u8> {
    // Ace-high windows first, wheel last.
    for high in (5..=14u8).rev() {
        let lo = high - 4;
        let in_window = |c: &Card| {
            let v = if high == 5 { c.rank.low_value() } else { c.rank.value() };
            v >= lo && v <= high
        };
        if naturals.iter().all(in_window) {
            return Some(high);
        }
    }
    None
}

/// Materializes a wild straight: naturals as held, each missing window
/// rank filled by a wild played at that rank with a caller-chosen suit.
fn fill_straight(naturals: &[Card], high: u8, suit_for: impl Fn(Rank) -> Suit) -> Vec<Card> {
    let lo = high - 4;
    let mut five: Vec<Card> = naturals.to_vec();
    for v in lo..=high {
        let present = naturals.iter().any(|c| {
            let nv = if high == 5 { c.rank.low_value() } else { c.rank.value() };
            nv == v
        });
        if !present {
            let rank = if v == 1 { Rank::Ace } else { Rank::from_u8(v) };
            five.push(Card::new(suit_for(rank), rank));
        }
    }
    five
}

/// Descending fill ranks for a wild flush: the highest ranks not already
/// held in the suit.
fn flush_fill_ranks(rank_counts: &[u8; 15], wilds: usize) -> Vec<Rank> {
    (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] == 0)
        .take(wilds)
        .map(Rank::from_u8)
        .collect()
}
