use dealers_choice_engine::player::PlayerState;
use dealers_choice_engine::pot::PotManager;

fn table(contribs: &[(u64, bool)], reference_seat: usize) -> (Vec<PlayerState>, PotManager) {
    let mut pm = PotManager::new(contribs.len(), reference_seat);
    let players = contribs
        .iter()
        .enumerate()
        .map(|(seat, &(amount, folded))| {
            let mut p = PlayerState::new(seat, 1000);
            p.folded = folded;
            pm.add_contribution(seat, amount);
            p
        })
        .collect();
    (players, pm)
}

#[test]
fn short_all_in_builds_a_side_pot() {
    // Seats contribute 100, 50 (all-in), 100: a 150 main pot everyone can
    // win plus a 100 side pot for the two full contributors.
    let (players, pm) = table(&[(100, false), (50, false), (100, false)], 0);
    let pots = pm.side_pots(&players);
    assert_eq!(pots.len(), 2);
    assert_eq!(pots[0].amount, 150);
    assert_eq!(pots[0].eligible, vec![0, 1, 2]);
    assert_eq!(pots[1].amount, 100);
    assert_eq!(pots[1].eligible, vec![0, 2]);

    // The short stack wins the main pot; seat 2 takes the side pot.
    let payouts = pm.award_pots(&players, |eligible| {
        if eligible.contains(&1) {
            vec![1]
        } else {
            vec![2]
        }
    });
    assert_eq!(payouts[&1], 150);
    assert_eq!(payouts[&2], 100);
}

#[test]
fn ledger_totals_are_monotonic_and_resettable() {
    let mut pm = PotManager::new(2, 0);
    pm.add_contribution(0, 10);
    pm.add_contribution(0, 15);
    pm.add_contribution(1, 25);
    assert_eq!(pm.contribution(0), 25);
    assert_eq!(pm.total(), 50);
    pm.reset();
    assert_eq!(pm.total(), 0);
}

#[test]
fn tied_winners_split_with_odd_chips_clockwise() {
    // 101 chips, three-way tie, dealer at seat 0: the two extra chips go
    // to seats 1 and 2, the first seats clockwise from the dealer's left.
    let (players, pm) = table(&[(33, false), (33, false), (35, false)], 0);
    let payouts = pm.award_pots(&players, |eligible| eligible.to_vec());
    assert_eq!(payouts[&1], 34);
    assert_eq!(payouts[&2], 34);
    assert_eq!(payouts[&0], 33);
}

#[test]
fn hilo_split_gives_the_odd_chip_to_the_high_side() {
    let (players, pm) = table(&[(33, false), (34, false), (34, false)], 0);
    // Seat 0 wins high, seat 1 wins low: 101 chips split 51 high, 50 low.
    let payouts = pm.award_pots_hilo(&players, |_| (vec![0], Some(vec![1])));
    assert_eq!(payouts[&0], 51);
    assert_eq!(payouts[&1], 50);
}

#[test]
fn no_qualifying_low_rolls_the_whole_pot_high() {
    let (players, pm) = table(&[(40, false), (40, false)], 0);
    let payouts = pm.award_pots_hilo(&players, |_| (vec![1], None));
    assert_eq!(payouts[&1], 80);
    assert!(!payouts.contains_key(&0));
}

#[test]
fn hilo_split_respects_side_pot_eligibility() {
    // Seat 1 is all-in short; it can win (half of) the main pot only.
    let (players, pm) = table(&[(100, false), (40, false), (100, false)], 0);
    let payouts = pm.award_pots_hilo(&players, |eligible| {
        let low = if eligible.contains(&1) { Some(vec![1]) } else { None };
        (vec![0], low)
    });
    // Main pot 120 splits 60/60; side pot 120 rolls high to seat 0.
    assert_eq!(payouts[&1], 60);
    assert_eq!(payouts[&0], 60 + 120);
    let total: u64 = payouts.values().sum();
    assert_eq!(total, pm.total());
}

#[test]
fn folded_contributions_sweeten_the_pot_without_eligibility() {
    let (players, pm) = table(&[(80, false), (30, true), (80, false)], 0);
    let pots = pm.side_pots(&players);
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].amount, 190);
    assert_eq!(pots[0].eligible, vec![0, 2]);
}

#[test]
fn side_pot_computation_is_idempotent() {
    let (players, pm) = table(&[(200, false), (75, false), (200, false), (40, true)], 0);
    let first = pm.side_pots(&players);
    let second = pm.side_pots(&players);
    assert_eq!(first, second);
    let total: u64 = first.iter().map(|p| p.amount).sum();
    assert_eq!(total, pm.total());
}
