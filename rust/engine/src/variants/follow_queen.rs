use crate::phase::{HandState, Phase};
use crate::variants::{BettingKind, DealConfig, ShowdownMode, Variant, VariantId, VariantMeta};
use crate::wild::{FollowTheQueen, WildRule};

/// Follow the Queen: Seven Card Stud where Queens are wild along with the
/// rank dealt face-up right after the most recent face-up Queen.
///
/// The wild rule reads the table-wide deal history, so the wild rank can
/// change street to street until the last up card has landed; evaluation
/// at showdown uses the final history.
#[derive(Debug, Clone)]
pub struct FollowTheQueenStud {
    betting: BettingKind,
    rule: FollowTheQueen,
}

impl FollowTheQueenStud {
    pub fn new(betting: BettingKind) -> Self {
        Self {
            betting,
            rule: FollowTheQueen::new(),
        }
    }
}

impl Variant for FollowTheQueenStud {
    fn meta(&self) -> VariantMeta {
        VariantMeta {
            id: VariantId::FollowTheQueen,
            name: "Follow the Queen",
            min_players: 2,
            max_players: 7,
            down_cards: 3,
            up_cards: 4,
            has_draw: false,
            wild_summary: Some(self.rule.summary()),
            betting: self.betting,
        }
    }

    fn initial_phase(&self) -> Phase {
        Phase::ThirdStreet
    }

    fn next_phase(&self, _state: &HandState, current: Phase) -> Phase {
        match current {
            Phase::ThirdStreet => Phase::FourthStreet,
            Phase::FourthStreet => Phase::FifthStreet,
            Phase::FifthStreet => Phase::SixthStreet,
            Phase::SixthStreet => Phase::SeventhStreet,
            Phase::SeventhStreet => Phase::Showdown,
            _ => Phase::Complete,
        }
    }

    fn deal_for(&self, phase: Phase) -> DealConfig {
        match phase {
            Phase::ThirdStreet => DealConfig { down: 2, up: 1 },
            Phase::FourthStreet | Phase::FifthStreet | Phase::SixthStreet => {
                DealConfig { down: 0, up: 1 }
            }
            Phase::SeventhStreet => DealConfig { down: 1, up: 0 },
            _ => DealConfig::default(),
        }
    }

    fn wild_rule(&self) -> Option<&dyn WildRule> {
        Some(&self.rule)
    }

    fn showdown_mode(&self) -> ShowdownMode {
        ShowdownMode::HighOnly
    }

    fn bet_size(&self, phase: Phase) -> u64 {
        match self.betting {
            BettingKind::AnteBringIn {
                small_bet, big_bet, ..
            } => match phase {
                Phase::ThirdStreet | Phase::FourthStreet => small_bet,
                _ => big_bet,
            },
            BettingKind::Blinds { big_blind, .. } => big_blind,
        }
    }
}
