use crate::phase::{HandState, Phase};
use crate::variants::{BettingKind, DealConfig, ShowdownMode, Variant, VariantId, VariantMeta};
use crate::wild::WildRule;

/// Seven Card Stud, high or hi/lo split (eight-or-better low).
///
/// Ante and bring-in, then betting on third through seventh street. The
/// small bet applies on third and fourth street, the big bet from fifth
/// street on.
#[derive(Debug, Clone)]
pub struct SevenCardStud {
    hi_lo: bool,
    betting: BettingKind,
}

impl SevenCardStud {
    pub fn high(betting: BettingKind) -> Self {
        Self {
            hi_lo: false,
            betting,
        }
    }

    pub fn hi_lo(betting: BettingKind) -> Self {
        Self {
            hi_lo: true,
            betting,
        }
    }
}

impl Variant for SevenCardStud {
    fn meta(&self) -> VariantMeta {
        VariantMeta {
            id: if self.hi_lo {
                VariantId::SevenCardStudHiLo
            } else {
                VariantId::SevenCardStud
            },
            name: if self.hi_lo {
                "Seven Card Stud Hi/Lo"
            } else {
                "Seven Card Stud"
            },
            min_players: 2,
            max_players: 7,
            down_cards: 3,
            up_cards: 4,
            has_draw: false,
            wild_summary: None,
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
        None
    }

    fn showdown_mode(&self) -> ShowdownMode {
        if self.hi_lo {
            ShowdownMode::HiLoSplit
        } else {
            ShowdownMode::HighOnly
        }
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
