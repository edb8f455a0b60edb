use crate::cards::{Card, Rank};
use crate::errors::GameError;
use crate::phase::{HandState, Phase};
use crate::variants::{BettingKind, DealConfig, ShowdownMode, Variant, VariantId, VariantMeta};
use crate::wild::{LowestCardWild, WildRule};

/// Kings and Lows: five cards down, Kings wild plus each hand's lowest
/// card wild. After one betting round every seat declares drop or stay;
/// stayers may replace any number of cards, and the showdown happens once
/// after all draws complete.
///
/// Stayer-count branches: two or more stayers go to a normal showdown; a
/// lone stayer draws and then plays against a fresh five-card deck hand;
/// if everyone drops the hand ends and the pot carries over.
#[derive(Debug, Clone)]
pub struct KingsAndLows {
    betting: BettingKind,
    rule: LowestCardWild,
}

impl KingsAndLows {
    pub fn new(betting: BettingKind) -> Self {
        Self {
            betting,
            rule: LowestCardWild::with_always_wild(
                Rank::King,
                "Kings wild, and each hand's lowest card wild",
            ),
        }
    }
}

impl Variant for KingsAndLows {
    fn meta(&self) -> VariantMeta {
        VariantMeta {
            id: VariantId::KingsAndLows,
            name: "Kings and Lows",
            min_players: 2,
            max_players: 7,
            down_cards: 5,
            up_cards: 0,
            has_draw: true,
            wild_summary: Some(self.rule.summary()),
            betting: self.betting,
        }
    }

    fn initial_phase(&self) -> Phase {
        Phase::PreDrawBet
    }

    fn next_phase(&self, state: &HandState, current: Phase) -> Phase {
        match current {
            Phase::PreDrawBet => Phase::DropOrStay,
            Phase::DropOrStay => match state.count_in_hand() {
                0 => Phase::Complete,
                _ => Phase::Draw,
            },
            Phase::Draw => match state.count_in_hand() {
                0 => Phase::Complete,
                1 => Phase::PlayerVsDeck,
                _ => Phase::Showdown,
            },
            _ => Phase::Complete,
        }
    }

    fn deal_for(&self, phase: Phase) -> DealConfig {
        match phase {
            Phase::PreDrawBet => DealConfig { down: 5, up: 0 },
            _ => DealConfig::default(),
        }
    }

    fn wild_rule(&self) -> Option<&dyn WildRule> {
        Some(&self.rule)
    }

    fn showdown_mode(&self) -> ShowdownMode {
        ShowdownMode::HighOnly
    }

    fn bet_size(&self, _phase: Phase) -> u64 {
        match self.betting {
            BettingKind::Blinds { big_blind, .. } => big_blind,
            BettingKind::AnteBringIn { big_bet, .. } => big_bet,
        }
    }

    /// Stayers may replace any number of their five cards.
    fn validate_discards(&self, _cards: &[Card], discards: &[usize]) -> Result<(), GameError> {
        if discards.len() <= 5 {
            Ok(())
        } else {
            Err(GameError::InvalidDiscard {
                reason: "cannot discard more than five cards",
            })
        }
    }

    /// Losing stayers match the pot, seeding the next hand.
    fn losers_match_pot(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v() -> KingsAndLows {
        KingsAndLows::new(BettingKind::AnteBringIn {
            ante: 5,
            bring_in: 0,
            small_bet: 10,
            big_bet: 10,
        })
    }

    #[test]
    fn all_drop_ends_the_hand() {
        let mut s = HandState::new(&[100, 100], 0);
        s.players[0].folded = true;
        s.players[1].folded = true;
        assert_eq!(v().next_phase(&s, Phase::DropOrStay), Phase::Complete);
    }

    #[test]
    fn lone_stayer_draws_then_faces_the_deck() {
        let mut s = HandState::new(&[100, 100, 100], 0);
        s.players[0].folded = true;
        s.players[2].folded = true;
        assert_eq!(v().next_phase(&s, Phase::DropOrStay), Phase::Draw);
        assert_eq!(v().next_phase(&s, Phase::Draw), Phase::PlayerVsDeck);
    }

    #[test]
    fn multiple_stayers_reach_a_single_showdown_after_draws() {
        let s = HandState::new(&[100, 100, 100], 0);
        assert_eq!(v().next_phase(&s, Phase::Draw), Phase::Showdown);
    }
}
