use crate::cards::{Card, Rank};
use crate::errors::GameError;
use crate::phase::{HandState, Phase};
use crate::variants::{BettingKind, DealConfig, ShowdownMode, Variant, VariantId, VariantMeta};
use crate::wild::WildRule;

/// Five Card Draw with blinds: five down cards, a betting round, one
/// draw of up to three cards (four behind a shown Ace), a second betting
/// round, then showdown.
#[derive(Debug, Clone)]
pub struct FiveCardDraw {
    betting: BettingKind,
}

impl FiveCardDraw {
    pub fn new(betting: BettingKind) -> Self {
        Self { betting }
    }
}

impl Variant for FiveCardDraw {
    fn meta(&self) -> VariantMeta {
        VariantMeta {
            id: VariantId::FiveCardDraw,
            name: "Five Card Draw",
            min_players: 2,
            max_players: 6,
            down_cards: 5,
            up_cards: 0,
            has_draw: true,
            wild_summary: None,
            betting: self.betting,
        }
    }

    fn initial_phase(&self) -> Phase {
        Phase::PreDrawBet
    }

    fn next_phase(&self, _state: &HandState, current: Phase) -> Phase {
        match current {
            Phase::PreDrawBet => Phase::Draw,
            Phase::Draw => Phase::PostDrawBet,
            Phase::PostDrawBet => Phase::Showdown,
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
        None
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

    /// Up to three discards, or four when the single kept card is an Ace
    /// (shown to the table by convention).
    fn validate_discards(&self, cards: &[Card], discards: &[usize]) -> Result<(), GameError> {
        match discards.len() {
            0..=3 => Ok(()),
            4 => {
                let kept = cards
                    .iter()
                    .enumerate()
                    .find(|(i, _)| !discards.contains(i))
                    .map(|(_, c)| c);
                match kept {
                    Some(c) if c.rank == Rank::Ace => Ok(()),
                    _ => Err(GameError::InvalidDiscard {
                        reason: "four discards are only allowed behind an Ace",
                    }),
                }
            }
            _ => Err(GameError::InvalidDiscard {
                reason: "cannot discard more than four cards",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn v() -> FiveCardDraw {
        FiveCardDraw::new(BettingKind::Blinds {
            small_blind: 1,
            big_blind: 2,
        })
    }

    fn hand(ranks: [Rank; 5]) -> Vec<Card> {
        ranks
            .into_iter()
            .map(|r| Card::new(Suit::Clubs, r))
            .collect()
    }

    #[test]
    fn three_discards_always_allowed() {
        let cards = hand([Rank::Two, Rank::Five, Rank::Nine, Rank::Jack, Rank::King]);
        assert!(v().validate_discards(&cards, &[0, 1, 2]).is_ok());
    }

    #[test]
    fn four_discards_need_an_ace_behind() {
        let no_ace = hand([Rank::Two, Rank::Five, Rank::Nine, Rank::Jack, Rank::King]);
        assert!(v().validate_discards(&no_ace, &[0, 1, 2, 3]).is_err());
        let with_ace = hand([Rank::Ace, Rank::Five, Rank::Nine, Rank::Jack, Rank::King]);
        assert!(v().validate_discards(&with_ace, &[1, 2, 3, 4]).is_ok());
        // Discarding the Ace itself leaves a non-Ace behind.
        assert!(v().validate_discards(&with_ace, &[0, 1, 2, 3]).is_err());
    }

    #[test]
    fn draw_sits_between_the_betting_rounds() {
        let s = HandState::new(&[100, 100], 0);
        assert_eq!(v().next_phase(&s, Phase::PreDrawBet), Phase::Draw);
        assert_eq!(v().next_phase(&s, Phase::Draw), Phase::PostDrawBet);
        assert_eq!(v().next_phase(&s, Phase::PostDrawBet), Phase::Showdown);
    }
}
