use super::generator::Draft;
use super::{build_rule, BonusDetail, BonusRule, RuleBase, RuleInitError, RuleKind};
use crate::analysis::HandContext;
use crate::cards::Card;
use crate::game_mode::GameMode;
use rand::RngCore;

/// Fallback rule: any hand no other pattern claims, scored on its highest card.
#[derive(Debug, Clone)]
pub struct HighCard {
    base: RuleBase,
}

impl HighCard {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::HighCard, game_mode, |base| Self { base })
    }
}

impl BonusRule for HighCard {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let rank = ctx.high_card()?;
        let detail = self.base.detail(
            i64::from(rank.value()),
            &format!("({})", rank.value()),
            format!("high card {rank}"),
        );
        Some(detail.bonus_if(ctx.has_trump(), "trump held", self.base.trump_bonus().high_card))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let mut draft = Draft::new(rng, self.base.game_mode.number_of_cards, trump);
        draft.fill_singles()?;
        draft.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Hand;

    #[test]
    fn scores_the_highest_rank() {
        let rule = HighCard::new(&GameMode::new(3, false)).unwrap();
        let hand: Hand = "2♥ 9♠ J♦".parse().unwrap();
        let detail = rule.evaluate(&hand, None).unwrap();
        assert_eq!(detail.base_bonus, 10 * 11);
        assert_eq!(detail.calculation, "10 × (11) = 110");
        assert_eq!(detail.descriptions[0], "high card J");
    }

    #[test]
    fn steps_aside_for_any_pattern() {
        let rule = HighCard::new(&GameMode::new(3, false)).unwrap();
        for s in ["2♥ 2♠ J♦", "2♥ 3♠ 4♦", "2♥ 9♥ J♥"] {
            let hand: Hand = s.parse().unwrap();
            assert!(rule.evaluate(&hand, None).is_none(), "{s}");
        }
    }

    #[test]
    fn a_held_trump_pairs_the_top_card() {
        let mode = GameMode::new(4, true);
        let hand: Hand = "2♥ 9♠ J♦ 5♣".parse().unwrap();
        let trump = Some("5♥".parse().unwrap());
        assert!(HighCard::new(&mode).unwrap().evaluate(&hand, trump).is_none());
        let pair = crate::rules::PairRule::new(&mode).unwrap().evaluate(&hand, trump).unwrap();
        assert_eq!(pair.base_bonus, 100 * 22);
        assert_eq!(pair.additional_bonus, 20);
    }
}
