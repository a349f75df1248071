//! Rules that only exist in trump game modes.

use super::generator::Draft;
use super::{build_rule, group_formula, BonusDetail, BonusRule, RuleBase, RuleInitError, RuleKind};
use crate::analysis::HandContext;
use crate::cards::{Card, Rank};
use crate::game_mode::GameMode;
use rand::RngCore;

/// Four natural cards of one rank (not Aces) joined by a trump card.
#[derive(Debug, Clone)]
pub struct FiveOfAKind {
    base: RuleBase,
}

impl FiveOfAKind {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::FiveOfAKind, game_mode, |base| Self { base })
    }
}

impl BonusRule for FiveOfAKind {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let rank = ctx.five_of_a_kind()?;
        let (factor, formula) = group_formula(&[(rank, 5)]);
        let detail = self.base.detail(factor, &formula, format!("five of a kind of {rank}"));
        Some(detail.bonus("trump makes the fifth card", self.base.trump_bonus().five_of_kind))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let mut draft = Draft::new(rng, self.base.game_mode.number_of_cards, trump);
        let rank = *draft.pick_ranks(1, &[Rank::Ace])?.first()?;
        draft.rank(rank, 4)?;
        draft.trumps(1)?;
        draft.fill_singles()?;
        draft.finish()
    }
}

/// Every card is trump, or at least four trump cards are held.
#[derive(Debug, Clone)]
pub struct TrumpOfAKind {
    base: RuleBase,
}

impl TrumpOfAKind {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::TrumpOfAKind, game_mode, |base| Self { base })
    }
}

impl BonusRule for TrumpOfAKind {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        if !ctx.trump_of_a_kind() {
            return None;
        }
        let trump = ctx.trump_rank()?;
        let wilds = i64::try_from(ctx.wilds).ok()?;
        let mut factor = i64::from(trump.value()) * wilds;
        let mut formula = format!("{}×{}", trump.value(), wilds);
        for card in &ctx.naturals {
            factor += i64::from(card.rank().value());
            formula.push_str(&format!(" + {}", card.rank().value()));
        }
        Some(self.base.detail(
            factor,
            &format!("({formula})"),
            format!("{wilds} trump cards of rank {trump}"),
        ))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let size = self.base.game_mode.number_of_cards;
        let mut draft = Draft::new(rng, size, trump);
        draft.trumps(size.min(4))?;
        draft.fill_singles()?;
        draft.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Hand;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn hand(s: &str) -> Hand {
        s.parse().expect("valid hand")
    }

    fn card(s: &str) -> Card {
        s.parse().expect("valid card")
    }

    #[test]
    fn five_of_a_kind_always_pays_the_trump_bonus() {
        let rule = FiveOfAKind::new(&GameMode::new(5, true)).unwrap();
        let detail = rule.evaluate(&hand("9♣ 9♦ 9♥ 9♠ 3♦"), Some(card("3♣"))).unwrap();
        assert_eq!(detail.base_bonus, 140 * 45);
        assert_eq!(detail.additional_bonus, 120);
        assert_eq!(detail.calculation, "140 × (9×5) + 120 = 6420");
    }

    #[test]
    fn five_of_a_kind_needs_the_trump() {
        let rule = FiveOfAKind::new(&GameMode::new(5, true)).unwrap();
        assert!(rule.evaluate(&hand("9♣ 9♦ 9♥ 9♠ 3♦"), None).is_none());
        assert!(rule.evaluate(&hand("9♣ 9♦ 9♥ 9♠ 3♦"), Some(card("4♣"))).is_none());
    }

    #[test]
    fn all_trump_hand() {
        let rule = TrumpOfAKind::new(&GameMode::new(3, true)).unwrap();
        let detail = rule.evaluate(&hand("7♣ 7♦ 7♠"), Some(card("7♥"))).unwrap();
        assert_eq!(detail.base_bonus, 150 * 21);
        assert_eq!(detail.additional_bonus, 0);
        assert_eq!(detail.calculation, "150 × (7×3) = 3150");
    }

    #[test]
    fn four_trumps_with_naturals() {
        let rule = TrumpOfAKind::new(&GameMode::new(6, true)).unwrap();
        let detail = rule.evaluate(&hand("7♣ 7♦ 7♠ 7♥ K♦ 2♣"), Some(card("7♥"))).unwrap();
        assert_eq!(detail.base_bonus, 150 * (28 + 15));
        assert!(rule.evaluate(&hand("7♣ 7♦ 7♠ K♥ K♦ 2♣"), Some(card("7♥"))).is_none());
    }

    #[test]
    fn trump_rules_ignore_trump_in_plain_evaluation() {
        let rule = TrumpOfAKind::new(&GameMode::new(3, true)).unwrap();
        assert!(rule.evaluate(&hand("7♣ 7♦ 7♠"), None).is_none());
    }

    #[test]
    fn generated_examples_match_their_rule() {
        let trump = Some(card("7♥"));
        for n in [3, 5, 9] {
            let mode = GameMode::new(n, true);
            let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
            let tok = TrumpOfAKind::new(&mode).unwrap();
            let example = tok.create_example_hand(&mut rng, trump).unwrap();
            assert!(tok.evaluate(&example, trump).is_some());
            if n >= 5 {
                let five = FiveOfAKind::new(&mode).unwrap();
                let example = five.create_example_hand(&mut rng, trump).unwrap();
                assert!(five.evaluate(&example, trump).is_some());
            }
        }
    }
}
