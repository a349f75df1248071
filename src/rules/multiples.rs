use super::generator::Draft;
use super::{build_rule, group_formula, BonusDetail, BonusRule, RuleBase, RuleInitError, RuleKind};
use crate::analysis::HandContext;
use crate::cards::{Card, Rank};
use crate::game_mode::GameMode;
use rand::RngCore;

/// `bonus_value × Σ rank × count` over several groups, plus the trump bonus
/// when one of the groups is of the trump rank.
fn groups_detail(
    base: &RuleBase,
    ctx: &HandContext<'_>,
    groups: &[(Rank, u8)],
    what: &str,
    trump_bonus: i64,
) -> BonusDetail {
    let (factor, formula) = group_formula(groups);
    let names: Vec<String> = groups.iter().map(|(rank, _)| rank.to_string()).collect();
    let trump_group = ctx.trump_rank().is_some_and(|t| groups.iter().any(|(rank, _)| *rank == t));
    base.detail(factor, &formula, format!("{what}: {}", names.join(", "))).bonus_if(
        trump_group,
        "a group of trump rank",
        trump_bonus,
    )
}

/// Draw `groups` distinct ranks `size` times each, then singletons.
fn grouped_candidate(
    rng: &mut dyn RngCore,
    cards: usize,
    trump: Option<Card>,
    groups: usize,
    size: usize,
    exclude: &[Rank],
) -> Option<Vec<Card>> {
    let mut draft = Draft::new(rng, cards, trump);
    for rank in draft.pick_ranks(groups, exclude)? {
        draft.rank(rank, size)?;
    }
    draft.fill_singles()?;
    draft.finish()
}

#[derive(Debug, Clone)]
pub struct MultipleFourOfAKind {
    base: RuleBase,
}

impl MultipleFourOfAKind {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::MultipleFourOfAKind, game_mode, |base| Self { base })
    }
}

impl BonusRule for MultipleFourOfAKind {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let quads = ctx.multiple_four_of_a_kind()?;
        let tb = self.base.trump_bonus().four_of_kind;
        Some(groups_detail(&self.base, ctx, &quads, "fours of a kind", tb))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let n = self.base.game_mode.number_of_cards;
        grouped_candidate(rng, n, trump, 2, 4, &[Rank::Ace, Rank::King])
    }
}

#[derive(Debug, Clone)]
pub struct MultipleTriplets {
    base: RuleBase,
}

impl MultipleTriplets {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::MultipleTriplets, game_mode, |base| Self { base })
    }
}

impl BonusRule for MultipleTriplets {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let trips = ctx.multiple_triplets()?;
        let tb = self.base.trump_bonus().triplets;
        Some(groups_detail(&self.base, ctx, &trips, "triplets", tb))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let n = self.base.game_mode.number_of_cards;
        grouped_candidate(rng, n, trump, 2, 3, &[])
    }
}

#[derive(Debug, Clone)]
pub struct MultiplePairs {
    base: RuleBase,
}

impl MultiplePairs {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::MultiplePairs, game_mode, |base| Self { base })
    }
}

impl BonusRule for MultiplePairs {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let pairs: Vec<(Rank, u8)> =
            ctx.multiple_pairs()?.into_iter().map(|rank| (rank, 2)).collect();
        let tb = self.base.trump_bonus().pair;
        Some(groups_detail(&self.base, ctx, &pairs, "pairs", tb))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let n = self.base.game_mode.number_of_cards;
        grouped_candidate(rng, n, trump, 2, 2, &[])
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

    #[test]
    fn two_quads_in_eight_cards() {
        let rule = MultipleFourOfAKind::new(&GameMode::new(8, false)).unwrap();
        let detail = rule.evaluate(&hand("9♣ 9♦ 9♥ 9♠ 5♣ 5♦ 5♥ 5♠"), None).unwrap();
        assert_eq!(detail.base_bonus, 180 * (36 + 20));
        assert_eq!(detail.calculation, "180 × (9×4 + 5×4) = 10080");
    }

    #[test]
    fn kings_and_aces_do_not_count_as_quads() {
        let rule = MultipleFourOfAKind::new(&GameMode::new(8, false)).unwrap();
        assert!(rule.evaluate(&hand("K♣ K♦ K♥ K♠ 5♣ 5♦ 5♥ 5♠"), None).is_none());
    }

    #[test]
    fn trump_rank_quad_earns_extra() {
        let rule = MultipleFourOfAKind::new(&GameMode::new(8, true)).unwrap();
        let trump = Some("5♣".parse().unwrap());
        let detail = rule.evaluate(&hand("9♣ 9♦ 9♥ 9♠ 5♣ 5♦ 5♥ 5♠"), trump).unwrap();
        assert_eq!(detail.additional_bonus, 80);
    }

    #[test]
    fn two_triplets_in_six_cards() {
        let rule = MultipleTriplets::new(&GameMode::new(6, false)).unwrap();
        let detail = rule.evaluate(&hand("J♣ J♦ J♥ 3♠ 3♦ 3♥"), None).unwrap();
        assert_eq!(detail.base_bonus, 160 * (33 + 9));
        assert_eq!(detail.descriptions[0], "triplets: J, 3");
    }

    #[test]
    fn two_pairs_in_five_cards() {
        let rule = MultiplePairs::new(&GameMode::new(5, false)).unwrap();
        let detail = rule.evaluate(&hand("J♣ J♦ 3♠ 3♦ 8♥"), None).unwrap();
        assert_eq!(detail.base_bonus, 110 * (22 + 6));
        assert_eq!(detail.additional_bonus, 0);
    }

    #[test]
    fn pairs_with_a_trump_rank_pair() {
        let rule = MultiplePairs::new(&GameMode::new(6, true)).unwrap();
        let trump = Some("3♣".parse().unwrap());
        // Two trumps beside a pair of Kings pad them to four of a kind.
        assert!(rule.evaluate(&hand("K♣ K♦ 3♠ 3♦ 8♥ Q♠"), trump).is_none());
        // Aces never make four of a kind, so the pairs stand.
        let detail = rule.evaluate(&hand("A♣ A♦ 3♠ 3♦ 8♥ Q♠"), trump).unwrap();
        assert_eq!(detail.base_bonus, 110 * (28 + 6));
        assert_eq!(detail.additional_bonus, 20);
    }

    #[test]
    fn generated_examples_match_their_rule() {
        for (n, trump) in [(8, None), (9, Some("7♥".parse().unwrap()))] {
            let mode = GameMode::new(n, trump.is_some());
            let rules: Vec<Box<dyn BonusRule>> = vec![
                Box::new(MultipleFourOfAKind::new(&mode).unwrap()),
                Box::new(MultipleTriplets::new(&mode).unwrap()),
                Box::new(MultiplePairs::new(&mode).unwrap()),
            ];
            let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
            for rule in &rules {
                let example = rule.create_example_hand(&mut rng, trump).unwrap();
                assert!(rule.evaluate(&example, trump).is_some(), "{}: {example}", rule.name());
            }
        }
    }
}
