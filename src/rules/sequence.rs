//! Run-shaped rules: royal flush, straight flush and the two colour sequences.

use super::generator::Draft;
use super::{build_rule, sum_formula, BonusDetail, BonusRule, RuleBase, RuleInitError, RuleKind};
use crate::analysis::{HandContext, SequenceFill};
use crate::cards::{Card, Color, Rank, Suit};
use crate::game_mode::GameMode;
use rand::RngCore;

fn rank_symbol(value: u8) -> &'static str {
    Rank::from_value(value).map_or("?", Rank::symbol)
}

fn run_label(ranks: &[u8]) -> String {
    match (ranks.first(), ranks.last()) {
        (Some(&lo), Some(&hi)) => format!("{} to {}", rank_symbol(lo), rank_symbol(hi)),
        _ => String::new(),
    }
}

/// Base detail for a completed run: `bonus_value × Σ ranks`.
fn run_detail(base: &RuleBase, seq: &SequenceFill, what: &str) -> BonusDetail {
    let (factor, formula) = sum_formula(&seq.ranks);
    let how = if seq.wild { ", completed with trump" } else { "" };
    base.detail(factor, &formula, format!("{what} {}{how}", run_label(&seq.ranks)))
}

/// Where a held trump card sits in the run.
fn positional(base: &RuleBase, ctx: &HandContext<'_>, detail: BonusDetail) -> BonusDetail {
    let Some(trump) = ctx.trump.filter(|_| ctx.has_trump()) else {
        return detail;
    };
    let tb = base.trump_bonus();
    let middle = ctx.hand.is_trump_in_middle(trump);
    let adjacent = ctx.hand.is_rank_adjacent_to_trump(trump);
    detail
        .bonus_if(middle, "trump card inside the run", tb.card_in_middle)
        .bonus_if(adjacent, "rank next to the trump", tb.rank_adjacent)
}

/// Ascending run of `size` ranks starting at a random rank no lower than two
/// and topping out at `max_top`.
fn random_run(draft: &mut Draft<'_>, size: usize, max_top: u8) -> Option<Vec<Rank>> {
    let span = u8::try_from(size).ok()?.checked_sub(1)?;
    let start = Rank::random_between(draft.rng(), Rank::MIN_VALUE, max_top.checked_sub(span)?)?;
    (0..=span).map(|i| Rank::from_value(start.value() + i)).collect()
}

/// All cards of one suit holding the top ranks, Ace first.
#[derive(Debug, Clone)]
pub struct RoyalFlush {
    base: RuleBase,
}

impl RoyalFlush {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::RoyalFlush, game_mode, |base| Self { base })
    }
}

impl BonusRule for RoyalFlush {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        if !ctx.royal_flush() {
            return None;
        }
        let mut ranks: Vec<u8> = ctx.hand.as_slice().iter().map(|c| c.rank().value()).collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let (factor, formula) = sum_formula(&ranks);
        let suit = ctx.hand.as_slice().first().map(|c| c.suit())?;
        let detail = self.base.detail(
            factor,
            &formula,
            format!("royal flush in {suit} from A down to {}", rank_symbol(*ranks.last()?)),
        );
        let extra = self.base.trump_bonus().royal_flush;
        Some(detail.bonus_if(ctx.has_trump(), "trump in the royal flush", extra))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let size = self.base.game_mode.number_of_cards;
        let mut draft = Draft::new(rng, size, trump);
        let suit = draft.pick_suit();
        for rank in Rank::top_n(size) {
            draft.card(rank, suit)?;
        }
        draft.finish()
    }
}

/// Consecutive ranks in one suit, not a royal flush.
#[derive(Debug, Clone)]
pub struct StraightFlush {
    base: RuleBase,
}

impl StraightFlush {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::StraightFlush, game_mode, |base| Self { base })
    }
}

impl BonusRule for StraightFlush {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let seq = ctx.straight_flush()?;
        let extra = self.base.trump_bonus().straight_flush;
        let detail = run_detail(&self.base, &seq, "straight flush").bonus_if(
            seq.wild,
            "trump completes the straight flush",
            extra,
        );
        Some(positional(&self.base, ctx, detail))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let size = self.base.game_mode.number_of_cards;
        let mut draft = Draft::new(rng, size, trump);
        let suit = draft.pick_suit();
        // Topping out at the King keeps the run clear of a royal flush.
        for rank in random_run(&mut draft, size, Rank::King.value())? {
            draft.card(rank, suit)?;
        }
        if draft.trump_rank().is_some() && draft.coin() {
            draft.swap_in_trump()?;
        }
        draft.finish()
    }
}

/// Consecutive ranks of one colour spread over both suits of that colour.
#[derive(Debug, Clone)]
pub struct SameColorsSequence {
    base: RuleBase,
}

impl SameColorsSequence {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::SameColorsSequence, game_mode, |base| Self { base })
    }
}

impl BonusRule for SameColorsSequence {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let seq = ctx.same_colors_sequence()?;
        let detail = run_detail(&self.base, &seq, "same colour sequence")
            .bonus_if(seq.wild, "trump completes the sequence", self.base.trump_bonus().same_color);
        Some(positional(&self.base, ctx, detail))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let size = self.base.game_mode.number_of_cards;
        let mut draft = Draft::new(rng, size, trump);
        let color = if draft.coin() { Color::Red } else { Color::Black };
        let suits = Suit::of_color(color);
        let run = random_run(&mut draft, size, Rank::Ace.value())?;
        for (i, rank) in run.into_iter().enumerate() {
            let suit = match i {
                0 => suits[0],
                1 => suits[1],
                _ if draft.coin() => suits[0],
                _ => suits[1],
            };
            draft.card(rank, suit)?;
        }
        draft.finish()
    }
}

/// Consecutive ranks mixing red and black cards.
#[derive(Debug, Clone)]
pub struct DifferentColorsSequence {
    base: RuleBase,
}

impl DifferentColorsSequence {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::DifferentColorsSequence, game_mode, |base| Self { base })
    }
}

impl BonusRule for DifferentColorsSequence {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let seq = ctx.different_colors_sequence()?;
        let detail = run_detail(&self.base, &seq, "mixed colour sequence")
            .bonus_if(seq.wild, "trump completes the sequence", self.base.trump_bonus().sequence);
        Some(positional(&self.base, ctx, detail))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let size = self.base.game_mode.number_of_cards;
        let mut draft = Draft::new(rng, size, trump);
        let run = random_run(&mut draft, size, Rank::Ace.value())?;
        for (i, rank) in run.into_iter().enumerate() {
            let color = match i {
                0 => Some(Color::Red),
                1 => Some(Color::Black),
                _ => None,
            };
            match color {
                Some(color) => draft.any(|c| c.rank() == rank && c.color() == color)?,
                None => draft.any(|c| c.rank() == rank)?,
            }
        }
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
    fn royal_flush_scores_face_sum() {
        let rule = RoyalFlush::new(&GameMode::new(3, false)).unwrap();
        let detail = rule.evaluate(&hand("A♠ K♠ Q♠"), None).unwrap();
        assert_eq!(detail.base_bonus, 200 * 39);
        assert_eq!(detail.additional_bonus, 0);
        assert_eq!(detail.calculation, "200 × (14 + 13 + 12) = 7800");
        assert_eq!(detail.priority, 100);
        assert!(rule.evaluate(&hand("A♠ K♠ Q♥"), None).is_none());
        assert!(rule.evaluate(&hand("K♠ Q♠ J♠"), None).is_none());
    }

    #[test]
    fn royal_flush_holding_trump_earns_extra() {
        let rule = RoyalFlush::new(&GameMode::new(3, true)).unwrap();
        let detail = rule.evaluate(&hand("A♠ K♠ Q♠"), Some(card("Q♥"))).unwrap();
        assert_eq!(detail.base_bonus, 7800);
        assert_eq!(detail.additional_bonus, 150);
        assert_eq!(detail.total_bonus(), 7950);
    }

    #[test]
    fn straight_flush_natural_and_wild() {
        let rule = StraightFlush::new(&GameMode::new(3, true)).unwrap();
        let natural = rule.evaluate(&hand("5♥ 6♥ 7♥"), Some(card("2♣"))).unwrap();
        assert_eq!(natural.base_bonus, 170 * 18);
        assert_eq!(natural.additional_bonus, 0);

        let wild = rule.evaluate(&hand("8♥ 5♣ 10♥"), Some(card("5♠"))).unwrap();
        assert_eq!(wild.base_bonus, 170 * 27);
        assert_eq!(wild.additional_bonus, 90);
        assert!(rule.evaluate(&hand("A♠ K♠ Q♠"), None).is_none());
    }

    #[test]
    fn positional_bonuses_apply_when_trump_is_held() {
        let rule = StraightFlush::new(&GameMode::new(3, true)).unwrap();
        // 6 of the trump rank sits between 5 and 7, and both neighbours touch it.
        let detail = rule.evaluate(&hand("5♥ 6♥ 7♥"), Some(card("6♠"))).unwrap();
        assert_eq!(detail.base_bonus, 170 * 18);
        assert_eq!(detail.additional_bonus, 25 + 15);
        assert_eq!(detail.calculation, "170 × (5 + 6 + 7) + 25 + 15 = 3100");
    }

    #[test]
    fn colour_sequences_split_on_colour() {
        let mode = GameMode::new(3, false);
        let same = SameColorsSequence::new(&mode).unwrap();
        let mixed = DifferentColorsSequence::new(&mode).unwrap();

        let red = hand("9♥ 10♦ J♥");
        assert_eq!(same.evaluate(&red, None).unwrap().base_bonus, 90 * 30);
        assert!(mixed.evaluate(&red, None).is_none());

        let both = hand("9♥ 10♠ J♥");
        assert_eq!(mixed.evaluate(&both, None).unwrap().base_bonus, 80 * 30);
        assert!(same.evaluate(&both, None).is_none());

        // One suit is a straight flush, not a colour sequence.
        assert!(same.evaluate(&hand("9♥ 10♥ J♥"), None).is_none());
    }

    #[test]
    fn wild_mixed_sequence_earns_sequence_bonus() {
        let rule = DifferentColorsSequence::new(&GameMode::new(3, true)).unwrap();
        let detail = rule.evaluate(&hand("4♥ 6♠ 2♦"), Some(card("2♣"))).unwrap();
        assert_eq!(detail.base_bonus, 80 * 15);
        assert_eq!(detail.additional_bonus, 50);
    }

    #[test]
    fn generated_examples_match_their_rule() {
        for (n, trump) in [(3, None), (5, Some(card("7♥"))), (9, Some(card("7♥")))] {
            let mode = GameMode::new(n, trump.is_some());
            let rules: Vec<Box<dyn BonusRule>> = vec![
                Box::new(RoyalFlush::new(&mode).unwrap()),
                Box::new(StraightFlush::new(&mode).unwrap()),
                Box::new(SameColorsSequence::new(&mode).unwrap()),
                Box::new(DifferentColorsSequence::new(&mode).unwrap()),
            ];
            let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
            for rule in &rules {
                let example = rule.create_example_hand(&mut rng, trump).unwrap();
                assert_eq!(example.len(), n);
                assert!(rule.evaluate(&example, trump).is_some());
            }
        }
    }
}
