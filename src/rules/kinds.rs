//! Equal-rank rules: full house, four of a kind, three of a kind and pair.
//!
//! Trump cards pad a group of equal ranks; the additional trump bonus is paid
//! only when a wildcard was needed to complete the group.

use super::generator::Draft;
use super::{build_rule, group_formula, BonusDetail, BonusRule, RuleBase, RuleInitError, RuleKind};
use crate::analysis::{HandContext, KindFill};
use crate::cards::{Card, Rank};
use crate::game_mode::GameMode;
use rand::RngCore;

/// `bonus_value × rank × size` for a single padded group.
fn kind_detail(base: &RuleBase, fill: KindFill, what: &str, trump_bonus: i64) -> BonusDetail {
    let (factor, formula) = group_formula(&[(fill.rank, fill.size())]);
    base.detail(factor, &formula, format!("{what} of {}", fill.rank)).bonus_if(
        fill.wilds_used > 0,
        &format!("trump completes the {what}"),
        trump_bonus,
    )
}

/// One set of three with every other card paired.
#[derive(Debug, Clone)]
pub struct FullHouse {
    base: RuleBase,
}

impl FullHouse {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::FullHouse, game_mode, |base| Self { base })
    }
}

impl BonusRule for FullHouse {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let fill = ctx.full_house()?;
        let (factor, formula) = group_formula(&fill.groups);
        let (top, _) = *fill.groups.first()?;
        let detail = self.base.detail(factor, &formula, format!("full house, {top}s full"));
        Some(detail.bonus_if(
            fill.wilds_used > 0,
            "trump completes the full house",
            self.base.trump_bonus().full_house,
        ))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let size = self.base.game_mode.number_of_cards;
        // Three plus pairs always makes an odd count.
        if size % 2 == 0 {
            return None;
        }
        let mut draft = Draft::new(rng, size, trump);
        let ranks = draft.pick_ranks(1 + (size - 3) / 2, &[])?;
        let (triple, pairs) = ranks.split_first()?;
        draft.rank(*triple, 3)?;
        for rank in pairs {
            draft.rank(*rank, 2)?;
        }
        if draft.trump_rank().is_some() && draft.coin() {
            draft.swap_in_trump()?;
        }
        draft.finish()
    }
}

/// Four equal ranks, Aces excluded.
#[derive(Debug, Clone)]
pub struct FourOfAKind {
    base: RuleBase,
}

impl FourOfAKind {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::FourOfAKind, game_mode, |base| Self { base })
    }
}

impl BonusRule for FourOfAKind {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let fill = ctx.four_of_a_kind()?;
        Some(kind_detail(&self.base, fill, "four of a kind", self.base.trump_bonus().four_of_kind))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let mut draft = Draft::new(rng, self.base.game_mode.number_of_cards, trump);
        let rank = *draft.pick_ranks(1, &[Rank::Ace])?.first()?;
        if draft.trump_rank().is_some() && draft.coin() {
            draft.rank(rank, 3)?;
            draft.trumps(1)?;
        } else {
            draft.rank(rank, 4)?;
        }
        draft.fill_singles()?;
        draft.finish()
    }
}

/// Three equal ranks.
#[derive(Debug, Clone)]
pub struct ThreeOfAKind {
    base: RuleBase,
}

impl ThreeOfAKind {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::ThreeOfAKind, game_mode, |base| Self { base })
    }
}

impl BonusRule for ThreeOfAKind {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let fill = ctx.three_of_a_kind()?;
        Some(kind_detail(&self.base, fill, "three of a kind", self.base.trump_bonus().three_of_kind))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let size = self.base.game_mode.number_of_cards;
        // A three-card triple is always a full house.
        if size < 4 {
            return None;
        }
        let mut draft = Draft::new(rng, size, trump);
        let rank = *draft.pick_ranks(1, &[])?.first()?;
        if draft.trump_rank().is_some() && draft.coin() {
            draft.rank(rank, 2)?;
            draft.trumps(1)?;
        } else {
            draft.rank(rank, 3)?;
        }
        draft.fill_singles()?;
        draft.finish()
    }
}

/// Two equal ranks.
#[derive(Debug, Clone)]
pub struct PairRule {
    base: RuleBase,
}

impl PairRule {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::Pair, game_mode, |base| Self { base })
    }
}

impl BonusRule for PairRule {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let fill = ctx.pair()?;
        Some(kind_detail(&self.base, fill, "pair", self.base.trump_bonus().pair))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let mut draft = Draft::new(rng, self.base.game_mode.number_of_cards, trump);
        let rank = *draft.pick_ranks(1, &[])?.first()?;
        if draft.trump_rank().is_some() && draft.coin() {
            draft.rank(rank, 1)?;
            draft.trumps(1)?;
        } else {
            draft.rank(rank, 2)?;
        }
        draft.fill_singles()?;
        draft.finish()
    }
}
