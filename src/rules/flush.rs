use super::generator::Draft;
use super::{build_rule, sum_formula, BonusDetail, BonusRule, RuleBase, RuleInitError, RuleKind};
use crate::analysis::HandContext;
use crate::cards::Card;
use crate::game_mode::GameMode;
use rand::RngCore;

/// Every natural card in one suit with no repeated rank, and not a run.
#[derive(Debug, Clone)]
pub struct Flush {
    base: RuleBase,
}

impl Flush {
    pub fn new(game_mode: &GameMode) -> Result<Self, RuleInitError> {
        build_rule(RuleKind::Flush, game_mode, |base| Self { base })
    }
}

impl BonusRule for Flush {
    fn base(&self) -> &RuleBase {
        &self.base
    }

    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail> {
        let wild = ctx.flush()?;
        let mut ranks: Vec<u8> = ctx.hand.as_slice().iter().map(|c| c.rank().value()).collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let (factor, formula) = sum_formula(&ranks);
        let suit = ctx.naturals.first().map(|c| c.suit())?;
        let detail = self.base.detail(factor, &formula, format!("flush in {suit}"));
        Some(detail.bonus_if(wild, "trump joins the flush", self.base.trump_bonus().flush))
    }

    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>> {
        let size = self.base.game_mode.number_of_cards;
        let mut draft = Draft::new(rng, size, trump);
        let suit = draft.pick_suit();
        for rank in draft.pick_ranks(size, &[])? {
            draft.card(rank, suit)?;
        }
        draft.finish()
    }
}
