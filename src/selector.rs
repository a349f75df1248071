//! Rule selection for a game mode.
//!
//! A [`RuleCatalog`] holds every enabled rule that can exist under a
//! [`GameMode`], ordered by priority. Because each rule steps aside for the
//! patterns that outrank it, at most one rule matches any hand; the catalog's
//! order only decides which one is consulted first.
//!
//! ```
//! use brag_bonus::game_mode::GameMode;
//! use brag_bonus::rules::RuleKind;
//! use brag_bonus::selector::RuleCatalog;
//!
//! let catalog = RuleCatalog::new(&GameMode::new(3, false)).unwrap();
//! let detail = catalog.select(&"2♥ 2♦ 7♠".parse().unwrap(), None).unwrap();
//! assert_eq!(detail.rule, RuleKind::Pair);
//! assert_eq!(detail.total_bonus(), 400);
//! ```

use crate::cards::Card;
use crate::game_mode::{ConfigError, GameMode};
use crate::hand::Hand;
use crate::rules::{self, BonusDetail, BonusRule, GameRulesContainer, RuleKind};
use rand::RngCore;
use tracing::debug;

/// The enabled rules of one game mode, strongest priority first.
#[derive(Debug)]
pub struct RuleCatalog {
    game_mode: GameMode,
    rules: Vec<Box<dyn BonusRule>>,
}

impl RuleCatalog {
    /// Validate `game_mode` and build every rule it allows.
    ///
    /// Disabled rules and rules that cannot exist with this hand size or
    /// trump setting are skipped.
    pub fn new(game_mode: &GameMode) -> Result<Self, ConfigError> {
        game_mode.validate()?;
        let mut built: Vec<Box<dyn BonusRule>> = Vec::with_capacity(RuleKind::ALL.len());
        for kind in RuleKind::ALL {
            if !game_mode.is_enabled(kind) {
                debug!(rule = kind.name(), "rule disabled by configuration");
                continue;
            }
            match rules::build(kind, game_mode) {
                Ok(rule) => built.push(rule),
                Err(err) => debug!(rule = kind.name(), %err, "rule skipped for game mode"),
            }
        }
        // Stable sort: equal priorities keep the natural order.
        built.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Ok(Self { game_mode: game_mode.clone(), rules: built })
    }

    pub fn game_mode(&self) -> &GameMode {
        &self.game_mode
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The winning rule's detail, or `None` when no enabled rule matches.
    pub fn select(&self, hand: &Hand, trump: Option<Card>) -> Option<BonusDetail> {
        self.rules.iter().find_map(|rule| rule.evaluate(hand, trump))
    }

    /// Every matching rule, in catalog order. Holds at most one detail.
    pub fn evaluate_all(&self, hand: &Hand, trump: Option<Card>) -> Vec<BonusDetail> {
        self.rules.iter().filter_map(|rule| rule.evaluate(hand, trump)).collect()
    }

    pub fn rule(&self, kind: RuleKind) -> Option<&dyn BonusRule> {
        self.rules.iter().find(|r| r.kind() == kind).map(|r| r.as_ref())
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn BonusRule> + '_ {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn rules_texts(&self) -> Vec<(RuleKind, &GameRulesContainer)> {
        self.rules.iter().map(|r| (r.kind(), r.rules_text())).collect()
    }

    /// One generated example per rule, `None` where generation gave up.
    pub fn examples(
        &self,
        rng: &mut dyn RngCore,
        trump: Option<Card>,
    ) -> Vec<(RuleKind, Option<Hand>)> {
        self.rules.iter().map(|r| (r.kind(), r.create_example_hand(rng, trump))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_mode::RuleOverride;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;

    fn hand(s: &str) -> Hand {
        s.parse().expect("valid hand")
    }

    #[test]
    fn three_card_plain_mode_skips_large_and_trump_rules() {
        let catalog = RuleCatalog::new(&GameMode::new(3, false)).unwrap();
        let kinds: Vec<RuleKind> = catalog.rules().map(|r| r.kind()).collect();
        assert!(!kinds.contains(&RuleKind::MultipleFourOfAKind));
        assert!(!kinds.contains(&RuleKind::MultipleTriplets));
        assert!(!kinds.contains(&RuleKind::FiveOfAKind));
        assert!(!kinds.contains(&RuleKind::TrumpOfAKind));
        assert!(!kinds.contains(&RuleKind::FourOfAKind));
        assert!(!kinds.contains(&RuleKind::MultiplePairs));
        assert_eq!(kinds.first(), Some(&RuleKind::RoyalFlush));
        assert_eq!(kinds.last(), Some(&RuleKind::HighCard));
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn invalid_mode_is_rejected() {
        assert!(matches!(
            RuleCatalog::new(&GameMode::new(12, false)),
            Err(ConfigError::NumberOfCards(12))
        ));
    }

    #[test]
    fn disabled_rules_are_left_out() {
        let mut mode = GameMode::new(3, false);
        mode.rules.insert(RuleKind::Pair, RuleOverride { enabled: false, ..Default::default() });
        let catalog = RuleCatalog::new(&mode).unwrap();
        assert!(catalog.rule(RuleKind::Pair).is_none());
        // The pair does not fall through to High Card: the pattern is still present.
        assert!(catalog.select(&hand("2♥ 2♦ 7♠"), None).is_none());
    }

    #[test]
    fn priority_overrides_reorder_the_catalog() {
        let mut mode = GameMode::new(3, false);
        mode.rules.insert(
            RuleKind::HighCard,
            RuleOverride { enabled: true, priority: Some(500), bonus_value: None },
        );
        let catalog = RuleCatalog::new(&mode).unwrap();
        assert_eq!(catalog.rules().next().map(|r| r.kind()), Some(RuleKind::HighCard));
        // Ordering changes nothing about which rule matches.
        let detail = catalog.select(&hand("A♠ K♠ Q♠"), None).unwrap();
        assert_eq!(detail.rule, RuleKind::RoyalFlush);
    }

    #[test]
    fn select_and_evaluate_all_agree() {
        let catalog = RuleCatalog::new(&GameMode::new(3, false)).unwrap();
        let hands = ["A♠ K♠ Q♠", "K♣ K♦ K♥", "2♥ 2♦ 7♠", "9♥ 10♠ J♥", "2♣ 9♣ K♣", "2♥ 9♠ J♦"];
        for s in hands {
            let h = hand(s);
            let all = catalog.evaluate_all(&h, None);
            assert_eq!(all.len(), 1, "{s}");
            assert_eq!(catalog.select(&h, None), all.into_iter().next());
        }
    }

    #[test]
    fn wrong_sized_hands_never_match() {
        let catalog = RuleCatalog::new(&GameMode::new(5, false)).unwrap();
        assert!(catalog.select(&hand("A♠ K♠ Q♠"), None).is_none());
    }

    #[test]
    fn examples_cover_every_rule() {
        let catalog = RuleCatalog::new(&GameMode::new(5, true)).unwrap();
        let trump = Some(rules::DOC_TRUMP);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let examples = catalog.examples(&mut rng, trump);
        assert_eq!(examples.len(), catalog.len());
        for (kind, example) in examples {
            if let Some(h) = example {
                assert_eq!(catalog.select(&h, trump).map(|d| d.rule), Some(kind));
            }
        }
    }

    #[test]
    fn catalog_is_shareable_across_threads() {
        let catalog = Arc::new(RuleCatalog::new(&GameMode::new(3, false)).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || {
                    catalog.select(&"A♠ K♠ Q♠".parse().unwrap(), None).map(|d| d.total_bonus())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(7800));
        }
    }
}
