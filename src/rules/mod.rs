//! Bonus rules: fifteen independent hand patterns sharing one trait.
//!
//! Every rule is built for a [`GameMode`] and frozen at construction. Evaluation
//! is a pure function of the hand and the round's trump card:
//!
//! ```
//! use brag_bonus::game_mode::GameMode;
//! use brag_bonus::hand::Hand;
//! use brag_bonus::rules::{BonusRule, RoyalFlush};
//!
//! let mode = GameMode::new(3, false);
//! let rule = RoyalFlush::new(&mode).unwrap();
//! let hand: Hand = "A♠ K♠ Q♠".parse().unwrap();
//! let detail = rule.evaluate(&hand, None).unwrap();
//! assert_eq!(detail.base_bonus, 7800);
//! ```

pub(crate) mod flush;
pub(crate) mod generator;
pub(crate) mod high_card;
pub(crate) mod kinds;
pub(crate) mod multiples;
pub(crate) mod sequence;
pub(crate) mod trump;

pub use flush::Flush;
pub use generator::MAX_EXAMPLE_ATTEMPTS;
pub use high_card::HighCard;
pub use kinds::{FourOfAKind, FullHouse, PairRule, ThreeOfAKind};
pub use multiples::{MultipleFourOfAKind, MultiplePairs, MultipleTriplets};
pub use sequence::{DifferentColorsSequence, RoyalFlush, SameColorsSequence, StraightFlush};
pub use trump::{FiveOfAKind, TrumpOfAKind};

use crate::analysis::HandContext;
use crate::cards::{Card, Rank, Suit};
use crate::game_mode::GameMode;
use crate::hand::Hand;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seed for the example hands embedded in rule texts.
pub const EXAMPLE_SEED: u64 = 0x6272_6167;

/// Trump card used when rendering rule texts for trump game modes.
pub const DOC_TRUMP: Card = Card::new(Rank::Seven, Suit::Hearts);

/// The closed set of bonus rules, in their natural order of precedence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RuleKind {
    RoyalFlush,
    MultipleFourOfAKind,
    StraightFlush,
    MultipleTriplets,
    TrumpOfAKind,
    FullHouse,
    FiveOfAKind,
    FourOfAKind,
    MultiplePairs,
    ThreeOfAKind,
    SameColorsSequence,
    DifferentColorsSequence,
    Flush,
    Pair,
    HighCard,
}

impl RuleKind {
    /// All kinds, strongest pattern first.
    pub const ALL: [RuleKind; 15] = [
        RuleKind::RoyalFlush,
        RuleKind::MultipleFourOfAKind,
        RuleKind::StraightFlush,
        RuleKind::MultipleTriplets,
        RuleKind::TrumpOfAKind,
        RuleKind::FullHouse,
        RuleKind::FiveOfAKind,
        RuleKind::FourOfAKind,
        RuleKind::MultiplePairs,
        RuleKind::ThreeOfAKind,
        RuleKind::SameColorsSequence,
        RuleKind::DifferentColorsSequence,
        RuleKind::Flush,
        RuleKind::Pair,
        RuleKind::HighCard,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            RuleKind::RoyalFlush => "Royal Flush",
            RuleKind::MultipleFourOfAKind => "Multiple Four of a Kind",
            RuleKind::StraightFlush => "Straight Flush",
            RuleKind::MultipleTriplets => "Multiple Triplets",
            RuleKind::TrumpOfAKind => "Trump of a Kind",
            RuleKind::FullHouse => "Full House",
            RuleKind::FiveOfAKind => "Five of a Kind",
            RuleKind::FourOfAKind => "Four of a Kind",
            RuleKind::MultiplePairs => "Multiple Pairs",
            RuleKind::ThreeOfAKind => "Three of a Kind",
            RuleKind::SameColorsSequence => "Same Colors Sequence",
            RuleKind::DifferentColorsSequence => "Different Colors Sequence",
            RuleKind::Flush => "Flush",
            RuleKind::Pair => "Pair",
            RuleKind::HighCard => "High Card",
        }
    }

    pub const fn default_priority(self) -> i32 {
        match self {
            RuleKind::RoyalFlush => 100,
            RuleKind::MultipleFourOfAKind => 99,
            RuleKind::StraightFlush => 98,
            RuleKind::MultipleTriplets => 97,
            RuleKind::TrumpOfAKind => 96,
            RuleKind::FullHouse => 95,
            RuleKind::FiveOfAKind => 94,
            RuleKind::FourOfAKind => 93,
            RuleKind::MultiplePairs => 92,
            RuleKind::ThreeOfAKind => 91,
            RuleKind::SameColorsSequence => 90,
            RuleKind::DifferentColorsSequence => 89,
            RuleKind::Flush => 88,
            RuleKind::Pair => 87,
            RuleKind::HighCard => 86,
        }
    }

    pub const fn default_bonus_value(self) -> i64 {
        match self {
            RuleKind::RoyalFlush => 200,
            RuleKind::MultipleFourOfAKind => 180,
            RuleKind::StraightFlush => 170,
            RuleKind::MultipleTriplets => 160,
            RuleKind::TrumpOfAKind => 150,
            RuleKind::FullHouse => 190,
            RuleKind::FiveOfAKind => 140,
            RuleKind::FourOfAKind => 130,
            RuleKind::MultiplePairs => 110,
            RuleKind::ThreeOfAKind => 120,
            RuleKind::SameColorsSequence => 90,
            RuleKind::DifferentColorsSequence => 80,
            RuleKind::Flush => 70,
            RuleKind::Pair => 100,
            RuleKind::HighCard => 10,
        }
    }

    pub const fn min_cards(self) -> usize {
        match self {
            RuleKind::MultipleFourOfAKind => 8,
            RuleKind::MultipleTriplets => 6,
            RuleKind::FiveOfAKind => 5,
            RuleKind::FourOfAKind | RuleKind::MultiplePairs => 4,
            _ => 3,
        }
    }

    pub const fn max_cards(self) -> Option<usize> {
        match self {
            RuleKind::Pair => Some(9),
            _ => None,
        }
    }

    /// Rules that only exist when the game mode plays with a trump card.
    pub const fn requires_trump(self) -> bool {
        matches!(self, RuleKind::FiveOfAKind | RuleKind::TrumpOfAKind)
    }

    pub const fn description(self) -> &'static str {
        match self {
            RuleKind::RoyalFlush => "every card of one suit, holding the top ranks down from the Ace",
            RuleKind::MultipleFourOfAKind => {
                "two or more sets of four equal ranks, Aces and Kings not counted"
            }
            RuleKind::StraightFlush => {
                "consecutive ranks of one suit; trump cards may fill the run"
            }
            RuleKind::MultipleTriplets => "two or more sets of three equal ranks",
            RuleKind::TrumpOfAKind => "every card is a trump, or at least four trumps are held",
            RuleKind::FullHouse => {
                "one set of three with every other card paired; trump cards may complete sets"
            }
            RuleKind::FiveOfAKind => "four equal ranks (not Aces) joined by a trump card",
            RuleKind::FourOfAKind => "four equal ranks (not Aces); trump cards may complete the set",
            RuleKind::MultiplePairs => "two or more pairs",
            RuleKind::ThreeOfAKind => "three equal ranks; trump cards may complete the set",
            RuleKind::SameColorsSequence => {
                "consecutive ranks all of one color but not one suit; trump cards may fill the run"
            }
            RuleKind::DifferentColorsSequence => {
                "consecutive ranks mixing red and black; trump cards may fill the run"
            }
            RuleKind::Flush => "every card of one suit, no repeated ranks, not a run",
            RuleKind::Pair => "two equal ranks; a trump card may pair any card",
            RuleKind::HighCard => "no other pattern; scored on the highest card",
        }
    }

    /// Kinds whose pattern takes precedence over this one.
    pub fn outranked_by(self) -> impl Iterator<Item = RuleKind> {
        RuleKind::ALL.into_iter().take_while(move |k| *k != self)
    }

    /// Does the hand take this kind's shape, regardless of stronger patterns.
    pub fn shape_matches(self, ctx: &HandContext<'_>) -> bool {
        match self {
            RuleKind::RoyalFlush => ctx.royal_flush(),
            RuleKind::MultipleFourOfAKind => ctx.multiple_four_of_a_kind().is_some(),
            RuleKind::StraightFlush => ctx.straight_flush().is_some(),
            RuleKind::MultipleTriplets => ctx.multiple_triplets().is_some(),
            RuleKind::TrumpOfAKind => ctx.trump_of_a_kind(),
            RuleKind::FullHouse => ctx.full_house().is_some(),
            RuleKind::FiveOfAKind => ctx.five_of_a_kind().is_some(),
            RuleKind::FourOfAKind => ctx.four_of_a_kind().is_some(),
            RuleKind::MultiplePairs => ctx.multiple_pairs().is_some(),
            RuleKind::ThreeOfAKind => ctx.three_of_a_kind().is_some(),
            RuleKind::SameColorsSequence => ctx.same_colors_sequence().is_some(),
            RuleKind::DifferentColorsSequence => ctx.different_colors_sequence().is_some(),
            RuleKind::Flush => ctx.flush().is_some(),
            RuleKind::Pair => ctx.pair().is_some(),
            RuleKind::HighCard => ctx.high_card().is_some(),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleInitError {
    #[error("{0} needs a game mode that uses trump")]
    TrumpDisabled(RuleKind),
    #[error("{kind} needs at least {min} cards, game mode deals {got}")]
    HandTooSmall { kind: RuleKind, min: usize, got: usize },
    #[error("{kind} allows at most {max} cards, game mode deals {got}")]
    HandTooLarge { kind: RuleKind, max: usize, got: usize },
    #[error("invalid game mode: {0}")]
    Config(String),
}

/// Scored breakdown of a matching rule. `total_bonus` is base plus additional.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct BonusDetail {
    pub rule: RuleKind,
    pub rule_name: &'static str,
    pub base_bonus: i64,
    pub additional_bonus: i64,
    pub descriptions: Vec<String>,
    pub calculation: String,
    pub priority: i32,
    formula: String,
}

impl BonusDetail {
    /// Base bonus is `bonus_value × factor`; `factor_formula` shows how the factor was built.
    pub(crate) fn new(base: &RuleBase, factor: i64, factor_formula: &str, summary: String) -> Self {
        let base_bonus = base.bonus_value * factor;
        let formula = format!("{} × {}", base.bonus_value, factor_formula);
        let calculation = format!("{formula} = {base_bonus}");
        Self {
            rule: base.kind,
            rule_name: base.kind.name(),
            base_bonus,
            additional_bonus: 0,
            descriptions: vec![summary],
            calculation,
            priority: base.priority,
            formula,
        }
    }

    pub fn total_bonus(&self) -> i64 {
        self.base_bonus + self.additional_bonus
    }

    pub(crate) fn note(mut self, line: impl Into<String>) -> Self {
        self.descriptions.push(line.into());
        self
    }

    /// Add a trump or positional increment. Zero amounts leave no trace.
    pub(crate) fn bonus(mut self, reason: &str, amount: i64) -> Self {
        if amount == 0 {
            return self;
        }
        self.additional_bonus += amount;
        self.descriptions.push(format!("{reason}: +{amount}"));
        self.formula.push_str(&format!(" + {amount}"));
        self.calculation = format!("{} = {}", self.formula, self.total_bonus());
        self
    }

    pub(crate) fn bonus_if(self, cond: bool, reason: &str, amount: i64) -> Self {
        if cond {
            self.bonus(reason, amount)
        } else {
            self
        }
    }
}

/// Player-facing and LLM-facing rule texts, built once per rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRulesContainer {
    pub player: String,
    pub llm: String,
}

impl GameRulesContainer {
    fn describe<R: BonusRule + ?Sized>(rule: &R) -> Self {
        let kind = rule.kind();
        let mode = &rule.base().game_mode;
        let trump = mode.use_trump.then_some(DOC_TRUMP);
        let mut rng = ChaCha8Rng::seed_from_u64(EXAMPLE_SEED);
        let example = rule
            .create_example_hand(&mut rng, trump)
            .and_then(|hand| rule.evaluate(&hand, trump).map(|d| (hand, d)));

        let trump_note = match trump {
            Some(t) => format!(" (trump {t})"),
            None => String::new(),
        };
        let player_example = match &example {
            Some((hand, detail)) => {
                format!("Example: {hand}{trump_note} scores {}.", detail.total_bonus())
            }
            None => format!("Not possible with {} cards.", mode.number_of_cards),
        };
        let player = format!(
            "{}: {}. {}",
            kind.name(),
            capitalize(kind.description()),
            player_example
        );

        let (hand_field, bonus_field, formula_field) = match &example {
            Some((hand, detail)) => {
                (hand.to_string(), detail.total_bonus().to_string(), detail.calculation.clone())
            }
            None => ("none".to_string(), "none".to_string(), "none".to_string()),
        };
        let llm = format!(
            "rule={}; priority={}; bonus_value={}; min_cards={}; requires_trump={}; shape={}; \
             example_hand=[{}]; trump={}; example_bonus={}; formula={}",
            kind.name(),
            rule.priority(),
            rule.bonus_value(),
            rule.min_cards(),
            kind.requires_trump(),
            kind.description(),
            hand_field,
            trump.map_or_else(|| "none".to_string(), |t| t.symbol()),
            bonus_field,
            formula_field,
        );
        Self { player, llm }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Settings every rule carries: identity, tuning and its frozen texts.
#[derive(Debug, Clone)]
pub struct RuleBase {
    pub kind: RuleKind,
    pub priority: i32,
    pub bonus_value: i64,
    pub game_mode: GameMode,
    text: GameRulesContainer,
}

impl RuleBase {
    fn new(kind: RuleKind, game_mode: &GameMode) -> Result<Self, RuleInitError> {
        game_mode.validate().map_err(|err| RuleInitError::Config(err.to_string()))?;
        let n = game_mode.number_of_cards;
        if kind.requires_trump() && !game_mode.use_trump {
            return Err(RuleInitError::TrumpDisabled(kind));
        }
        if n < kind.min_cards() {
            return Err(RuleInitError::HandTooSmall { kind, min: kind.min_cards(), got: n });
        }
        if let Some(max) = kind.max_cards() {
            if n > max {
                return Err(RuleInitError::HandTooLarge { kind, max, got: n });
            }
        }
        let o = game_mode.rule_override(kind);
        Ok(Self {
            kind,
            priority: o.priority.unwrap_or(kind.default_priority()),
            bonus_value: o.bonus_value.unwrap_or(kind.default_bonus_value()),
            game_mode: game_mode.clone(),
            text: GameRulesContainer::default(),
        })
    }

    /// The hand fits this rule's size limits and the game mode.
    fn accepts(&self, hand: &Hand) -> bool {
        hand.verify(&self.game_mode, self.kind.min_cards())
            && self.kind.max_cards().map_or(true, |max| hand.len() <= max)
    }

    pub(crate) fn detail(&self, factor: i64, factor_formula: &str, summary: String) -> BonusDetail {
        BonusDetail::new(self, factor, factor_formula, summary)
    }

    pub(crate) fn trump_bonus(&self) -> &crate::game_mode::TrumpBonusValues {
        &self.game_mode.trump_bonus
    }
}

/// Construct a rule and freeze its texts. `wrap` is called twice: once to
/// render the texts, once for the final value.
pub(crate) fn build_rule<T: BonusRule>(
    kind: RuleKind,
    game_mode: &GameMode,
    wrap: fn(RuleBase) -> T,
) -> Result<T, RuleInitError> {
    let base = RuleBase::new(kind, game_mode)?;
    let text = GameRulesContainer::describe(&wrap(base.clone()));
    Ok(wrap(RuleBase { text, ..base }))
}

/// A bonus-hand rule.
///
/// Implementors provide the scoring of their own pattern and a candidate-hand
/// builder; validation, precedence and example generation are shared.
pub trait BonusRule: Send + Sync {
    fn base(&self) -> &RuleBase;

    /// Score the hand if it holds this rule's pattern. Stronger patterns are
    /// already ruled out when this is called.
    fn score(&self, ctx: &HandContext<'_>) -> Option<BonusDetail>;

    /// One attempt at a hand with this rule's pattern. `None` when the
    /// pattern cannot be dealt under the current game mode.
    fn candidate(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Vec<Card>>;

    fn kind(&self) -> RuleKind {
        self.base().kind
    }

    fn name(&self) -> &'static str {
        self.base().kind.name()
    }

    fn min_cards(&self) -> usize {
        self.base().kind.min_cards()
    }

    fn max_cards(&self) -> Option<usize> {
        self.base().kind.max_cards()
    }

    fn priority(&self) -> i32 {
        self.base().priority
    }

    fn bonus_value(&self) -> i64 {
        self.base().bonus_value
    }

    fn rules_text(&self) -> &GameRulesContainer {
        &self.base().text
    }

    /// `None` when the hand does not fit the game mode, when a trump-only rule
    /// has no trump, when a stronger pattern is present, or when the pattern
    /// is absent.
    fn evaluate(&self, hand: &Hand, trump: Option<Card>) -> Option<BonusDetail> {
        let base = self.base();
        if !base.accepts(hand) {
            return None;
        }
        let ctx = HandContext::new(hand, &base.game_mode, trump);
        if base.kind.requires_trump() && ctx.trump.is_none() {
            return None;
        }
        if base.kind.outranked_by().any(|k| k.shape_matches(&ctx)) {
            return None;
        }
        self.score(&ctx)
    }

    /// A random hand this rule accepts, or `None` after
    /// [`MAX_EXAMPLE_ATTEMPTS`] failed attempts.
    fn create_example_hand(&self, rng: &mut dyn RngCore, trump: Option<Card>) -> Option<Hand> {
        generator::generate(self, rng, trump)
    }
}

impl fmt::Debug for dyn BonusRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BonusRule")
            .field("kind", &self.kind())
            .field("priority", &self.priority())
            .field("bonus_value", &self.bonus_value())
            .finish()
    }
}

/// Build the rule for `kind` behind the common trait.
pub fn build(kind: RuleKind, game_mode: &GameMode) -> Result<Box<dyn BonusRule>, RuleInitError> {
    fn boxed<T: BonusRule + 'static>(
        r: Result<T, RuleInitError>,
    ) -> Result<Box<dyn BonusRule>, RuleInitError> {
        r.map(|rule| Box::new(rule) as Box<dyn BonusRule>)
    }
    match kind {
        RuleKind::RoyalFlush => boxed(RoyalFlush::new(game_mode)),
        RuleKind::MultipleFourOfAKind => boxed(MultipleFourOfAKind::new(game_mode)),
        RuleKind::StraightFlush => boxed(StraightFlush::new(game_mode)),
        RuleKind::MultipleTriplets => boxed(MultipleTriplets::new(game_mode)),
        RuleKind::TrumpOfAKind => boxed(TrumpOfAKind::new(game_mode)),
        RuleKind::FullHouse => boxed(FullHouse::new(game_mode)),
        RuleKind::FiveOfAKind => boxed(FiveOfAKind::new(game_mode)),
        RuleKind::FourOfAKind => boxed(FourOfAKind::new(game_mode)),
        RuleKind::MultiplePairs => boxed(MultiplePairs::new(game_mode)),
        RuleKind::ThreeOfAKind => boxed(ThreeOfAKind::new(game_mode)),
        RuleKind::SameColorsSequence => boxed(SameColorsSequence::new(game_mode)),
        RuleKind::DifferentColorsSequence => boxed(DifferentColorsSequence::new(game_mode)),
        RuleKind::Flush => boxed(Flush::new(game_mode)),
        RuleKind::Pair => boxed(PairRule::new(game_mode)),
        RuleKind::HighCard => boxed(HighCard::new(game_mode)),
    }
}

/// `(a×n + b×m)` style formula plus its value, for rank groups.
pub(crate) fn group_formula(groups: &[(Rank, u8)]) -> (i64, String) {
    let value = groups.iter().map(|(r, n)| i64::from(r.value()) * i64::from(*n)).sum();
    let parts: Vec<String> = groups.iter().map(|(r, n)| format!("{}×{}", r.value(), n)).collect();
    (value, format!("({})", parts.join(" + ")))
}

/// `(a + b + c)` style formula plus its value, for plain rank values.
pub(crate) fn sum_formula(values: &[u8]) -> (i64, String) {
    let value = values.iter().map(|&v| i64::from(v)).sum();
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    (value, format!("({})", parts.join(" + ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_listed_by_descending_default_priority() {
        let priorities: Vec<i32> = RuleKind::ALL.iter().map(|k| k.default_priority()).collect();
        let mut sorted = priorities.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn outranked_by_lists_stronger_kinds_only() {
        assert_eq!(RuleKind::RoyalFlush.outranked_by().count(), 0);
        assert_eq!(RuleKind::HighCard.outranked_by().count(), 14);
        assert!(RuleKind::Flush.outranked_by().all(|k| k.default_priority() > 88));
    }

    #[test]
    fn rules_refuse_an_invalid_game_mode() {
        use crate::game_mode::RuleOverride;

        let mut mode = GameMode::new(3, false);
        mode.rules.insert(
            RuleKind::Pair,
            RuleOverride { enabled: true, priority: None, bonus_value: Some(i64::MAX / 2) },
        );
        assert!(matches!(PairRule::new(&mode), Err(RuleInitError::Config(_))));
        // Other rules read the same configuration and refuse it too.
        assert!(matches!(HighCard::new(&mode), Err(RuleInitError::Config(_))));

        let oversized = GameMode::new(12, false);
        assert!(matches!(Flush::new(&oversized), Err(RuleInitError::Config(_))));
        assert!(matches!(HighCard::new(&GameMode::new(2, false)), Err(RuleInitError::Config(_))));
    }

    #[test]
    fn trump_rules_refuse_plain_modes() {
        let mode = GameMode::new(5, false);
        assert_eq!(
            FiveOfAKind::new(&mode).err(),
            Some(RuleInitError::TrumpDisabled(RuleKind::FiveOfAKind))
        );
        assert_eq!(
            TrumpOfAKind::new(&mode).err(),
            Some(RuleInitError::TrumpDisabled(RuleKind::TrumpOfAKind))
        );
    }

    #[test]
    fn small_modes_refuse_large_patterns() {
        let mode = GameMode::new(3, false);
        assert_eq!(
            build(RuleKind::MultipleFourOfAKind, &mode).err(),
            Some(RuleInitError::HandTooSmall { kind: RuleKind::MultipleFourOfAKind, min: 8, got: 3 })
        );
        assert!(build(RuleKind::Pair, &mode).is_ok());
    }

    #[test]
    fn overrides_change_priority_and_value() {
        let mut mode = GameMode::new(3, false);
        mode.rules.insert(
            RuleKind::Pair,
            crate::game_mode::RuleOverride { enabled: true, priority: Some(5), bonus_value: Some(7) },
        );
        let rule = PairRule::new(&mode).unwrap();
        assert_eq!(rule.priority(), 5);
        assert_eq!(rule.bonus_value(), 7);
        let detail = rule.evaluate(&"2h 2d 7s".parse().unwrap(), None).unwrap();
        assert_eq!(detail.base_bonus, 7 * 4);
        assert_eq!(detail.priority, 5);
    }

    #[test]
    fn bonus_detail_accumulates_additions() {
        let base = RuleBase::new(RuleKind::Pair, &GameMode::default()).unwrap();
        let detail = base
            .detail(4, "(2×2)", "pair".into())
            .bonus("trump pair", 20)
            .bonus("ignored", 0)
            .bonus_if(false, "skipped", 99)
            .note("extra");
        assert_eq!(detail.base_bonus, 400);
        assert_eq!(detail.additional_bonus, 20);
        assert_eq!(detail.total_bonus(), 420);
        assert_eq!(detail.calculation, "100 × (2×2) + 20 = 420");
        assert_eq!(detail.descriptions, vec!["pair", "trump pair: +20", "extra"]);
    }

    #[test]
    fn rule_texts_are_frozen_and_deterministic() {
        let mode = GameMode::new(3, false);
        let a = RoyalFlush::new(&mode).unwrap();
        let b = RoyalFlush::new(&mode).unwrap();
        assert_eq!(a.rules_text(), b.rules_text());
        assert!(a.rules_text().player.starts_with("Royal Flush"));
        assert!(a.rules_text().llm.contains("priority=100"));
        assert!(a.rules_text().llm.contains("example_bonus="));
    }

    #[test]
    fn formulas_render_groups_and_sums() {
        assert_eq!(group_formula(&[(Rank::King, 3)]), (39, "(13×3)".to_string()));
        assert_eq!(sum_formula(&[14, 13, 12]), (39, "(14 + 13 + 12)".to_string()));
    }
}
