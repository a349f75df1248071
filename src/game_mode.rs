//! Game-mode configuration: hand size, trump usage, bonus tables and per-rule overrides.
//!
//! A [`GameMode`] is loaded once per session (usually from JSON) and is read-only
//! afterwards. Every field has a default, so a partial JSON document is enough:
//!
//! ```
//! use brag_bonus::game_mode::GameMode;
//!
//! let mode = GameMode::from_json_str(r#"{ "number_of_cards": 5, "use_trump": true }"#).unwrap();
//! assert_eq!(mode.number_of_cards, 5);
//! assert_eq!(mode.trump_bonus.pair, 20);
//! ```

use crate::rules::RuleKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const MIN_CARDS: usize = 3;
pub const MAX_CARDS: usize = 9;

/// Upper bound for any configured bonus number. Keeps every product of
/// value × rank sums far inside `i64`.
pub const MAX_BONUS_VALUE: i64 = 1_000_000;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("number of cards must be within 3..=9, got {0}")]
    NumberOfCards(usize),
    #[error("bonus value for {field} must be within 0..=1000000, got {value}")]
    BonusOutOfRange { field: String, value: i64 },
    #[error("failed to read game mode: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse game mode: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Additional bonus increments granted when the trump card helps a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrumpBonusValues {
    pub sequence: i64,
    pub card_in_middle: i64,
    pub rank_adjacent: i64,
    pub flush: i64,
    pub full_house: i64,
    pub four_of_kind: i64,
    pub five_of_kind: i64,
    pub three_of_kind: i64,
    pub pair: i64,
    pub straight_flush: i64,
    pub royal_flush: i64,
    pub high_card: i64,
    pub triplets: i64,
    pub same_color: i64,
}

impl Default for TrumpBonusValues {
    fn default() -> Self {
        Self {
            sequence: 50,
            card_in_middle: 25,
            rank_adjacent: 15,
            flush: 40,
            full_house: 60,
            four_of_kind: 80,
            five_of_kind: 120,
            three_of_kind: 45,
            pair: 20,
            straight_flush: 90,
            royal_flush: 150,
            high_card: 5,
            triplets: 70,
            same_color: 35,
        }
    }
}

impl TrumpBonusValues {
    fn fields(&self) -> [(&'static str, i64); 14] {
        [
            ("sequence", self.sequence),
            ("card_in_middle", self.card_in_middle),
            ("rank_adjacent", self.rank_adjacent),
            ("flush", self.flush),
            ("full_house", self.full_house),
            ("four_of_kind", self.four_of_kind),
            ("five_of_kind", self.five_of_kind),
            ("three_of_kind", self.three_of_kind),
            ("pair", self.pair),
            ("straight_flush", self.straight_flush),
            ("royal_flush", self.royal_flush),
            ("high_card", self.high_card),
            ("triplets", self.triplets),
            ("same_color", self.same_color),
        ]
    }
}

/// Per-rule switch and tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOverride {
    pub enabled: bool,
    pub priority: Option<i32>,
    pub bonus_value: Option<i64>,
}

impl Default for RuleOverride {
    fn default() -> Self {
        Self { enabled: true, priority: None, bonus_value: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameMode {
    pub number_of_cards: usize,
    pub use_trump: bool,
    pub trump_bonus: TrumpBonusValues,
    pub base_bet: u64,
    pub base_blind_multiplier: u32,
    pub max_rounds: u32,
    pub initial_player_coins: u64,
    pub rules: BTreeMap<RuleKind, RuleOverride>,
}

impl Default for GameMode {
    fn default() -> Self {
        Self {
            number_of_cards: MIN_CARDS,
            use_trump: false,
            trump_bonus: TrumpBonusValues::default(),
            base_bet: 10,
            base_blind_multiplier: 1,
            max_rounds: 10,
            initial_player_coins: 1000,
            rules: BTreeMap::new(),
        }
    }
}

impl GameMode {
    pub fn new(number_of_cards: usize, use_trump: bool) -> Self {
        Self { number_of_cards, use_trump, ..Self::default() }
    }

    /// Parse and validate a JSON game mode.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mode: GameMode = serde_json::from_str(json)?;
        mode.validate()?;
        Ok(mode)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_CARDS..=MAX_CARDS).contains(&self.number_of_cards) {
            return Err(ConfigError::NumberOfCards(self.number_of_cards));
        }
        for (field, value) in self.trump_bonus.fields() {
            check_bonus(field.to_string(), value)?;
        }
        for (kind, o) in &self.rules {
            if let Some(value) = o.bonus_value {
                check_bonus(format!("{}.bonus_value", kind.name()), value)?;
            }
        }
        Ok(())
    }

    /// Override for `kind`, or the default (enabled, no changes).
    pub fn rule_override(&self, kind: RuleKind) -> RuleOverride {
        self.rules.get(&kind).copied().unwrap_or_default()
    }

    pub fn is_enabled(&self, kind: RuleKind) -> bool {
        self.rule_override(kind).enabled
    }
}

fn check_bonus(field: String, value: i64) -> Result<(), ConfigError> {
    if (0..=MAX_BONUS_VALUE).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::BonusOutOfRange { field, value })
    }
}
