//! brag-bonus: bonus-hand rules for Three Card Brag style games
//!
//! Goals:
//! - One rule per bonus pattern, all behind the [`rules::BonusRule`] trait
//! - Trump cards act as rank wildcards when the game mode enables them
//! - At most one rule matches any hand; the [`selector::RuleCatalog`] finds it
//! - No panics for invalid input; a mismatch is `None`, bad config is an error
//!
//! ## Quick start: score a hand
//! ```
//! use brag_bonus::game_mode::GameMode;
//! use brag_bonus::hand::Hand;
//! use brag_bonus::rules::RuleKind;
//! use brag_bonus::selector::RuleCatalog;
//!
//! let catalog = RuleCatalog::new(&GameMode::new(3, false)).unwrap();
//! let hand: Hand = "K♣ K♦ K♥".parse().unwrap();
//! let detail = catalog.select(&hand, None).unwrap();
//! assert_eq!(detail.rule, RuleKind::FullHouse);
//! assert_eq!(detail.total_bonus(), 7410);
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --bin brag-bonus -- evaluate "7♥ 7♦ 7♠" --trump 7♣ --use-trump
//! ```

pub mod analysis;
pub mod cards;
pub mod deck;
pub mod game_mode;
pub mod hand;
pub mod rules;
pub mod selector;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
