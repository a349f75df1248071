use brag_bonus::cards::{Card, Rank, Suit};
use brag_bonus::game_mode::GameMode;
use brag_bonus::hand::Hand;
use brag_bonus::selector::RuleCatalog;
use proptest::prelude::*;
use std::sync::OnceLock;

fn any_suit() -> impl Strategy<Value = Suit> {
    prop_oneof![Just(Suit::Clubs), Just(Suit::Diamonds), Just(Suit::Hearts), Just(Suit::Spades),]
}

fn any_card() -> impl Strategy<Value = Card> {
    (2u8..=14u8, any_suit())
        .prop_map(|(v, s)| Card::new(Rank::from_value(v).unwrap_or(Rank::Ace), s))
}

fn full_deck() -> Vec<Card> {
    Rank::ALL.iter().flat_map(|&r| Suit::ALL.iter().map(move |&s| Card::new(r, s))).collect()
}

/// A dealt hand of 3..=9 distinct cards, in random order.
fn any_hand() -> impl Strategy<Value = Hand> {
    (3usize..=9)
        .prop_flat_map(|n| prop::sample::subsequence(full_deck(), n).prop_shuffle())
        .prop_map(Hand::new)
}

/// One catalog per (hand size, trump) mode, built once: rule texts make construction costly.
fn catalog(n: usize, use_trump: bool) -> &'static RuleCatalog {
    static CATALOGS: OnceLock<Vec<RuleCatalog>> = OnceLock::new();
    let all = CATALOGS.get_or_init(|| {
        (3..=9)
            .flat_map(|n| [false, true].map(|t| (n, t)))
            .map(|(n, t)| RuleCatalog::new(&GameMode::new(n, t)).expect("valid mode"))
            .collect()
    });
    &all[(n - 3) * 2 + usize::from(use_trump)]
}

/// Consecutive ranks starting at `start`, suits chosen freely.
fn run_of(start: u8, suits: &[Suit]) -> Vec<Card> {
    suits
        .iter()
        .enumerate()
        .filter_map(|(i, &s)| Rank::from_value(start + i as u8).map(|r| Card::new(r, s)))
        .collect()
}

proptest! {
    #[test]
    fn consecutive_ranks_are_a_sequence_in_any_order(
        (start, suits) in (3usize..=9).prop_flat_map(|n| {
            (2u8..=(15 - n as u8), prop::collection::vec(any_suit(), n))
        }),
        seed in any::<u64>(),
    ) {
        let mut cards = run_of(start, &suits);
        prop_assert_eq!(cards.len(), suits.len());
        let k = (seed as usize) % cards.len();
        cards.rotate_left(k);
        prop_assert!(Hand::new(cards).is_sequence());
    }

    #[test]
    fn a_gap_breaks_the_sequence(
        (start, suits) in (3usize..=9).prop_flat_map(|n| {
            (2u8..=(14 - n as u8), prop::collection::vec(any_suit(), n))
        }),
    ) {
        let mut cards = run_of(start, &suits);
        let last = cards.len() - 1;
        let skipped = Rank::from_value(start + suits.len() as u8).unwrap_or(Rank::Ace);
        cards[last] = Card::new(skipped, suits[last]);
        prop_assert!(!Hand::new(cards).is_sequence());
    }

    #[test]
    fn at_most_one_rule_matches(hand in any_hand(), trump in prop::option::of(any_card()), use_trump in any::<bool>()) {
        let matches = catalog(hand.len(), use_trump).evaluate_all(&hand, trump);
        prop_assert!(matches.len() <= 1, "{} matched {:?}", hand, matches);
    }

    #[test]
    fn every_hand_gets_exactly_one_bonus(hand in any_hand(), trump in prop::option::of(any_card()), use_trump in any::<bool>()) {
        let catalog = catalog(hand.len(), use_trump);
        let detail = catalog.select(&hand, trump);
        prop_assert!(detail.is_some(), "{} has no bonus", hand);
        if let Some(d) = detail {
            prop_assert_eq!(d.total_bonus(), d.base_bonus + d.additional_bonus);
            prop_assert!(d.base_bonus > 0);
        }
    }

    #[test]
    fn evaluation_is_idempotent(hand in any_hand(), trump in prop::option::of(any_card()), use_trump in any::<bool>()) {
        let catalog = catalog(hand.len(), use_trump);
        prop_assert_eq!(catalog.select(&hand, trump), catalog.select(&hand, trump));
    }

    #[test]
    fn trump_is_inert_when_the_mode_disables_it(hand in any_hand(), trump in any_card()) {
        let catalog = catalog(hand.len(), false);
        prop_assert_eq!(catalog.select(&hand, Some(trump)), catalog.select(&hand, None));
    }

    #[test]
    fn additional_bonus_needs_a_held_trump(hand in any_hand(), trump in prop::option::of(any_card()), use_trump in any::<bool>()) {
        let detail = catalog(hand.len(), use_trump).select(&hand, trump);
        let holds_trump = use_trump && trump.is_some_and(|t| hand.has_trump_card(t));
        if let Some(d) = detail {
            if !holds_trump {
                prop_assert_eq!(d.additional_bonus, 0, "{} with trump {:?}", hand, trump);
            }
        }
    }
}
