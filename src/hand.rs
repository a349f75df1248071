use crate::cards::{format_cards, parse_cards, Card, Color, Rank, Suit};
use crate::game_mode::GameMode;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("hand has no cards")]
    Empty,
    #[error("duplicate cards in hand")]
    DuplicateCards,
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// Rank histogram indexed by rank value (2..=14).
pub type RankCounts = [u8; 15];

/// The cards dealt to one player for a round, in deal order.
///
/// All queries are pure functions of the card multiset (plus the trump card
/// where one is passed in). A trump card is a rank wildcard: every card whose
/// rank equals the trump card's rank counts as trump.
///
/// ```
/// use brag_bonus::hand::Hand;
///
/// let hand: Hand = "Q♠ K♥ A♣".parse().unwrap();
/// assert!(hand.is_sequence());
/// let low: Hand = "A♠ 2♥ 3♣".parse().unwrap();
/// assert!(!low.is_sequence());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Build a hand without validation.
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Build a hand dealt from a single deck: non-empty, no duplicates.
    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.is_empty() {
            return Err(HandError::Empty);
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Cards sorted ascending by rank, then suit.
    pub fn sorted(&self) -> Vec<Card> {
        let mut cards = self.cards.clone();
        cards.sort();
        cards
    }

    /// Usable for `game_mode` by a rule needing at least `min_cards` cards.
    pub fn verify(&self, game_mode: &GameMode, min_cards: usize) -> bool {
        !self.cards.is_empty()
            && self.cards.len() >= min_cards
            && self.cards.len() == game_mode.number_of_cards
    }

    pub fn rank_sum(&self) -> u32 {
        self.cards.iter().map(|c| u32::from(c.rank().value())).sum()
    }

    pub fn highest_rank(&self) -> Option<Rank> {
        self.cards.iter().map(|c| c.rank()).max()
    }

    /// Strictly consecutive distinct ranks. Ace only ever plays high.
    pub fn is_sequence(&self) -> bool {
        if self.cards.is_empty() {
            return false;
        }
        let mut values: Vec<u8> = self.cards.iter().map(|c| c.rank().value()).collect();
        values.sort_unstable();
        values.windows(2).all(|w| w[1] == w[0] + 1)
    }

    pub fn is_same_suits(&self) -> bool {
        match self.cards.first() {
            Some(first) => self.cards.iter().all(|c| c.suit() == first.suit()),
            None => false,
        }
    }

    pub fn is_flush(&self) -> bool {
        self.is_same_suits()
    }

    pub fn is_same_color(&self) -> bool {
        match self.cards.first() {
            Some(first) => self.cards.iter().all(|c| c.color() == first.color()),
            None => false,
        }
    }

    /// One color throughout, but not a single suit.
    pub fn is_same_color_and_different_suits(&self) -> bool {
        self.is_same_color() && !self.is_same_suits()
    }

    pub fn suits(&self) -> HashSet<Suit> {
        self.cards.iter().map(|c| c.suit()).collect()
    }

    pub fn colors(&self) -> HashSet<Color> {
        self.cards.iter().map(|c| c.color()).collect()
    }

    /// Histogram of ranks, skipping any rank in `exclude`.
    pub fn rank_counts(&self, exclude: &[Rank]) -> RankCounts {
        let mut counts = [0u8; 15];
        for c in self.cards.iter().filter(|c| !exclude.contains(&c.rank())) {
            counts[c.rank().value() as usize] += 1;
        }
        counts
    }

    pub fn has_distinct_ranks(&self) -> bool {
        self.rank_counts(&[]).iter().all(|&n| n <= 1)
    }

    /// Some rank occurs exactly `n` times.
    pub fn is_n_of_a_kind(&self, n: u8) -> bool {
        self.rank_counts(&[]).iter().any(|&c| c == n)
    }

    /// Highest rank occurring at least `n` times, ignoring `exclude`.
    pub fn highest_n_of_a_kind_rank(&self, n: u8, exclude: &[Rank]) -> Option<Rank> {
        let counts = self.rank_counts(exclude);
        Rank::ALL.iter().rev().copied().find(|r| counts[r.value() as usize] >= n)
    }

    /// One suit, holding exactly the top `number_of_cards` ranks.
    pub fn is_royal_sequence(&self, game_mode: &GameMode) -> bool {
        let n = game_mode.number_of_cards;
        if self.cards.len() != n || !self.is_same_suits() {
            return false;
        }
        let mut ranks: Vec<Rank> = self.cards.iter().map(|c| c.rank()).collect();
        ranks.sort_by(|a, b| b.cmp(a));
        n <= Rank::ALL.len() && ranks == Rank::top_n(n)
    }

    pub fn has_trump_card(&self, trump: Card) -> bool {
        self.cards.iter().any(|c| c.rank() == trump.rank())
    }

    pub fn trump_count(&self, trump: Card) -> usize {
        self.cards.iter().filter(|c| c.rank() == trump.rank()).count()
    }

    /// Cards that are not of the trump rank.
    pub fn naturals(&self, trump: Card) -> Vec<Card> {
        self.cards.iter().copied().filter(|c| c.rank() != trump.rank()).collect()
    }

    /// Treating every trump card as a wildcard, the rest completes a straight.
    pub fn can_form_sequence_with_wild(&self, trump: Card) -> bool {
        let wilds = self.trump_count(trump);
        if wilds == 0 {
            return false;
        }
        let naturals: Vec<u8> = self.naturals(trump).iter().map(|c| c.rank().value()).collect();
        complete_sequence(&naturals, wilds).is_some()
    }

    /// A trump card sits strictly inside the rank-sorted hand.
    pub fn is_trump_in_middle(&self, trump: Card) -> bool {
        let sorted = self.sorted();
        let last = sorted.len().saturating_sub(1);
        sorted.iter().enumerate().any(|(i, c)| c.rank() == trump.rank() && i > 0 && i < last)
    }

    /// Some non-trump card is one rank away from the trump rank.
    pub fn is_rank_adjacent_to_trump(&self, trump: Card) -> bool {
        let t = trump.rank().value();
        self.naturals(trump).iter().any(|c| c.rank().value().abs_diff(t) == 1)
    }
}

/// Fill a run from natural rank values plus `wilds` wildcards.
///
/// Naturals must be distinct and span no more than the final run length.
/// Gaps are filled first, leftover wilds extend the run towards Ace and then
/// downwards. Returns the completed run ascending.
pub fn complete_sequence(naturals: &[u8], wilds: usize) -> Option<Vec<u8>> {
    let (&lo, &hi) = (naturals.iter().min()?, naturals.iter().max()?);
    let distinct: HashSet<u8> = naturals.iter().copied().collect();
    if distinct.len() != naturals.len() {
        return None;
    }
    let total = naturals.len() + wilds;
    let span = usize::from(hi - lo) + 1;
    if span > total {
        return None;
    }
    let leftover = total - span;
    let up = leftover.min(usize::from(Rank::MAX_VALUE - hi));
    let down = leftover - up;
    let start = usize::from(lo).checked_sub(down)?;
    if start < usize::from(Rank::MIN_VALUE) {
        return None;
    }
    let end = usize::from(hi) + up;
    Some((start..=end).map(|v| v as u8).collect())
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cards(&self.cards))
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Hand::try_new(cards)
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand::new(cards)
    }
}
