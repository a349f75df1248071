use super::BonusRule;
use crate::cards::{Card, Rank, Suit};
use crate::deck::Deck;
use crate::hand::Hand;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngCore};
use tracing::{debug, warn};

/// Attempts made before example generation gives up.
pub const MAX_EXAMPLE_ATTEMPTS: usize = 100;

/// Generate-and-validate loop: build candidates until the rule accepts one.
pub(crate) fn generate<R: BonusRule + ?Sized>(
    rule: &R,
    rng: &mut dyn RngCore,
    trump: Option<Card>,
) -> Option<Hand> {
    for attempt in 1..=MAX_EXAMPLE_ATTEMPTS {
        let Some(cards) = rule.candidate(rng, trump) else {
            continue;
        };
        let hand = Hand::new(cards);
        if rule.evaluate(&hand, trump).is_some() {
            return Some(hand);
        }
        debug!(rule = rule.name(), attempt, hand = %hand, "example candidate rejected");
    }
    warn!(
        rule = rule.name(),
        attempts = MAX_EXAMPLE_ATTEMPTS,
        cards = rule.base().game_mode.number_of_cards,
        "no example hand found"
    );
    None
}

/// A hand under construction, drawn from a shuffled deck so no card repeats.
pub(crate) struct Draft<'r> {
    rng: &'r mut dyn RngCore,
    deck: Deck,
    cards: Vec<Card>,
    size: usize,
    trump: Option<Rank>,
}

impl<'r> Draft<'r> {
    pub(crate) fn new(rng: &'r mut dyn RngCore, size: usize, trump: Option<Card>) -> Self {
        let deck = Deck::shuffled(&mut *rng);
        Self { rng, deck, cards: Vec::with_capacity(size), size, trump: trump.map(Card::rank) }
    }

    pub(crate) fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    pub(crate) fn trump_rank(&self) -> Option<Rank> {
        self.trump
    }

    pub(crate) fn remaining(&self) -> usize {
        self.size.saturating_sub(self.cards.len())
    }

    pub(crate) fn card(&mut self, rank: Rank, suit: Suit) -> Option<()> {
        let card = self.deck.take(Card::new(rank, suit))?;
        self.cards.push(card);
        Some(())
    }

    /// `count` cards of `rank` in random suits.
    pub(crate) fn rank(&mut self, rank: Rank, count: usize) -> Option<()> {
        let cards = self.deck.take_rank(rank, count);
        if cards.len() < count {
            return None;
        }
        self.cards.extend(cards);
        Some(())
    }

    /// `count` trump cards.
    pub(crate) fn trumps(&mut self, count: usize) -> Option<()> {
        let rank = self.trump?;
        self.rank(rank, count)
    }

    /// A random remaining card matching `pred`.
    pub(crate) fn any<F>(&mut self, pred: F) -> Option<()>
    where
        F: Fn(Card) -> bool,
    {
        let card = self.deck.take_random_where(&mut *self.rng, pred)?;
        self.cards.push(card);
        Some(())
    }

    /// Fill the hand with singletons of ranks not yet held, never trump.
    pub(crate) fn fill_singles(&mut self) -> Option<()> {
        while self.remaining() > 0 {
            let held: Vec<Rank> = self.cards.iter().map(|c| c.rank()).collect();
            let trump = self.trump;
            self.any(|c| !held.contains(&c.rank()) && Some(c.rank()) != trump)?;
        }
        Some(())
    }

    /// Random ranks, distinct from each other and from `exclude` and trump.
    pub(crate) fn pick_ranks(&mut self, count: usize, exclude: &[Rank]) -> Option<Vec<Rank>> {
        let mut pool: Vec<Rank> = Rank::ALL
            .iter()
            .copied()
            .filter(|r| !exclude.contains(r) && Some(*r) != self.trump)
            .collect();
        if pool.len() < count {
            return None;
        }
        pool.shuffle(&mut *self.rng);
        pool.truncate(count);
        Some(pool)
    }

    pub(crate) fn pick_suit(&mut self) -> Suit {
        Suit::ALL[self.rng.random_range(0..Suit::ALL.len())]
    }

    pub(crate) fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// Replace a random non-trump card with a trump card of another suit.
    pub(crate) fn swap_in_trump(&mut self) -> Option<()> {
        let trump = self.trump?;
        let slots: Vec<usize> =
            (0..self.cards.len()).filter(|&i| self.cards[i].rank() != trump).collect();
        let slot = *slots.choose(&mut *self.rng)?;
        let suit = self.cards[slot].suit();
        let wild =
            self.deck.take_random_where(&mut *self.rng, |c| c.rank() == trump && c.suit() != suit)?;
        self.cards[slot] = wild;
        Some(())
    }

    /// The finished hand in random order, if it has the right size.
    pub(crate) fn finish(mut self) -> Option<Vec<Card>> {
        if self.cards.len() != self.size {
            return None;
        }
        self.cards.shuffle(&mut *self.rng);
        Some(self.cards)
    }
}
