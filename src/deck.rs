use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// A standard 52-card deck that example hands are dealt from, so no card
/// appears twice in one hand.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use brag_bonus::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// A freshly shuffled standard deck.
    pub fn shuffled<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_with(rng);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Shuffle using the provided RNG.
    pub fn shuffle_with<R: RngCore + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove a specific card, if still present.
    pub fn take(&mut self, card: Card) -> Option<Card> {
        let pos = self.cards.iter().position(|c| *c == card)?;
        Some(self.cards.swap_remove(pos))
    }

    /// Remove the first remaining card matching `pred`.
    pub fn take_where<F>(&mut self, pred: F) -> Option<Card>
    where
        F: Fn(Card) -> bool,
    {
        let pos = self.cards.iter().position(|c| pred(*c))?;
        Some(self.cards.remove(pos))
    }

    /// Remove up to `n` cards of `rank`, in deck order.
    pub fn take_rank(&mut self, rank: Rank, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.take_where(|c| c.rank() == rank)).collect()
    }

    /// Remove a uniformly chosen remaining card matching `pred`.
    pub fn take_random_where<R, F>(&mut self, rng: &mut R, pred: F) -> Option<Card>
    where
        R: RngCore + ?Sized,
        F: Fn(Card) -> bool,
    {
        let matching: Vec<usize> =
            self.cards.iter().enumerate().filter(|(_, c)| pred(**c)).map(|(i, _)| i).collect();
        if matching.is_empty() {
            return None;
        }
        let pick = matching[rng.random_range(0..matching.len())];
        Some(self.cards.remove(pick))
    }
}
