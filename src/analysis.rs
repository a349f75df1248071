//! Per-evaluation hand analysis shared by every bonus rule.
//!
//! A [`HandContext`] is built once per evaluation. It separates wild trump cards
//! from natural cards and exposes one shape query per rule. Rules use these to
//! recognise their own pattern and to step aside for patterns that outrank them.

use crate::cards::{Card, Rank};
use crate::game_mode::GameMode;
use crate::hand::{complete_sequence, Hand, RankCounts};

/// Groups ranks by their frequency in a hand, sorted by (count desc, rank desc).
///
/// Example: K K K Q 9 groups as [(King, 3), (Queen, 1), (Nine, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Create RankGroups from a rank count array indexed by rank value (2-14).
    pub fn from_counts(rank_counts: &RankCounts) -> Self {
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .copied()
            .map(|rank| (rank, rank_counts[rank.value() as usize]))
            .filter(|(_, count)| *count > 0)
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn as_slice(&self) -> &[(Rank, u8)] {
        &self.groups
    }

    /// Largest group, highest rank on ties.
    pub fn top(&self) -> Option<(Rank, u8)> {
        self.groups.first().copied()
    }

    /// Largest group whose rank is not in `exclude`.
    pub fn top_excluding(&self, exclude: &[Rank]) -> Option<(Rank, u8)> {
        self.groups.iter().copied().find(|(rank, _)| !exclude.contains(rank))
    }

    /// Ranks held at least `n` times, descending by (count, rank).
    pub fn at_least(&self, n: u8) -> Vec<(Rank, u8)> {
        self.groups.iter().copied().filter(|(_, count)| *count >= n).collect()
    }

    /// Ranks held exactly `n` times, descending by rank.
    pub fn exactly(&self, n: u8) -> Vec<Rank> {
        self.groups.iter().filter(|(_, count)| *count == n).map(|(rank, _)| *rank).collect()
    }

    /// Returns all singleton (kicker) ranks, in descending order.
    pub fn kickers(&self) -> Vec<Rank> {
        self.exactly(1)
    }
}

/// How a run of consecutive ranks was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceFill {
    /// Completed run, ascending rank values.
    pub ranks: Vec<u8>,
    /// True when trump wildcards filled part of the run.
    pub wild: bool,
}

impl SequenceFill {
    pub fn sum(&self) -> i64 {
        self.ranks.iter().map(|&v| i64::from(v)).sum()
    }
}

/// A group of equal ranks possibly padded with wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindFill {
    pub rank: Rank,
    pub natural: u8,
    pub wilds_used: u8,
}

impl KindFill {
    pub fn size(&self) -> u8 {
        self.natural + self.wilds_used
    }
}

/// The groups making up a full house after wild allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullHouseFill {
    /// (rank, filled size) per group, the triple first.
    pub groups: Vec<(Rank, u8)>,
    pub wilds_used: usize,
}

/// Pre-computed analysis of a hand for one evaluation.
#[derive(Debug, Clone)]
pub struct HandContext<'a> {
    pub hand: &'a Hand,
    pub game_mode: &'a GameMode,
    /// Effective trump card: present only when the mode uses trump.
    pub trump: Option<Card>,
    /// Every card by face value.
    pub face: RankGroups,
    /// Cards that are not trump.
    pub naturals: Vec<Card>,
    pub natural_groups: RankGroups,
    pub wilds: usize,
}

impl<'a> HandContext<'a> {
    pub fn new(hand: &'a Hand, game_mode: &'a GameMode, trump: Option<Card>) -> Self {
        let trump = trump.filter(|_| game_mode.use_trump);
        let face = RankGroups::from_counts(&hand.rank_counts(&[]));
        let (naturals, natural_counts, wilds) = match trump {
            Some(t) => {
                (hand.naturals(t), hand.rank_counts(&[t.rank()]), hand.trump_count(t))
            }
            None => (hand.as_slice().to_vec(), hand.rank_counts(&[]), 0),
        };
        let natural_groups = RankGroups::from_counts(&natural_counts);
        Self { hand, game_mode, trump, face, naturals, natural_groups, wilds }
    }

    pub fn len(&self) -> usize {
        self.hand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hand.is_empty()
    }

    pub fn trump_rank(&self) -> Option<Rank> {
        self.trump.map(Card::rank)
    }

    pub fn has_trump(&self) -> bool {
        self.wilds > 0
    }

    fn naturals_one_suit(&self) -> bool {
        self.naturals.first().is_some_and(|f| self.naturals.iter().all(|c| c.suit() == f.suit()))
    }

    fn naturals_one_color(&self) -> bool {
        self.naturals.first().is_some_and(|f| self.naturals.iter().all(|c| c.color() == f.color()))
    }

    fn naturals_distinct(&self) -> bool {
        self.natural_groups.as_slice().iter().all(|(_, count)| *count == 1)
    }

    /// A natural run, or one completed with trump wildcards. Wilds only complete
    /// a run around at least two natural cards.
    pub fn sequence(&self) -> Option<SequenceFill> {
        if self.hand.is_sequence() {
            let mut ranks: Vec<u8> = self.hand.as_slice().iter().map(|c| c.rank().value()).collect();
            ranks.sort_unstable();
            return Some(SequenceFill { ranks, wild: false });
        }
        if !self.has_trump() || self.naturals.len() < 2 {
            return None;
        }
        let values: Vec<u8> = self.naturals.iter().map(|c| c.rank().value()).collect();
        complete_sequence(&values, self.wilds).map(|ranks| SequenceFill { ranks, wild: true })
    }

    /// Best group of equal natural ranks (ignoring `exclude`) padded with every wild.
    fn kind_with_wilds(&self, exclude: &[Rank], n: u8) -> Option<KindFill> {
        let (rank, natural) = self.natural_groups.top_excluding(exclude)?;
        let wilds = u8::try_from(self.wilds).unwrap_or(u8::MAX);
        if natural >= n {
            return Some(KindFill { rank, natural, wilds_used: 0 });
        }
        let needed = n - natural;
        (wilds >= needed).then_some(KindFill { rank, natural, wilds_used: needed })
    }

    // ---------------------------------------------------------------------
    // Rule shapes, from the highest natural priority to the lowest.
    // ---------------------------------------------------------------------

    pub fn royal_flush(&self) -> bool {
        self.hand.is_royal_sequence(self.game_mode)
    }

    /// Two or more groups of four, Aces and Kings left out.
    pub fn multiple_four_of_a_kind(&self) -> Option<Vec<(Rank, u8)>> {
        let quads: Vec<(Rank, u8)> = self
            .face
            .at_least(4)
            .into_iter()
            .filter(|(rank, _)| !matches!(rank, Rank::Ace | Rank::King))
            .collect();
        (quads.len() >= 2).then_some(quads)
    }

    pub fn straight_flush(&self) -> Option<SequenceFill> {
        if self.royal_flush() {
            return None;
        }
        if self.hand.is_flush() && self.hand.is_sequence() {
            return self.sequence();
        }
        if self.has_trump() && self.naturals_one_suit() {
            return self.sequence().filter(|s| s.wild);
        }
        None
    }

    pub fn multiple_triplets(&self) -> Option<Vec<(Rank, u8)>> {
        let trips = self.face.at_least(3);
        (trips.len() >= 2).then_some(trips)
    }

    /// Every card is trump, or at least four trumps are held.
    pub fn trump_of_a_kind(&self) -> bool {
        self.has_trump() && (self.wilds == self.len() || self.wilds >= 4)
    }

    /// One triple and any number of pairs, wilds topping groups up.
    /// Wilds left over must pair among themselves.
    pub fn full_house(&self) -> Option<FullHouseFill> {
        let groups = self.natural_groups.as_slice();
        let (&(top_rank, top), rest) = groups.split_first()?;
        if top > 3 || rest.iter().any(|(_, count)| *count > 2) {
            return None;
        }
        let mut needed = usize::from(3 - top);
        needed += rest.iter().map(|(_, count)| usize::from(2 - count)).sum::<usize>();
        if needed > self.wilds || (self.wilds - needed) % 2 != 0 {
            return None;
        }
        let mut filled = vec![(top_rank, 3u8)];
        filled.extend(rest.iter().map(|(rank, _)| (*rank, 2u8)));
        if let Some(trump) = self.trump_rank() {
            filled.extend((0..(self.wilds - needed) / 2).map(|_| (trump, 2u8)));
        }
        Some(FullHouseFill { groups: filled, wilds_used: self.wilds })
    }

    /// A natural four (not Aces) joined by a trump.
    pub fn five_of_a_kind(&self) -> Option<Rank> {
        if !self.has_trump() {
            return None;
        }
        self.natural_groups
            .at_least(4)
            .into_iter()
            .map(|(rank, _)| rank)
            .find(|rank| *rank != Rank::Ace && Some(*rank) != self.trump_rank())
    }

    pub fn four_of_a_kind(&self) -> Option<KindFill> {
        self.kind_with_wilds(&[Rank::Ace], 4)
    }

    pub fn multiple_pairs(&self) -> Option<Vec<Rank>> {
        let pairs = self.face.exactly(2);
        (pairs.len() >= 2).then_some(pairs)
    }

    pub fn three_of_a_kind(&self) -> Option<KindFill> {
        self.kind_with_wilds(&[], 3)
    }

    pub fn same_colors_sequence(&self) -> Option<SequenceFill> {
        if !self.naturals_one_color() {
            return None;
        }
        self.sequence()
    }

    pub fn different_colors_sequence(&self) -> Option<SequenceFill> {
        if self.naturals_one_color() {
            return None;
        }
        self.sequence()
    }

    /// One suit among naturals with no repeated ranks. Returns whether wilds joined.
    pub fn flush(&self) -> Option<bool> {
        if !self.naturals_one_suit() || !self.naturals_distinct() || self.hand.is_sequence() {
            return None;
        }
        Some(self.has_trump())
    }

    pub fn pair(&self) -> Option<KindFill> {
        self.kind_with_wilds(&[], 2)
    }

    pub fn high_card(&self) -> Option<Rank> {
        self.hand.highest_rank()
    }
}
