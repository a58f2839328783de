//! 52-bit card membership set.
//!
//! Bit `id` is set when the card with that id is a member. The same type
//! serves as the live deck during sampling and as a dead-card mask.

use std::ops::{BitAnd, BitOr, Not};

use crate::card::{Card, DECK_SIZE};
use crate::error::EquityError;

const FULL: u64 = (1u64 << DECK_SIZE) - 1;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct CardSet(u64);

impl CardSet {
    #[inline(always)]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline(always)]
    pub const fn full() -> Self {
        Self(FULL)
    }

    /// Build from a raw mask; bits above the deck are dropped.
    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits & FULL)
    }

    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline(always)]
    pub const fn contains_id(self, id: u8) -> bool {
        id < DECK_SIZE && (self.0 >> id) & 1 == 1
    }

    #[inline(always)]
    pub const fn contains(self, card: Card) -> bool {
        self.contains_id(card.id())
    }

    /// Returns true if the card was already present.
    #[inline(always)]
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.id();
        let already = self.0 & bit != 0;
        self.0 |= bit;
        already
    }

    /// Returns true if the card was present before removal.
    #[inline(always)]
    pub fn remove(&mut self, card: Card) -> bool {
        self.remove_id(card.id())
    }

    #[inline(always)]
    pub fn remove_id(&mut self, id: u8) -> bool {
        let bit = 1u64 << id;
        let present = self.0 & bit != 0;
        self.0 &= !bit;
        present
    }

    #[inline(always)]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Member cards in ascending id order.
    pub fn iter(self) -> impl Iterator<Item = Card> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let id = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(Card::from_id(id))
        })
    }

    /// Full deck minus every board and dead card.
    ///
    /// Board and dead cards must be distinct from each other and among
    /// themselves; a repeat is reported as [`EquityError::DuplicateCard`].
    pub fn build_deck(board: &[Card], dead: &[Card]) -> Result<Self, EquityError> {
        let mut used = Self::empty();
        for &c in board.iter().chain(dead) {
            if used.insert(c) {
                return Err(EquityError::DuplicateCard(c));
            }
        }
        Ok(!used)
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = Self::empty();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl BitOr for CardSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for CardSet {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Complement within the 52-card domain.
impl Not for CardSet {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0 & FULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;

    #[test]
    fn insert_contains_remove() {
        let mut s = CardSet::empty();
        let c: Card = "As".parse().unwrap();

        assert!(!s.insert(c));
        assert!(s.insert(c));
        assert!(s.contains(c));
        assert_eq!(s.len(), 1);

        assert!(s.remove(c));
        assert!(!s.remove(c));
        assert!(s.is_empty());
    }

    #[test]
    fn build_deck_excludes_board_and_dead() {
        let board = parse_cards("JhQdKh").unwrap();
        let dead = parse_cards("7h9d").unwrap();
        let deck = CardSet::build_deck(&board, &dead).unwrap();

        assert_eq!(deck.len(), 47);
        for c in board.iter().chain(&dead) {
            assert!(!deck.contains(*c));
        }
        assert!(deck.contains("Ac".parse().unwrap()));
    }

    #[test]
    fn build_deck_rejects_overlap() {
        let board = parse_cards("JhQdKh").unwrap();
        let dead = parse_cards("Qd").unwrap();
        let err = CardSet::build_deck(&board, &dead).unwrap_err();
        assert_eq!(err, EquityError::DuplicateCard("Qd".parse().unwrap()));

        let twice = parse_cards("2c2c").unwrap();
        assert!(CardSet::build_deck(&twice, &[]).is_err());
    }

    #[test]
    fn complement_stays_in_domain() {
        assert_eq!(!CardSet::full(), CardSet::empty());
        assert_eq!((!CardSet::empty()).len(), 52);
        assert_eq!(CardSet::from_bits(u64::MAX).len(), 52);
    }

    #[test]
    fn iter_is_ascending() {
        let s: CardSet = parse_cards("AsKc2c").unwrap().into_iter().collect();
        let ids: Vec<u8> = s.iter().map(Card::id).collect();
        assert_eq!(ids, vec![0, 11, 51]);
    }
}
