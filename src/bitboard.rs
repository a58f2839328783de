//! 4×13 bitboard: 4 suits, 13 ranks per suit.
//!
//! Card ids are laid out suit-major (`suit * 13 + rank`), so a [`CardSet`]
//! splits into the four suit masks with plain shifts.

use crate::card::Card;
use crate::combination::Combination;
use crate::deck::CardSet;

pub const MASK13: u16 = (1u16 << 13) - 1;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct BitBoard4x13 {
    suits: [u16; 4],
}

impl BitBoard4x13 {
    #[inline(always)]
    pub const fn new() -> Self {
        Self { suits: [0; 4] }
    }

    #[inline(always)]
    pub const fn from_set(set: CardSet) -> Self {
        let b = set.bits();
        Self {
            suits: [
                (b & MASK13 as u64) as u16,
                ((b >> 13) & MASK13 as u64) as u16,
                ((b >> 26) & MASK13 as u64) as u16,
                ((b >> 39) & MASK13 as u64) as u16,
            ],
        }
    }

    #[inline]
    pub fn from_combination(cards: Combination) -> Self {
        let mut b = Self::new();
        for c in cards.cards() {
            b.add_card(c);
        }
        b
    }

    #[inline(always)]
    pub const fn suits_array(&self) -> &[u16; 4] {
        &self.suits
    }

    /// Returns true if card was already present.
    #[inline(always)]
    pub fn add_card(&mut self, card: Card) -> bool {
        let s = card.suit.idx();
        let bit = 1u16 << (card.rank.idx() as u16);
        let already = (self.suits[s] & bit) != 0;
        self.suits[s] |= bit;
        already
    }

    /// Ranks present in any suit.
    #[inline(always)]
    pub fn ranks_any(&self) -> u16 {
        self.suits[0] | self.suits[1] | self.suits[2] | self.suits[3]
    }

    /// Ranks held in at least two suits.
    #[inline(always)]
    pub fn ge2(&self) -> u16 {
        let [h0, h1, h2, h3] = self.suits;
        (h0 & h1) | (h0 & h2) | (h0 & h3) | (h1 & h2) | (h1 & h3) | (h2 & h3)
    }

    #[inline(always)]
    pub fn ge3(&self) -> u16 {
        let [h0, h1, h2, h3] = self.suits;
        (h0 & h1 & h2) | (h0 & h1 & h3) | (h0 & h2 & h3) | (h1 & h2 & h3)
    }

    #[inline(always)]
    pub fn ge4(&self) -> u16 {
        let [h0, h1, h2, h3] = self.suits;
        h0 & h1 & h2 & h3
    }
}
