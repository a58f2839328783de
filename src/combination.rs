//! Packed card combinations.
//!
//! Layout: seven 8-bit slots in a u64.
//! slot 0..1 : hole cards
//! slot 2..6 : board cards in deal order (flop, flop, flop, turn, river)
//!
//! A slot holds `id + 1`, or [`UNFILLED`] (0) when the card is not known yet.
//! Hole and board values live in disjoint slots, so a full seven-card
//! combination is simply `hand | board`.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::card::Card;
use crate::deck::CardSet;
use crate::error::EquityError;

/// Sentinel slot value for a card that has not been dealt.
pub const UNFILLED: u8 = 0;

pub const HOLE_SLOTS: Range<usize> = 0..2;
pub const BOARD_SLOTS: Range<usize> = 2..7;
pub const BOARD_LEN: usize = 5;

const SLOT_BITS: usize = 8;
const SLOT_MASK: u64 = 0xFF;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct Combination(u64);

impl Combination {
    pub const EMPTY: Combination = Combination(0);

    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline(always)]
    const fn raw(self, slot: usize) -> u8 {
        ((self.0 >> (slot * SLOT_BITS)) & SLOT_MASK) as u8
    }

    #[inline(always)]
    pub const fn is_filled(self, slot: usize) -> bool {
        self.raw(slot) != UNFILLED
    }

    #[inline(always)]
    pub const fn get(self, slot: usize) -> Option<Card> {
        match self.raw(slot) {
            UNFILLED => None,
            v => Some(Card::from_id(v - 1)),
        }
    }

    /// Fill an empty slot. Filling an occupied slot is a logic error.
    #[inline(always)]
    pub fn set(&mut self, slot: usize, card: Card) {
        debug_assert!(!self.is_filled(slot), "slot {slot} already filled");
        self.0 |= ((card.id() as u64) + 1) << (slot * SLOT_BITS);
    }

    /// Pack up to five known board cards into the leading board slots.
    pub fn board(cards: &[Card]) -> Result<Self, EquityError> {
        if cards.len() > BOARD_LEN {
            return Err(EquityError::TooManyBoardCards(cards.len()));
        }
        let mut b = Self::EMPTY;
        for (slot, &c) in BOARD_SLOTS.zip(cards) {
            b.set(slot, c);
        }
        Ok(b)
    }

    /// Board slots that still hold the sentinel, in slot order.
    pub fn unfilled_board_slots(self) -> impl Iterator<Item = usize> {
        BOARD_SLOTS.filter(move |&s| !self.is_filled(s))
    }

    /// Every known card, in slot order.
    pub fn cards(self) -> impl Iterator<Item = Card> {
        (HOLE_SLOTS.start..BOARD_SLOTS.end).filter_map(move |s| self.get(s))
    }

    pub fn len(self) -> usize {
        self.cards().count()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn mask(self) -> CardSet {
        self.cards().collect()
    }

    /// Copy with the hole slots cleared, leaving only board cards.
    #[inline(always)]
    pub const fn board_only(self) -> Combination {
        Combination(self.0 & !((1u64 << (BOARD_SLOTS.start * SLOT_BITS)) - 1))
    }

    /// Combine two combinations occupying disjoint slots.
    #[inline(always)]
    pub fn merge(self, other: Combination) -> Combination {
        debug_assert!(
            (HOLE_SLOTS.start..BOARD_SLOTS.end)
                .all(|s| !(self.is_filled(s) && other.is_filled(s))),
            "overlapping slots"
        );
        Combination(self.0 | other.0)
    }
}

impl std::ops::BitOr for Combination {
    type Output = Combination;
    fn bitor(self, rhs: Combination) -> Combination {
        self.merge(rhs)
    }
}

/// One seat's two hole cards.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Hand(Combination);

impl Hand {
    pub fn new(a: Card, b: Card) -> Result<Self, EquityError> {
        if a == b {
            return Err(EquityError::DuplicateCard(a));
        }
        let mut c = Combination::EMPTY;
        c.set(HOLE_SLOTS.start, a);
        c.set(HOLE_SLOTS.start + 1, b);
        Ok(Self(c))
    }

    /// Both hole cards. Always present by construction.
    pub fn cards(self) -> [Card; 2] {
        let id = |slot| self.0.raw(slot) - 1;
        [Card::from_id(id(0)), Card::from_id(id(1))]
    }

    #[inline(always)]
    pub const fn combination(self) -> Combination {
        self.0
    }

    pub fn mask(self) -> CardSet {
        self.cards().into_iter().collect()
    }

    /// True if both cards are still in `deck`.
    #[inline(always)]
    pub fn available(self, deck: CardSet) -> bool {
        let [a, b] = self.cards();
        deck.contains(a) && deck.contains(b)
    }

    /// Remove both cards from `deck` when both are present.
    #[inline(always)]
    pub fn take_from(self, deck: &mut CardSet) -> bool {
        if !self.available(*deck) {
            return false;
        }
        let [a, b] = self.cards();
        deck.remove(a);
        deck.remove(b);
        true
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b] = self.cards();
        write!(f, "{a}{b}")
    }
}

impl FromStr for Hand {
    type Err = EquityError;

    /// Parses `"AcKd"` style notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = crate::card::parse_cards(s)?;
        match cards.as_slice() {
            [a, b] => Hand::new(*a, *b),
            _ => Err(EquityError::InvalidNotation(s.to_string())),
        }
    }
}
