//! Packed u32 hand strength.
//!
//! bits 20..23 : category, higher is better
//! bits 16..19 : r0
//! bits 12..15 : r1
//! bits  8..11 : r2
//! bits  4..7  : r3
//! bits  0..3  : r4
//!
//! Each r* is a 4-bit rank index (0..12) in significance order; unused
//! slots are 0. Plain integer comparison orders hands.

#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Score(pub u32);

/// Hand categories (higher is better).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
}

impl Score {
    #[inline(always)]
    pub fn pack(cat: Category, ranks: [u8; 5]) -> Score {
        let mut v = (cat as u32) << 20;
        for (i, r) in ranks.into_iter().enumerate() {
            v |= ((r & 0xF) as u32) << (16 - 4 * i);
        }
        Score(v)
    }

    pub fn category(self) -> Category {
        match (self.0 >> 20) & 0xF {
            0 => Category::HighCard,
            1 => Category::OnePair,
            2 => Category::TwoPair,
            3 => Category::Trips,
            4 => Category::Straight,
            5 => Category::Flush,
            6 => Category::FullHouse,
            7 => Category::Quads,
            _ => Category::StraightFlush,
        }
    }

    /// Leading rank index (pair rank, straight top, and so on).
    pub fn primary_rank(self) -> u8 {
        ((self.0 >> 16) & 0xF) as u8
    }
}
