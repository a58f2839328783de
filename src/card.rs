//! Card types (Suit/Rank/Card) and short notation parsing.
//!
//! A card is identified by its id in `0..52` (`suit * 13 + rank`). Everything
//! downstream of this module (sets, packed boards, the sampler) works on ids.

use std::fmt;
use std::str::FromStr;

use crate::error::EquityError;

/// Number of distinct cards in the deck.
pub const DECK_SIZE: u8 = 52;

/// A playing card suit.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    #[inline(always)]
    pub const fn idx(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn from_u8(x: u8) -> Suit {
        match x & 0x3 {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// A playing card rank.
///
/// Ranks are stored as 0..12 (Two..Ace), which lines up with a 13-bit mask.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    #[inline(always)]
    pub const fn idx(self) -> u8 {
        self as u8
    }

    /// Convert 0..12 to a Rank (Two..Ace). Out-of-range input saturates to Ace.
    #[inline(always)]
    pub const fn from_u8(x: u8) -> Rank {
        match x {
            0 => Rank::Two,
            1 => Rank::Three,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            _ => Rank::Ace,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }
}

/// A card = suit + rank.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[inline(always)]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// suit = id / 13, rank = id % 13. Input is assumed to be in `0..52`.
    #[inline(always)]
    pub const fn from_id(id: u8) -> Self {
        let suit = Suit::from_u8(id / 13);
        let rank = Rank::from_u8(id % 13);
        Self { suit, rank }
    }

    /// Convert to 0..51 id (inverse of from_id).
    #[inline(always)]
    pub const fn id(self) -> u8 {
        (self.suit as u8) * 13 + (self.rank as u8)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = EquityError;

    /// Parses two-character notation such as `"Ah"` or `"tc"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(u), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(EquityError::InvalidNotation(s.to_string()));
        };
        match (Rank::from_char(r), Suit::from_char(u)) {
            (Some(rank), Some(suit)) => Ok(Card::new(suit, rank)),
            _ => Err(EquityError::InvalidNotation(s.to_string())),
        }
    }
}

/// Parse a run of concatenated or whitespace-separated cards,
/// e.g. `"JhQdKh"` or `"Jh Qd Kh"`. Duplicates are not rejected here;
/// that is the job of whoever builds a deck from the result.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, EquityError> {
    let compact: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() % 2 != 0 {
        return Err(EquityError::InvalidNotation(s.to_string()));
    }
    compact
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>().parse::<Card>())
        .collect()
}
