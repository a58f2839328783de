//! Hand ranges: where each seat's hole cards come from.
//!
//! A provider proposes hands from its own domain and keeps the first one
//! whose cards are both still in the live deck. Providers hold no per-sample
//! state, so one instance can serve several seats.

use rand::{Rng, RngCore};
use std::str::FromStr;

use crate::card::Card;
use crate::combination::Hand;
use crate::deck::CardSet;
use crate::error::EquityError;
use crate::sampler::random_id;

pub trait RangeProvider: Send + Sync {
    /// Pick a hand whose cards are both in `deck` and remove them from it.
    ///
    /// Gives up after `attempts` candidates collide with dealt cards. `None`
    /// leaves `deck` untouched.
    fn get_hand(&self, rng: &mut dyn RngCore, deck: &mut CardSet, attempts: u32) -> Option<Hand>;
}

/// A seat holding one known hand.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SingleHand(pub Hand);

impl RangeProvider for SingleHand {
    /// A single candidate cannot improve on retry, so it is checked once.
    fn get_hand(&self, _: &mut dyn RngCore, deck: &mut CardSet, _: u32) -> Option<Hand> {
        self.0.take_from(deck).then_some(self.0)
    }
}

impl FromStr for SingleHand {
    type Err = EquityError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(SingleHand)
    }
}

/// A finite set of hands, each proposed with equal probability.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HandList {
    hands: Vec<Hand>,
}

impl HandList {
    pub fn new(hands: Vec<Hand>) -> Result<Self, EquityError> {
        if hands.is_empty() {
            return Err(EquityError::EmptyHandList);
        }
        Ok(Self { hands })
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }
}

impl FromStr for HandList {
    type Err = EquityError;

    /// Hands separated by commas or whitespace: `"AhAs, KhKs, QcQd"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hands = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Hand>, _>>()?;
        Self::new(hands)
    }
}

impl RangeProvider for HandList {
    fn get_hand(&self, rng: &mut dyn RngCore, deck: &mut CardSet, attempts: u32) -> Option<Hand> {
        (0..attempts)
            .map(|_| self.hands[rng.random_range(0..self.hands.len())])
            .find(|h| h.take_from(deck))
    }
}

/// Any two cards outside a fixed dead set.
///
/// Candidates are two ids drawn over the whole 52-card domain and rejected
/// when they coincide, are dead, or were already dealt.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct RandomHand {
    dead: CardSet,
}

impl RandomHand {
    pub fn new(dead: CardSet) -> Self {
        Self { dead }
    }
}

impl RangeProvider for RandomHand {
    fn get_hand(&self, rng: &mut dyn RngCore, deck: &mut CardSet, attempts: u32) -> Option<Hand> {
        let live = *deck & !self.dead;
        for _ in 0..attempts {
            let (a, b) = (random_id(rng), random_id(rng));
            if a == b || !live.contains_id(a) || !live.contains_id(b) {
                continue;
            }
            let (a, b) = (Card::from_id(a), Card::from_id(b));
            deck.remove(a);
            deck.remove(b);
            return Hand::new(a, b).ok();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn single_hand_takes_its_cards_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut deck = CardSet::full();
        let seat: SingleHand = "AcKd".parse().unwrap();

        assert_eq!(seat.get_hand(&mut rng, &mut deck, 8), Some(seat.0));
        assert_eq!(deck.len(), 50);
        assert_eq!(seat.get_hand(&mut rng, &mut deck, 8), None);
        assert_eq!(deck.len(), 50);
    }

    #[test]
    fn hand_list_skips_blocked_hands() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let list: HandList = "AhAs, KhKs QcQd".parse().unwrap();
        assert_eq!(list.hands().len(), 3);

        let blocked = parse_cards("AhKs").unwrap();
        for _ in 0..50 {
            let mut deck = CardSet::build_deck(&blocked, &[]).unwrap();
            let hand = list.get_hand(&mut rng, &mut deck, 64).unwrap();
            assert_eq!(hand.to_string(), "QcQd");
            assert_eq!(deck.len(), 48);
        }
    }

    #[test]
    fn hand_list_fails_when_every_hand_is_blocked() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let list: HandList = "AhAs,KhKs".parse().unwrap();
        let mut deck = CardSet::build_deck(&parse_cards("AsKh").unwrap(), &[]).unwrap();
        let before = deck;

        assert_eq!(list.get_hand(&mut rng, &mut deck, 64), None);
        assert_eq!(deck, before);
    }

    #[test]
    fn empty_hand_list_is_rejected() {
        assert_eq!(HandList::new(Vec::new()), Err(EquityError::EmptyHandList));
        assert_eq!(" , ".parse::<HandList>(), Err(EquityError::EmptyHandList));
    }

    #[test]
    fn random_hand_avoids_dead_and_dealt_cards() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let dead: CardSet = parse_cards("AhAsAcAd").unwrap().into_iter().collect();
        let seat = RandomHand::new(dead);

        for _ in 0..200 {
            let mut deck = CardSet::full();
            let dealt: Hand = "KhKs".parse().unwrap();
            dealt.take_from(&mut deck);

            let hand = seat.get_hand(&mut rng, &mut deck, 64).unwrap();
            let mask = hand.mask();
            assert_eq!(mask & (dead | dealt.mask()), CardSet::empty());
            assert_eq!(deck.len(), 48);
        }
    }

    #[test]
    fn random_hand_gives_up_without_two_live_cards() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let seat = RandomHand::default();
        let mut deck: CardSet = parse_cards("7c").unwrap().into_iter().collect();

        assert_eq!(seat.get_hand(&mut rng, &mut deck, 1000), None);
        assert_eq!(deck.len(), 1);
    }
}
