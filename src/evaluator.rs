//! Hand ranking: the [`RankOracle`] seam and the default LUT evaluator.
//!
//! The evaluator splits a hand into suit masks, derives rank-multiplicity
//! masks, picks the best category top-down and packs the result into a
//! [`Score`].

use crate::bitboard::BitBoard4x13;
use crate::card::Card;
use crate::combination::Combination;
use crate::lut13::{hibit13, popcnt13, straight_end13, top_ranks13};
use crate::score::{Category, Score};

/// Total-order strength function over a set of hole and board cards.
///
/// Scores only need to be comparable between hands sharing one board.
pub trait RankOracle {
    fn score(&self, cards: Combination) -> u32;
}

impl<F> RankOracle for F
where
    F: Fn(Combination) -> u32,
{
    #[inline(always)]
    fn score(&self, cards: Combination) -> u32 {
        self(cards)
    }
}

/// Table-driven evaluator for 5 to 7 cards. Tables are compile-time
/// constants, so the evaluator itself carries no state.
#[derive(Copy, Clone, Debug, Default)]
pub struct HandEvaluator;

impl RankOracle for HandEvaluator {
    #[inline(always)]
    fn score(&self, cards: Combination) -> u32 {
        evaluate(&BitBoard4x13::from_combination(cards)).0
    }
}

#[inline(always)]
fn without(mask: u16, rank: u8) -> u16 {
    mask & !(1u16 << rank)
}

pub fn evaluate(hand: &BitBoard4x13) -> Score {
    let ranks = hand.ranks_any();
    let quads = hand.ge4();
    let trips = hand.ge3() & !quads;
    let pairs = hand.ge2() & !hand.ge3();

    // with seven cards at most one suit can hold five
    let flush = hand
        .suits_array()
        .iter()
        .copied()
        .find(|&m| popcnt13(m) >= 5);

    if let Some(suited) = flush {
        let top = straight_end13(suited);
        if top >= 0 {
            return Score::pack(Category::StraightFlush, [top as u8, 0, 0, 0, 0]);
        }
    }

    if quads != 0 {
        let q = hibit13(quads) as u8;
        let [k] = top_ranks13::<1>(without(ranks, q));
        return Score::pack(Category::Quads, [q, k, 0, 0, 0]);
    }

    if trips != 0 {
        let t = hibit13(trips) as u8;
        // a second set of trips plays as the pair
        let filler = without(trips, t) | pairs;
        if filler != 0 {
            return Score::pack(Category::FullHouse, [t, hibit13(filler) as u8, 0, 0, 0]);
        }
    }

    if let Some(suited) = flush {
        return Score::pack(Category::Flush, top_ranks13::<5>(suited));
    }

    let top = straight_end13(ranks);
    if top >= 0 {
        return Score::pack(Category::Straight, [top as u8, 0, 0, 0, 0]);
    }

    if trips != 0 {
        let t = hibit13(trips) as u8;
        let [k1, k2] = top_ranks13::<2>(without(ranks, t));
        return Score::pack(Category::Trips, [t, k1, k2, 0, 0]);
    }

    if popcnt13(pairs) >= 2 {
        let [p1, p2] = top_ranks13::<2>(pairs);
        let [k] = top_ranks13::<1>(without(without(ranks, p1), p2));
        return Score::pack(Category::TwoPair, [p1, p2, k, 0, 0]);
    }

    if pairs != 0 {
        let p = hibit13(pairs) as u8;
        let [k1, k2, k3] = top_ranks13::<3>(without(ranks, p));
        return Score::pack(Category::OnePair, [p, k1, k2, k3, 0]);
    }

    Score::pack(Category::HighCard, top_ranks13::<5>(ranks))
}

/// Convenience: evaluate a slice of cards.
pub fn evaluate_cards(cards: &[Card]) -> Score {
    let mut b = BitBoard4x13::new();
    for &c in cards {
        b.add_card(c);
    }
    evaluate(&b)
}
