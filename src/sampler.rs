//! Card drawing primitives shared by the engine and the range providers.

use rand::Rng;

use crate::card::{Card, DECK_SIZE};
use crate::combination::Combination;
use crate::deck::CardSet;
use crate::error::EquityError;

/// Uniform id in the full 52-card domain, regardless of membership.
#[inline(always)]
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(0..DECK_SIZE)
}

/// Remove and return one card chosen uniformly from `deck`.
///
/// Ids are drawn over the whole domain and rejected until one is still in
/// the deck, so the expected number of tries is `52 / deck.len()`.
#[inline]
pub fn draw_one<R: Rng + ?Sized>(rng: &mut R, deck: &mut CardSet) -> Result<Card, EquityError> {
    if deck.is_empty() {
        return Err(EquityError::DeckExhausted);
    }
    loop {
        let id = random_id(rng);
        if deck.remove_id(id) {
            return Ok(Card::from_id(id));
        }
    }
}

/// Fill every unfilled board slot, in slot order, from `deck`.
///
/// Known slots are left alone. Returns the number of cards drawn, which is
/// zero for a board that is already complete.
#[inline]
pub fn complete_board<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Combination,
    deck: &mut CardSet,
) -> Result<usize, EquityError> {
    let mut drawn = 0;
    for slot in board.unfilled_board_slots() {
        board.set(slot, draw_one(rng, deck)?);
        drawn += 1;
    }
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn draw_one_only_returns_members() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let keep = parse_cards("2c7dAs").unwrap();
        let mut deck: CardSet = keep.iter().copied().collect();

        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(draw_one(&mut rng, &mut deck).unwrap());
        }
        seen.sort_by_key(|c| c.id());
        let mut want = keep.clone();
        want.sort_by_key(|c| c.id());

        assert_eq!(seen, want);
        assert_eq!(draw_one(&mut rng, &mut deck), Err(EquityError::DeckExhausted));
    }

    #[test]
    fn draw_one_is_roughly_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let base: CardSet = parse_cards("2c3c4c5c").unwrap().into_iter().collect();
        let mut hits = [0u32; 4];
        for _ in 0..8000 {
            let mut deck = base;
            let c = draw_one(&mut rng, &mut deck).unwrap();
            hits[c.id() as usize] += 1;
        }
        for h in hits {
            assert!((1700..2300).contains(&h), "{hits:?}");
        }
    }

    #[test]
    fn complete_board_fills_trailing_slots() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let flop = parse_cards("JhQdKh").unwrap();
        let mut board = Combination::board(&flop).unwrap();
        let mut deck = CardSet::build_deck(&flop, &[]).unwrap();

        let drawn = complete_board(&mut rng, &mut board, &mut deck).unwrap();

        assert_eq!(drawn, 2);
        assert_eq!(deck.len(), 47);
        assert_eq!(board.len(), 5);
        assert_eq!(board.cards().take(3).collect::<Vec<_>>(), flop);
        for c in board.cards() {
            assert!(!deck.contains(c));
        }
    }

    #[test]
    fn complete_board_is_noop_on_full_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let river = parse_cards("JhQdKh4s2c").unwrap();
        let mut board = Combination::board(&river).unwrap();
        let before = board;
        let mut deck = CardSet::build_deck(&river, &[]).unwrap();

        assert_eq!(complete_board(&mut rng, &mut board, &mut deck).unwrap(), 0);
        assert_eq!(board, before);
        assert_eq!(deck.len(), 47);
    }
}
