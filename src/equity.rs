//! Monte Carlo equity for any number of ranges.
//!
//! Every sample copies the base deck and board, deals each seat a hand from
//! its range in seat order, completes the board from what is left, scores
//! every seat and credits the pot to the best score (split evenly on ties).

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::combination::{Combination, BOARD_LEN};
use crate::config::{EngineConfig, DEFAULT_SEED};
use crate::deck::CardSet;
use crate::error::EquityError;
use crate::evaluator::{HandEvaluator, RankOracle};
use crate::range::{RandomHand, RangeProvider};
use crate::result::{settle, SeatResult, MAX_SEATS};
use crate::sampler::complete_board;

/// Owns the rank oracle and the random stream; reuse one calculator for
/// many queries.
pub struct EquityCalculator<O = HandEvaluator> {
    oracle: O,
    rng: ChaCha8Rng,
    config: EngineConfig,
}

impl EquityCalculator<HandEvaluator> {
    pub fn new(seed: u64) -> Self {
        Self::with_config(EngineConfig::default().with_seed(seed))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_oracle(HandEvaluator, config)
    }
}

impl Default for EquityCalculator<HandEvaluator> {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl<O: RankOracle> EquityCalculator<O> {
    pub fn with_oracle(oracle: O, config: EngineConfig) -> Self {
        Self {
            oracle,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        }
    }

    /// Estimate each range's equity on `board` with `dead` cards removed.
    ///
    /// - `board` length: 0..5
    /// - board and dead cards must all be distinct
    /// - results are index-aligned with `ranges`
    ///
    /// A seat whose range cannot be dealt aborts the whole call with
    /// [`EquityError::HandUnassignable`].
    pub fn evaluate(
        &mut self,
        ranges: &[&dyn RangeProvider],
        board: &[Card],
        dead: &[Card],
        samples: u64,
    ) -> Result<Vec<SeatResult>, EquityError> {
        let base = Combination::board(board)?;
        let deck = CardSet::build_deck(board, dead)?;
        self.evaluate_from(ranges, base, deck, samples)
    }

    /// Same as [`evaluate`](Self::evaluate) from a prebuilt board and deck.
    /// Hole slots of `board` are ignored; its board cards must not be in `deck`.
    pub fn evaluate_from(
        &mut self,
        ranges: &[&dyn RangeProvider],
        board: Combination,
        deck: CardSet,
        samples: u64,
    ) -> Result<Vec<SeatResult>, EquityError> {
        let board = board.board_only();
        check_shape(ranges.len(), samples)?;
        if let Some(c) = (board.mask() & deck).iter().next() {
            return Err(EquityError::DuplicateCard(c));
        }

        log::debug!(
            "evaluating {} seats, {} board cards, {} live cards, {} samples",
            ranges.len(),
            board.len(),
            deck.len(),
            samples
        );
        let results = simulate(
            &self.oracle,
            &mut self.rng,
            self.config.hand_attempts,
            ranges,
            board,
            deck,
            samples,
        )?;
        if log::log_enabled!(log::Level::Debug) {
            for (seat, r) in results.iter().enumerate() {
                log::debug!("seat {:<2} equity {:.4}", seat, r.pwin_tie());
            }
        }
        Ok(results)
    }

    /// Hero against `opponents` seats holding any two live cards.
    ///
    /// Opponent seats share one random range local to this call; each seat
    /// still receives its own hand every sample. Index 0 is the hero. With
    /// no opponents the hero plays alone and wins every sample.
    pub fn evaluate_vs_random(
        &mut self,
        hero: &dyn RangeProvider,
        opponents: usize,
        board: &[Card],
        dead: &[Card],
        samples: u64,
    ) -> Result<Vec<SeatResult>, EquityError> {
        if opponents >= MAX_SEATS {
            return Err(EquityError::TooManySeats(opponents.saturating_add(1)));
        }
        let random = RandomHand::new(!CardSet::build_deck(board, dead)?);
        let shared: &dyn RangeProvider = &random;
        let mut ranges = vec![shared; opponents + 1];
        ranges[0] = hero;
        self.evaluate(&ranges, board, dead, samples)
    }
}

#[cfg(feature = "parallel")]
mod par {
    use super::*;
    use rand::RngCore;
    use rayon::prelude::*;

    impl<O: RankOracle + Sync> EquityCalculator<O> {
        /// Parallel [`evaluate`](Self::evaluate): `samples` are split across
        /// `shards` independent streams seeded from this calculator's stream,
        /// and the per-shard results summed. Output depends on the seed and
        /// shard count, not on thread scheduling.
        pub fn evaluate_par(
            &mut self,
            ranges: &[&dyn RangeProvider],
            board: &[Card],
            dead: &[Card],
            samples: u64,
            shards: usize,
        ) -> Result<Vec<SeatResult>, EquityError> {
            let base = Combination::board(board)?;
            let deck = CardSet::build_deck(board, dead)?;
            check_shape(ranges.len(), samples)?;

            let shards = (shards.max(1) as u64).min(samples);
            let plan: Vec<(u64, u64)> = (0..shards)
                .map(|i| {
                    let count = samples / shards + u64::from(i < samples % shards);
                    (self.rng.next_u64(), count)
                })
                .collect();

            let oracle = &self.oracle;
            let attempts = self.config.hand_attempts;
            let n = ranges.len();
            plan.into_par_iter()
                .map(|(seed, count)| {
                    log::trace!("shard seed {:#x} running {} samples", seed, count);
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    simulate(oracle, &mut rng, attempts, ranges, base, deck, count)
                })
                .try_reduce(
                    || vec![SeatResult::default(); n],
                    |a, b| Ok(a.into_iter().zip(b).map(|(x, y)| x.merge(y)).collect()),
                )
        }
    }
}

fn check_shape(seats: usize, samples: u64) -> Result<(), EquityError> {
    if samples == 0 {
        return Err(EquityError::NoSamples);
    }
    if seats == 0 {
        return Err(EquityError::NoRanges);
    }
    if seats > MAX_SEATS {
        return Err(EquityError::TooManySeats(seats));
    }
    Ok(())
}

/// The sample loop. `board` holds only board slots and none of its cards
/// are in `deck`.
fn simulate<O: RankOracle + ?Sized>(
    oracle: &O,
    rng: &mut ChaCha8Rng,
    attempts: u32,
    ranges: &[&dyn RangeProvider],
    board: Combination,
    deck: CardSet,
    samples: u64,
) -> Result<Vec<SeatResult>, EquityError> {
    debug_assert!(board.len() <= BOARD_LEN);
    let n = ranges.len();
    let mut results = vec![SeatResult::new(samples); n];
    let mut hands = vec![Combination::EMPTY; n];
    let mut scores = vec![0u32; n];
    let mut winners = Vec::with_capacity(n);

    for _ in 0..samples {
        let mut sim_deck = deck;
        let mut sim_board = board;

        for (seat, range) in ranges.iter().enumerate() {
            let Some(hand) = range.get_hand(&mut *rng, &mut sim_deck, attempts) else {
                log::warn!("no hand assignable to seat {} after {} attempts", seat, attempts);
                return Err(EquityError::HandUnassignable { seat, attempts });
            };
            hands[seat] = hand.combination();
        }

        complete_board(&mut *rng, &mut sim_board, &mut sim_deck)?;

        for (score, hand) in scores.iter_mut().zip(&hands) {
            *score = oracle.score(*hand | sim_board);
        }
        settle(&scores, &mut winners, &mut results);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;
    use crate::range::{HandList, SingleHand};

    fn single(s: &str) -> SingleHand {
        s.parse().unwrap()
    }

    #[test]
    fn counts_sum_to_samples() {
        let mut calc = EquityCalculator::new(123);
        let (a, b, c) = (single("2c3c"), single("4c5c"), single("6c7c"));
        let board = parse_cards("8c9cTd").unwrap();

        let results = calc.evaluate(&[&a, &b, &c], &board, &[], 10_000).unwrap();

        let credit: f64 = results.iter().map(|r| r.win as f64 + r.tie).sum();
        assert!((credit - 10_000.0).abs() < 1e-6);
        for r in &results {
            assert_eq!(r.samples, 10_000);
            assert!(r.win + r.loss <= r.samples);
        }
    }

    #[test]
    fn complete_board_is_one_outcome_per_sample() {
        let mut calc = EquityCalculator::new(1);
        let (a, b) = (single("AcAd"), single("KcKd"));
        let board = parse_cards("2h7s9dJc3h").unwrap();

        let results = calc.evaluate(&[&a, &b], &board, &[], 500).unwrap();

        assert_eq!(results[0].win, 500);
        assert_eq!(results[1].loss, 500);
    }

    #[test]
    fn identical_strength_splits_every_pot() {
        // board plays for everyone: royal flush on the board
        let mut calc = EquityCalculator::new(2);
        let (a, b, c) = (single("2c3d"), single("4c5d"), single("6c7d"));
        let board = parse_cards("AsKsQsJsTs").unwrap();

        let results = calc.evaluate(&[&a, &b, &c], &board, &[], 300).unwrap();

        for r in &results {
            assert_eq!(r.win, 0);
            assert_eq!(r.loss, 0);
            assert!((r.pwin_tie() - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn custom_oracle_is_used() {
        let flat = |_: Combination| 0u32;
        let mut calc = EquityCalculator::with_oracle(flat, EngineConfig::default());
        let list: HandList = "AhAs,KhKs,QhQs".parse().unwrap();

        let results = calc.evaluate(&[&list, &list], &[], &[], 100).unwrap();
        assert_eq!(results[0].tie, 50.0);
        assert_eq!(results[1].tie, 50.0);
    }

    #[test]
    fn same_seed_replays_exactly() {
        let hero = single("AhAs");
        let run = || {
            let mut calc = EquityCalculator::new(99);
            calc.evaluate_vs_random(&hero, 2, &[], &[], 2_000).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn malformed_input_is_rejected_before_sampling() {
        let mut calc = EquityCalculator::new(0);
        let a = single("AcKd");
        let flop = parse_cards("JhQdKh").unwrap();

        assert_eq!(calc.evaluate(&[&a], &flop, &[], 0), Err(EquityError::NoSamples));
        assert_eq!(calc.evaluate(&[], &flop, &[], 10), Err(EquityError::NoRanges));
        let seat: &dyn RangeProvider = &a;
        assert_eq!(
            calc.evaluate(&vec![seat; 11], &flop, &[], 10),
            Err(EquityError::TooManySeats(11))
        );
        assert_eq!(
            calc.evaluate(&[&a], &flop, &parse_cards("Kh").unwrap(), 10),
            Err(EquityError::DuplicateCard("Kh".parse().unwrap()))
        );
        assert_eq!(
            calc.evaluate(&[&a], &parse_cards("2c3c4c5c6c7c").unwrap(), &[], 10),
            Err(EquityError::TooManyBoardCards(6))
        );
    }

    #[test]
    fn oversized_random_tables_are_rejected() {
        let mut calc = EquityCalculator::new(0);
        let hero = single("AhAs");

        assert_eq!(
            calc.evaluate_vs_random(&hero, MAX_SEATS - 1, &[], &[], 10).map(|r| r.len()),
            Ok(MAX_SEATS)
        );
        assert_eq!(
            calc.evaluate_vs_random(&hero, MAX_SEATS, &[], &[], 10),
            Err(EquityError::TooManySeats(MAX_SEATS + 1))
        );
        assert_eq!(
            calc.evaluate_vs_random(&hero, 1 << 60, &[], &[], 10),
            Err(EquityError::TooManySeats((1 << 60) + 1))
        );
        assert_eq!(
            calc.evaluate_vs_random(&hero, usize::MAX, &[], &[], 10),
            Err(EquityError::TooManySeats(usize::MAX))
        );
    }

    #[test]
    fn zero_opponents_is_a_lone_hero() {
        let mut calc = EquityCalculator::new(3);
        let hero = single("7c2d");
        let flop = parse_cards("JhQdKh").unwrap();

        let results = calc.evaluate_vs_random(&hero, 0, &flop, &[], 200).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].win, 200);
        assert_eq!(results[0].pwin_tie(), 1.0);
    }

    #[test]
    fn evaluate_from_rejects_board_cards_in_deck() {
        let mut calc = EquityCalculator::new(0);
        let a = single("AcKd");
        let board = Combination::board(&parse_cards("JhQdKh").unwrap()).unwrap();

        let err = calc
            .evaluate_from(&[&a], board, CardSet::full(), 10)
            .unwrap_err();
        assert!(matches!(err, EquityError::DuplicateCard(_)));
        assert!(!err.is_sampling());
    }

    #[test]
    fn overlapping_single_hands_are_unassignable() {
        let mut calc = EquityCalculator::new(0);
        let (a, b) = (single("AcKd"), single("AcQd"));

        let err = calc.evaluate(&[&a, &b], &[], &[], 10).unwrap_err();
        assert_eq!(err, EquityError::HandUnassignable { seat: 1, attempts: 64 });
        assert!(err.is_sampling());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_counts_and_determinism() {
        let (a, b) = (single("AcKd"), single("JsTs"));
        let flop = parse_cards("JhQdKh").unwrap();
        let run = || {
            let mut calc = EquityCalculator::new(5);
            calc.evaluate_par(&[&a, &b], &flop, &[], 10_001, 4).unwrap()
        };
        let results = run();

        assert_eq!(results, run());
        assert_eq!(results[0].samples, 10_001);
        assert!((results[0].pwin_tie() - 0.663).abs() < 0.02);
    }
}
