//! Monte Carlo equity estimation for Texas Hold'em hand ranges.

pub mod card;
pub mod deck;
pub mod combination;
pub mod bitboard;
pub mod lut13;
pub mod score;
pub mod evaluator;
pub mod sampler;
pub mod range;
pub mod result;
pub mod config;
pub mod error;
pub mod equity;

pub use card::{parse_cards, Card, Rank, Suit};
pub use combination::{Combination, Hand};
pub use config::EngineConfig;
pub use deck::CardSet;
pub use error::EquityError;
pub use evaluator::{evaluate, evaluate_cards, HandEvaluator, RankOracle};
pub use range::{HandList, RandomHand, RangeProvider, SingleHand};
pub use result::{SeatResult, MAX_SEATS, TIE_SPLIT};
pub use score::{Category, Score};

pub use equity::EquityCalculator;
