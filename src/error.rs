use thiserror::Error;

use crate::card::Card;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EquityError {
    #[error("sample count must be positive")]
    NoSamples,
    #[error("at least one range is required")]
    NoRanges,
    #[error("{0} seats exceeds the supported maximum")]
    TooManySeats(usize),
    #[error("board has {0} cards, at most 5 allowed")]
    TooManyBoardCards(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("hand list is empty")]
    EmptyHandList,
    #[error("invalid card notation: {0:?}")]
    InvalidNotation(String),
    #[error("no hand assignable to seat {seat} after {attempts} attempts")]
    HandUnassignable { seat: usize, attempts: u32 },
    #[error("deck has no cards left to draw")]
    DeckExhausted,
}

impl EquityError {
    /// True for failures raised while sampling, as opposed to malformed input
    /// rejected before the first sample.
    pub fn is_sampling(&self) -> bool {
        matches!(
            self,
            EquityError::HandUnassignable { .. } | EquityError::DeckExhausted
        )
    }
}
