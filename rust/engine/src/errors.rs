use thiserror::Error;

use crate::phase::Phase;

/// Rejections returned across the library boundary.
///
/// Every variant corresponds to an illegal request; the state the request
/// was made against is left untouched. Ties, split pots, and missing low
/// qualifiers are outcomes, not errors, and never appear here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Action not available: {reason}")]
    InvalidAction { reason: &'static str },
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u64, minimum: u64 },
    #[error("Insufficient chips for action")]
    InsufficientChips,
    #[error("Invalid discard selection: {reason}")]
    InvalidDiscard { reason: &'static str },
    #[error("Action not legal in phase {phase:?}")]
    WrongPhase { phase: Phase },
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Seat {seat} has already folded")]
    PlayerAlreadyFolded { seat: usize },
    #[error("Unknown seat {seat}")]
    UnknownSeat { seat: usize },
    #[error("Variant requires between {min} and {max} players, got {actual}")]
    WrongPlayerCount {
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("Deck exhausted while dealing")]
    DeckExhausted,
}
