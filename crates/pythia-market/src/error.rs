//! error taxonomy for ledger operations
//!
//! every variant is fatal to the enclosing operation: preconditions are all
//! checked before the first state mutation, so a returned error means no
//! side effect happened.

use pythia_confidential::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    #[error("referenced market does not exist")]
    InvalidMarket,

    #[error("markets take between 2 and 4 options")]
    InvalidOptions,

    #[error("stake must be nonzero and fit the 64-bit encrypted domain")]
    InvalidBetAmount,

    #[error("participant already placed a bet on this market")]
    BetAlreadyPlaced,

    /// substrate failures (bad input proofs included) surface verbatim
    #[error("confidential engine: {0}")]
    Engine(#[from] EngineError),
}
