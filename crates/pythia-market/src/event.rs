//! emitted records for off-ledger indexing

use pythia_confidential::Address;
use serde::{Deserialize, Serialize};

use crate::market::MarketId;

/// append-only record of accepted mutations
///
/// the bet record carries the plaintext stake: the amount is observable via
/// the value transfer itself, only the stored aggregate is encrypted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    MarketCreated {
        market_id: MarketId,
        creator: Address,
        title: String,
        option_count: usize,
    },
    BetPlaced {
        market_id: MarketId,
        bettor: Address,
        amount: u64,
    },
}
