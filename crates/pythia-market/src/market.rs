//! market data model
//!
//! metadata is plaintext and immutable after creation; the aggregates are
//! ciphertext handles mutated on every accepted bet.

use core::fmt;

use pythia_confidential::{Address, CtU32, CtU64};
use serde::{Deserialize, Serialize};

/// fixed number of encrypted counter slots per market. slots at or beyond
/// `option_count` stay at encrypted zero and are never exposed.
pub const OPTION_SLOTS: usize = 4;
/// smallest allowed option list
pub const MIN_OPTIONS: usize = 2;
/// largest allowed option list
pub const MAX_OPTIONS: usize = OPTION_SLOTS;

/// sequential zero-based market identifier, never reused
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MarketId(pub u64);

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// one prediction question with accumulating encrypted statistics
///
/// plaintext-equivalent invariant, guaranteed by the update algorithm and
/// never asserted over ciphertexts:
/// `sum(option_counts[0..option_count)) == total_bets`
#[derive(Clone, Debug)]
pub struct Market {
    pub id: MarketId,
    pub title: String,
    /// 2..=4 option names, fixed at creation
    pub options: Vec<String>,
    pub option_count: usize,
    /// host ledger time at creation, unix seconds
    pub created_at: u64,
    pub creator: Address,
    /// encrypted u64, monotonically non-decreasing (mod 2^64)
    pub total_staked: CtU64,
    /// encrypted u32, +1 per accepted bet
    pub total_bets: CtU32,
    pub option_counts: [CtU32; OPTION_SLOTS],
}

impl Market {
    /// counters for real options; the spare slots never leave this struct
    pub fn live_counts(&self) -> &[CtU32] {
        &self.option_counts[..self.option_count]
    }
}

/// plaintext metadata view for the query surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketMeta {
    pub title: String,
    pub option_count: usize,
    pub created_at: u64,
    pub creator: Address,
}
