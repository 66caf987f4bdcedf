//! bet records
//!
//! one record per (market, participant) pair, immutable once written. the
//! plaintext `exists` flag is the sole one-bet-per-participant gate:
//! encrypted zero is indistinguishable from "no bet" at the ciphertext
//! level, so presence cannot be read off the encrypted fields.

use pythia_confidential::{CtU64, CtU8};
use serde::{Deserialize, Serialize};

/// stored bet record
#[derive(Clone, Copy, Debug)]
pub struct Bet {
    /// encrypted index into the market's options. range validity is not
    /// enforced: an out-of-range choice matches no option counter while
    /// still landing in the stake and bet totals.
    pub choice: CtU8,
    /// encrypted stake, equal to the value attached at bet time
    pub amount: CtU64,
    pub exists: bool,
}

/// read model for the bet query. when `exists` is false the encrypted
/// fields are shared zero handles; check the flag before interpreting them.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BetView {
    pub exists: bool,
    pub choice: CtU8,
    pub amount: CtU64,
}
