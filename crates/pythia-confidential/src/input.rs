//! sealed external inputs
//!
//! a bettor encrypts their choice outside the ledger and submits the
//! ciphertext with a proof binding it to the engine's input key. the engine
//! rejects anything it did not authenticate - see
//! [`ConfidentialEngine::verify_input_u8`](crate::ConfidentialEngine).

use serde::{Deserialize, Serialize};

/// externally-encrypted 8-bit value plus its validity proof
///
/// `nonce` and `body` are opaque to everyone but the engine; `proof` is a
/// keyed mac over both. any bit flip fails verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedInput {
    pub nonce: [u8; 32],
    pub body: [u8; 32],
    pub proof: [u8; 32],
}
