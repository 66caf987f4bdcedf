//! # pythia-confidential
//!
//! confidential-value abstraction for the pythia prediction-market ledger.
//!
//! the ledger core never sees a plaintext counter: every aggregate lives
//! behind an opaque ciphertext handle, and all arithmetic goes through the
//! [`ConfidentialEngine`] capability. this crate defines that boundary and
//! ships [`SoftwareEngine`], an in-memory reference engine that models the
//! external confidential-compute service faithfully enough to drive the
//! ledger end-to-end in tests.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      ledger core                         │
//! │   (market registry, bet ledger, oblivious aggregation)   │
//! └──────────────┬───────────────────────────────────────────┘
//!                │ ConfidentialEngine
//!                ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  encrypt · verify_input · add · eq · select              │
//! │  allow / allow_self      (additive decrypt grants)       │
//! │  decrypt                 (out-of-band, grant-checked)    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! handles are public: anyone may read or copy them. what a grant controls
//! is decryption, nothing else. grants are additive and permanent - there
//! is no revoke.

pub mod engine;
pub mod error;
pub mod handle;
pub mod input;
pub mod software;

pub use engine::ConfidentialEngine;
pub use error::{EngineError, Result};
pub use handle::{Address, CtBool, CtU32, CtU64, CtU8, Handle};
pub use input::SealedInput;
pub use software::SoftwareEngine;

/// domain separator for ciphertext handle derivation
pub const HANDLE_DOMAIN: &[u8] = b"pythia.confidential.handle.v1";
/// domain separator for sealed-input masking
pub const INPUT_MASK_DOMAIN: &[u8] = b"pythia.confidential.input.mask.v1";
/// domain separator for sealed-input proofs
pub const INPUT_PROOF_DOMAIN: &[u8] = b"pythia.confidential.input.proof.v1";
/// domain separator for address derivation
pub const ADDRESS_DOMAIN: &[u8] = b"pythia.confidential.address.v1";
