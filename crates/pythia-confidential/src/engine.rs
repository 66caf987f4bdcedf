//! the consumed confidential-compute capability
//!
//! the ledger core is generic over this trait. arithmetic never signals
//! overflow: additions wrap at the encrypted width exactly like plaintext
//! `wrapping_add`, and comparisons/selects always evaluate both sides so no
//! access pattern depends on a secret.

use crate::error::Result;
use crate::handle::{Address, CtBool, CtU32, CtU64, CtU8, Handle};
use crate::input::SealedInput;

pub trait ConfidentialEngine {
    /// address the engine attributes to the ledger system itself.
    /// `allow_self` grants land on this identity.
    fn system_address(&self) -> Address;

    /// trivial encryption of a plaintext the caller already holds
    fn encrypt_u8(&mut self, value: u8) -> Result<CtU8>;
    fn encrypt_u32(&mut self, value: u32) -> Result<CtU32>;
    fn encrypt_u64(&mut self, value: u64) -> Result<CtU64>;

    /// ingest an externally-encrypted 8-bit input together with its validity
    /// proof. the only cryptographic integrity check on caller input: a bad
    /// proof fails the whole enclosing operation with `InvalidProof`.
    fn verify_input_u8(&mut self, input: &SealedInput) -> Result<CtU8>;

    /// homomorphic addition, wrapping at the encrypted width
    fn add_u32(&mut self, a: CtU32, b: CtU32) -> Result<CtU32>;
    fn add_u64(&mut self, a: CtU64, b: CtU64) -> Result<CtU64>;

    /// encrypted equality over 8-bit values
    fn eq_u8(&mut self, a: CtU8, b: CtU8) -> Result<CtBool>;

    /// branchless conditional select; both arms are always materialized
    fn select_u32(&mut self, cond: CtBool, if_true: CtU32, if_false: CtU32) -> Result<CtU32>;

    /// grant `who` standing permission to decrypt `handle`. additive and
    /// permanent - there is no revoke.
    fn allow(&mut self, handle: Handle, who: Address) -> Result<()>;

    /// grant the ledger system standing permission on `handle`, required
    /// before any future arithmetic touches it
    fn allow_self(&mut self, handle: Handle) -> Result<()>;

    /// the permission predicate: does `who` hold a decrypt grant on `handle`?
    fn is_allowed(&self, handle: Handle, who: Address) -> bool;

    /// authorized decryption, the out-of-band workflow. the ledger core
    /// never calls these; tests and host tooling do.
    fn decrypt_u8(&self, ct: CtU8, who: Address) -> Result<u8>;
    fn decrypt_u32(&self, ct: CtU32, who: Address) -> Result<u32>;
    fn decrypt_u64(&self, ct: CtU64, who: Address) -> Result<u64>;
}
