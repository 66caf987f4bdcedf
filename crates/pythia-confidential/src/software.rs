//! in-memory reference engine
//!
//! models the external confidential-compute service: a plaintext store keyed
//! by opaque handles, a grant relation, and keyed-mac sealed inputs. this is
//! the test vehicle for the ledger, not a cryptographic artifact - the
//! "ciphertexts" are table entries, and confidentiality holds only against
//! code that stays on the public api.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::engine::ConfidentialEngine;
use crate::error::{EngineError, Result};
use crate::handle::{Address, CtBool, CtU32, CtU64, CtU8, Handle};
use crate::input::SealedInput;
use crate::{HANDLE_DOMAIN, INPUT_MASK_DOMAIN, INPUT_PROOF_DOMAIN};

/// domain separator for the engine's own system identity
const SYSTEM_DOMAIN: &[u8] = b"pythia.confidential.system.v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Plaintext {
    Bool(bool),
    U8(u8),
    U32(u32),
    U64(u64),
}

/// software substrate holding plaintexts and grants in memory
pub struct SoftwareEngine {
    /// per-instance randomness mixed into every handle
    instance: [u8; 32],
    /// key authenticating sealed inputs
    input_key: [u8; 32],
    /// identity `allow_self` grants land on
    system: Address,
    /// handle derivation counter, never reused
    counter: u64,
    rng: StdRng,
    store: HashMap<Handle, Plaintext>,
    acl: HashMap<Handle, HashSet<Address>>,
}

impl SoftwareEngine {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// deterministic engine for reproducible tests
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let mut instance = [0u8; 32];
        let mut input_key = [0u8; 32];
        rng.fill_bytes(&mut instance);
        rng.fill_bytes(&mut input_key);

        let mut hasher = blake3::Hasher::new();
        hasher.update(SYSTEM_DOMAIN);
        hasher.update(&instance);
        let system = Address(*hasher.finalize().as_bytes());

        Self {
            instance,
            input_key,
            system,
            counter: 0,
            rng,
            store: HashMap::new(),
            acl: HashMap::new(),
        }
    }

    /// encrypt an 8-bit value client-side, producing a sealed input the
    /// engine will accept. plays the role of the external encryption sdk.
    pub fn seal_u8(&mut self, value: u8) -> SealedInput {
        let mut nonce = [0u8; 32];
        self.rng.fill_bytes(&mut nonce);

        let mut body = Self::input_mask(&self.input_key, &nonce);
        body[0] ^= value;
        let proof = Self::input_proof(&self.input_key, &nonce, &body);

        SealedInput { nonce, body, proof }
    }

    fn input_mask(key: &[u8; 32], nonce: &[u8; 32]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new_keyed(key);
        hasher.update(INPUT_MASK_DOMAIN);
        hasher.update(nonce);
        *hasher.finalize().as_bytes()
    }

    fn input_proof(key: &[u8; 32], nonce: &[u8; 32], body: &[u8; 32]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new_keyed(key);
        hasher.update(INPUT_PROOF_DOMAIN);
        hasher.update(nonce);
        hasher.update(body);
        *hasher.finalize().as_bytes()
    }

    fn fresh_handle(&mut self) -> Handle {
        let mut hasher = blake3::Hasher::new();
        hasher.update(HANDLE_DOMAIN);
        hasher.update(&self.instance);
        hasher.update(&self.counter.to_le_bytes());
        self.counter += 1;
        Handle(*hasher.finalize().as_bytes())
    }

    fn insert(&mut self, value: Plaintext) -> Handle {
        let handle = self.fresh_handle();
        self.store.insert(handle, value);
        handle
    }

    fn plaintext(&self, handle: Handle) -> Result<Plaintext> {
        self.store
            .get(&handle)
            .copied()
            .ok_or(EngineError::UnknownHandle)
    }

    fn value_bool(&self, ct: CtBool) -> Result<bool> {
        match self.plaintext(ct.0)? {
            Plaintext::Bool(v) => Ok(v),
            _ => Err(EngineError::WidthMismatch),
        }
    }

    fn value_u8(&self, ct: CtU8) -> Result<u8> {
        match self.plaintext(ct.0)? {
            Plaintext::U8(v) => Ok(v),
            _ => Err(EngineError::WidthMismatch),
        }
    }

    fn value_u32(&self, ct: CtU32) -> Result<u32> {
        match self.plaintext(ct.0)? {
            Plaintext::U32(v) => Ok(v),
            _ => Err(EngineError::WidthMismatch),
        }
    }

    fn value_u64(&self, ct: CtU64) -> Result<u64> {
        match self.plaintext(ct.0)? {
            Plaintext::U64(v) => Ok(v),
            _ => Err(EngineError::WidthMismatch),
        }
    }

    fn check_allowed(&self, handle: Handle, who: Address) -> Result<()> {
        if !self.store.contains_key(&handle) {
            return Err(EngineError::UnknownHandle);
        }
        if self.is_allowed(handle, who) {
            Ok(())
        } else {
            Err(EngineError::AccessDenied)
        }
    }
}

impl Default for SoftwareEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfidentialEngine for SoftwareEngine {
    fn system_address(&self) -> Address {
        self.system
    }

    fn encrypt_u8(&mut self, value: u8) -> Result<CtU8> {
        Ok(CtU8(self.insert(Plaintext::U8(value))))
    }

    fn encrypt_u32(&mut self, value: u32) -> Result<CtU32> {
        Ok(CtU32(self.insert(Plaintext::U32(value))))
    }

    fn encrypt_u64(&mut self, value: u64) -> Result<CtU64> {
        Ok(CtU64(self.insert(Plaintext::U64(value))))
    }

    fn verify_input_u8(&mut self, input: &SealedInput) -> Result<CtU8> {
        let expected = Self::input_proof(&self.input_key, &input.nonce, &input.body);
        // blake3::Hash comparison is constant-time
        if expected != input.proof {
            return Err(EngineError::InvalidProof);
        }
        let mask = Self::input_mask(&self.input_key, &input.nonce);
        let value = input.body[0] ^ mask[0];
        Ok(CtU8(self.insert(Plaintext::U8(value))))
    }

    fn add_u32(&mut self, a: CtU32, b: CtU32) -> Result<CtU32> {
        let sum = self.value_u32(a)?.wrapping_add(self.value_u32(b)?);
        Ok(CtU32(self.insert(Plaintext::U32(sum))))
    }

    fn add_u64(&mut self, a: CtU64, b: CtU64) -> Result<CtU64> {
        let sum = self.value_u64(a)?.wrapping_add(self.value_u64(b)?);
        Ok(CtU64(self.insert(Plaintext::U64(sum))))
    }

    fn eq_u8(&mut self, a: CtU8, b: CtU8) -> Result<CtBool> {
        let eq = self.value_u8(a)? == self.value_u8(b)?;
        Ok(CtBool(self.insert(Plaintext::Bool(eq))))
    }

    fn select_u32(&mut self, cond: CtBool, if_true: CtU32, if_false: CtU32) -> Result<CtU32> {
        // both arms are read before the condition is applied
        let t = self.value_u32(if_true)?;
        let f = self.value_u32(if_false)?;
        let picked = if self.value_bool(cond)? { t } else { f };
        Ok(CtU32(self.insert(Plaintext::U32(picked))))
    }

    fn allow(&mut self, handle: Handle, who: Address) -> Result<()> {
        if !self.store.contains_key(&handle) {
            return Err(EngineError::UnknownHandle);
        }
        self.acl.entry(handle).or_default().insert(who);
        Ok(())
    }

    fn allow_self(&mut self, handle: Handle) -> Result<()> {
        let system = self.system;
        self.allow(handle, system)
    }

    fn is_allowed(&self, handle: Handle, who: Address) -> bool {
        self.acl
            .get(&handle)
            .map(|grants| grants.contains(&who))
            .unwrap_or(false)
    }

    fn decrypt_u8(&self, ct: CtU8, who: Address) -> Result<u8> {
        self.check_allowed(ct.0, who)?;
        self.value_u8(ct)
    }

    fn decrypt_u32(&self, ct: CtU32, who: Address) -> Result<u32> {
        self.check_allowed(ct.0, who)?;
        self.value_u32(ct)
    }

    fn decrypt_u64(&self, ct: CtU64, who: Address) -> Result<u64> {
        self.check_allowed(ct.0, who)?;
        self.value_u64(ct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrypt_requires_grant() {
        let mut engine = SoftwareEngine::from_seed(1);
        let alice = Address::derive(b"alice");

        let ct = engine.encrypt_u64(42).unwrap();
        assert_eq!(engine.decrypt_u64(ct, alice), Err(EngineError::AccessDenied));

        engine.allow(ct.handle(), alice).unwrap();
        assert_eq!(engine.decrypt_u64(ct, alice), Ok(42));
    }

    #[test]
    fn test_allow_self_grants_system() {
        let mut engine = SoftwareEngine::from_seed(2);
        let ct = engine.encrypt_u32(7).unwrap();
        let system = engine.system_address();

        assert!(!engine.is_allowed(ct.handle(), system));
        engine.allow_self(ct.handle()).unwrap();
        assert!(engine.is_allowed(ct.handle(), system));
        assert_eq!(engine.decrypt_u32(ct, system), Ok(7));
    }

    #[test]
    fn test_allow_unknown_handle() {
        let mut engine = SoftwareEngine::from_seed(3);
        let alice = Address::derive(b"alice");
        let bogus = Handle([0u8; 32]);
        assert_eq!(engine.allow(bogus, alice), Err(EngineError::UnknownHandle));
    }

    #[test]
    fn test_add_wraps_at_width() {
        let mut engine = SoftwareEngine::from_seed(4);
        let system = engine.system_address();

        let a = engine.encrypt_u32(u32::MAX).unwrap();
        let b = engine.encrypt_u32(3).unwrap();
        let sum = engine.add_u32(a, b).unwrap();
        engine.allow_self(sum.handle()).unwrap();
        assert_eq!(engine.decrypt_u32(sum, system), Ok(2));

        let a = engine.encrypt_u64(u64::MAX).unwrap();
        let b = engine.encrypt_u64(1).unwrap();
        let sum = engine.add_u64(a, b).unwrap();
        engine.allow_self(sum.handle()).unwrap();
        assert_eq!(engine.decrypt_u64(sum, system), Ok(0));
    }

    #[test]
    fn test_eq_select() {
        let mut engine = SoftwareEngine::from_seed(5);
        let system = engine.system_address();

        let one = engine.encrypt_u32(1).unwrap();
        let zero = engine.encrypt_u32(0).unwrap();

        let a = engine.encrypt_u8(3).unwrap();
        let b = engine.encrypt_u8(3).unwrap();
        let c = engine.encrypt_u8(4).unwrap();

        let hit = engine.eq_u8(a, b).unwrap();
        let miss = engine.eq_u8(a, c).unwrap();

        let picked = engine.select_u32(hit, one, zero).unwrap();
        engine.allow_self(picked.handle()).unwrap();
        assert_eq!(engine.decrypt_u32(picked, system), Ok(1));

        let picked = engine.select_u32(miss, one, zero).unwrap();
        engine.allow_self(picked.handle()).unwrap();
        assert_eq!(engine.decrypt_u32(picked, system), Ok(0));
    }

    #[test]
    fn test_sealed_input_roundtrip() {
        let mut engine = SoftwareEngine::from_seed(6);
        let system = engine.system_address();

        let sealed = engine.seal_u8(2);
        let ct = engine.verify_input_u8(&sealed).unwrap();
        engine.allow_self(ct.handle()).unwrap();
        assert_eq!(engine.decrypt_u8(ct, system), Ok(2));
    }

    #[test]
    fn test_sealed_input_tamper_detected() {
        let mut engine = SoftwareEngine::from_seed(7);
        let sealed = engine.seal_u8(1);

        let mut bad = sealed;
        bad.nonce[0] ^= 1;
        assert_eq!(engine.verify_input_u8(&bad), Err(EngineError::InvalidProof));

        let mut bad = sealed;
        bad.body[0] ^= 1;
        assert_eq!(engine.verify_input_u8(&bad), Err(EngineError::InvalidProof));

        let mut bad = sealed;
        bad.proof[31] ^= 1;
        assert_eq!(engine.verify_input_u8(&bad), Err(EngineError::InvalidProof));
    }

    #[test]
    fn test_sealed_input_bound_to_engine() {
        let mut sealer = SoftwareEngine::from_seed(8);
        let mut other = SoftwareEngine::from_seed(9);
        let sealed = sealer.seal_u8(1);
        assert_eq!(other.verify_input_u8(&sealed), Err(EngineError::InvalidProof));
    }

    #[test]
    fn test_width_mismatch() {
        let mut engine = SoftwareEngine::from_seed(10);
        let system = engine.system_address();

        let ct = engine.encrypt_u64(5).unwrap();
        engine.allow_self(ct.handle()).unwrap();

        // forge a 32-bit view of a 64-bit handle
        let forged = CtU32(ct.handle());
        assert_eq!(
            engine.decrypt_u32(forged, system),
            Err(EngineError::WidthMismatch)
        );
    }

    #[test]
    fn test_handles_never_repeat() {
        let mut engine = SoftwareEngine::from_seed(11);
        let a = engine.encrypt_u32(0).unwrap();
        let b = engine.encrypt_u32(0).unwrap();
        assert_ne!(a.handle(), b.handle());
    }
}
