//! opaque ciphertext handles and participant addresses
//!
//! a handle is a public 32-byte reference to one encrypted value inside an
//! engine. it reveals nothing about the plaintext and carries no capability
//! by itself - decryption rights live in the engine's grant relation.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ADDRESS_DOMAIN;

/// opaque reference to an encrypted value (32 bytes, unique per engine)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle(pub [u8; 32]);

impl Handle {
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // short prefix keeps logs readable
        write!(f, "Handle({}..)", hex::encode(&self.0[..4]))
    }
}

/// participant identity (32 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// derive a stable address from a label (test and tooling convenience)
    pub fn derive(label: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(ADDRESS_DOMAIN);
        hasher.update(label);
        Self(*hasher.finalize().as_bytes())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}..)", hex::encode(&self.0[..4]))
    }
}

/// encrypted boolean (result of encrypted comparisons)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CtBool(pub Handle);

/// encrypted unsigned 8-bit value (option choices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CtU8(pub Handle);

/// encrypted unsigned 32-bit value (bet and option counters)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CtU32(pub Handle);

/// encrypted unsigned 64-bit value (stake aggregates)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CtU64(pub Handle);

impl CtBool {
    pub fn handle(&self) -> Handle {
        self.0
    }
}

impl CtU8 {
    pub fn handle(&self) -> Handle {
        self.0
    }
}

impl CtU32 {
    pub fn handle(&self) -> Handle {
        self.0
    }
}

impl CtU64 {
    pub fn handle(&self) -> Handle {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_derive_stable() {
        assert_eq!(Address::derive(b"alice"), Address::derive(b"alice"));
        assert_ne!(Address::derive(b"alice"), Address::derive(b"bob"));
    }

    #[test]
    fn test_handle_display_is_hex() {
        let h = Handle([0xab; 32]);
        assert_eq!(h.to_string(), "ab".repeat(32));
    }
}
