//! Digest Module
//!
//! Fixed-width fingerprint of a payload, stored per entry for diagnostics.

use std::fmt;

use serde::Serialize;

// == Digest ==
/// 64-bit deterministic digest of a payload's canonical serialization.
///
/// The payload is serialized to JSON through `serde_json::Value`, which
/// orders map keys, so two equal payloads always produce the same digest
/// regardless of the map type they were built with. The first eight bytes of
/// the BLAKE3 hash of those bytes form the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(u64);

impl Digest {
    // == Constructor ==
    /// Computes the digest of a serializable payload.
    ///
    /// A payload that cannot be serialized (for example a map with non-string
    /// keys) gets the digest of the empty input, [`Digest::empty`].
    pub fn of<V: Serialize + ?Sized>(payload: &V) -> Self {
        match canonical_bytes(payload) {
            Some(bytes) => Self::from_bytes(&bytes),
            None => Self::empty(),
        }
    }

    /// Digest of an arbitrary byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let hash = blake3::hash(bytes);
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&hash.as_bytes()[..8]);
        Self(u64::from_le_bytes(prefix))
    }

    /// Digest of zero bytes.
    pub fn empty() -> Self {
        Self::from_bytes(&[])
    }

    /// Raw 64-bit value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn canonical_bytes<V: Serialize + ?Sized>(payload: &V) -> Option<Vec<u8>> {
    let value = serde_json::to_value(payload).ok()?;
    serde_json::to_vec(&value).ok()
}
