//! BLAKE3 keys for the response cache and log fingerprints.

/// Full 32-byte key for a raw query.
///
/// The query bytes are hashed as-is: no trimming, case folding or accent folding, so
/// `"Criar"` and `"criar"` are different cache keys.
#[inline]
pub fn hash_query(query: &str) -> [u8; 32] {
    *blake3::hash(query.as_bytes()).as_bytes()
}

/// Short 64-bit fingerprint, truncated from the BLAKE3 output.
///
/// Used to correlate log lines for the same query without logging its text. Not a
/// cache key: use [`hash_query`] where collisions would matter.
#[inline]
pub fn query_fingerprint(query: &str) -> u64 {
    let hash = blake3::hash(query.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}
