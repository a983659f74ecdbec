// --- Sealed value layout ---

/// XChaCha20 nonce length (192-bit), random per seal.
pub const NONCE_LEN: usize = 24;

/// Poly1305 authentication tag length (128-bit).
pub const TAG_LEN: usize = 16;

/// Symmetric key length (256-bit).
pub const KEY_LEN: usize = 32;

/// Smallest decoded payload that can possibly authenticate: a nonce and an empty message's tag.
pub(crate) const MIN_SEALED_LEN: usize = NONCE_LEN + TAG_LEN;

// --- Key derivation ---

/// Cost parameters for stretching a passphrase into a key with scrypt.
///
/// Fixed for the lifetime of the format: every peer must derive the same key from the same
/// passphrase and salt, so these are constants rather than configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Base-two logarithm of the CPU/memory cost `N`.
    pub log_n: u8,
    /// Block size `r`.
    pub r: u32,
    /// Parallelisation `p`.
    pub p: u32,
    /// Output length in bytes.
    pub len: usize,
}

/// `N = 32768, r = 8, p = 1`, producing a 32-byte key.
pub const KDF_PARAMS: KdfParams = KdfParams { log_n: 15, r: 8, p: 1, len: KEY_LEN };

/// Splits a decoded sealed value into its nonce and ciphertext-with-tag.
///
/// Returns `None` when the input is too short to hold a nonce and a tag.
pub(crate) fn split_sealed(decoded: &[u8]) -> Option<(&[u8], &[u8])> {
    (decoded.len() >= MIN_SEALED_LEN).then(|| decoded.split_at(NONCE_LEN))
}
