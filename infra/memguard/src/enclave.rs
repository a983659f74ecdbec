use crate::{buffer::SecureBuffer, error::MemoryError};
use aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use std::{
    fmt,
    sync::{Arc, OnceLock},
};
use tracing::trace;
use zeroize::Zeroize;

const KEY_LEN: usize = 32;

/// A secret held at rest in sealed form.
///
/// The plaintext is encrypted under a random key that lives only for the lifetime of the process.
/// Memory dumps of an idle enclave reveal ciphertext; the secret exists in the clear only inside
/// the [`SecureBuffer`] returned by [`open`](Self::open), for as long as the caller keeps it.
///
/// Cloning is cheap and shares the sealed payload. Enclaves may be sent and shared across threads.
#[derive(Clone)]
pub struct Enclave {
    inner: Arc<Sealed>,
}

struct Sealed {
    nonce: XNonce,
    ciphertext: Box<[u8]>,
    len: usize,
}

impl Enclave {
    /// Seals a copy of `bytes`. The caller keeps responsibility for wiping its input.
    ///
    /// # Errors
    /// * [`MemoryError::Entropy`] when the OS random source fails.
    /// * [`MemoryError::Enclave`] when sealing fails.
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self, MemoryError> {
        let plaintext = bytes.as_ref();
        let cipher = process_cipher()?;

        let mut nonce = XNonce::default();
        getrandom::fill(nonce.as_mut_slice()).map_err(|e| MemoryError::entropy(&e))?;

        let ciphertext = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| MemoryError::enclave("Failed to seal enclave contents"))?;

        trace!(len = plaintext.len(), "Sealed enclave");
        Ok(Self {
            inner: Arc::new(Sealed {
                nonce,
                ciphertext: ciphertext.into_boxed_slice(),
                len: plaintext.len(),
            }),
        })
    }

    /// Seals the contents of `buffer` and destroys it.
    ///
    /// # Errors
    /// * [`MemoryError::UseAfterDestroy`] when `buffer` was already destroyed.
    /// * Any error from [`Enclave::new`].
    pub fn from_buffer(mut buffer: SecureBuffer) -> Result<Self, MemoryError> {
        let enclave = Self::new(buffer.bytes()?);
        buffer.destroy();
        enclave
    }

    /// Decrypts the secret into a fresh [`SecureBuffer`]. The enclave itself is unchanged.
    ///
    /// # Errors
    /// Returns [`MemoryError::Enclave`] if the sealed payload fails its integrity check.
    pub fn open(&self) -> Result<SecureBuffer, MemoryError> {
        let cipher = process_cipher()?;
        let plaintext = cipher
            .decrypt(&self.inner.nonce, &self.inner.ciphertext[..])
            .map_err(|_| MemoryError::enclave("Enclave integrity check failed"))?;
        Ok(SecureBuffer::from(plaintext))
    }

    /// Length of the sealed secret in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }
}

impl fmt::Debug for Enclave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enclave").field("len", &self.inner.len).finish_non_exhaustive()
    }
}

/// Process-wide sealing key, generated on first use and never written anywhere.
fn process_key() -> Result<&'static SecureBuffer, MemoryError> {
    static KEY: OnceLock<SecureBuffer> = OnceLock::new();

    if let Some(key) = KEY.get() {
        return Ok(key);
    }

    let mut raw = [0u8; KEY_LEN];
    getrandom::fill(&mut raw).map_err(|e| MemoryError::entropy(&e))?;
    let candidate = SecureBuffer::new(&raw);
    raw.zeroize();

    // A concurrent initialiser may win; the losing candidate is wiped on drop.
    Ok(KEY.get_or_init(|| {
        trace!("Generated process enclave key");
        candidate
    }))
}

fn process_cipher() -> Result<XChaCha20Poly1305, MemoryError> {
    let key = process_key()?;
    XChaCha20Poly1305::new_from_slice(key.bytes()?)
        .map_err(|_| MemoryError::enclave("Process enclave key has an invalid length"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_returns_original_bytes() {
        let enclave = Enclave::new(b"top secret").unwrap();
        assert_eq!(enclave.len(), 10);
        let opened = enclave.open().unwrap();
        assert_eq!(opened.bytes().unwrap(), b"top secret");
    }

    #[test]
    fn opening_twice_yields_independent_buffers() {
        let enclave = Enclave::new([9u8; 32]).unwrap();
        let mut first = enclave.open().unwrap();
        first.destroy();
        let second = enclave.open().unwrap();
        assert_eq!(second.bytes().unwrap(), &[9u8; 32]);
    }

    #[test]
    fn sealed_form_differs_from_plaintext() {
        let enclave = Enclave::new(b"plain-plain-plain").unwrap();
        assert!(!enclave.inner.ciphertext.windows(17).any(|w| w == b"plain-plain-plain"));
    }

    #[test]
    fn from_buffer_destroys_source() {
        let buffer = SecureBuffer::from("key material");
        let enclave = Enclave::from_buffer(buffer).unwrap();
        assert_eq!(enclave.open().unwrap().as_str().unwrap(), "key material");
    }

    #[test]
    fn from_destroyed_buffer_fails() {
        let mut buffer = SecureBuffer::from("gone");
        buffer.destroy();
        assert!(matches!(Enclave::from_buffer(buffer), Err(MemoryError::UseAfterDestroy { .. })));
    }

    #[test]
    fn empty_enclave_round_trips() {
        let enclave = Enclave::new(b"").unwrap();
        assert!(enclave.is_empty());
        assert!(enclave.open().unwrap().is_empty());
    }

    #[test]
    fn debug_output_is_redacted() {
        let enclave = Enclave::new(b"hidden").unwrap();
        assert_eq!(format!("{enclave:?}"), "Enclave { len: 6, .. }");
    }
}
