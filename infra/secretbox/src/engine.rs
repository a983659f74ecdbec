use aead::{Aead, KeyInit};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use cbox_memguard::{Enclave, SecureBuffer};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use getrandom::fill;
use std::{fmt, sync::Arc};
use tracing::debug;

use crate::builder::SecretBoxBuilder;
use crate::error::SecretBoxError;
use crate::types::{NONCE_LEN, TAG_LEN, split_sealed};

pub(crate) struct SecretBoxInner {
    pub(crate) key: Enclave,
    pub(crate) salt: String,
}

/// A thread-safe secret engine sealing values into text.
///
/// `SecretBox` holds one 32-byte key, kept sealed in an [`Enclave`] and opened only for the
/// duration of a single seal or open. It wraps its state in an [`Arc`], making it cheap to clone
/// and safe to share across threads.
///
/// ### Sealed value format
/// ```text
/// base64_std( NONCE(24) || CIPHERTEXT(N) || TAG(16) )
/// ```
///
/// ### Example
/// ```rust
/// use cbox_secretbox::prelude::*;
///
/// # fn main() -> Result<(), SecretBoxError> {
/// let engine = SecretBox::from_passphrase(&SecureBuffer::from("abc123"), "xyz")?;
///
/// let sealed = engine.seal(&SecureBuffer::from("hello world"))?;
/// let opened = engine.open(&sealed)?;
/// assert_eq!(opened.as_str()?, "hello world");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SecretBox {
    pub(crate) inner: Arc<SecretBoxInner>,
}

impl SecretBox {
    /// Returns a new [`SecretBoxBuilder`] to configure the engine.
    #[must_use]
    pub fn builder() -> SecretBoxBuilder {
        SecretBoxBuilder::new()
    }

    /// Derives the key from `passphrase` and `salt` (scrypt, N=32768, r=8, p=1).
    ///
    /// # Errors
    /// * [`SecretBoxError::KeyDerivation`] if derivation fails.
    /// * [`SecretBoxError::Memory`] if `passphrase` was already destroyed.
    pub fn from_passphrase(
        passphrase: &SecureBuffer,
        salt: impl Into<String>,
    ) -> Result<Self, SecretBoxError> {
        Self::builder().salt(salt).passphrase(passphrase)?.build()
    }

    /// Uses a pre-derived key. `salt` is kept for reference only.
    ///
    /// # Errors
    /// Returns [`SecretBoxError::InvalidKey`] unless the enclave holds exactly 32 bytes.
    pub fn from_enclave(enclave: Enclave, salt: impl Into<String>) -> Result<Self, SecretBoxError> {
        Self::builder().salt(salt).enclave(enclave).build()
    }

    /// Salt the engine was created with.
    #[must_use]
    pub fn salt(&self) -> &str {
        &self.inner.salt
    }

    /// Generates a fresh random nonce.
    #[inline]
    fn next_nonce() -> Result<XNonce, SecretBoxError> {
        let mut nonce = XNonce::default();
        fill(nonce.as_mut_slice()).map_err(|e| SecretBoxError::Entropy {
            message: e.to_string().into(),
            context: Some("Nonce generation".into()),
        })?;
        Ok(nonce)
    }

    /// Builds a cipher from the key. The plaintext key buffer is wiped before returning.
    fn cipher(&self) -> Result<XChaCha20Poly1305, SecretBoxError> {
        let mut key = self.inner.key.open()?;
        let cipher = XChaCha20Poly1305::new_from_slice(key.bytes()?).map_err(|_| {
            SecretBoxError::InvalidKey { message: "Key must be 32 bytes".into(), context: None }
        });
        key.destroy();
        cipher
    }

    /// Encrypts and authenticates the contents of `plaintext`.
    ///
    /// # Results
    /// Returns standard base64 text; every call uses a new random nonce.
    ///
    /// # Errors
    /// * [`SecretBoxError::Memory`] if `plaintext` was already destroyed.
    /// * [`SecretBoxError::Entropy`] if the OS random source fails.
    /// * [`SecretBoxError::Encryption`] if the AEAD encryption fails.
    pub fn seal(&self, plaintext: &SecureBuffer) -> Result<String, SecretBoxError> {
        self.seal_bytes(plaintext.bytes()?)
    }

    /// Same as [`seal`](Self::seal) for bytes not held in a [`SecureBuffer`].
    ///
    /// # Errors
    /// * [`SecretBoxError::Entropy`] if the OS random source fails.
    /// * [`SecretBoxError::Encryption`] if the AEAD encryption fails.
    pub fn seal_bytes(&self, plaintext: impl AsRef<[u8]>) -> Result<String, SecretBoxError> {
        let plaintext = plaintext.as_ref();
        let nonce = Self::next_nonce()?;
        let cipher = self.cipher()?;

        let sealed = cipher.encrypt(&nonce, plaintext).map_err(|_| SecretBoxError::Encryption {
            message: "Encryption failed".into(),
            context: Some("AEAD encryption failed".into()),
        })?;

        let mut blob = Vec::with_capacity(NONCE_LEN + sealed.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&sealed);
        debug_assert_eq!(blob.len(), NONCE_LEN + plaintext.len() + TAG_LEN);

        Ok(STANDARD.encode(blob))
    }

    /// Decodes, authenticates and decrypts a value produced by [`seal`](Self::seal).
    ///
    /// # Results
    /// Returns the plaintext in a fresh [`SecureBuffer`].
    ///
    /// # Errors
    /// Returns [`SecretBoxError::Unreadable`] for invalid base64, a truncated payload, a wrong key,
    /// or tampered data. The variants carry no detail that would tell these cases apart.
    pub fn open(&self, sealed: &str) -> Result<SecureBuffer, SecretBoxError> {
        let decoded = STANDARD.decode(sealed).map_err(|_| {
            debug!(len = sealed.len(), "Rejecting sealed value with invalid base64");
            SecretBoxError::unreadable()
        })?;

        let Some((nonce, ciphertext)) = split_sealed(&decoded) else {
            debug!(len = decoded.len(), "Rejecting sealed value shorter than nonce and tag");
            return Err(SecretBoxError::unreadable());
        };

        let cipher = self.cipher()?;
        let plaintext = cipher.decrypt(XNonce::from_slice(nonce), ciphertext).map_err(|_| {
            debug!(len = decoded.len(), "Rejecting sealed value that failed authentication");
            SecretBoxError::unreadable()
        })?;

        Ok(SecureBuffer::from(plaintext))
    }
}

impl fmt::Debug for SecretBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBox").field("key", &self.inner.key).finish_non_exhaustive()
    }
}
