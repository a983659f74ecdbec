use crate::engine::{SecretBox, SecretBoxInner};
use crate::error::{SecretBoxError, SecretBoxErrorExt};
use crate::types::{KDF_PARAMS, KEY_LEN};
use cbox_memguard::{Enclave, SecureBuffer};
use private::Sealed;
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroize;

#[derive(Debug, Default)]
pub struct NoKey;
#[derive(Debug)]
pub struct WithKey {
    enclave: Enclave,
}

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoKey {}
impl Sealed for WithKey {}

/// A builder for secure initialization of the [`SecretBox`].
///
/// The salt must be chosen before the key, because passphrase stretching consumes it. Key
/// material never touches the builder in the clear: it is held sealed in an [`Enclave`].
#[allow(private_bounds)]
#[derive(Debug)]
pub struct SecretBoxBuilder<K: Sealed = NoKey> {
    salt: String,
    key: K,
}

impl Default for SecretBoxBuilder {
    fn default() -> Self {
        Self { salt: String::new(), key: NoKey }
    }
}

impl SecretBoxBuilder {
    /// Creates a new empty builder with an empty salt.
    #[must_use = "Builder must be given a passphrase or an enclave before use"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the salt used for key derivation.
    #[must_use]
    pub fn salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    /// Derives the key from `passphrase` and the configured salt with scrypt.
    ///
    /// Deliberately slow: expect tens of milliseconds per call in optimised builds.
    ///
    /// # Results
    /// Returns a [`SecretBoxBuilder`] holding the derived key, sealed in an [`Enclave`].
    ///
    /// # Errors
    /// * [`SecretBoxError::KeyDerivation`] if scrypt rejects its parameters.
    /// * [`SecretBoxError::Memory`] if `passphrase` was already destroyed.
    pub fn passphrase(
        self,
        passphrase: &SecureBuffer,
    ) -> Result<SecretBoxBuilder<WithKey>, SecretBoxError> {
        let enclave = derive_key(passphrase, &self.salt)?;
        Ok(SecretBoxBuilder { salt: self.salt, key: WithKey { enclave } })
    }

    /// Uses a pre-derived key held in `enclave`.
    ///
    /// The key size is checked by [`build`](SecretBoxBuilder::build).
    #[must_use]
    pub fn enclave(self, enclave: Enclave) -> SecretBoxBuilder<WithKey> {
        SecretBoxBuilder { salt: self.salt, key: WithKey { enclave } }
    }
}

impl SecretBoxBuilder<WithKey> {
    /// Finalizes construction.
    ///
    /// # Results
    /// Returns a fully initialized [`SecretBox`].
    ///
    /// # Errors
    /// Returns [`SecretBoxError::InvalidKey`] if the key is not exactly 32 bytes.
    pub fn build(self) -> Result<SecretBox, SecretBoxError> {
        let len = self.key.enclave.len();
        if len != KEY_LEN {
            return Err(SecretBoxError::InvalidKey {
                message: format!("Invalid key length {len}, must be {KEY_LEN} bytes").into(),
                context: None,
            });
        }

        Ok(SecretBox { inner: Arc::new(SecretBoxInner { key: self.key.enclave, salt: self.salt }) })
    }
}

/// Stretches `passphrase` into a 32-byte key and seals it.
fn derive_key(passphrase: &SecureBuffer, salt: &str) -> Result<Enclave, SecretBoxError> {
    let params = scrypt::Params::new(KDF_PARAMS.log_n, KDF_PARAMS.r, KDF_PARAMS.p, KDF_PARAMS.len)
        .map_err(|e| SecretBoxError::KeyDerivation {
            message: e.to_string().into(),
            context: Some("Invalid scrypt parameters".into()),
        })?;

    let mut key = [0u8; KEY_LEN];
    let derived = scrypt::scrypt(passphrase.bytes()?, salt.as_bytes(), &params, &mut key);
    if let Err(e) = derived {
        key.zeroize();
        return Err(SecretBoxError::KeyDerivation { message: e.to_string().into(), context: None });
    }

    let enclave = Enclave::new(&key).context("Sealing derived key");
    key.zeroize();
    debug!(salt_len = salt.len(), "Derived secret box key");
    enclave
}
