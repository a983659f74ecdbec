//! A passphrase-keyed, thread-safe authenticated encryption engine.
//!
//! This crate seals byte strings into short, text-safe values suitable for HTTP headers and
//! cookies, and opens them again only when they were produced under the same key and left intact.
//!
//! ## Sealed Value Format
//!
//! ```text
//! base64_std( [NONCE(24)][CIPHERTEXT(N)][TAG(16)] )
//! ```
//!
//! The cipher is XChaCha20-Poly1305. A sealed value is exactly `24 + N + 16` bytes before
//! encoding, where `N` is the plaintext length.
//!
//! ## Keys
//!
//! Keys are 32 bytes, either supplied directly through an [`Enclave`](cbox_memguard::Enclave) or
//! derived from a passphrase and a salt with scrypt (`N = 32768, r = 8, p = 1`). The same
//! passphrase and salt always derive the same key, so independently configured processes can
//! exchange sealed values. The key is held sealed between operations and is wiped after each use.
//!
//! ## Nonce Policy
//!
//! Every seal draws a fresh **random 192-bit nonce** from the operating system. At that size
//! accidental reuse is not a practical concern, so no counter state is kept.
//!
//! ## Failure Model
//!
//! Opening collapses every input-related failure (invalid base64, truncation, wrong key,
//! tampering) into [`SecretBoxError::Unreadable`] with identical text.
//!
//! ## Examples
//!
//! ```rust
//! use cbox_secretbox::prelude::*;
//!
//! # fn main() -> Result<(), SecretBoxError> {
//! let engine = SecretBox::builder()
//!     .salt("xyz")
//!     .passphrase(&SecureBuffer::from("abc123"))?
//!     .build()?;
//!
//! let sealed = engine.seal_bytes(b"session-id")?;
//! assert_eq!(engine.open(&sealed)?.bytes()?, b"session-id");
//! assert!(engine.open("tampered").is_err());
//! # Ok(())
//! # }
//! ```

mod builder;
mod engine;
mod error;
mod types;

pub use builder::{NoKey, SecretBoxBuilder, WithKey};
pub use engine::SecretBox;
pub use error::{SecretBoxError, SecretBoxErrorExt};
pub use types::{KDF_PARAMS, KEY_LEN, KdfParams, NONCE_LEN, TAG_LEN};

pub mod prelude {
    pub use crate::engine::SecretBox;
    pub use crate::error::{SecretBoxError, SecretBoxErrorExt};
    pub use cbox_memguard::{Enclave, SecureBuffer};
}
