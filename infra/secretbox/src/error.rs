//! # Secret Box Errors
//!
//! This module defines the [`SecretBoxError`] enum used throughout the crate for reporting key
//! derivation, sealing, and opening failures.

use cbox_memguard::MemoryError;
use std::borrow::Cow;

/// A specialized [`SecretBoxError`] enum for secret box failures.
#[cbox_derive::cbox_error]
pub enum SecretBoxError {
    /// Failure while stretching a passphrase into a key.
    #[error("Key derivation error{}: {message}", format_context(.context))]
    KeyDerivation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Key material of the wrong size was supplied.
    #[error("Invalid key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure during the encryption process.
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A sealed value could not be opened.
    ///
    /// Malformed text, bad base64, truncated payloads and failed authentication all collapse into
    /// this single variant with identical text, so callers cannot be used as a decryption oracle.
    #[error("Sealed value is unreadable{}", format_context(.context))]
    Unreadable { context: Option<Cow<'static, str>> },

    /// The operating system random source failed.
    #[error("Entropy source failure{}: {message}", format_context(.context))]
    Entropy { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Guarded memory failure (use after destroy, enclave integrity).
    #[error("Secure memory error{}: {source}", format_context(.context))]
    Memory { source: MemoryError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal secret box error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl SecretBoxError {
    pub(crate) const fn unreadable() -> Self {
        Self::Unreadable { context: None }
    }

    /// `true` when the error stems from untrusted input rather than a local fault.
    #[must_use]
    pub const fn is_unreadable(&self) -> bool {
        matches!(self, Self::Unreadable { .. })
    }
}
