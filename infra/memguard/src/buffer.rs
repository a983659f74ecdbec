use crate::error::{MemoryError, MemoryErrorExt};
use crate::lock;
use std::fmt;
use zeroize::Zeroize;

/// A fixed-size byte region holding a secret.
///
/// The region is locked in RAM when the platform allows it and is overwritten with zeros by
/// [`destroy`](Self::destroy), which also runs on drop. After destruction every read fails with
/// [`MemoryError::UseAfterDestroy`]; nothing ever observes stale contents.
///
/// The buffer is never reallocated, so no unwiped copies are left behind by growth.
pub struct SecureBuffer {
    data: Box<[u8]>,
    locked: bool,
    destroyed: bool,
}

impl SecureBuffer {
    /// Copies `bytes` into a fresh guarded region.
    ///
    /// The caller keeps ownership of the input and remains responsible for wiping it; prefer the
    /// `From<Vec<u8>>` / `From<String>` conversions, which consume and wipe their input.
    #[must_use]
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self::from_boxed(bytes.as_ref().into())
    }

    fn from_boxed(data: Box<[u8]>) -> Self {
        let locked = lock::lock(&data);
        Self { data, locked, destroyed: false }
    }

    /// Read access to the secret bytes.
    ///
    /// # Errors
    /// Returns [`MemoryError::UseAfterDestroy`] once the buffer has been destroyed.
    pub fn bytes(&self) -> Result<&[u8], MemoryError> {
        if self.destroyed {
            return Err(MemoryError::UseAfterDestroy { context: None });
        }
        Ok(&self.data)
    }

    /// Borrows the contents as UTF-8 text.
    ///
    /// # Errors
    /// * [`MemoryError::UseAfterDestroy`] once destroyed.
    /// * [`MemoryError::Encoding`] when the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Result<&str, MemoryError> {
        std::str::from_utf8(self.bytes()?).context("Secure buffer does not hold UTF-8 text")
    }

    /// Copies the contents into an ordinary `String`, replacing invalid UTF-8 sequences.
    ///
    /// The returned value is outside the guarded region; wipe it when done.
    ///
    /// # Errors
    /// Returns [`MemoryError::UseAfterDestroy`] once destroyed.
    pub fn to_string_lossy(&self) -> Result<String, MemoryError> {
        Ok(String::from_utf8_lossy(self.bytes()?).into_owned())
    }

    /// Wipes and releases the region. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.data.zeroize();
        if self.locked {
            lock::unlock(&self.data);
            self.locked = false;
        }
        self.data = Box::default();
        self.destroyed = true;
    }

    /// Length of the secret in bytes, `0` after destruction.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether the platform accepted the request to pin this region in RAM.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureBuffer")
            .field("len", &self.data.len())
            .field("locked", &self.locked)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for SecureBuffer {
    fn from(mut bytes: Vec<u8>) -> Self {
        let buffer = Self::new(&bytes);
        bytes.zeroize();
        buffer
    }
}

impl From<String> for SecureBuffer {
    fn from(mut text: String) -> Self {
        let buffer = Self::new(text.as_bytes());
        text.zeroize();
        buffer
    }
}

impl From<&str> for SecureBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<&[u8]> for SecureBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}
