//! # Memguard
//!
//! Guarded memory for short-lived secrets.
//!
//! - [`SecureBuffer`]: a fixed-size region that is locked in RAM where possible, wiped on
//!   [`destroy`](SecureBuffer::destroy) or drop, and refuses reads afterwards.
//! - [`Enclave`]: a secret sealed at rest under a per-process key, opened into a fresh
//!   [`SecureBuffer`] only when needed.
//!
//! Neither type prints its contents through `Debug`.
//!
//! ## Example
//! ```rust
//! use cbox_memguard::{Enclave, SecureBuffer};
//!
//! let secret = SecureBuffer::from("passphrase");
//! let enclave = Enclave::from_buffer(secret)?;
//!
//! let mut opened = enclave.open()?;
//! assert_eq!(opened.as_str()?, "passphrase");
//! opened.destroy();
//! assert!(opened.bytes().is_err());
//! # Ok::<(), cbox_memguard::MemoryError>(())
//! ```

mod buffer;
mod enclave;
mod error;
mod lock;

pub use buffer::SecureBuffer;
pub use enclave::Enclave;
pub use error::{MemoryError, MemoryErrorExt};

pub mod prelude {
    pub use crate::{Enclave, MemoryError, MemoryErrorExt, SecureBuffer};
}
