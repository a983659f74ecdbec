//! # Cookie codecs
//!
//! Cookies addressed by URI. A [`CookieRegistry`] maps URI schemes to constructors; resolving a
//! URI such as `encrypted://?name=t&secret=abc123&salt=xyz` yields a `Box<dyn Cookie>` that reads
//! the named cookie from requests and writes it to responses.
//!
//! The built-in [`EncryptedCookie`] seals values with `cbox-secretbox`, so clients can neither read
//! nor modify them.
//!
//! ```rust
//! use cbox_cookie::{CookieRegistry, ENCRYPTED_SCHEME, EncryptedCookie};
//!
//! let registry = CookieRegistry::new();
//! registry.register(ENCRYPTED_SCHEME, EncryptedCookie::boxed)?;
//! assert_eq!(registry.schemes(), ["encrypted://"]);
//!
//! let cookie = registry.resolve("encrypted://?name=t&secret=abc123&salt=xyz")?;
//! assert_eq!(cookie.name(), "t");
//! # Ok::<(), cbox_cookie::CookieError>(())
//! ```

mod codec;
mod encrypted;
mod error;
mod registry;
mod transport;

pub use codec::Cookie;
pub use cookie::{Cookie as HttpCookie, CookieJar, SameSite};
pub use encrypted::{ALPHANUMERIC, ENCRYPTED_SCHEME, EncryptedCookie, random_uri};
pub use error::{CookieError, CookieErrorExt};
pub use registry::{CookieConstructor, CookieRegistry};
pub use transport::{CookieSink, CookieSource};

pub mod prelude {
    pub use crate::{
        Cookie, CookieError, CookieJar, CookieRegistry, CookieSink, CookieSource,
        ENCRYPTED_SCHEME, EncryptedCookie, HttpCookie,
    };
    pub use cbox_memguard::SecureBuffer;
}
