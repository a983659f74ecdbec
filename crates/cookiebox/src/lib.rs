//! Facade crate for the cookie codecs and shared modules.
//! Re-exports the building blocks and owns the process-wide default registry.
//! Keep this crate thin: it should compose other crates, not implement codec logic.
//!
//! ## Usage
//! - Call [`new_cookie`] with a configuration URI to get a codec from the default registry.
//! - For an isolated registry, create a [`CookieRegistry`] and pass it to [`init`].
//!
//! ```rust
//! use cookiebox::prelude::*;
//!
//! let cookie = cookiebox::new_cookie("encrypted://?name=t&secret=abc123&salt=xyz")?;
//!
//! let mut headers = http::HeaderMap::new();
//! cookie.set_string(&mut headers, "user-42")?;
//! assert!(headers.contains_key(http::header::SET_COOKIE));
//! # Ok::<(), CookieError>(())
//! ```

pub use cbox_cookie as cookie;
pub use cbox_domain as domain;
pub use cbox_kernel as kernel;
pub use cbox_memguard as memguard;
pub use cbox_secretbox as secretbox;

pub use cbox_cookie::{Cookie, CookieError, CookieRegistry};

use cbox_cookie::{ENCRYPTED_SCHEME, EncryptedCookie};
use cbox_domain::config::CookieConfig;
use cbox_kernel::KernelError;
use std::sync::OnceLock;
use tracing::error;

pub mod prelude {
    pub use crate::{new_cookie, schemes};
    pub use cbox_cookie::prelude::*;
    pub use cbox_kernel::prelude::*;
}

static REGISTRY: OnceLock<CookieRegistry> = OnceLock::new();

/// Registers the built-in schemes (`encrypted`) with `registry`.
///
/// # Errors
/// [`CookieError::DuplicateScheme`] when `registry` was already initialized.
pub fn init(registry: &CookieRegistry) -> Result<(), CookieError> {
    registry.register(ENCRYPTED_SCHEME, EncryptedCookie::boxed)
}

/// The process-wide registry, populated with the built-in schemes on first use.
pub fn registry() -> &'static CookieRegistry {
    REGISTRY.get_or_init(|| {
        let registry = CookieRegistry::new();
        if let Err(e) = init(&registry) {
            error!("Failed to register built-in cookie schemes: {e}");
        }
        registry
    })
}

/// Resolves `uri` through the default [`registry`].
///
/// # Errors
/// See [`CookieRegistry::resolve`].
pub fn new_cookie(uri: &str) -> Result<Box<dyn Cookie>, CookieError> {
    registry().resolve(uri)
}

/// Schemes known to the default [`registry`], as `"<scheme>://"`.
#[must_use]
pub fn schemes() -> Vec<String> {
    registry().schemes()
}

/// Builds the cookie described by the `[cookie]` configuration section.
///
/// `uri = "debug"` yields a throwaway codec named after `name`.
///
/// # Errors
/// [`KernelError::Configuration`] for an empty URI, [`KernelError::Cookie`] when resolution fails.
pub fn cookie_from_config(config: &CookieConfig) -> Result<Box<dyn Cookie>, KernelError> {
    let uri = cbox_kernel::cookie_uri::resolve_cookie_uri(&config.uri, &config.name)?;
    Ok(new_cookie(&uri)?)
}
