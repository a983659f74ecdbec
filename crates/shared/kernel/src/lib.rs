//! Kernel utilities shared by the applications.
//! Keep this crate lightweight; it re-exports ergonomic helpers for config loading, cookie URI
//! resolution and random secret generation.
//!
//! ## Random secrets
//! Use `random_alphanumeric!` for secrets, salts and crumb extras:
//! ```rust
//! # use cbox_kernel::random_alphanumeric;
//! let secret = random_alphanumeric!();
//! assert_eq!(secret.len(), 32);
//! assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
//! ```
//!
//! ## Crumbs
//! [`crumb::generate_crumbs`] turns the `[crumbs]` section into fresh sign-in and sign-out crumb
//! parameters for the anti-forgery layer; `cbox crumbs` prints them.
//!
//! ## Config loading
//! ```rust,no_run
//! use cbox_kernel::prelude::*;
//! use cbox_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("cookiebox.toml"))?;
//! let uri = resolve_cookie_uri(&cfg.cookie.uri, &cfg.cookie.name)?;
//! # Ok::<(), KernelError>(())
//! ```
pub mod config;
pub mod cookie_uri;
pub mod crumb;
pub mod error;
pub mod prelude;

pub use cbox_cookie::ALPHANUMERIC;
pub use cbox_domain as domain;
pub use error::{KernelError, KernelErrorExt};
pub use nanoid::nanoid;

/// Generates a random string over `[0-9A-Za-z]`.
#[macro_export]
macro_rules! random_alphanumeric {
    () => {
        $crate::nanoid!(32, $crate::ALPHANUMERIC)
    };
    ($size:expr) => {
        $crate::nanoid!($size, $crate::ALPHANUMERIC)
    };
}

/// Function form of [`random_alphanumeric!`].
#[must_use]
pub fn random_alphanumeric(len: usize) -> String {
    random_alphanumeric!(len)
}
