pub use crate::config::{load_config, load_config_with_overrides};
pub use crate::cookie_uri::{DEBUG_SENTINEL, resolve_cookie_uri};
pub use crate::crumb::{generate_crumbs, new_crumb_config};
pub use crate::error::{KernelError, KernelErrorExt};
pub use crate::random_alphanumeric;
