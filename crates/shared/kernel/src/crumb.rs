use crate::random_alphanumeric;
use cbox_domain::config::{CrumbSettings, CrumbsConfig};
use cbox_domain::crumb::{CrumbConfig, Crumbs};

const SECRET_LEN: usize = 32;
const EXTRA_LEN: usize = 8;
const SEPARATOR: &str = ":";

/// Builds crumb parameters for `key` with a fresh random secret and extra.
#[must_use]
pub fn new_crumb_config(key: impl Into<String>, ttl: u64) -> CrumbConfig {
    CrumbConfig {
        key: key.into(),
        ttl,
        secret: random_alphanumeric(SECRET_LEN),
        extra: random_alphanumeric(EXTRA_LEN),
        separator: SEPARATOR.to_owned(),
    }
}

/// Generates the sign-in and sign-out crumbs from their configured keys and lifetimes.
#[must_use]
pub fn generate_crumbs(settings: &CrumbsConfig) -> Crumbs {
    let build = |s: &CrumbSettings| new_crumb_config(s.key.clone(), s.ttl);
    Crumbs { signin: build(&settings.signin), signout: build(&settings.signout) }
}
