use std::fmt;

/// Parameters of an anti-forgery crumb issued for one flow (sign-in, sign-out).
///
/// `secret` and `extra` are random per process; a crumb is rendered as
/// `<key><separator><extra>...` by the issuing service and expires after `ttl` seconds.
#[derive(Clone, PartialEq, Eq)]
pub struct CrumbConfig {
    pub key: String,
    pub ttl: u64,
    pub secret: String,
    pub extra: String,
    pub separator: String,
}

/// The crumb pair used by the sign-in and sign-out flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumbs {
    pub signin: CrumbConfig,
    pub signout: CrumbConfig,
}

impl fmt::Debug for CrumbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrumbConfig")
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}
