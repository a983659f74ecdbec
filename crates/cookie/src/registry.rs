use crate::codec::Cookie;
use crate::error::CookieError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, trace, warn};
use url::Url;

/// Builds a cookie codec from its full configuration URI.
pub type CookieConstructor = dyn Fn(&str) -> Result<Box<dyn Cookie>, CookieError> + Send + Sync;

type SchemeTable = RwLock<FxHashMap<String, Arc<CookieConstructor>>>;

/// Maps URI schemes to cookie constructors.
///
/// The table is created lazily on first use; concurrent first use from several threads builds it
/// exactly once. Registration and resolution may run concurrently afterwards.
///
/// A registry starts empty; see `cookiebox::init` for the default schemes.
pub struct CookieRegistry {
    table: OnceLock<SchemeTable>,
}

impl Default for CookieRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self { table: OnceLock::new() }
    }

    fn table(&self) -> &SchemeTable {
        self.table.get_or_init(|| {
            trace!("Initializing cookie scheme table");
            RwLock::new(FxHashMap::default())
        })
    }

    /// Associates `scheme` with `constructor`.
    ///
    /// # Errors
    /// * [`CookieError::InvalidScheme`] when `scheme` is not a lowercase URI scheme.
    /// * [`CookieError::DuplicateScheme`] when `scheme` is already registered; the existing
    ///   constructor is kept.
    pub fn register<F>(&self, scheme: &str, constructor: F) -> Result<(), CookieError>
    where
        F: Fn(&str) -> Result<Box<dyn Cookie>, CookieError> + Send + Sync + 'static,
    {
        if !is_valid_scheme(scheme) {
            return Err(CookieError::InvalidScheme {
                message: format!("'{scheme}' is not a lowercase URI scheme").into(),
                context: None,
            });
        }

        match self.table().write().entry(scheme.to_owned()) {
            Entry::Occupied(_) => {
                warn!(scheme, "Cookie scheme already registered");
                Err(CookieError::DuplicateScheme { message: scheme.to_owned().into(), context: None })
            },
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(constructor));
                info!(scheme, "Registered cookie scheme");
                Ok(())
            },
        }
    }

    /// Builds the cookie described by `uri` with the constructor registered for its scheme.
    ///
    /// The constructor runs outside the registry lock and receives the full URI.
    ///
    /// # Errors
    /// * [`CookieError::Configuration`] when `uri` cannot be parsed.
    /// * [`CookieError::UnknownScheme`] when no constructor matches.
    /// * Whatever the constructor returns.
    pub fn resolve(&self, uri: &str) -> Result<Box<dyn Cookie>, CookieError> {
        let url = Url::parse(uri).map_err(|e| CookieError::Configuration {
            message: e.to_string().into(),
            context: Some("Malformed cookie URI".into()),
        })?;
        let scheme = url.scheme();

        let constructor = self.table().read().get(scheme).cloned();
        let Some(constructor) = constructor else {
            debug!(scheme, "No constructor for cookie scheme");
            return Err(CookieError::UnknownScheme { message: scheme.to_owned().into(), context: None });
        };

        debug!(scheme, "Resolving cookie");
        constructor(uri)
    }

    /// Every registered scheme as `"<scheme>://"`, sorted.
    #[must_use]
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> =
            self.table().read().keys().map(|scheme| format!("{scheme}://")).collect();
        schemes.sort_unstable();
        schemes
    }

    #[must_use]
    pub fn contains(&self, scheme: &str) -> bool {
        self.table().read().contains_key(scheme)
    }
}

impl fmt::Debug for CookieRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieRegistry").field("schemes", &self.schemes()).finish()
    }
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`, lowercase only since parsed schemes are lowercase.
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_validation() {
        for valid in ["encrypted", "a", "x-y.z+1"] {
            assert!(is_valid_scheme(valid), "{valid}");
        }
        for invalid in ["", "Encrypted", "1abc", "enc rypted", "enc://", "é"] {
            assert!(!is_valid_scheme(invalid), "{invalid}");
        }
    }

    #[test]
    fn empty_registry_lists_nothing() {
        let registry = CookieRegistry::new();
        assert!(registry.schemes().is_empty());
        assert!(!registry.contains("encrypted"));
        assert_eq!(format!("{registry:?}"), "CookieRegistry { schemes: [] }");
    }
}
