use crate::error::KernelError;
use cbox_cookie::random_uri;
use tracing::warn;

/// Configuration value that requests a throwaway cookie key.
pub const DEBUG_SENTINEL: &str = "debug";

/// Turns the configured cookie URI into one a registry can resolve.
///
/// * `"debug"` yields a fresh random `encrypted://` URI for a cookie called `default_name`.
///   Cookies written under it become unreadable on restart and across instances.
/// * An empty value is rejected.
/// * Anything else is returned unchanged; the registry validates it.
///
/// # Errors
/// Returns [`KernelError::Configuration`] when `raw` is empty.
pub fn resolve_cookie_uri(raw: &str, default_name: &str) -> Result<String, KernelError> {
    let raw = raw.trim();
    if raw == DEBUG_SENTINEL {
        warn!(cookie = default_name, "Using a random cookie key; not suitable for production");
        return Ok(random_uri(default_name));
    }
    if raw.is_empty() {
        return Err(KernelError::Configuration {
            message: "Missing cookie URI".into(),
            context: Some("Set cookie.uri or CBOX__COOKIE__URI".into()),
        });
    }
    Ok(raw.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_sentinel_yields_random_uri() {
        let first = resolve_cookie_uri("debug", "t").unwrap();
        let second = resolve_cookie_uri(" debug ", "t").unwrap();
        assert!(first.starts_with("encrypted://?name=t&secret="));
        assert_ne!(first, second);
    }

    #[test]
    fn explicit_uri_is_kept() {
        let uri = "encrypted://?name=t&secret=abc123&salt=xyz";
        assert_eq!(resolve_cookie_uri(uri, "ignored").unwrap(), uri);
    }

    #[test]
    fn empty_uri_is_rejected() {
        let err = resolve_cookie_uri("  ", "t").unwrap_err();
        assert!(matches!(err, KernelError::Configuration { .. }));
    }
}
