pub mod fixtures;

use cbox_cookie::prelude::*;
use std::sync::Arc;
use std::thread;

#[derive(Debug)]
struct PlainCookie {
    name: String,
}

impl Cookie for PlainCookie {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, request: &dyn CookieSource) -> Result<SecureBuffer, CookieError> {
        request.cookie(&self.name).map(SecureBuffer::from).ok_or_else(|| {
            CookieError::CookieNotFound { message: self.name.clone().into(), context: None }
        })
    }

    fn set_with_cookie(
        &self,
        response: &mut dyn CookieSink,
        value: &SecureBuffer,
        mut template: HttpCookie<'static>,
    ) -> Result<(), CookieError> {
        template.set_name(self.name.clone());
        template.set_value(value.as_str()?.to_owned());
        response.add_cookie(template)
    }

    fn delete(&self, response: &mut dyn CookieSink) -> Result<(), CookieError> {
        response.add_cookie(HttpCookie::new(self.name.clone(), ""))
    }
}

fn plain(uri: &str) -> Result<Box<dyn Cookie>, CookieError> {
    Ok(Box::new(PlainCookie { name: uri.trim_start_matches("plain://").to_owned() }))
}

#[test]
fn resolves_registered_scheme() {
    let registry = CookieRegistry::new();
    registry.register(ENCRYPTED_SCHEME, EncryptedCookie::boxed).unwrap();

    let cookie = registry.resolve(fixtures::URI).unwrap();
    assert_eq!(cookie.name(), "t");

    let mut jar = CookieJar::new();
    cookie.set_string(&mut jar, "via registry").unwrap();
    assert_eq!(cookie.get_string(&jar).unwrap(), "via registry");
}

#[test]
fn unknown_scheme_is_reported() {
    let registry = CookieRegistry::new();
    registry.register(ENCRYPTED_SCHEME, EncryptedCookie::boxed).unwrap();

    let err = registry.resolve("unknown://?name=t").unwrap_err();
    assert!(matches!(err, CookieError::UnknownScheme { .. }));
    assert_eq!(err.to_string(), "Unknown cookie scheme: unknown");
}

#[test]
fn malformed_uri_is_a_configuration_error() {
    let registry = CookieRegistry::new();
    let err = registry.resolve("::not a uri::").unwrap_err();
    assert!(matches!(err, CookieError::Configuration { .. }));
    assert!(!err.is_rejection());
}

#[test]
fn constructor_errors_propagate() {
    let registry = CookieRegistry::new();
    registry.register(ENCRYPTED_SCHEME, EncryptedCookie::boxed).unwrap();

    let err = registry.resolve("encrypted://?name=t&secret=s").unwrap_err();
    assert_eq!(err.to_string(), "Invalid cookie configuration: Missing salt");
}

#[test]
fn duplicate_registration_keeps_the_first_constructor() {
    let registry = CookieRegistry::new();
    registry.register("plain", plain).unwrap();

    let err = registry.register("plain", EncryptedCookie::boxed).unwrap_err();
    assert!(matches!(err, CookieError::DuplicateScheme { .. }));

    let cookie = registry.resolve("plain://session").unwrap();
    assert_eq!(cookie.name(), "session");
}

#[test]
fn invalid_schemes_are_refused() {
    let registry = CookieRegistry::new();
    for scheme in ["", "Plain", "9lives", "has space"] {
        let err = registry.register(scheme, plain).unwrap_err();
        assert!(matches!(err, CookieError::InvalidScheme { .. }), "{scheme}");
    }
    assert!(registry.schemes().is_empty());
}

#[test]
fn schemes_are_sorted_with_suffix() {
    let registry = CookieRegistry::new();
    registry.register("plain", plain).unwrap();
    registry.register(ENCRYPTED_SCHEME, EncryptedCookie::boxed).unwrap();
    registry.register("beta", plain).unwrap();

    assert_eq!(registry.schemes(), ["beta://", "encrypted://", "plain://"]);
    assert!(registry.contains("plain"));
    assert!(!registry.contains("plain://"));
}

#[test]
fn closures_can_be_registered() {
    let registry = CookieRegistry::new();
    let prefix = String::from("session-");
    registry
        .register("named", move |uri: &str| -> Result<Box<dyn Cookie>, CookieError> {
            let suffix = uri.trim_start_matches("named://");
            Ok(Box::new(PlainCookie { name: format!("{prefix}{suffix}") }))
        })
        .unwrap();

    assert_eq!(registry.resolve("named://abc").unwrap().name(), "session-abc");
}

#[test]
fn concurrent_first_use_and_registration() {
    let registry = Arc::new(CookieRegistry::new());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let scheme = format!("scheme{i}");
                registry.register(&scheme, plain).unwrap();
                let _ = registry.schemes();
                registry.contains(&scheme)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(registry.schemes().len(), 16);
}

#[test]
fn concurrent_duplicate_registration_has_one_winner() {
    let registry = Arc::new(CookieRegistry::new());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.register("plain", plain).is_ok())
        })
        .collect();

    let winners = handles.into_iter().filter_map(|h| h.join().ok()).filter(|ok| *ok).count();
    assert_eq!(winners, 1);
}
