use cbox_cookie::{CookieRegistry, ENCRYPTED_SCHEME, EncryptedCookie};
use cbox_kernel::domain::config::{AppConfig, LogRotation};
use cbox_kernel::prelude::*;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

const BASE: &str = r#"
[cookie]
uri = "encrypted://?name=t&secret=abc123&salt=xyz"

[crumbs.signin]
key = "in"
ttl = 60

[logging]
level = "debug"
rotation = "hourly"
"#;

#[test]
#[serial]
fn loads_file() {
    let file = config_file(BASE);
    let cfg: AppConfig = load_config(Some(file.path())).expect("load config");

    assert_eq!(cfg.cookie.uri, "encrypted://?name=t&secret=abc123&salt=xyz");
    assert_eq!(cfg.cookie.name, "t");
    assert_eq!(cfg.crumbs.signin.key, "in");
    assert_eq!(cfg.crumbs.signout.ttl, 3600);
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.rotation, LogRotation::Hourly);
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result: Result<AppConfig, _> = load_config(Some(dir.path().join("absent.toml")));

    let err = result.unwrap_err();
    assert!(matches!(err, KernelError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
#[serial]
fn malformed_values_are_reported() {
    let file = config_file("[logging]\nmax_files = \"many\"\n");
    let result: Result<AppConfig, _> = load_config(Some(file.path()));

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to deserialize config"));
}

#[test]
fn overrides_take_precedence_over_file() {
    let file = config_file(BASE);
    let cfg: AppConfig = load_config_with_overrides(
        Some(file.path()),
        [
            ("CBOX__COOKIE__URI", "debug"),
            ("CBOX__LOGGING__LEVEL", "warn"),
            ("UNRELATED__COOKIE__NAME", "ignored"),
        ],
    )
    .expect("load config");

    assert_eq!(cfg.cookie.uri, "debug");
    assert_eq!(cfg.cookie.name, "t");
    assert_eq!(cfg.logging.level, "warn");
    assert_eq!(cfg.crumbs.signin.ttl, 60);
}

#[test]
#[serial]
#[allow(unsafe_code)]
fn process_environment_overrides_file() {
    let file = config_file(BASE);

    // SAFETY: every test reading the process environment is serialised.
    unsafe { std::env::set_var("CBOX__COOKIE__NAME", "session") };
    let result: Result<AppConfig, _> = load_config(Some(file.path()));
    // SAFETY: as above.
    unsafe { std::env::remove_var("CBOX__COOKIE__NAME") };

    let cfg = result.expect("load config");
    assert_eq!(cfg.cookie.name, "session");
}

#[test]
fn resolved_debug_uri_is_usable() {
    let registry = CookieRegistry::new();
    registry.register(ENCRYPTED_SCHEME, EncryptedCookie::boxed).expect("register");

    let uri = resolve_cookie_uri(DEBUG_SENTINEL, "sid").expect("resolve");
    let cookie = registry.resolve(&uri).expect("cookie from random uri");
    assert_eq!(cookie.name(), "sid");
}
