use cbox_domain::config::{AppConfig, CookieConfig, CrumbsConfig, LogRotation, LoggingConfig};
use cbox_domain::crumb::CrumbConfig;
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let cookie = CookieConfig::default();
    assert!(cookie.uri.is_empty());
    assert_eq!(cookie.name, "t");

    let crumbs = CrumbsConfig::default();
    assert_eq!(crumbs.signin.ttl, 120);
    assert_eq!(crumbs.signout.ttl, 3600);
    assert_eq!(crumbs.signin.key, "signin");

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(logging.path.is_none());
    assert_eq!(logging.rotation, LogRotation::Daily);
}

#[test]
fn app_config_deserializes() {
    let raw = json!({
        "cookie": { "uri": "encrypted://?name=t&secret=abc123&salt=xyz" },
        "crumbs": { "signin": { "key": "in", "ttl": 60 } },
        "logging": { "level": "debug", "path": "/tmp/logs", "rotation": "hourly", "json": true }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.cookie.uri, "encrypted://?name=t&secret=abc123&salt=xyz");
    assert_eq!(cfg.cookie.name, "t");
    assert_eq!(cfg.crumbs.signin.ttl, 60);
    assert_eq!(cfg.crumbs.signout.ttl, 3600);
    assert_eq!(cfg.logging.rotation, LogRotation::Hourly);
    assert_eq!(cfg.logging.path, Some(std::path::PathBuf::from("/tmp/logs")));
    assert!(cfg.logging.json);
}

#[test]
fn empty_document_yields_defaults() {
    let cfg: AppConfig = serde_json::from_value(json!({})).expect("config deserialize");
    assert!(cfg.cookie.uri.is_empty());
    assert_eq!(cfg.logging.max_files, 7);
}

#[test]
fn clones_share_until_mutated() {
    let original = AppConfig::default();
    let mut copy = original.clone();
    copy.cookie.uri = "debug".to_owned();

    assert!(original.cookie.uri.is_empty());
    assert_eq!(copy.cookie.uri, "debug");
}

#[test]
fn debug_output_hides_secrets() {
    let cookie = CookieConfig {
        uri: "encrypted://?name=t&secret=hunter2&salt=xyz".to_owned(),
        name: "t".to_owned(),
    };
    assert!(!format!("{cookie:?}").contains("hunter2"));

    let crumb = CrumbConfig {
        key: "signin".to_owned(),
        ttl: 120,
        secret: "s3cr3t".to_owned(),
        extra: "extra123".to_owned(),
        separator: ":".to_owned(),
    };
    let rendered = format!("{crumb:?}");
    assert!(!rendered.contains("s3cr3t"));
    assert!(rendered.contains("signin"));
}
