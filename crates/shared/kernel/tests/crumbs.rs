use cbox_kernel::domain::config::CrumbsConfig;
use cbox_kernel::prelude::*;

#[test]
fn crumb_config_has_random_secret_and_extra() {
    let crumb = new_crumb_config("signin", 120);

    assert_eq!(crumb.key, "signin");
    assert_eq!(crumb.ttl, 120);
    assert_eq!(crumb.secret.len(), 32);
    assert_eq!(crumb.extra.len(), 8);
    assert_eq!(crumb.separator, ":");
    assert!(crumb.secret.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn crumbs_follow_configured_keys_and_ttls() {
    let crumbs = generate_crumbs(&CrumbsConfig::default());

    assert_eq!(crumbs.signin.key, "signin");
    assert_eq!(crumbs.signin.ttl, 120);
    assert_eq!(crumbs.signout.key, "signout");
    assert_eq!(crumbs.signout.ttl, 3600);
    assert_ne!(crumbs.signin.secret, crumbs.signout.secret);
}

#[test]
fn regenerating_rotates_secrets() {
    let settings = CrumbsConfig::default();
    let first = generate_crumbs(&settings);
    let second = generate_crumbs(&settings);
    assert_ne!(first.signin.secret, second.signin.secret);
    assert_ne!(first.signin.extra, second.signin.extra);
}
