use anyhow::{Context, Result, bail};
use cookiebox::Cookie;
use cookiebox::cookie::{CookieJar, HttpCookie};
use cookiebox::domain::config::{AppConfig, CrumbsConfig};
use cookiebox::domain::crumb::CrumbConfig;
use cookiebox::kernel::config::load_config;
use cookiebox::kernel::crumb::generate_crumbs;
use http::HeaderMap;
use http::header::SET_COOKIE;
use std::path::Path;
use tracing::debug;

/// Loads the configuration file, if one was given.
///
/// # Errors
/// Returns an error if the file is missing or malformed.
pub fn load(path: Option<&Path>) -> Result<Option<AppConfig>> {
    path.map(|path| load_config(Some(path)).context("Configuration is malformed")).transpose()
}

/// Resolves the cookie from `--uri`, falling back to `cookie.uri` of the configuration.
///
/// # Errors
/// Returns an error if no URI is available or it does not resolve.
pub fn cookie(uri: Option<&str>, config: Option<&AppConfig>) -> Result<Box<dyn Cookie>> {
    if let Some(uri) = uri {
        return cookiebox::new_cookie(uri).context("Invalid cookie URI");
    }
    let Some(config) = config else {
        bail!("No cookie URI: pass --uri or --config");
    };
    debug!("Using cookie URI from configuration");
    cookiebox::cookie_from_config(&config.cookie).context("Invalid cookie configuration")
}

pub fn schemes() -> Vec<String> {
    cookiebox::schemes()
}

pub fn new_uri(name: &str) -> String {
    cookiebox::cookie::random_uri(name)
}

/// # Errors
/// Returns an error if the value cannot be sealed.
pub fn seal(cookie: &dyn Cookie, value: &str) -> Result<String> {
    let mut jar = CookieJar::new();
    cookie.set_string(&mut jar, value)?;
    jar.get(cookie.name())
        .map(|stored| stored.value().to_owned())
        .context("Codec did not write the cookie")
}

/// # Errors
/// Returns an error if `sealed` is not readable with this cookie's key.
pub fn open(cookie: &dyn Cookie, sealed: &str) -> Result<String> {
    let mut jar = CookieJar::new();
    jar.add_original(HttpCookie::new(cookie.name().to_owned(), sealed.to_owned()));
    Ok(cookie.get_string(&jar)?)
}

/// # Errors
/// Returns an error if the value cannot be sealed.
pub fn set_cookie(cookie: &dyn Cookie, value: &str) -> Result<Vec<String>> {
    let mut headers = HeaderMap::new();
    cookie.set_string(&mut headers, value)?;
    set_cookie_headers(&headers)
}

/// # Errors
/// Returns an error if the header cannot be rendered.
pub fn delete_cookie(cookie: &dyn Cookie) -> Result<Vec<String>> {
    let mut headers = HeaderMap::new();
    cookie.delete(&mut headers)?;
    set_cookie_headers(&headers)
}

fn set_cookie_headers(headers: &HeaderMap) -> Result<Vec<String>> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .map(|value| -> Result<String> { Ok(format!("Set-Cookie: {}", value.to_str()?)) })
        .collect()
}

/// One line per crumb: `<key> ttl=<seconds> secret=<secret> extra=<extra> separator=<sep>`.
pub fn crumbs(config: Option<&AppConfig>) -> Vec<String> {
    let defaults = CrumbsConfig::default();
    let settings = config.map_or(&defaults, |config| &config.crumbs);
    let crumbs = generate_crumbs(settings);
    [&crumbs.signin, &crumbs.signout].into_iter().map(crumb_line).collect()
}

fn crumb_line(crumb: &CrumbConfig) -> String {
    format!(
        "{} ttl={} secret={} extra={} separator={}",
        crumb.key, crumb.ttl, crumb.secret, crumb.extra, crumb.separator
    )
}
