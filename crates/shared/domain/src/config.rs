use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub cookie: CookieConfig,
    pub crumbs: CrumbsConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Session cookie configuration.
///
/// `uri` addresses a cookie codec, e.g. `encrypted://?name=t&secret=<passphrase>&salt=<salt>`.
/// The literal value `debug` requests a throwaway codec with a random key named `name`.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CookieConfig {
    pub uri: String,
    pub name: String,
}

/// Lifetimes of the anti-forgery crumbs issued around sign-in and sign-out.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrumbsConfig {
    pub signin: CrumbSettings,
    pub signout: CrumbSettings,
}

/// Key and lifetime (seconds) of a single crumb.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrumbSettings {
    pub key: String,
    pub ttl: u64,
}

/// Logging sinks and verbosity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub name: String,
    pub level: String,
    pub console: bool,
    pub json: bool,
    pub path: Option<PathBuf>,
    pub rotation: LogRotation,
    pub max_files: usize,
    pub filter: Option<String>,
}

/// How often file logs roll over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

// --- Debug ---

impl std::fmt::Debug for CookieConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URI embeds the cookie passphrase.
        f.debug_struct("CookieConfig")
            .field("uri", &if self.uri.is_empty() { "" } else { "<redacted>" })
            .field("name", &self.name)
            .finish()
    }
}

// --- Default ---

impl Default for CookieConfig {
    fn default() -> Self {
        Self { uri: String::new(), name: "t".to_owned() }
    }
}

impl Default for CrumbsConfig {
    fn default() -> Self {
        Self {
            signin: CrumbSettings { key: "signin".to_owned(), ttl: 120 },
            signout: CrumbSettings { key: "signout".to_owned(), ttl: 3600 },
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "cbox".to_owned(),
            level: "info".to_owned(),
            console: true,
            json: false,
            path: None,
            rotation: LogRotation::default(),
            max_files: 7,
            filter: None,
        }
    }
}
