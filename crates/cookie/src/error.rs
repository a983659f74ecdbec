use cbox_memguard::MemoryError;
use cbox_secretbox::SecretBoxError;
use std::borrow::Cow;

#[cbox_derive::cbox_error]
pub enum CookieError {
    /// A cookie URI is malformed or lacks a required field.
    #[error("Invalid cookie configuration{}: {message}", format_context(.context))]
    Configuration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid cookie scheme{}: {message}", format_context(.context))]
    InvalidScheme { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown cookie scheme{}: {message}", format_context(.context))]
    UnknownScheme { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Cookie scheme already registered{}: {message}", format_context(.context))]
    DuplicateScheme { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The request carries no cookie with the codec's name.
    #[error("Cookie not found{}: {message}", format_context(.context))]
    CookieNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The cookie value is malformed, was sealed under another key, or was modified.
    #[error("Cookie value is unreadable{}", format_context(.context))]
    Unreadable { context: Option<Cow<'static, str>> },

    /// The template cookie passed to a `set_*_with_cookie` call already carries a name.
    #[error("Cookie name already set{}: {message}", format_context(.context))]
    PresetNameConflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Secret engine error{}: {source}", format_context(.context))]
    Engine { source: SecretBoxError, context: Option<Cow<'static, str>> },

    #[error("Secure memory error{}: {source}", format_context(.context))]
    Memory { source: MemoryError, context: Option<Cow<'static, str>> },

    #[error("Invalid header value{}: {source}", format_context(.context))]
    Header { source: http::header::InvalidHeaderValue, context: Option<Cow<'static, str>> },

    #[error("Internal cookie error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CookieError {
    pub(crate) fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Configuration { message: message.into(), context: None }
    }

    /// Maps engine failures, folding every "cannot open" cause into [`CookieError::Unreadable`].
    pub(crate) fn from_engine(err: SecretBoxError) -> Self {
        if err.is_unreadable() { Self::Unreadable { context: None } } else { Self::from(err) }
    }

    /// `true` for per-request outcomes a server should answer with "reject or re-authenticate"
    /// (missing or unreadable cookie), `false` for configuration and local faults.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::CookieNotFound { .. } | Self::Unreadable { .. })
    }
}
