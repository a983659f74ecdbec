use cbox_cookie::CookieError;
use std::borrow::Cow;

#[cbox_derive::cbox_error]
pub enum KernelError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Invalid configuration{}: {message}", format_context(.context))]
    Configuration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Cookie error{}: {source}", format_context(.context))]
    Cookie { source: CookieError, context: Option<Cow<'static, str>> },

    #[error("Internal kernel error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
