#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the cookiebox crates.
//! At the moment the crate exposes a single attribute, [`cbox_error`], which removes the
//! boilerplate every error enum in the workspace would otherwise repeat: `thiserror` wiring,
//! `From` conversions for wrapped sources, context attachment and a stable variant name for logs.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! cbox-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for standardized error enums.
///
/// Every variant must use named fields. Variants that should accept extra context carry a
/// `context: Option<Cow<'static, str>>` field, and that field is mandatory for variants
/// wrapping a `source`.
///
/// The macro expands to:
/// 1. `#[derive(Debug, thiserror::Error)]` unless the enum already derives them.
/// 2. A `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>` and to results of every
///    wrapped source type.
/// 3. `From<Source>` for each variant holding a `source` field (or a `#[source]`/`#[from]` one).
/// 4. `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant exists.
/// 5. A `kind()` method returning the variant name, safe to log without leaking payloads.
/// 6. A module-local `format_context` helper for the `#[error(..)]` strings.
///
/// # Example
/// ```rust,ignore
/// use cbox_derive::cbox_error;
/// use std::borrow::Cow;
///
/// #[cbox_error]
/// pub enum CodecError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io {
///         source: std::io::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read_secret(path: &str) -> Result<String, CodecError> {
///     std::fs::read_to_string(path).context("Reading secret file")
/// }
///
/// assert_eq!(CodecError::from("boom").kind(), "Internal");
/// ```
#[proc_macro_attribute]
pub fn cbox_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
