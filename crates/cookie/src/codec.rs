use crate::error::CookieError;
use crate::transport::{CookieSink, CookieSource};
use cbox_memguard::SecureBuffer;
use cookie::Cookie as HttpCookie;
use std::fmt::Debug;

/// A named cookie whose value is transformed on the way out and back in.
///
/// Implementations are produced by the [`CookieRegistry`](crate::CookieRegistry) from a URI and
/// shared across request handlers, hence `Send + Sync`. The trait is object-safe; the registry
/// hands out `Box<dyn Cookie>`.
///
/// The `*_string` variants copy plaintext into ordinary heap memory. Prefer the
/// [`SecureBuffer`] forms when the value is a credential.
pub trait Cookie: Send + Sync + Debug {
    /// Name of the cookie this codec reads and writes.
    fn name(&self) -> &str;

    /// Reads and decodes the cookie from `request`.
    ///
    /// # Errors
    /// * [`CookieError::CookieNotFound`] when the request has no such cookie.
    /// * [`CookieError::Unreadable`] when the value cannot be decoded.
    fn get(&self, request: &dyn CookieSource) -> Result<SecureBuffer, CookieError>;

    /// Encodes `value` into a cookie built from `template` and attaches it to `response`.
    ///
    /// `template` supplies attributes (path, domain, expiry, flags) and must not carry a name.
    ///
    /// # Errors
    /// * [`CookieError::PresetNameConflict`] when `template` already has a name.
    /// * Encoding and transport errors.
    fn set_with_cookie(
        &self,
        response: &mut dyn CookieSink,
        value: &SecureBuffer,
        template: HttpCookie<'static>,
    ) -> Result<(), CookieError>;

    /// Instructs the client to discard the cookie. Never inspects any existing value.
    ///
    /// # Errors
    /// Transport errors only.
    fn delete(&self, response: &mut dyn CookieSink) -> Result<(), CookieError>;

    /// [`get`](Self::get), copied out as UTF-8 text. The intermediate buffer is destroyed.
    ///
    /// # Errors
    /// As [`get`](Self::get), plus [`CookieError::Memory`] when the plaintext is not UTF-8.
    fn get_string(&self, request: &dyn CookieSource) -> Result<String, CookieError> {
        let mut plaintext = self.get(request)?;
        let text = plaintext.as_str()?.to_owned();
        plaintext.destroy();
        Ok(text)
    }

    /// [`set_with_cookie`](Self::set_with_cookie) with an empty template.
    ///
    /// # Errors
    /// As [`set_with_cookie`](Self::set_with_cookie).
    fn set(&self, response: &mut dyn CookieSink, value: &SecureBuffer) -> Result<(), CookieError> {
        self.set_with_cookie(response, value, HttpCookie::new("", ""))
    }

    /// [`set`](Self::set) for plain text. The transient buffer is destroyed before returning.
    ///
    /// # Errors
    /// As [`set_with_cookie`](Self::set_with_cookie).
    fn set_string(&self, response: &mut dyn CookieSink, value: &str) -> Result<(), CookieError> {
        self.set_string_with_cookie(response, value, HttpCookie::new("", ""))
    }

    /// [`set_with_cookie`](Self::set_with_cookie) for plain text.
    ///
    /// # Errors
    /// As [`set_with_cookie`](Self::set_with_cookie).
    fn set_string_with_cookie(
        &self,
        response: &mut dyn CookieSink,
        value: &str,
        template: HttpCookie<'static>,
    ) -> Result<(), CookieError> {
        let mut buffer = SecureBuffer::from(value);
        let result = self.set_with_cookie(response, &buffer, template);
        buffer.destroy();
        result
    }
}
