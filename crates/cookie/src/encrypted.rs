use crate::codec::Cookie;
use crate::error::CookieError;
use crate::transport::{CookieSink, CookieSource};
use cbox_memguard::SecureBuffer;
use cbox_secretbox::SecretBox;
use cookie::{Cookie as HttpCookie, time::Duration};
use tracing::debug;
use url::Url;

/// Scheme under which [`EncryptedCookie`] is registered.
pub const ENCRYPTED_SCHEME: &str = "encrypted";

/// Alphabet for generated secrets and salts.
pub const ALPHANUMERIC: &[char; 62] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b',
    'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u',
    'v', 'w', 'x', 'y', 'z',
];

const RANDOM_FIELD_LEN: usize = 32;

/// A cookie whose value is sealed with a [`SecretBox`].
///
/// Configured from a URI of the form
/// `encrypted://?name=<cookie-name>&secret=<passphrase>&salt=<salt>`. The key is derived from the
/// passphrase and salt, so any process configured with the same URI can read cookies written by
/// another. Values are confidential and tamper-evident; expiry and replay are left to the caller.
///
/// ```rust
/// use cbox_cookie::{Cookie, EncryptedCookie};
/// use http::{HeaderMap, header};
///
/// let codec = EncryptedCookie::from_uri("encrypted://?name=t&secret=abc123&salt=xyz")?;
///
/// let mut response = HeaderMap::new();
/// codec.set_string(&mut response, "hello world")?;
///
/// let set_cookie = response[header::SET_COOKIE].to_str().unwrap().to_owned();
/// let mut request = HeaderMap::new();
/// request.insert(header::COOKIE, set_cookie.parse().unwrap());
///
/// assert_eq!(codec.get_string(&request)?, "hello world");
/// # Ok::<(), cbox_cookie::CookieError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EncryptedCookie {
    name: String,
    engine: SecretBox,
}

impl EncryptedCookie {
    /// Parses `uri` and derives the cookie key.
    ///
    /// The URI is never echoed into errors or logs because it carries the passphrase.
    ///
    /// # Errors
    /// * [`CookieError::Configuration`] when the URI is malformed or `name`, `secret` or `salt`
    ///   is missing or empty.
    /// * [`CookieError::Engine`] when key derivation fails.
    pub fn from_uri(uri: &str) -> Result<Self, CookieError> {
        let url = Url::parse(uri).map_err(|e| CookieError::Configuration {
            message: e.to_string().into(),
            context: Some("Malformed cookie URI".into()),
        })?;

        let name = required_field(&url, "name")?;
        let secret = SecureBuffer::from(required_field(&url, "secret")?);
        let salt = required_field(&url, "salt")?;

        let engine = SecretBox::from_passphrase(&secret, salt)?;
        debug!(cookie = %name, "Configured encrypted cookie");
        Ok(Self { name, engine })
    }

    /// Registry constructor: [`from_uri`](Self::from_uri), boxed as a trait object.
    ///
    /// # Errors
    /// As [`from_uri`](Self::from_uri).
    pub fn boxed(uri: &str) -> Result<Box<dyn Cookie>, CookieError> {
        Ok(Box::new(Self::from_uri(uri)?))
    }

    /// Wraps an already configured engine.
    #[must_use]
    pub fn with_engine(name: impl Into<String>, engine: SecretBox) -> Self {
        Self { name: name.into(), engine }
    }

    #[must_use]
    pub const fn engine(&self) -> &SecretBox {
        &self.engine
    }
}

impl Cookie for EncryptedCookie {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, request: &dyn CookieSource) -> Result<SecureBuffer, CookieError> {
        let value = request.cookie(&self.name).ok_or_else(|| CookieError::CookieNotFound {
            message: self.name.clone().into(),
            context: None,
        })?;

        self.engine.open(&value).map_err(|err| {
            debug!(cookie = %self.name, "Rejecting unreadable cookie");
            CookieError::from_engine(err)
        })
    }

    fn set_with_cookie(
        &self,
        response: &mut dyn CookieSink,
        value: &SecureBuffer,
        template: HttpCookie<'static>,
    ) -> Result<(), CookieError> {
        if !template.name().is_empty() {
            return Err(CookieError::PresetNameConflict {
                message: template.name().to_owned().into(),
                context: None,
            });
        }

        let sealed = self.engine.seal(value)?;
        let mut cookie = template;
        cookie.set_name(self.name.clone());
        cookie.set_value(sealed);
        response.add_cookie(cookie)
    }

    fn delete(&self, response: &mut dyn CookieSink) -> Result<(), CookieError> {
        let mut cookie = HttpCookie::new(self.name.clone(), "");
        cookie.set_max_age(Duration::seconds(-1));
        response.add_cookie(cookie)
    }
}

/// Builds a configuration URI with a fresh random secret and salt.
///
/// Cookies written under such a URI cannot be read by any other process or after a restart.
/// Suitable for tests and single-instance development setups only.
#[must_use]
pub fn random_uri(name: &str) -> String {
    let secret = nanoid::nanoid!(RANDOM_FIELD_LEN, ALPHANUMERIC);
    let salt = nanoid::nanoid!(RANDOM_FIELD_LEN, ALPHANUMERIC);

    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("name", name)
        .append_pair("secret", &secret)
        .append_pair("salt", &salt)
        .finish();
    format!("{ENCRYPTED_SCHEME}://?{query}")
}

fn required_field(url: &Url, field: &'static str) -> Result<String, CookieError> {
    url.query_pairs()
        .find(|(key, _)| key == field)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| CookieError::configuration(format!("Missing {field}")))
}
