//! Where cookie values come from and where `Set-Cookie` headers go.
//!
//! Codecs never see a concrete HTTP stack. They read through [`CookieSource`] and write through
//! [`CookieSink`], implemented here for the `http` crate types and for [`CookieJar`].

use crate::error::{CookieError, CookieErrorExt};
use cookie::{Cookie as HttpCookie, CookieJar};
use http::header::{COOKIE, HeaderValue, SET_COOKIE};
use http::{HeaderMap, Request, Response};

/// Read access to the cookies of an incoming request.
pub trait CookieSource {
    /// Value of the first cookie called `name`, if present.
    fn cookie(&self, name: &str) -> Option<String>;
}

/// Write access to the cookies of an outgoing response.
pub trait CookieSink {
    /// Attaches `cookie` to the response.
    ///
    /// # Errors
    /// Returns [`CookieError::Header`] if the rendered cookie is not a valid header value.
    fn add_cookie(&mut self, cookie: HttpCookie<'static>) -> Result<(), CookieError>;
}

impl CookieSource for HeaderMap {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(HttpCookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == name)
            .map(|cookie| cookie.value().to_owned())
    }
}

impl<B> CookieSource for Request<B> {
    fn cookie(&self, name: &str) -> Option<String> {
        self.headers().cookie(name)
    }
}

impl CookieSource for CookieJar {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get(name).map(|cookie| cookie.value().to_owned())
    }
}

impl CookieSink for HeaderMap {
    fn add_cookie(&mut self, cookie: HttpCookie<'static>) -> Result<(), CookieError> {
        let value = HeaderValue::from_str(&cookie.to_string()).context("Rendering Set-Cookie")?;
        self.append(SET_COOKIE, value);
        Ok(())
    }
}

impl<B> CookieSink for Response<B> {
    fn add_cookie(&mut self, cookie: HttpCookie<'static>) -> Result<(), CookieError> {
        self.headers_mut().add_cookie(cookie)
    }
}

impl CookieSink for CookieJar {
    fn add_cookie(&mut self, cookie: HttpCookie<'static>) -> Result<(), CookieError> {
        self.add(cookie);
        Ok(())
    }
}
