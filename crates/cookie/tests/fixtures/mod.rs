use cbox_cookie::EncryptedCookie;
use std::sync::LazyLock;

pub const URI: &str = "encrypted://?name=t&secret=abc123&salt=xyz";

static CODEC: LazyLock<EncryptedCookie> =
    LazyLock::new(|| EncryptedCookie::from_uri(URI).expect("Codec setup failed"));

/// Codec for [`URI`], derived once per test binary.
/// # Panics
/// * If key derivation fails.
#[must_use]
pub fn codec() -> EncryptedCookie {
    CODEC.clone()
}
