use cbox_secretbox::prelude::*;
use std::sync::LazyLock;

static PASSPHRASE_BOX: LazyLock<SecretBox> = LazyLock::new(|| {
    SecretBox::from_passphrase(&SecureBuffer::from("abc123"), "xyz")
        .expect("Secret box derivation failed")
});

/// Returns a secret box derived from a fixed passphrase and salt.
///
/// Key derivation is expensive, so the engine is derived once per test binary and cloned.
/// # Panics
/// * If key derivation fails.
#[must_use]
pub fn setup_secretbox() -> SecretBox {
    PASSPHRASE_BOX.clone()
}

/// Returns a cheap secret box keyed directly with `fill` repeated 32 times.
/// # Panics
/// * If the enclave cannot be created.
#[must_use]
pub fn fixed_key_secretbox(fill: u8) -> SecretBox {
    let enclave = Enclave::new([fill; 32]).expect("Enclave setup failed");
    SecretBox::from_enclave(enclave, "fixed").expect("Secret box setup failed")
}
