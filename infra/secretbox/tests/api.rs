pub mod fixtures;

use cbox_secretbox::SecretBoxError;
use cbox_secretbox::prelude::*;
use fixtures::{fixed_key_secretbox, setup_secretbox};

#[test]
fn seal_open_secure_buffer_roundtrip() {
    let engine = setup_secretbox();
    let sealed = engine.seal(&SecureBuffer::from("hello world")).expect("seal failed");
    let opened = engine.open(&sealed).expect("open failed");

    assert_eq!(opened.as_str().unwrap(), "hello world");
}

#[test]
fn same_passphrase_and_salt_interoperate() {
    let sealed = setup_secretbox().seal_bytes(b"shared").expect("seal failed");

    let peer = SecretBox::builder()
        .salt("xyz")
        .passphrase(&SecureBuffer::from("abc123"))
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(peer.open(&sealed).unwrap().bytes().unwrap(), b"shared");
}

#[test]
fn different_passphrase_cannot_open() {
    let sealed = setup_secretbox().seal_bytes(b"private").expect("seal failed");
    let other = SecretBox::from_passphrase(&SecureBuffer::from("different"), "xyz").unwrap();

    let result = other.open(&sealed);
    assert!(
        matches!(result, Err(SecretBoxError::Unreadable { .. })),
        "Must fail as unreadable when the passphrase differs"
    );
}

#[test]
fn different_salt_cannot_open() {
    let sealed = setup_secretbox().seal_bytes(b"private").expect("seal failed");
    let other = SecretBox::from_passphrase(&SecureBuffer::from("abc123"), "zyx").unwrap();

    assert!(other.open(&sealed).unwrap_err().is_unreadable());
}

#[test]
fn salt_is_retained() {
    assert_eq!(setup_secretbox().salt(), "xyz");
    assert_eq!(fixed_key_secretbox(1).salt(), "fixed");
}

#[test]
fn clones_share_the_key() {
    let engine = fixed_key_secretbox(9);
    let clone = engine.clone();

    let sealed = engine.seal_bytes(b"cloned").unwrap();
    assert_eq!(clone.open(&sealed).unwrap().bytes().unwrap(), b"cloned");
}

#[test]
fn destroyed_plaintext_cannot_be_sealed() {
    let engine = fixed_key_secretbox(3);
    let mut plaintext = SecureBuffer::from("gone");
    plaintext.destroy();

    let err = engine.seal(&plaintext).unwrap_err();
    assert!(matches!(err, SecretBoxError::Memory { .. }));
    assert!(!err.is_unreadable());
}

#[test]
fn error_kind_is_loggable() {
    let err = fixed_key_secretbox(1).open("%%%").unwrap_err();
    assert_eq!(err.kind(), "Unreadable");
}
