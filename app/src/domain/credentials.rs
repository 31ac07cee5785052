//! Password digests stored in the registry.
//!
//! Format: `sha256$<salt>$<hex digest of salt || password>`.

use sha2::{Digest, Sha256};

use crate::domain::error::AuthError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

const SCHEME: &str = "sha256";

/// Reject passwords shorter than [`MIN_PASSWORD_LEN`].
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Digest `password` with `salt` into the stored form.
#[must_use]
pub fn hash_password(password: &str, salt: &str) -> String {
    format!("{SCHEME}${salt}${}", digest_hex(salt, password))
}

/// Check `password` against a stored digest. Malformed digests never match.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(scheme), Some(salt), Some(expected)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    constant_time_eq(digest_hex(salt, password).as_bytes(), expected.as_bytes())
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex_encode(&hasher.finalize())
}

/// Encode bytes as a lowercase hex string.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[(b >> 4) as usize]));
        out.push(char::from(HEX[(b & 0xf) as usize]));
    }
    out
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
