//! Argon2 password hashing.

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn is_acceptable(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Hash `password` with a random salt, returning the PHC string.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

/// `false` for a wrong password or an unparseable stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// Hashed with the same parameters as stored passwords.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("unknown-account").unwrap_or_default());

/// Run one argon2 verification against a throwaway hash, so a login for an
/// unknown email costs as much as one with a wrong password.
pub fn spend_verification(password: &str) {
    std::hint::black_box(verify_password(password, &DUMMY_HASH));
}
