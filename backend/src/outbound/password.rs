//! Argon2id password hashing.
//!
//! Every hash and comparison runs on Tokio's blocking pool.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use async_trait::async_trait;
use rand::RngCore;
use tracing::error;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Fixed salt for [`PasswordHasher::verify_absent`]; the output is discarded.
const ABSENT_SALT: &str = "Ym9va3N0b3JlLWFic2VudA";

/// Argon2id with the crate's default parameters and a random 16-byte salt.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

fn hash_blocking(password: &[u8]) -> Result<String, PasswordHashError> {
    let mut salt_bytes = [0_u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|err| PasswordHashError::hash(err.to_string()))?;
    Argon2::default()
        .hash_password(password, &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHashError::hash(err.to_string()))
}

fn verify_blocking(password: &[u8], stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default().verify_password(password, &parsed).is_ok(),
        Err(_) => {
            verify_absent_blocking(password);
            false
        }
    }
}

// Hashing with default parameters costs the same as verifying a hash
// produced by `hash_blocking`.
fn verify_absent_blocking(password: &[u8]) {
    if let Ok(salt) = SaltString::from_b64(ABSENT_SALT) {
        let _ = Argon2::default().hash_password(password, &salt);
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let password = Zeroizing::new(password.as_bytes().to_vec());
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
    }

    async fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let stored_hash = stored_hash.to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&password, &stored_hash))
            .await
            .unwrap_or_else(|err| {
                error!(error = %err, "password verification task failed");
                false
            })
    }

    async fn verify_absent(&self, password: &str) {
        let password = Zeroizing::new(password.as_bytes().to_vec());
        if let Err(err) =
            tokio::task::spawn_blocking(move || verify_absent_blocking(&password)).await
        {
            error!(error = %err, "password verification task failed");
        }
    }
}
