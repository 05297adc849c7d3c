//! # Credential Hashing
//!
//! Secrets are never stored. Each account keeps a random 16-byte salt, an
//! iteration count and a 32-byte PBKDF2-HMAC-SHA256 key derived from the
//! secret (RFC 8018).
//!
//! Verification recomputes the digest and compares it with
//! `subtle::ConstantTimeEq`.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Default PBKDF2 iterations.
pub const DEFAULT_HASH_ROUNDS: u32 = 10_000;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Salted, stretched credential digest.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialHash {
    salt: [u8; SALT_LEN],
    rounds: u32,
    digest: [u8; 32],
}

impl std::fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHash")
            .field("salt", &hex::encode(self.salt))
            .field("rounds", &self.rounds)
            .field("digest", &"<redacted>")
            .finish()
    }
}

impl CredentialHash {
    /// Hashes `secret` with a fresh random salt.
    pub fn generate(secret: &str, rounds: u32) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(secret, salt, rounds)
    }

    /// Hashes `secret` with a caller-supplied salt.
    pub fn with_salt(secret: &str, salt: [u8; SALT_LEN], rounds: u32) -> Self {
        let rounds = rounds.max(1);
        Self {
            salt,
            rounds,
            digest: stretch(secret.as_bytes(), &salt, rounds),
        }
    }

    /// Constant-time check of `secret` against this hash.
    pub fn verify(&self, secret: &str) -> bool {
        let candidate = stretch(secret.as_bytes(), &self.salt, self.rounds);
        candidate[..].ct_eq(&self.digest[..]).into()
    }

    /// Stretching rounds used for this hash.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}

fn stretch(secret: &[u8], salt: &[u8], rounds: u32) -> [u8; 32] {
    let mut digest = [0u8; 32];
    pbkdf2::pbkdf2_hmac::<Sha256>(secret, salt, rounds, &mut digest);
    digest
}
