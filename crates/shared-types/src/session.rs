//! # Stateless Sessions
//!
//! A [`Session`] is minted by the identity store after a successful login
//! and handed to the caller, who passes it explicitly into every store
//! operation. No server-side session table exists: the token is an
//! HMAC-SHA256 tag over the session contents, so any store holding the
//! [`SessionSigner`] can verify it.
//!
//! ## Security Properties
//!
//! - **HMAC-SHA256 Tags**: every principal field and the issue time are bound
//!   into the tag; editing any of them invalidates the session.
//! - **Time-Bounded Validity**: sessions older than the signer's TTL are
//!   rejected.
//! - **Constant-Time Check**: tags are compared with `Mac::verify_slice`.
//! - **Account Revocation**: clones of a signer share one revocation set.
//!   Disabling an account through the identity store rejects its live
//!   sessions in every store holding a clone.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use hmac::{Hmac, Mac};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::entities::{Principal, Timestamp, UserId};
use crate::errors::SessionError;

type HmacSha256 = Hmac<Sha256>;

/// Default session lifetime (8 hours).
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);

/// An authenticated client session.
///
/// Fields are read-only; the only way to obtain a valid session is
/// [`SessionSigner::issue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    principal: Principal,
    issued_at: Timestamp,
    session_id: Uuid,
    token: String,
}

impl Session {
    /// The authenticated principal. Only trust it after verification.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Issue timestamp (ms).
    pub fn issued_at(&self) -> Timestamp {
        self.issued_at
    }

    /// Unique id of this session.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Opaque bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Mints and verifies session tokens with a shared HMAC key.
#[derive(Clone)]
pub struct SessionSigner {
    key: Vec<u8>,
    ttl: Duration,
    /// Accounts whose sessions are refused. Shared by every clone.
    revoked: Arc<RwLock<HashSet<UserId>>>,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner")
            .field("key", &"<redacted>")
            .field("ttl", &self.ttl)
            .field("revoked", &self.revoked.read().len())
            .finish()
    }
}

impl SessionSigner {
    /// Creates a signer with the given key and session lifetime.
    pub fn new(key: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            ttl,
            revoked: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Refuses every session of `user_id`, including ones already issued.
    pub fn revoke(&self, user_id: UserId) {
        self.revoked.write().insert(user_id);
    }

    /// Accepts sessions of `user_id` again.
    pub fn reinstate(&self, user_id: UserId) {
        self.revoked.write().remove(&user_id);
    }

    pub fn is_revoked(&self, user_id: UserId) -> bool {
        self.revoked.read().contains(&user_id)
    }

    /// Session lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mints a new session for `principal` issued at `now`.
    pub fn issue(&self, principal: Principal, now: Timestamp) -> Session {
        let session_id = Uuid::new_v4();
        let tag = self.compute_tag(&principal, now, session_id);
        let token = format!("{}.{}", session_id.simple(), hex::encode(tag));

        Session {
            principal,
            issued_at: now,
            session_id,
            token,
        }
    }

    /// Verifies the session token and lifetime, returning the trusted principal.
    ///
    /// # Errors
    /// - `BadToken`: token malformed or does not match the session contents
    /// - `Revoked`: the account was disabled after the session was issued
    /// - `Expired`: session older than the TTL
    pub fn verify<'a>(
        &self,
        session: &'a Session,
        now: Timestamp,
    ) -> Result<&'a Principal, SessionError> {
        let (id_part, tag_part) = session
            .token
            .split_once('.')
            .ok_or(SessionError::BadToken)?;

        if id_part != session.session_id.simple().to_string() {
            return Err(SessionError::BadToken);
        }

        let tag = hex::decode(tag_part).map_err(|_| SessionError::BadToken)?;

        let mut mac = match HmacSha256::new_from_slice(&self.key) {
            Ok(m) => m,
            Err(_) => return Err(SessionError::BadToken),
        };
        Self::feed(
            &mut mac,
            &session.principal,
            session.issued_at,
            session.session_id,
        );
        mac.verify_slice(&tag).map_err(|_| SessionError::BadToken)?;

        if self.is_revoked(session.principal.user_id) {
            return Err(SessionError::Revoked {
                user_id: session.principal.user_id,
            });
        }

        let age_ms = now.saturating_sub(session.issued_at);
        if u128::from(age_ms) > self.ttl.as_millis() {
            return Err(SessionError::Expired {
                issued_at: session.issued_at,
                now,
            });
        }

        Ok(&session.principal)
    }

    fn compute_tag(&self, principal: &Principal, issued_at: Timestamp, session_id: Uuid) -> [u8; 32] {
        // HMAC accepts keys of any length; an unusable key yields a tag
        // that `verify` rejects anyway.
        let Ok(mut mac) = HmacSha256::new_from_slice(&self.key) else {
            return [0u8; 32];
        };
        Self::feed(&mut mac, principal, issued_at, session_id);
        mac.finalize().into_bytes().into()
    }

    /// Length-prefixed canonical encoding of the signed fields.
    fn feed(mac: &mut HmacSha256, principal: &Principal, issued_at: Timestamp, session_id: Uuid) {
        mac.update(session_id.as_bytes());
        mac.update(&principal.user_id.0.to_le_bytes());
        for field in [
            principal.handle.as_str(),
            principal.role.as_str(),
            principal.name.as_str(),
            principal.organization.as_str(),
        ] {
            mac.update(&(field.len() as u64).to_le_bytes());
            mac.update(field.as_bytes());
        }
        mac.update(&issued_at.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Role, UserId};

    fn principal() -> Principal {
        Principal {
            user_id: UserId(4),
            handle: "officer@giboard.gov.in".into(),
            role: Role::Officer,
            name: "GI Registration Officer".into(),
            organization: "Geographic Indications Registry".into(),
        }
    }

    fn signer() -> SessionSigner {
        SessionSigner::new(b"test_secret_key".to_vec(), Duration::from_secs(60))
    }

    #[test]
    fn test_issued_session_verifies() {
        let signer = signer();
        let session = signer.issue(principal(), 1_000);

        let verified = signer.verify(&session, 2_000).unwrap();
        assert_eq!(verified.handle, "officer@giboard.gov.in");
        assert_eq!(session.issued_at(), 1_000);
    }

    #[test]
    fn test_wrong_key_rejected() {
        let session = signer().issue(principal(), 1_000);
        let other = SessionSigner::new(b"wrong_secret_key".to_vec(), Duration::from_secs(60));

        assert_eq!(other.verify(&session, 1_000), Err(SessionError::BadToken));
    }

    #[test]
    fn test_tampered_role_rejected() {
        let signer = signer();
        let mut session = signer.issue(principal(), 1_000);
        session.principal.role = Role::Admin;

        assert_eq!(signer.verify(&session, 1_000), Err(SessionError::BadToken));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let signer = signer();
        let mut session = signer.issue(principal(), 1_000);
        session.token = "not-a-token".into();

        assert_eq!(signer.verify(&session, 1_000), Err(SessionError::BadToken));
    }

    #[test]
    fn test_expired_session_rejected() {
        let signer = signer();
        let session = signer.issue(principal(), 1_000);

        // Exactly at TTL is still valid
        assert!(signer.verify(&session, 61_000).is_ok());

        let err = signer.verify(&session, 61_001).unwrap_err();
        assert!(matches!(err, SessionError::Expired { issued_at: 1_000, .. }));
    }

    #[test]
    fn test_sessions_have_distinct_tokens() {
        let signer = signer();
        let a = signer.issue(principal(), 1_000);
        let b = signer.issue(principal(), 1_000);

        assert_ne!(a.token(), b.token());
        assert_ne!(a.session_id(), b.session_id());
    }

    #[test]
    fn test_revocation_shared_across_clones() {
        let signer = signer();
        let store_copy = signer.clone();
        let session = signer.issue(principal(), 1_000);

        signer.revoke(UserId(4));
        assert_eq!(
            store_copy.verify(&session, 1_000),
            Err(SessionError::Revoked { user_id: UserId(4) })
        );

        store_copy.reinstate(UserId(4));
        assert!(signer.verify(&session, 1_000).is_ok());
    }

    #[test]
    fn test_revocation_checked_after_tag() {
        let signer = signer();
        let mut session = signer.issue(principal(), 1_000);
        signer.revoke(UserId(4));
        session.principal.role = Role::Admin;

        assert_eq!(signer.verify(&session, 1_000), Err(SessionError::BadToken));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", signer());
        assert!(!rendered.contains("test_secret_key"));
    }
}
