//! Driving Ports (API - Inbound)

use crate::domain::{IdentityResult, NewUser, UserStatus, UserView};
use shared_types::{Principal, Session, UserId};

/// Primary identity API.
///
/// Every operation except `authenticate` takes the caller's session
/// explicitly. There is no ambient "current user".
pub trait IdentityApi: Send + Sync {
    /// Checks a handle/secret pair and mints a session.
    ///
    /// # Errors
    /// - `InvalidCredentials`: unknown handle or wrong secret
    /// - `AccountDisabled`: credentials matched a disabled account
    fn authenticate(&self, handle: &str, secret: &str) -> IdentityResult<Session>;

    /// Creates an account. Admin only.
    ///
    /// # Errors
    /// - `PermissionDenied`: caller is not an admin
    /// - `InvalidRole`: role outside {admin, association, officer}
    /// - `DuplicateHandle`: handle already registered
    fn create_user(&self, session: &Session, fields: NewUser) -> IdentityResult<UserId>;

    /// Enables or disables an account. Admin only.
    ///
    /// # Errors
    /// - `NotFound`: no account with this id
    /// - `PermissionDenied`: caller is not an admin
    fn set_status(
        &self,
        session: &Session,
        user_id: UserId,
        status: UserStatus,
    ) -> IdentityResult<()>;

    /// All accounts in creation order. Admin only.
    fn list_users(&self, session: &Session) -> IdentityResult<Vec<UserView>>;

    /// Verifies the session and that its account is still active.
    fn verify_session(&self, session: &Session) -> IdentityResult<Principal>;
}
