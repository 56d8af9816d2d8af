use async_trait::async_trait;
use http::HeaderMap;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::domain::user::models::UserId;

/// Port for session operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify a password and open a session.
    ///
    /// A refresh token is persisted only after the password matches.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Session with access and refresh tokens
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown email or wrong password
    /// * `Internal` - Hashing, signing, randomness or storage failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Identify the caller from a bearer access token.
    ///
    /// # Errors
    /// * `MissingCredentials` - No Authorization header
    /// * `MalformedCredentials` - Header is not a bearer credential
    /// * `Unauthorized` - Token invalid, forged or expired
    async fn authenticate(&self, headers: &HeaderMap) -> Result<UserId, SessionError>;

    /// Mint a new access token from a bearer refresh token.
    ///
    /// The refresh token itself is neither extended nor rotated.
    ///
    /// # Errors
    /// * `MissingCredentials` - No Authorization header
    /// * `MalformedCredentials` - Header is not a bearer credential
    /// * `Unauthorized` - Refresh token unknown, revoked or expired
    /// * `Internal` - Storage or signing failed
    async fn refresh(&self, headers: &HeaderMap) -> Result<String, SessionError>;

    /// Revoke the bearer refresh token.
    ///
    /// Revoking an unknown or already revoked token succeeds.
    ///
    /// # Errors
    /// * `MissingCredentials` - No Authorization header
    /// * `MalformedCredentials` - Header is not a bearer credential
    /// * `Internal` - Storage failed
    async fn revoke(&self, headers: &HeaderMap) -> Result<(), SessionError>;
}
