use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use super::errors::RefreshTokenError;
use super::models::RefreshToken;

/// Persistence for refresh tokens.
///
/// Uniqueness of the token string and atomicity of the revoke write belong to
/// the implementation.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + 'static {
    /// Persist a newly issued token.
    ///
    /// # Errors
    /// * `Store` - Storage operation failed
    async fn create(&self, token: &RefreshToken) -> Result<(), RefreshTokenError>;

    /// Retrieve a token by its opaque value.
    ///
    /// # Returns
    /// Optional token record (None if unknown)
    ///
    /// # Errors
    /// * `Store` - Storage operation failed
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, RefreshTokenError>;

    /// Mark a token revoked at `revoked_at`.
    ///
    /// # Returns
    /// True if a live token was revoked, false if it was unknown or already revoked
    ///
    /// # Errors
    /// * `Store` - Storage operation failed
    async fn revoke(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<bool, RefreshTokenError>;
}
