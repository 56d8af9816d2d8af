use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use super::errors::RefreshTokenError;
use super::models::RefreshToken;
use super::ports::RefreshTokenStore;

/// Issues opaque refresh tokens and checks them against a store.
pub struct RefreshTokenIssuer {
    lifetime: Duration,
}

impl RefreshTokenIssuer {
    /// Random bytes per token; hex encoding doubles the length.
    pub const TOKEN_BYTES: usize = 32;

    /// Create an issuer with the default 60 day (1440 hour) lifetime.
    pub fn new() -> Self {
        Self::with_lifetime(Duration::hours(1440))
    }

    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self { lifetime }
    }

    /// Draw a fresh token value from the OS random source.
    ///
    /// # Returns
    /// 64 character lowercase hex string
    ///
    /// # Errors
    /// * `RandomSourceUnavailable` - The OS random source failed
    pub fn generate(&self) -> Result<String, RefreshTokenError> {
        let mut bytes = [0u8; Self::TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| RefreshTokenError::RandomSourceUnavailable(e.to_string()))?;

        Ok(hex::encode(bytes))
    }

    /// Build a new, unpersisted token record for `user_id`.
    ///
    /// # Errors
    /// * `RandomSourceUnavailable` - The OS random source failed
    /// * `LifetimeOverflow` - Expiry falls outside the representable time range
    pub fn issue(&self, user_id: Uuid) -> Result<RefreshToken, RefreshTokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .ok_or(RefreshTokenError::LifetimeOverflow)?;

        Ok(RefreshToken {
            token: self.generate()?,
            user_id,
            created_at: now,
            expires_at,
            revoked_at: None,
        })
    }

    /// Check a presented token and return the user it belongs to.
    ///
    /// # Arguments
    /// * `token` - Opaque token value as presented by the client
    /// * `store` - Token persistence
    ///
    /// # Errors
    /// * `NotFound` - Token is unknown
    /// * `Revoked` - Token has a revocation timestamp
    /// * `Expired` - Token reached its expiry
    /// * `Store` - Lookup failed
    pub async fn validate<S>(&self, token: &str, store: &S) -> Result<Uuid, RefreshTokenError>
    where
        S: RefreshTokenStore + ?Sized,
    {
        let record = store
            .find_by_token(token)
            .await?
            .ok_or(RefreshTokenError::NotFound)?;

        if record.is_revoked() {
            return Err(RefreshTokenError::Revoked);
        }

        if record.is_expired(Utc::now()) {
            return Err(RefreshTokenError::Expired);
        }

        Ok(record.user_id)
    }

    /// Revoke a token.
    ///
    /// Unknown and already revoked tokens are not an error: either way the
    /// token can no longer be used.
    ///
    /// # Errors
    /// * `Store` - Revocation write failed
    pub async fn revoke<S>(&self, token: &str, store: &S) -> Result<(), RefreshTokenError>
    where
        S: RefreshTokenStore + ?Sized,
    {
        let revoked = store.revoke(token, Utc::now()).await?;
        if !revoked {
            tracing::debug!("Refresh token was unknown or already revoked");
        }

        Ok(())
    }
}

impl Default for RefreshTokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}
