use chrono::Duration;
use http::HeaderMap;
use uuid::Uuid;

use crate::bearer::extract_bearer_token;
use crate::bearer::BearerError;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::RefreshToken;
use crate::refresh::RefreshTokenError;
use crate::refresh::RefreshTokenIssuer;
use crate::refresh::RefreshTokenStore;

/// Authentication coordinator.
///
/// Owns the password hasher, the access token codec and the refresh token
/// issuer, and exposes the combined operations request handlers need.
/// The signing secret is fixed at construction and shared read-only.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    refresh_issuer: RefreshTokenIssuer,
    /// Verified against when no account matches, so a miss costs as much as a hit.
    decoy_hash: String,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Refresh token to be persisted by the caller
    pub refresh_token: RefreshToken,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential error: {0}")]
    Credential(#[from] BearerError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("Refresh token error: {0}")]
    RefreshToken(#[from] RefreshTokenError),
}

impl Authenticator {
    /// Create a new authenticator with default token lifetimes
    /// (1 hour access, 1440 hours refresh).
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    ///
    /// # Errors
    /// * `PasswordError` - The password hasher could not be built
    pub fn new(jwt_secret: &[u8]) -> Result<Self, PasswordError> {
        Self::with_lifetimes(jwt_secret, Duration::hours(1), Duration::hours(1440))
    }

    /// Create a new authenticator with explicit token lifetimes.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `access_token_lifetime` - Validity of issued access tokens
    /// * `refresh_token_lifetime` - Validity of issued refresh tokens
    ///
    /// # Errors
    /// * `PasswordError` - The password hasher could not be built
    pub fn with_lifetimes(
        jwt_secret: &[u8],
        access_token_lifetime: Duration,
        refresh_token_lifetime: Duration,
    ) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new()?;
        let decoy_hash = password_hasher.hash("no-such-account")?;

        Ok(Self {
            password_hasher,
            jwt_handler: JwtHandler::with_lifetime(jwt_secret, access_token_lifetime),
            refresh_issuer: RefreshTokenIssuer::with_lifetime(refresh_token_lifetime),
            decoy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Password too long or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint both tokens for `subject`.
    ///
    /// Nothing is issued unless the password matches. The refresh token is
    /// returned unpersisted.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - User the tokens are issued to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    /// * `JwtError` - Token generation failed
    /// * `RefreshToken` - Random source unavailable
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(subject)?;
        let refresh_token = self.refresh_issuer.issue(subject)?;

        Ok(AuthenticationResult {
            access_token,
            refresh_token,
        })
    }

    /// Reject a login attempt for which no account exists.
    ///
    /// Runs a full password verification against a decoy hash first, so the
    /// response time does not reveal whether the account exists.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        match self.password_hasher.verify(password, &self.decoy_hash) {
            Ok(_) => AuthenticationError::InvalidCredentials,
            Err(e) => AuthenticationError::PasswordError(e),
        }
    }

    /// Generate an access token without password verification.
    ///
    /// Used by the refresh flow once the refresh token has been checked.
    pub fn generate_token(&self, subject: Uuid) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject)
    }

    /// Validate an access token and return its subject.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.jwt_handler.validate(token)
    }

    /// Authenticate a request from its bearer access token.
    ///
    /// # Errors
    /// * `Credential` - Authorization header missing or malformed
    /// * `JwtError` - Token invalid, expired, or forged
    pub fn authenticate_request(&self, headers: &HeaderMap) -> Result<Uuid, AuthenticationError> {
        let token = extract_bearer_token(headers)?;
        Ok(self.jwt_handler.validate(token)?)
    }

    /// Check a refresh token and return the user it was issued to.
    pub async fn validate_refresh_token<S>(
        &self,
        token: &str,
        store: &S,
    ) -> Result<Uuid, RefreshTokenError>
    where
        S: RefreshTokenStore + ?Sized,
    {
        self.refresh_issuer.validate(token, store).await
    }

    /// Revoke a refresh token; idempotent.
    pub async fn revoke_refresh_token<S>(
        &self,
        token: &str,
        store: &S,
    ) -> Result<(), RefreshTokenError>
    where
        S: RefreshTokenStore + ?Sized,
    {
        self.refresh_issuer.revoke(token, store).await
    }
}
