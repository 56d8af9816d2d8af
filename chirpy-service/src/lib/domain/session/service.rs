use std::sync::Arc;

use async_trait::async_trait;
use auth::extract_bearer_token;
use auth::Authenticator;
use auth::RefreshTokenStore;
use http::HeaderMap;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for session operations.
///
/// Composes bearer extraction, access tokens and refresh tokens on top of
/// the user and refresh token repositories.
pub struct SessionService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenStore,
{
    user_repository: Arc<UR>,
    refresh_tokens: Arc<RS>,
    authenticator: Arc<Authenticator>,
}

impl<UR, RS> SessionService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenStore,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_repository` - User persistence implementation
    /// * `refresh_tokens` - Refresh token persistence implementation
    /// * `authenticator` - Token and password primitives sharing the signing secret
    pub fn new(
        user_repository: Arc<UR>,
        refresh_tokens: Arc<RS>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            user_repository,
            refresh_tokens,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, RS> SessionServicePort for SessionService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenStore,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let Some(user) = self
            .user_repository
            .find_by_email(&command.email)
            .await
            .map_err(|e| SessionError::Internal(e.to_string()))?
        else {
            tracing::debug!("Login attempted for unknown email");
            return Err(self
                .authenticator
                .reject_unknown_account(&command.password)
                .into());
        };

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id.0)
            .map_err(|e| {
                tracing::debug!(user_id = %user.id, error = %e, "Login rejected");
                SessionError::from(e)
            })?;

        self.refresh_tokens.create(&result.refresh_token).await?;

        tracing::info!(user_id = %user.id, "Session opened");

        Ok(Session {
            user,
            access_token: result.access_token,
            refresh_token: result.refresh_token.token,
        })
    }

    async fn authenticate(&self, headers: &HeaderMap) -> Result<UserId, SessionError> {
        self.authenticator
            .authenticate_request(headers)
            .map(UserId)
            .map_err(SessionError::from)
    }

    async fn refresh(&self, headers: &HeaderMap) -> Result<String, SessionError> {
        let token = extract_bearer_token(headers)?;

        let user_id = self
            .authenticator
            .validate_refresh_token(token, self.refresh_tokens.as_ref())
            .await?;

        Ok(self.authenticator.generate_token(user_id)?)
    }

    async fn revoke(&self, headers: &HeaderMap) -> Result<(), SessionError> {
        let token = extract_bearer_token(headers)?;

        self.authenticator
            .revoke_refresh_token(token, self.refresh_tokens.as_ref())
            .await?;

        Ok(())
    }
}
