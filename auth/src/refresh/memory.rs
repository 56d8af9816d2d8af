use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use super::errors::RefreshTokenError;
use super::models::RefreshToken;
use super::ports::RefreshTokenStore;

/// Process-local refresh token store.
///
/// Suitable for tests and single-process deployments; tokens do not survive a restart.
#[derive(Default)]
pub struct InMemoryRefreshTokenStore {
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned<T>(_: T) -> RefreshTokenError {
        RefreshTokenError::Store("refresh token store lock poisoned".to_string())
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn create(&self, token: &RefreshToken) -> Result<(), RefreshTokenError> {
        let mut tokens = self.tokens.write().map_err(Self::poisoned)?;
        if tokens.contains_key(&token.token) {
            return Err(RefreshTokenError::Store(
                "refresh token already exists".to_string(),
            ));
        }
        tokens.insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, RefreshTokenError> {
        let tokens = self.tokens.read().map_err(Self::poisoned)?;
        Ok(tokens.get(token).cloned())
    }

    async fn revoke(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<bool, RefreshTokenError> {
        let mut tokens = self.tokens.write().map_err(Self::poisoned)?;
        match tokens.get_mut(token) {
            Some(record) if record.revoked_at.is_none() => {
                record.revoked_at = Some(revoked_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
