use auth::AuthenticationError;
use auth::BearerError;
use auth::JwtError;
use auth::PasswordError;
use auth::RefreshTokenError;
use thiserror::Error;

/// Error for session operations.
///
/// Every rejected credential collapses into `Unauthorized` so callers cannot
/// tell an expired token from a forged or revoked one. `Internal` is kept
/// apart so infrastructure failures are never reported as bad credentials.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Missing Authorization header")]
    MissingCredentials,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<BearerError> for SessionError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::MissingHeader => SessionError::MissingCredentials,
            BearerError::MalformedHeader => SessionError::MalformedCredentials,
        }
    }
}

impl From<JwtError> for SessionError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingFailed(msg) => SessionError::Internal(msg),
            _ => {
                tracing::warn!(error = %err, "Access token rejected");
                SessionError::Unauthorized
            }
        }
    }
}

impl From<RefreshTokenError> for SessionError {
    fn from(err: RefreshTokenError) -> Self {
        if err.is_rejection() {
            tracing::warn!(error = %err, "Refresh token rejected");
            SessionError::Unauthorized
        } else {
            SessionError::Internal(err.to_string())
        }
    }
}

impl From<PasswordError> for SessionError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::InputTooLong { .. } => SessionError::Unauthorized,
            _ => SessionError::Internal(err.to_string()),
        }
    }
}

impl From<AuthenticationError> for SessionError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => SessionError::Unauthorized,
            AuthenticationError::Credential(e) => e.into(),
            AuthenticationError::PasswordError(e) => e.into(),
            AuthenticationError::JwtError(e) => e.into(),
            AuthenticationError::RefreshToken(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rejections_are_indistinguishable() {
        let errors: Vec<SessionError> = vec![
            JwtError::TokenExpired.into(),
            JwtError::InvalidSignature.into(),
            JwtError::Malformed("bad".to_string()).into(),
            JwtError::InvalidSubject("bad".to_string()).into(),
            RefreshTokenError::NotFound.into(),
            RefreshTokenError::Revoked.into(),
            RefreshTokenError::Expired.into(),
            AuthenticationError::InvalidCredentials.into(),
        ];

        for err in errors {
            assert_eq!(err, SessionError::Unauthorized);
        }
    }

    #[test]
    fn test_infrastructure_errors_stay_internal() {
        let errors: Vec<SessionError> = vec![
            JwtError::EncodingFailed("boom".to_string()).into(),
            RefreshTokenError::Store("down".to_string()).into(),
            RefreshTokenError::RandomSourceUnavailable("empty".to_string()).into(),
            PasswordError::VerificationFailed("corrupt".to_string()).into(),
        ];

        for err in errors {
            assert!(matches!(err, SessionError::Internal(_)));
        }
    }

    #[test]
    fn test_header_errors_map_to_input_errors() {
        assert_eq!(
            SessionError::from(BearerError::MissingHeader),
            SessionError::MissingCredentials
        );
        assert_eq!(
            SessionError::from(BearerError::MalformedHeader),
            SessionError::MalformedCredentials
        );
    }
}
