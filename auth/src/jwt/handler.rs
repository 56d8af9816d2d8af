use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::JwtError;

/// Issuer written into, and required from, every access token.
pub const TOKEN_ISSUER: &str = "chirpy";

/// Signs and verifies access tokens.
///
/// Tokens are HS256 JWTs naming a user as subject. Verification is a pure
/// function of the token, the shared secret and the current time.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key and the default one hour lifetime.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self::with_lifetime(secret, Duration::hours(1))
    }

    /// Create a new JWT handler with a custom token lifetime.
    pub fn with_lifetime(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime,
        }
    }

    /// Issue an access token for `subject`, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: Uuid) -> Result<String, JwtError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue an access token for `subject` as if issued at `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - User identifier to embed
    /// * `issued_at` - Issue instant; expiry is `issued_at + lifetime`
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or the expiry overflows
    pub fn issue_at(&self, subject: Uuid, issued_at: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::new(TOKEN_ISSUER, subject, issued_at, self.lifetime)?;
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    ///
    /// # Returns
    /// Subject user identifier
    ///
    /// # Errors
    /// * `Malformed` - Token is not a well formed JWT
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Wrong issuer, algorithm, or missing claim
    /// * `InvalidSubject` - `sub` is not a UUID
    pub fn validate(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.decode(token)?;

        Uuid::parse_str(&claims.sub).map_err(|e| JwtError::InvalidSubject(e.to_string()))
    }

    /// Decode and verify a token, returning its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::InvalidToken
                    | ErrorKind::Base64(_)
                    | ErrorKind::Json(_)
                    | ErrorKind::Utf8(_) => JwtError::Malformed(e.to_string()),
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_issue_and_validate() {
        let handler = JwtHandler::new(SECRET);
        let user_id = Uuid::new_v4();

        let token = handler.issue(user_id).expect("Failed to issue token");
        assert!(!token.is_empty());

        let subject = handler.validate(&token).expect("Failed to validate token");
        assert_eq!(subject, user_id);
    }

    #[test]
    fn test_issued_claims() {
        let handler = JwtHandler::new(SECRET);
        let user_id = Uuid::new_v4();

        let token = handler.issue(user_id).unwrap();
        let claims = handler.decode(&token).unwrap();

        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"superSecret_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"superDuperSecret_at_least_32_bytes_long!");

        let token = handler1.issue(Uuid::new_v4()).unwrap();

        assert_eq!(handler2.validate(&token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_validate_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let issued_at = Utc::now() - Duration::hours(2);

        let token = handler.issue_at(Uuid::new_v4(), issued_at).unwrap();

        assert_eq!(handler.validate(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_validate_malformed_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.validate("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));

        let result = handler.validate("");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_validate_rejects_non_uuid_subject() {
        let handler = JwtHandler::new(SECRET);
        let claims =
            Claims::new(TOKEN_ISSUER, "user123", Utc::now(), Duration::hours(1)).unwrap();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = handler.validate(&token);
        assert!(matches!(result, Err(JwtError::InvalidSubject(_))));
    }

    #[test]
    fn test_validate_rejects_foreign_issuer() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::new(
            "someone-else",
            Uuid::new_v4(),
            Utc::now(),
            Duration::hours(1),
        )
        .unwrap();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = handler.validate(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_rejects_token_without_expiration() {
        #[derive(Serialize)]
        struct NoExpiry {
            iss: &'static str,
            sub: String,
        }

        let handler = JwtHandler::new(SECRET);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExpiry {
                iss: TOKEN_ISSUER,
                sub: Uuid::new_v4().to_string(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = handler.validate(&token);
        assert!(matches!(
            result,
            Err(JwtError::Malformed(_)) | Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_custom_lifetime() {
        let handler = JwtHandler::with_lifetime(SECRET, Duration::minutes(5));
        let token = handler.issue(Uuid::new_v4()).unwrap();
        let claims = handler.decode(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }

    #[test]
    fn test_issue_with_overflowing_lifetime_fails() {
        let handler = JwtHandler::with_lifetime(SECRET, Duration::hours(1_000_000_000_000));

        let result = handler.issue(Uuid::new_v4());
        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));
    }
}
