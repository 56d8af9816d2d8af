//! Credential and session token primitives.
//!
//! - Password hashing (Argon2id, 72 byte input ceiling)
//! - Access tokens: short-lived HS256 JWTs naming a user as subject
//! - Refresh tokens: opaque 256-bit hex strings tracked by a [`RefreshTokenStore`]
//! - Bearer credential extraction from request headers
//!
//! Each service defines its own session semantics on top of these and
//! supplies the refresh token persistence.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new().unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::JwtHandler;
//! use uuid::Uuid;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = handler.issue(user_id).unwrap();
//! assert_eq!(handler.validate(&token).unwrap(), user_id);
//! ```
//!
//! ## Bearer Extraction
//! ```
//! use auth::extract_bearer_token;
//! use http::header::AUTHORIZATION;
//! use http::HeaderMap;
//! use http::HeaderValue;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
//! assert_eq!(extract_bearer_token(&headers).unwrap(), "abc");
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::extract_bearer_token;
pub use bearer::BearerError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::InMemoryRefreshTokenStore;
pub use refresh::RefreshToken;
pub use refresh::RefreshTokenError;
pub use refresh::RefreshTokenIssuer;
pub use refresh::RefreshTokenStore;
