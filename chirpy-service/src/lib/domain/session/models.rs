use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;

/// Command to open a session from an email and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Tokens handed to a client after a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    /// Signed, short-lived access token
    pub access_token: String,
    /// Opaque refresh token, already persisted
    pub refresh_token: String,
}
