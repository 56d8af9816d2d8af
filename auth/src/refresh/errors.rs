use thiserror::Error;

/// Error type for refresh token operations.
///
/// `NotFound`, `Revoked` and `Expired` are terminal rejections of the presented
/// token. The remaining variants are infrastructure failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token has been revoked")]
    Revoked,

    #[error("Refresh token has expired")]
    Expired,

    #[error("Secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    #[error("Refresh token lifetime overflows the clock")]
    LifetimeOverflow,

    #[error("Refresh token store error: {0}")]
    Store(String),
}

impl RefreshTokenError {
    /// True when the token itself was rejected rather than the operation failing.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::NotFound | Self::Revoked | Self::Expired)
    }
}
