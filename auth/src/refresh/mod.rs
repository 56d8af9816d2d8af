pub mod errors;
pub mod issuer;
pub mod memory;
pub mod models;
pub mod ports;

pub use errors::RefreshTokenError;
pub use issuer::RefreshTokenIssuer;
pub use memory::InMemoryRefreshTokenStore;
pub use models::RefreshToken;
pub use ports::RefreshTokenStore;
