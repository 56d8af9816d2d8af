use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the bearer access token and adds the caller to request extensions
pub async fn authenticate<US, SS>(
    State(state): State<AppState<US, SS>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    US: UserServicePort,
    SS: SessionServicePort,
{
    let user_id = state
        .session_service
        .authenticate(req.headers())
        .await
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}
