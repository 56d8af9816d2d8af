use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn revoke<US, SS>(
    State(state): State<AppState<US, SS>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError>
where
    US: UserServicePort,
    SS: SessionServicePort,
{
    state
        .session_service
        .revoke(&headers)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
