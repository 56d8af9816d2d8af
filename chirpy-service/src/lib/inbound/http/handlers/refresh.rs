use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh<US, SS>(
    State(state): State<AppState<US, SS>>,
    headers: HeaderMap,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError>
where
    US: UserServicePort,
    SS: SessionServicePort,
{
    state
        .session_service
        .refresh(&headers)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, RefreshResponseData { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
