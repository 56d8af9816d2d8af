use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::get_current_user::get_current_user;
use super::handlers::health::healthz;
use super::handlers::login::login;
use super::handlers::refresh::refresh;
use super::handlers::revoke::revoke;
use super::middleware::authenticate as auth_middleware;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;

/// Shared handler state.
///
/// Generic over the service ports so the router can be driven by any
/// repository wiring.
pub struct AppState<US, SS>
where
    US: UserServicePort,
    SS: SessionServicePort,
{
    pub user_service: Arc<US>,
    pub session_service: Arc<SS>,
}

impl<US, SS> Clone for AppState<US, SS>
where
    US: UserServicePort,
    SS: SessionServicePort,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            session_service: Arc::clone(&self.session_service),
        }
    }
}

pub fn create_router<US, SS>(user_service: Arc<US>, session_service: Arc<SS>) -> Router
where
    US: UserServicePort,
    SS: SessionServicePort,
{
    let state = AppState {
        user_service,
        session_service,
    };

    let public_routes = Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/users", post(create_user::<US, SS>))
        .route("/api/login", post(login::<US, SS>))
        .route("/api/refresh", post(refresh::<US, SS>))
        .route("/api/revoke", post(revoke::<US, SS>));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_current_user::<US, SS>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<US, SS>,
        ));

    // Headers are left out of the span: they carry bearer credentials.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::Authenticator;
    use auth::InMemoryRefreshTokenStore;
    use axum::http::header::AUTHORIZATION;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::session::service::SessionService;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::domain::user::ports::UserRepository;
    use crate::domain::user::service::UserService;

    struct EmptyUserRepository;

    #[async_trait::async_trait]
    impl UserRepository for EmptyUserRepository {
        async fn create(&self, user: User) -> Result<User, UserError> {
            Ok(user)
        }

        async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserError> {
            Ok(None)
        }

        async fn find_by_email(&self, _email: &EmailAddress) -> Result<Option<User>, UserError> {
            Ok(None)
        }
    }

    fn router() -> Router {
        let users = Arc::new(EmptyUserRepository);
        let authenticator =
            Arc::new(Authenticator::new(b"router-test-secret-at-least-32-bytes!").unwrap());
        let session_service = SessionService::new(
            Arc::clone(&users),
            Arc::new(InMemoryRefreshTokenStore::new()),
            Arc::clone(&authenticator),
        );

        create_router(
            Arc::new(UserService::new(users, authenticator)),
            Arc::new(session_service),
        )
    }

    fn request(method: &str, uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = router()
            .oneshot(request("GET", "/api/healthz", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_route_without_header() {
        let response = router()
            .oneshot(request("GET", "/api/users/me", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_protected_route_with_garbage_token() {
        let response = router()
            .oneshot(request("GET", "/api/users/me", Some("Bearer garbage")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_with_malformed_header() {
        let response = router()
            .oneshot(request("POST", "/api/refresh", Some("garbage")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_revoke_unknown_token() {
        let response = router()
            .oneshot(request("POST", "/api/revoke", Some("Bearer unknown")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
