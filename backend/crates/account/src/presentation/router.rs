//! Account Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::{AccountConfig, AccountService};
use crate::domain::repository::AccountStore;
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::require_access_token;

/// Create the account router with PostgreSQL repository
pub fn account_router(repo: PgAccountRepository, config: AccountConfig) -> Router {
    account_router_generic(repo, config)
}

/// Create an account router for any repository implementation
pub fn account_router_generic<R: AccountStore>(repo: R, config: AccountConfig) -> Router {
    let state = AccountAppState {
        service: AccountService::new(Arc::new(repo), Arc::new(config)),
    };

    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_token::<R>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/refresh-token", post(handlers::refresh_token::<R>))
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryAccountRepository;
    use crate::presentation::dto::{CurrentUserResponse, GeneralResponse, LoginResponse};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    fn app() -> Router {
        account_router_generic(InMemoryAccountRepository::new(), AccountConfig::development())
    }

    async fn post_json<T: DeserializeOwned>(
        app: &Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, T) {
        let response = app
            .clone()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn register(app: &Router, email: &str) -> (StatusCode, GeneralResponse) {
        post_json(
            app,
            "/register",
            serde_json::json!({
                "fullName": "Ada Lovelace",
                "email": email,
                "password": "Tr0ub4dor&3x",
            }),
        )
        .await
    }

    async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, LoginResponse) {
        post_json(
            app,
            "/login",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    #[tokio::test]
    async fn test_register_outcomes() {
        let app = app();

        let (status, body) = register(&app, "ada@example.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, GeneralResponse::success("Account registered"));

        let (status, body) = register(&app, "alan@example.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.message, "Account created");

        let (status, body) = register(&app, "ada@example.com").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, GeneralResponse::failure("Email already in use"));
    }

    #[tokio::test]
    async fn test_register_missing_field_is_bad_request() {
        let app = app();

        let (status, body): (_, GeneralResponse) = post_json(
            &app,
            "/register",
            serde_json::json!({ "email": "ada@example.com" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.flag);
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let app = app();
        register(&app, "ada@example.com").await;

        let (status, body) = login(&app, "ada@example.com", "Tr0ub4dor&3x").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.flag);
        assert_eq!(body.message, "Login successfully");
        assert!(body.token.is_some());
        assert!(body.refresh_token.is_some());

        let (status, body): (_, GeneralResponse) = post_json(
            &app,
            "/login",
            serde_json::json!({ "email": "ada@example.com", "password": "nope-nope" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, "Password incorrect");

        let (status, body): (_, GeneralResponse) = post_json(
            &app,
            "/login",
            serde_json::json!({ "email": "ghost@example.com", "password": "Tr0ub4dor&3x" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Email not found");
    }

    #[tokio::test]
    async fn test_refresh_token_rotation() {
        let app = app();
        register(&app, "ada@example.com").await;
        let (_, session) = login(&app, "ada@example.com", "Tr0ub4dor&3x").await;
        let old = session.refresh_token.unwrap();

        let (status, body): (_, LoginResponse) = post_json(
            &app,
            "/refresh-token",
            serde_json::json!({ "token": old }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.message, "Token refreshed successfully");
        assert_ne!(body.refresh_token.as_deref(), Some(old.as_str()));

        let (status, body): (_, GeneralResponse) = post_json(
            &app,
            "/refresh-token",
            serde_json::json!({ "token": old }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Refresh token not found");
    }

    #[tokio::test]
    async fn test_me_requires_bearer_token() {
        let app = app();
        register(&app, "ada@example.com").await;
        let (_, session) = login(&app, "ada@example.com", "Tr0ub4dor&3x").await;

        let response = app
            .clone()
            .oneshot(Request::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(
                Request::get("/me")
                    .header(header::AUTHORIZATION, "Bearer not-a-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(
                Request::get("/me")
                    .header(
                        header::AUTHORIZATION,
                        format!("Bearer {}", session.token.unwrap()),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let me: CurrentUserResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(me.email, "ada@example.com");
        assert_eq!(me.role, "Admin");
    }

    #[tokio::test]
    async fn test_null_body_is_model_is_null() {
        let app = app();

        for uri in ["/register", "/login", "/refresh-token"] {
            let (status, body): (_, GeneralResponse) =
                post_json(&app, uri, serde_json::Value::Null).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, GeneralResponse::failure("Model is null"));
        }
    }

    #[tokio::test]
    async fn test_lax_registration_over_http() {
        let app = app();

        let (status, body): (_, GeneralResponse) = post_json(
            &app,
            "/register",
            serde_json::json!({
                "fullName": "Ada",
                "email": "ada@localhost",
                "password": "secret1",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.flag);

        let (status, body) = login(&app, "ada@localhost", "secret1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.token.is_some());
    }
}
