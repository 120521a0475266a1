//! Client sign-out against a live account service.

use std::sync::Arc;

use account::application::{RegisterInput, SignInInput};
use account::{AccountConfig, AccountService, InMemoryAccountRepository};
use session::{AuthenticationState, MemorySessionStore, SessionProvider, UserSession};

async fn signed_in() -> (
    AccountService<InMemoryAccountRepository>,
    SessionProvider<MemorySessionStore>,
    UserSession,
) {
    let service = AccountService::new(
        Arc::new(InMemoryAccountRepository::new()),
        Arc::new(AccountConfig::development()),
    );

    service
        .register(RegisterInput {
            full_name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            password: "Tr0ub4dor&3x".into(),
        })
        .await
        .unwrap();

    let pair = service
        .sign_in(SignInInput {
            email: "grace@example.com".into(),
            password: "Tr0ub4dor&3x".into(),
        })
        .await
        .unwrap();

    let session = UserSession::new(pair.access_token, pair.refresh_token);
    let provider = SessionProvider::new(MemorySessionStore::new());
    provider
        .update_authentication_state(session.clone())
        .await
        .unwrap();

    (service, provider, session)
}

#[tokio::test]
async fn issued_token_rebuilds_identity() {
    let (_service, provider, _session) = signed_in().await;

    let state = provider.authentication_state().await;
    let claims = state.claims().unwrap();
    assert_eq!(claims.id, "1");
    assert_eq!(claims.name, "Grace Hopper");
    assert_eq!(claims.email, "grace@example.com");
    assert_eq!(claims.role, "Admin");
}

/// Sign-out is local only: the server still honors the refresh token
/// until a later sign-in or refresh replaces it.
#[tokio::test]
async fn sign_out_leaves_server_refresh_token_valid() {
    let (service, provider, session) = signed_in().await;

    provider.sign_out().await.unwrap();
    assert_eq!(
        provider.authentication_state().await,
        AuthenticationState::Anonymous
    );

    let refresh_token = session.refresh_token.unwrap();
    let rotated = service.refresh_token(&refresh_token).await;
    assert!(rotated.is_ok());
}
