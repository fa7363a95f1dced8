use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};
use std::sync::Arc;

use webauthn_enroll::{
    Authenticator, CacheSessionStore, RegistrationChallengeService, RegistrationConfig,
    SessionStore, User, UserDirectory, cache_store_from_env, create_logged_in_session,
    user_directory_from_env,
};
use webauthn_enroll_axum::{ENROLL_ROUTE_PREFIX, webauthn_enroll_router};

mod server;

use server::init_tracing;

/// Stand-in for a real login: marks a fresh session as logged in as `username`.
async fn demo_login(
    State(sessions): State<Arc<dyn SessionStore>>,
    Path(username): Path<String>,
) -> Result<(HeaderMap, Json<Value>), (StatusCode, String)> {
    let (_session_id, headers) = create_logged_in_session(sessions.as_ref(), &username)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((headers, Json(json!({"status": "ok", "username": username}))))
}

async fn seed_demo_user(users: &dyn UserDirectory) -> Result<(), Box<dyn std::error::Error>> {
    let user = User::new("demo-user-0001", "demo")
        .with_authenticators(vec![Authenticator::public_key("demo-registered-credential")]);
    users.upsert_user(user).await?;
    tracing::info!("Seeded user 'demo' with one registered credential");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    let config = RegistrationConfig::from_env()?;

    let cache = cache_store_from_env().await?;
    let sessions: Arc<dyn SessionStore> = Arc::new(CacheSessionStore::new(cache));

    let users: Arc<dyn UserDirectory> = Arc::from(user_directory_from_env().await?);
    seed_demo_user(users.as_ref()).await?;

    let service = Arc::new(RegistrationChallengeService::new(
        config,
        sessions.clone(),
        users,
    ));

    let app = Router::new()
        .route("/demo/login/{username}", post(demo_login))
        .with_state(sessions)
        .nest(ENROLL_ROUTE_PREFIX.as_str(), webauthn_enroll_router(service));

    let addr = std::env::var("DEMO_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
