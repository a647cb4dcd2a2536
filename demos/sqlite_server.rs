#![allow(
    clippy::print_stdout,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::str_to_string
)]

//! Dashboard backend demo: authentication + task queue over SQLite.
//!
//! Run with: `cargo run --example sqlite_server`
//!
//! Environment variables:
//!   AUTH_SECRET    hashing secret, at least 32 bytes (demo default)
//!   DATABASE_URL   defaults to sqlite:anteroom.db?mode=rwc
//!   GATEWAY_URL    defaults to http://localhost:18789
//!   GATEWAY_TOKEN  bearer secret for the agent gateway
//!   API_TOKEN      pre-shared secret for machine dashboard calls
//!
//! Try it:
//!   curl -X POST http://localhost:8080/api/auth/sign-up/email \
//!     -H "Content-Type: application/json" \
//!     -d '{"name": "Ann", "email": "ann@x.com", "password": "pw123"}' \
//!     -c cookies.txt
//!
//!   curl http://localhost:8080/api/auth/get-session -b cookies.txt

use anteroom::api::axum::tasks::{dashboard_routes, DashboardState};
use anteroom::api::axum::{auth_routes, AppError, AppState, SessionUser};
use anteroom::gateway::{GatewayClient, GatewayConfig};
use anteroom::sqlite::{
    create_repositories, migrations, SqliteCredentialRepository, SqliteSessionRepository,
    SqliteTaskRepository, SqliteUserRepository,
};
use anteroom::{AuthConfig, SecretString};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::net::TcpListener;

/// A protected page route: unauthenticated visitors are redirected to
/// the login page instead of getting the API's 401.
async fn dashboard_page(
    user: Result<SessionUser<SqliteUserRepository, SqliteSessionRepository>, AppError>,
) -> Response {
    match user {
        Ok(user) => format!("Signed in as {}", user.user().email).into_response(),
        Err(_) => Redirect::to("/login").into_response(),
    }
}

async fn login_page() -> &'static str {
    "POST /api/auth/sign-in/email to sign in"
}

#[tokio::main]
async fn main() {
    let secret = std::env::var("AUTH_SECRET")
        .unwrap_or_else(|_| "demo-secret-do-not-use-in-production!!".to_string());
    // File-backed by default: every connection in the pool must see
    // the same database.
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:anteroom.db?mode=rwc".to_string());
    let gateway_url =
        std::env::var("GATEWAY_URL").unwrap_or_else(|_| "http://localhost:18789".to_string());
    let gateway_token = std::env::var("GATEWAY_TOKEN").unwrap_or_default();

    let mut config = AuthConfig::new(SecretString::new(secret));
    config.api_token = std::env::var("API_TOKEN").ok().map(SecretString::new);
    config.validate().expect("invalid AUTH_SECRET");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to create pool");

    migrations::run(&pool).await.expect("Failed to run migrations");

    let (user_repo, credential_repo, session_repo, task_repo) = create_repositories(pool);

    let gateway = GatewayClient::new(GatewayConfig {
        base_url: gateway_url.clone(),
        token: SecretString::new(gateway_token),
    });

    let auth_state = AppState {
        user_repo: user_repo.clone(),
        credential_repo,
        session_repo: session_repo.clone(),
        config: config.clone(),
    };

    let dashboard_state = DashboardState {
        user_repo,
        session_repo,
        task_repo,
        config,
        gateway,
    };

    let app = Router::new()
        .nest(
            "/api/auth",
            auth_routes::<
                SqliteUserRepository,
                SqliteCredentialRepository,
                SqliteSessionRepository,
            >(),
        )
        .route("/dashboard", get(dashboard_page))
        .route("/login", get(login_page))
        .with_state(auth_state)
        .merge(
            Router::new()
                .nest(
                    "/api",
                    dashboard_routes::<
                        SqliteUserRepository,
                        SqliteSessionRepository,
                        SqliteTaskRepository,
                    >(),
                )
                .with_state(dashboard_state),
        );

    println!("Starting dashboard backend on http://localhost:8080");
    println!("Database: {database_url}");
    println!("Gateway:  {gateway_url}");
    println!("Endpoints:");
    println!("  POST /api/auth/sign-up/email  - Register (sets session cookie)");
    println!("  POST /api/auth/sign-in/email  - Sign in (sets session cookie)");
    println!("  GET  /api/auth/get-session    - Resolve the cookie session");
    println!("  POST /api/auth/sign-out       - Sign out (clears cookie)");
    println!("  GET  /dashboard               - Protected page (redirects to /login)");
    println!("  GET  /api/tasks               - Task queue (cookie or bearer auth)");
    println!("  GET  /api/metrics/status      - Gateway liveness + task counts");

    let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
