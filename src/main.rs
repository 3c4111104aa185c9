use std::sync::Arc;

use anyhow::Context;
use marquee::actions::SignupAction;
use marquee::api::axum::{router, session_cors, AppState};
use marquee::crypto::{Argon2Hasher, PasswordHasher};
use marquee::jwt::JwtService;
use marquee::{Genre, InMemoryMovieRepository, InMemoryUserRepository, ServiceConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const GENRES: [&str; 12] = [
    "Comedy",
    "Drama",
    "Western",
    "Fantasy",
    "Thriller",
    "Sci-Fi",
    "Action",
    "Mystery",
    "Crime",
    "Romance",
    "Horror",
    "Animation",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load()?;

    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_env_filter(EnvFilter::try_new(&config.log)?)
        .init();

    // missing or weak secrets stop the process here, before anything binds
    let jwt = JwtService::new(config.jwt_config().context("invalid signing configuration")?);

    let users = Arc::new(InMemoryUserRepository::new());
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::default());
    let movies = Arc::new(InMemoryMovieRepository::with_genres(
        (1..).zip(GENRES).map(|(id, name)| Genre::new(id, name)),
    ));

    let state = AppState::new(users, jwt, hasher)
        .with_catalog(movies)
        .with_store_timeout(config.store_timeout())
        .with_recommendation_limit(config.recommended_movie_limit)
        .with_settings(config.session_settings());

    if let Some((email, password)) = config.bootstrap_admin() {
        let admin = SignupAction::new(state.store.clone(), state.hasher.clone())
            .ensure_admin(email, password)
            .await
            .context("failed to seed bootstrap admin")?;
        info!(user_id = %admin.user_id, "bootstrap admin ready");
    }

    let app = router(state).layer(session_cors(&config.origins()));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        enforce_session_currency = config.enforce_session_currency,
        "marquee v{VERSION} listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
