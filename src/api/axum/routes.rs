use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware;
use axum::routing::{get, patch, post, put};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::middleware::require_session;
use crate::catalog::{CatalogStore, DEFAULT_RECOMMENDATION_LIMIT};
use crate::crypto::PasswordHasher;
use crate::{MovieRepository, UserRepository};
use crate::jwt::JwtService;
use crate::session::SessionStore;

/// Per-deployment policy switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionSettings {
    /// Require presented tokens to match the stored live pair on every
    /// protected request and on refresh.
    pub enforce_session_currency: bool,
}

pub struct AppState<U: UserRepository> {
    pub store: SessionStore<U>,
    pub jwt: Arc<JwtService>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub settings: SessionSettings,
    pub catalog: CatalogStore,
    pub recommendation_limit: usize,
}

impl<U: UserRepository> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            jwt: Arc::clone(&self.jwt),
            hasher: Arc::clone(&self.hasher),
            settings: self.settings,
            catalog: self.catalog.clone(),
            recommendation_limit: self.recommendation_limit,
        }
    }
}

impl<U: UserRepository> AppState<U> {
    pub fn new(users: Arc<U>, jwt: JwtService, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            store: SessionStore::new(users),
            jwt: Arc::new(jwt),
            hasher,
            settings: SessionSettings::default(),
            catalog: CatalogStore::default(),
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }

    /// Applies to both the user store and the catalog.
    #[must_use]
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store = self.store.timeout_after(timeout);
        self.catalog = self.catalog.timeout_after(timeout);
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, movies: Arc<dyn MovieRepository>) -> Self {
        self.catalog = CatalogStore::new(movies).timeout_after(self.catalog.timeout());
        self
    }

    #[must_use]
    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommendation_limit = limit;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// The full service with state applied and request tracing enabled.
pub fn router<U>(state: AppState<U>) -> Router
where
    U: UserRepository + 'static,
{
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn public_routes<U>() -> Router<AppState<U>>
where
    U: UserRepository + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<U>))
        .route("/login", post(handlers::login::<U>))
        .route("/logout", post(handlers::logout::<U>))
        .route("/refresh", post(handlers::refresh::<U>))
        .route("/movies", get(handlers::list_movies::<U>))
        .route("/genres", get(handlers::list_genres::<U>))
}

/// Routes behind the access-cookie gate.
pub fn protected_routes<U>(state: AppState<U>) -> Router<AppState<U>>
where
    U: UserRepository + 'static,
{
    Router::new()
        .route("/me", get(handlers::me::<U>))
        .route("/admin/users/{user_id}/role", put(handlers::update_role::<U>))
        .route("/movie/{imdb_id}", get(handlers::get_movie::<U>))
        .route("/add-movie", post(handlers::add_movie::<U>))
        .route("/recommendedmovies", get(handlers::recommended_movies::<U>))
        .route("/updatereview/{imdb_id}", patch(handlers::update_review::<U>))
        .route_layer(middleware::from_fn_with_state(state, require_session::<U>))
}
