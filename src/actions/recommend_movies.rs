use crate::catalog::{CatalogStore, DEFAULT_RECOMMENDATION_LIMIT};
use crate::repository::Movie;
use crate::session::SessionStore;
use crate::{AuthError, UserRepository};

/// Best-ranked movies in the caller's favourite genres.
///
/// Favourites are read from the user record, never from the token.
pub struct RecommendMoviesAction<U: UserRepository> {
    store: SessionStore<U>,
    catalog: CatalogStore,
    limit: usize,
}

impl<U: UserRepository> RecommendMoviesAction<U> {
    pub fn new(store: SessionStore<U>, catalog: CatalogStore) -> Self {
        RecommendMoviesAction {
            store,
            catalog,
            limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// # Errors
    ///
    /// Returns `Unauthorized` if the identity no longer exists.
    #[tracing::instrument(name = "recommend_movies", skip_all, err)]
    pub async fn execute(&self, subject_id: &str) -> Result<Vec<Movie>, AuthError> {
        let user = self
            .store
            .find_by_id(subject_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if user.favourite_genres.is_empty() {
            return Ok(Vec::new());
        }

        self.catalog
            .find_by_genres(&user.favourite_genres, self.limit)
            .await
    }
}
