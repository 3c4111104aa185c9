use std::sync::Arc;
use std::time::Duration;

use crate::AuthError;
use crate::repository::{Genre, InMemoryMovieRepository, Movie, MovieRepository};
use crate::session::{DEFAULT_STORE_TIMEOUT, bounded};

/// How many movies `/recommendedmovies` returns unless configured otherwise.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// Deadline-bounded access to the movie store.
#[derive(Clone)]
pub struct CatalogStore {
    movies: Arc<dyn MovieRepository>,
    timeout: Duration,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryMovieRepository::new()))
    }
}

impl CatalogStore {
    pub fn new(movies: Arc<dyn MovieRepository>) -> Self {
        Self {
            movies,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn timeout_after(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>, AuthError> {
        bounded(self.timeout, "list_movies", self.movies.list_movies()).await
    }

    pub async fn find_movie(&self, imdb_id: &str) -> Result<Option<Movie>, AuthError> {
        bounded(self.timeout, "find_movie", self.movies.find_movie(imdb_id)).await
    }

    pub async fn create_movie(&self, movie: Movie) -> Result<Movie, AuthError> {
        bounded(self.timeout, "create_movie", self.movies.create_movie(movie)).await
    }

    pub async fn update_review(&self, imdb_id: &str, admin_review: &str) -> Result<Movie, AuthError> {
        bounded(
            self.timeout,
            "update_review",
            self.movies.update_review(imdb_id, admin_review),
        )
        .await
    }

    pub async fn list_genres(&self) -> Result<Vec<Genre>, AuthError> {
        bounded(self.timeout, "list_genres", self.movies.list_genres()).await
    }

    pub async fn find_by_genres(
        &self,
        genre_names: &[String],
        limit: usize,
    ) -> Result<Vec<Movie>, AuthError> {
        bounded(
            self.timeout,
            "find_by_genres",
            self.movies.find_by_genres(genre_names, limit),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct StalledCatalog;

    #[async_trait]
    impl MovieRepository for StalledCatalog {
        async fn list_movies(&self) -> Result<Vec<Movie>, AuthError> {
            std::future::pending().await
        }
        async fn find_movie(&self, _: &str) -> Result<Option<Movie>, AuthError> {
            std::future::pending().await
        }
        async fn create_movie(&self, _: Movie) -> Result<Movie, AuthError> {
            std::future::pending().await
        }
        async fn update_review(&self, _: &str, _: &str) -> Result<Movie, AuthError> {
            std::future::pending().await
        }
        async fn list_genres(&self) -> Result<Vec<Genre>, AuthError> {
            std::future::pending().await
        }
        async fn find_by_genres(&self, _: &[String], _: usize) -> Result<Vec<Movie>, AuthError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_store() {
        let store = CatalogStore::default();
        store
            .create_movie(Movie::mock("tt1", "Heat", &["Crime"], 1))
            .await
            .unwrap();

        assert_eq!(store.list_movies().await.unwrap().len(), 1);
        assert_eq!(
            store.update_review("tt1", "Tense.").await.unwrap().admin_review,
            "Tense."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_elapsed() {
        let store = CatalogStore::new(Arc::new(StalledCatalog)).timeout_after(Duration::from_secs(5));
        assert_eq!(store.timeout(), Duration::from_secs(5));

        let err = store.list_movies().await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(ref msg) if msg.contains("list_movies")));
    }
}
