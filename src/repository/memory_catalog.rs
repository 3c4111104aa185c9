//! In-memory movie catalog.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::AuthError;

use super::movie::{Genre, Movie, MovieRepository};

/// Movies keyed by `imdb_id` and genres keyed by `genre_id`, both kept in
/// key order.
#[derive(Clone, Default)]
pub struct InMemoryMovieRepository {
    movies: Arc<RwLock<BTreeMap<String, Movie>>>,
    genres: Arc<RwLock<BTreeMap<i32, Genre>>>,
}

fn poisoned<T>(_: T) -> AuthError {
    AuthError::StoreUnavailable("lock poisoned".to_owned())
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genres(genres: impl IntoIterator<Item = Genre>) -> Self {
        let genres = genres.into_iter().map(|g| (g.genre_id, g)).collect();
        Self {
            movies: Arc::default(),
            genres: Arc::new(RwLock::new(genres)),
        }
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn list_movies(&self) -> Result<Vec<Movie>, AuthError> {
        let movies = self.movies.read().map_err(poisoned)?;
        Ok(movies.values().cloned().collect())
    }

    async fn find_movie(&self, imdb_id: &str) -> Result<Option<Movie>, AuthError> {
        let movies = self.movies.read().map_err(poisoned)?;
        Ok(movies.get(imdb_id).cloned())
    }

    async fn create_movie(&self, movie: Movie) -> Result<Movie, AuthError> {
        let mut movies = self.movies.write().map_err(poisoned)?;

        if movies.contains_key(&movie.imdb_id) {
            return Err(AuthError::MovieAlreadyExists);
        }

        movies.insert(movie.imdb_id.clone(), movie.clone());
        Ok(movie)
    }

    async fn update_review(&self, imdb_id: &str, admin_review: &str) -> Result<Movie, AuthError> {
        let mut movies = self.movies.write().map_err(poisoned)?;
        let movie = movies.get_mut(imdb_id).ok_or(AuthError::StoreRecordNotFound)?;

        admin_review.clone_into(&mut movie.admin_review);
        Ok(movie.clone())
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, AuthError> {
        let genres = self.genres.read().map_err(poisoned)?;
        Ok(genres.values().cloned().collect())
    }

    async fn find_by_genres(
        &self,
        genre_names: &[String],
        limit: usize,
    ) -> Result<Vec<Movie>, AuthError> {
        let movies = self.movies.read().map_err(poisoned)?;

        let mut matching: Vec<Movie> = movies
            .values()
            .filter(|m| m.has_any_genre(genre_names))
            .cloned()
            .collect();
        drop(movies);

        // stable sort keeps imdb_id order among equal rankings
        matching.sort_by_key(|m| m.ranking.ranking_value);
        matching.truncate(limit);
        Ok(matching)
    }
}
