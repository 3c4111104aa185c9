use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Ranking value given to movies nobody has reviewed yet.
pub const UNRANKED_VALUE: i32 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub genre_id: i32,
    pub genre_name: String,
}

impl Genre {
    pub fn new(genre_id: i32, genre_name: impl Into<String>) -> Self {
        Self {
            genre_id,
            genre_name: genre_name.into(),
        }
    }
}

/// Sentiment bucket of a movie. Lower values rank higher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub ranking_value: i32,
    pub ranking_name: String,
}

impl Ranking {
    pub fn unranked() -> Self {
        Self {
            ranking_value: UNRANKED_VALUE,
            ranking_name: "Not_Ranked".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub imdb_id: String,
    pub title: String,
    pub poster_path: String,
    pub youtube_id: String,
    pub genre: Vec<Genre>,
    #[serde(default)]
    pub admin_review: String,
    pub ranking: Ranking,
}

impl Movie {
    pub fn has_any_genre(&self, names: &[String]) -> bool {
        self.genre
            .iter()
            .any(|g| names.iter().any(|name| *name == g.genre_name))
    }
}

/// The external movie catalog store.
///
/// Movies are addressed by `imdb_id`. Like [`UserRepository`](super::UserRepository)
/// every write is a single-document operation.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<Movie>, AuthError>;
    async fn find_movie(&self, imdb_id: &str) -> Result<Option<Movie>, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::MovieAlreadyExists` if the `imdb_id` is taken.
    async fn create_movie(&self, movie: Movie) -> Result<Movie, AuthError>;

    /// Overwrites the admin review of a movie and returns the updated movie.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::StoreRecordNotFound` if no movie matched.
    async fn update_review(&self, imdb_id: &str, admin_review: &str) -> Result<Movie, AuthError>;

    async fn list_genres(&self) -> Result<Vec<Genre>, AuthError>;

    /// Up to `limit` movies tagged with any of `genre_names`, best ranked
    /// first.
    async fn find_by_genres(
        &self,
        genre_names: &[String],
        limit: usize,
    ) -> Result<Vec<Movie>, AuthError>;
}

#[cfg(test)]
impl Movie {
    pub fn mock(imdb_id: &str, title: &str, genres: &[&str], ranking_value: i32) -> Self {
        Movie {
            imdb_id: imdb_id.to_owned(),
            title: title.to_owned(),
            poster_path: format!("https://image.example/{imdb_id}.jpg"),
            youtube_id: "dQw4w9WgXcQ".to_owned(),
            genre: genres
                .iter()
                .enumerate()
                .map(|(i, name)| Genre::new(i32::try_from(i).unwrap_or(0) + 1, *name))
                .collect(),
            admin_review: String::new(),
            ranking: Ranking {
                ranking_value,
                ranking_name: format!("rank-{ranking_value}"),
            },
        }
    }
}
