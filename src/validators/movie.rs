use std::sync::LazyLock;

use regex::Regex;

use super::ValidationError;
use crate::repository::Movie;

#[allow(clippy::expect_used)]
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url regex is valid"));

const TITLE_LENGTH: std::ops::RangeInclusive<usize> = 2..=500;
const GENRE_NAME_LENGTH: std::ops::RangeInclusive<usize> = 2..=100;

/// Checks a movie submitted to the catalog. `admin_review` is free text and
/// not checked.
pub fn validate_movie(movie: &Movie) -> Result<(), ValidationError> {
    if movie.imdb_id.trim().is_empty() {
        return Err(ValidationError::FieldRequired("imdb_id"));
    }

    if !TITLE_LENGTH.contains(&movie.title.trim().chars().count()) {
        return Err(ValidationError::TitleLength);
    }

    if !URL_REGEX.is_match(&movie.poster_path) {
        return Err(ValidationError::PosterPathInvalid);
    }

    if movie.youtube_id.trim().is_empty() {
        return Err(ValidationError::FieldRequired("youtube_id"));
    }

    if movie.genre.is_empty() {
        return Err(ValidationError::GenresEmpty);
    }

    for genre in &movie.genre {
        if genre.genre_id == 0 {
            return Err(ValidationError::FieldRequired("genre_id"));
        }
        if !GENRE_NAME_LENGTH.contains(&genre.genre_name.trim().chars().count()) {
            return Err(ValidationError::GenreNameLength);
        }
    }

    if movie.ranking.ranking_value == 0 {
        return Err(ValidationError::FieldRequired("ranking_value"));
    }
    if movie.ranking.ranking_name.trim().is_empty() {
        return Err(ValidationError::FieldRequired("ranking_name"));
    }

    Ok(())
}
