use crate::AuthError;
use crate::catalog::CatalogStore;
use crate::repository::Movie;
use crate::validators::validate_movie;

/// Adds a movie to the catalog. Any signed-in identity may do this.
pub struct AddMovieAction {
    catalog: CatalogStore,
}

impl AddMovieAction {
    pub fn new(catalog: CatalogStore) -> Self {
        AddMovieAction { catalog }
    }

    /// # Errors
    ///
    /// - `Validation` if a field is missing or out of range
    /// - `MovieAlreadyExists` if the `imdb_id` is taken
    #[tracing::instrument(name = "add_movie", skip_all, fields(imdb_id = %movie.imdb_id), err)]
    pub async fn execute(&self, mut movie: Movie) -> Result<Movie, AuthError> {
        validate_movie(&movie)?;
        movie.imdb_id = movie.imdb_id.trim().to_owned();
        movie.title = movie.title.trim().to_owned();

        let movie = self.catalog.create_movie(movie).await?;

        log::info!(
            target: "marquee_catalog",
            "msg=\"movie added\", imdb_id=\"{}\"",
            movie.imdb_id
        );

        Ok(movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_movie() {
        let catalog = CatalogStore::default();
        let action = AddMovieAction::new(catalog.clone());

        let mut movie = Movie::mock("tt1", "Heat", &["Crime"], 1);
        movie.imdb_id = " tt1 ".to_owned();
        let added = action.execute(movie).await.unwrap();
        assert_eq!(added.imdb_id, "tt1");
        assert!(catalog.find_movie("tt1").await.unwrap().is_some());

        let err = action
            .execute(Movie::mock("tt1", "Heat again", &["Crime"], 1))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::MovieAlreadyExists);
    }

    #[tokio::test]
    async fn test_invalid_movie_not_stored() {
        let catalog = CatalogStore::default();
        let action = AddMovieAction::new(catalog.clone());

        let err = action
            .execute(Movie::mock("tt1", "H", &["Crime"], 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert!(catalog.list_movies().await.unwrap().is_empty());
    }
}
