use crate::AuthError;
use crate::catalog::CatalogStore;
use crate::repository::Movie;

pub struct GetMovieAction {
    catalog: CatalogStore,
}

impl GetMovieAction {
    pub fn new(catalog: CatalogStore) -> Self {
        GetMovieAction { catalog }
    }

    /// # Errors
    ///
    /// Returns `MovieNotFound` if no movie has this `imdb_id`.
    #[tracing::instrument(name = "get_movie", skip_all, fields(imdb_id = imdb_id), err)]
    pub async fn execute(&self, imdb_id: &str) -> Result<Movie, AuthError> {
        self.catalog
            .find_movie(imdb_id)
            .await?
            .ok_or(AuthError::MovieNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_movie() {
        let catalog = CatalogStore::default();
        catalog
            .create_movie(Movie::mock("tt1", "Heat", &["Crime"], 1))
            .await
            .unwrap();
        let action = GetMovieAction::new(catalog);

        assert_eq!(action.execute("tt1").await.unwrap().title, "Heat");
        assert_eq!(action.execute("tt9").await, Err(AuthError::MovieNotFound));
    }
}
