use crate::AuthError;
use crate::catalog::CatalogStore;
use crate::repository::{Genre, Movie};

/// Lists the whole catalog. Public.
pub struct ListMoviesAction {
    catalog: CatalogStore,
}

impl ListMoviesAction {
    pub fn new(catalog: CatalogStore) -> Self {
        ListMoviesAction { catalog }
    }

    #[tracing::instrument(name = "list_movies", skip_all, err)]
    pub async fn execute(&self) -> Result<Vec<Movie>, AuthError> {
        self.catalog.list_movies().await
    }
}

/// Lists the known genres. Public.
pub struct ListGenresAction {
    catalog: CatalogStore,
}

impl ListGenresAction {
    pub fn new(catalog: CatalogStore) -> Self {
        ListGenresAction { catalog }
    }

    #[tracing::instrument(name = "list_genres", skip_all, err)]
    pub async fn execute(&self) -> Result<Vec<Genre>, AuthError> {
        self.catalog.list_genres().await
    }
}
