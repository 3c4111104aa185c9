use crate::AuthError;
use crate::catalog::CatalogStore;
use crate::repository::Movie;

/// Stores the admin review of a movie. The caller's role is checked by the
/// handler before this runs; the ranking is left as it is.
pub struct UpdateReviewAction {
    catalog: CatalogStore,
}

impl UpdateReviewAction {
    pub fn new(catalog: CatalogStore) -> Self {
        UpdateReviewAction { catalog }
    }

    /// # Errors
    ///
    /// Returns `MovieNotFound` if no movie has this `imdb_id`.
    #[tracing::instrument(name = "update_review", skip_all, fields(imdb_id = imdb_id), err)]
    pub async fn execute(&self, imdb_id: &str, admin_review: &str) -> Result<Movie, AuthError> {
        let movie = self
            .catalog
            .update_review(imdb_id, admin_review.trim())
            .await
            .map_err(|e| match e {
                AuthError::StoreRecordNotFound => AuthError::MovieNotFound,
                other => other,
            })?;

        log::info!(
            target: "marquee_catalog",
            "msg=\"review updated\", imdb_id=\"{imdb_id}\""
        );

        Ok(movie)
    }
}
