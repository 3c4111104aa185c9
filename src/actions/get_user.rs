use crate::session::SessionStore;
use crate::{AuthError, User, UserRepository};

pub struct GetUserAction<U: UserRepository> {
    store: SessionStore<U>,
}

impl<U: UserRepository> GetUserAction<U> {
    pub fn new(store: SessionStore<U>) -> Self {
        GetUserAction { store }
    }

    /// Loads the profile of an authenticated subject.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the identity no longer exists.
    #[tracing::instrument(name = "get_user", skip_all, err)]
    pub async fn execute(&self, subject_id: &str) -> Result<User, AuthError> {
        self.store
            .find_by_id(subject_id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}
