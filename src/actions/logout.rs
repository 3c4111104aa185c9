use crate::session::SessionStore;
use crate::{AuthError, UserRepository};

/// Clears the live session of an identity.
///
/// The subject id comes straight from the request body; the caller is not
/// required to hold a valid token.
pub struct LogoutAction<U: UserRepository> {
    store: SessionStore<U>,
}

impl<U: UserRepository> LogoutAction<U> {
    pub fn new(store: SessionStore<U>) -> Self {
        LogoutAction { store }
    }

    /// # Errors
    ///
    /// - `StoreRecordNotFound` if no identity has this subject id
    /// - `StoreUnavailable` if the store failed or timed out
    #[tracing::instrument(name = "logout", skip_all, err)]
    pub async fn execute(&self, subject_id: &str) -> Result<(), AuthError> {
        self.store.logout(subject_id).await?;

        log::info!(
            target: "marquee_auth",
            "msg=\"logout success\", user_id=\"{subject_id}\""
        );

        Ok(())
    }
}
