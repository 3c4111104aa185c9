use crate::session::SessionStore;
use crate::{AuthError, Role, User, UserRepository};

/// Changes the role of an identity.
///
/// Tokens already issued keep their old role claim until the identity next
/// logs in or refreshes.
pub struct UpdateRoleAction<U: UserRepository> {
    store: SessionStore<U>,
}

impl<U: UserRepository> UpdateRoleAction<U> {
    pub fn new(store: SessionStore<U>) -> Self {
        UpdateRoleAction { store }
    }

    /// # Errors
    ///
    /// Returns `UserNotFound` if no identity has this id.
    #[tracing::instrument(name = "update_role", skip_all, fields(role = role.as_str()), err)]
    pub async fn execute(&self, user_id: &str, role: Role) -> Result<User, AuthError> {
        let user = self
            .store
            .with_deadline("update_role", self.store.users().update_role(user_id, role))
            .await
            .map_err(|e| match e {
                AuthError::StoreRecordNotFound => AuthError::UserNotFound,
                other => other,
            })?;

        log::info!(
            target: "marquee_auth",
            "msg=\"role updated\", user_id=\"{user_id}\", role=\"{}\"",
            role.as_str()
        );

        Ok(user)
    }
}
