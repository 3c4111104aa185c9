use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::jwt::TokenPair;
use crate::repository::{SessionRecord, User, UserRepository};
use crate::AuthError;

/// Default deadline applied to every store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads and writes the session record kept on each user.
///
/// Every call is a single-document operation bounded by `timeout`. Dropping
/// the returned future (for example when the inbound request is cancelled)
/// abandons the store call.
pub struct SessionStore<U: UserRepository> {
    users: Arc<U>,
    timeout: Duration,
}

impl<U: UserRepository> Clone for SessionStore<U> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            timeout: self.timeout,
        }
    }
}

impl<U: UserRepository> SessionStore<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self::with_timeout(users, DEFAULT_STORE_TIMEOUT)
    }

    pub fn with_timeout(users: Arc<U>, timeout: Duration) -> Self {
        Self { users, timeout }
    }

    #[must_use]
    pub fn timeout_after(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    /// Records `pair` as the single live pair of `subject_id`, replacing
    /// whatever was there.
    ///
    /// # Errors
    ///
    /// - `StoreRecordNotFound` if no user matched
    /// - `StoreUnavailable` if the store failed or the deadline elapsed
    pub async fn persist(&self, subject_id: &str, pair: &TokenPair) -> Result<(), AuthError> {
        let record = SessionRecord::issued(
            pair.access_token.expose_secret(),
            pair.refresh_token.expose_secret(),
            Utc::now(),
        );

        self.with_deadline("persist_session", self.users.update_session(subject_id, record))
            .await
    }

    /// Clears the live pair of `subject_id`.
    ///
    /// # Errors
    ///
    /// Same as [`persist`](Self::persist).
    pub async fn logout(&self, subject_id: &str) -> Result<(), AuthError> {
        let record = SessionRecord::revoked(Utc::now());

        self.with_deadline("logout", self.users.update_session(subject_id, record))
            .await
    }

    pub async fn find_by_id(&self, subject_id: &str) -> Result<Option<User>, AuthError> {
        self.with_deadline("find_user_by_id", self.users.find_user_by_id(subject_id))
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        self.with_deadline("find_user_by_email", self.users.find_user_by_email(email))
            .await
    }

    /// Runs `fut` under the store deadline. No retry is attempted.
    pub async fn with_deadline<T, F>(&self, operation: &str, fut: F) -> Result<T, AuthError>
    where
        F: Future<Output = Result<T, AuthError>>,
    {
        bounded(self.timeout, operation, fut).await
    }
}

/// Bounds one store call by `timeout`. An elapsed deadline becomes
/// `StoreUnavailable`; store errors pass through. Both are logged.
///
/// Dropping the returned future drops `fut` with it, and nothing is logged.
pub(crate) async fn bounded<T, F>(timeout: Duration, operation: &str, fut: F) -> Result<T, AuthError>
where
    F: Future<Output = Result<T, AuthError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            log::error!(
                target: "marquee_auth::store",
                "msg=\"store error\", operation=\"{operation}\", error=\"{e}\""
            );
            Err(e)
        }
        Err(_) => {
            log::error!(
                target: "marquee_auth::store",
                "msg=\"store deadline elapsed\", operation=\"{operation}\", timeout_secs={}",
                timeout.as_secs()
            );
            Err(AuthError::StoreUnavailable(format!(
                "{operation} timed out after {}s",
                timeout.as_secs()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::Duration as ChronoDuration;

    use super::*;
    use crate::repository::{InMemoryUserRepository, NewUser, Role};
    use crate::SecretString;

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access_token: SecretString::new(access),
            refresh_token: SecretString::new(refresh),
            access_expires_at: Utc::now() + ChronoDuration::hours(24),
            refresh_expires_at: Utc::now() + ChronoDuration::days(7),
        }
    }

    async fn seeded() -> (SessionStore<InMemoryUserRepository>, String) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = repo
            .create_user(NewUser {
                email: "ada@example.com".to_owned(),
                first_name: "Ada".to_owned(),
                last_name: "Lovelace".to_owned(),
                hashed_password: "hash".to_owned(),
                role: Role::User,
                favourite_genres: vec![],
            })
            .await
            .unwrap();
        (SessionStore::new(repo), user.user_id)
    }

    #[tokio::test]
    async fn test_persist_then_logout() {
        let (store, id) = seeded().await;

        store.persist(&id, &pair("a1", "r1")).await.unwrap();
        let user = store.find_by_id(&id).await.unwrap().unwrap();
        assert!(user.session.holds_access("a1"));
        assert!(user.session.holds_refresh("r1"));

        store.logout(&id).await.unwrap();
        let user = store.find_by_id(&id).await.unwrap().unwrap();
        assert!(user.session.is_revoked());
        assert!(user.session.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let (store, id) = seeded().await;

        store.persist(&id, &pair("a1", "r1")).await.unwrap();
        store.persist(&id, &pair("a2", "r2")).await.unwrap();

        let user = store.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert!(user.session.holds_access("a2"));
        assert!(!user.session.holds_access("a1"));
    }

    #[tokio::test]
    async fn test_unknown_subject() {
        let (store, _) = seeded().await;

        assert_eq!(
            store.logout("nobody").await,
            Err(AuthError::StoreRecordNotFound)
        );
    }

    struct StalledRepository;

    #[async_trait]
    impl UserRepository for StalledRepository {
        async fn find_user_by_id(&self, _: &str) -> Result<Option<User>, AuthError> {
            std::future::pending().await
        }
        async fn find_user_by_email(&self, _: &str) -> Result<Option<User>, AuthError> {
            std::future::pending().await
        }
        async fn create_user(&self, _: NewUser) -> Result<User, AuthError> {
            std::future::pending().await
        }
        async fn update_session(&self, _: &str, _: SessionRecord) -> Result<(), AuthError> {
            std::future::pending().await
        }
        async fn update_role(&self, _: &str, _: Role) -> Result<User, AuthError> {
            std::future::pending().await
        }
    }

    /// Records whether a session write started, finished, and when its
    /// future was dropped.
    #[derive(Default)]
    struct ObservedRepository {
        started: AtomicBool,
        dropped: Arc<AtomicBool>,
        written: AtomicBool,
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl UserRepository for ObservedRepository {
        async fn find_user_by_id(&self, _: &str) -> Result<Option<User>, AuthError> {
            Ok(None)
        }
        async fn find_user_by_email(&self, _: &str) -> Result<Option<User>, AuthError> {
            Ok(None)
        }
        async fn create_user(&self, _: NewUser) -> Result<User, AuthError> {
            Err(AuthError::StoreUnavailable("read only".to_owned()))
        }
        async fn update_session(&self, _: &str, _: SessionRecord) -> Result<(), AuthError> {
            self.started.store(true, Ordering::SeqCst);
            let _flag = DropFlag(Arc::clone(&self.dropped));
            tokio::time::sleep(Duration::from_secs(3)).await;
            self.written.store(true, Ordering::SeqCst);
            Ok(())
        }
        async fn update_role(&self, _: &str, _: Role) -> Result<User, AuthError> {
            Err(AuthError::StoreRecordNotFound)
        }
    }

    static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());

    struct CaptureLogger;

    static LOGGER: CaptureLogger = CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            if let Ok(mut lines) = CAPTURED.lock() {
                lines.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_caller_abandons_store_call() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);

        let repo = Arc::new(ObservedRepository::default());
        let store = SessionStore::with_timeout(Arc::clone(&repo), Duration::from_secs(30));

        // the caller goes away after 1s, long before the 30s deadline
        let outcome = tokio::time::timeout(
            Duration::from_secs(1),
            store.persist("u-1", &pair("a", "r")),
        )
        .await;
        assert!(outcome.is_err());

        assert!(repo.started.load(Ordering::SeqCst));
        assert!(repo.dropped.load(Ordering::SeqCst));
        assert!(!repo.written.load(Ordering::SeqCst));

        // nothing completes later either
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!repo.written.load(Ordering::SeqCst));

        let record = SessionRecord::revoked(Utc::now());
        let outcome = tokio::time::timeout(
            Duration::from_secs(1),
            store.with_deadline("abandoned_logout", repo.update_session("u-1", record)),
        )
        .await;
        assert!(outcome.is_err());
        tokio::time::sleep(Duration::from_secs(60)).await;

        let lines = CAPTURED.lock().unwrap();
        assert!(!lines.iter().any(|line| line.contains("abandoned_logout")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_elapsed() {
        let store = SessionStore::with_timeout(Arc::new(StalledRepository), Duration::from_secs(5));

        let err = store.persist("u-1", &pair("a", "r")).await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(ref msg) if msg.contains("timed out")));

        let err = store.find_by_id("u-1").await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
    }
}
