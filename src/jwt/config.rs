use chrono::Duration;
use std::fmt;

use super::TokenDomain;
use crate::{AuthError, SecretString};

/// Minimum required length for each signing secret, in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Issuer claim stamped on, and required of, every token.
pub const ISSUER: &str = "marquee";

/// Signing configuration for both token domains.
///
/// Built once at startup and handed to [`JwtService::new`](super::JwtService::new);
/// it is never mutated afterwards.
#[derive(Clone)]
pub struct JwtConfig {
    pub(crate) access_secret: SecretString,
    pub(crate) refresh_secret: SecretString,
    /// Default: 24 hours.
    pub(crate) access_expiry: Duration,
    /// Default: 7 days.
    pub(crate) refresh_expiry: Duration,
    pub(crate) issuer: String,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"[REDACTED]")
            .field("refresh_secret", &"[REDACTED]")
            .field("access_expiry", &self.access_expiry)
            .field("refresh_expiry", &self.refresh_expiry)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl JwtConfig {
    /// Creates a configuration from the two domain secrets.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` if either secret is shorter
    /// than [`MIN_SECRET_LENGTH`] bytes, or if both secrets are identical
    /// (which would make the domains interchangeable).
    pub fn new(
        access_secret: impl Into<SecretString>,
        refresh_secret: impl Into<SecretString>,
    ) -> Result<Self, AuthError> {
        let access_secret = access_secret.into();
        let refresh_secret = refresh_secret.into();

        for (domain, secret) in [
            (TokenDomain::Access, &access_secret),
            (TokenDomain::Refresh, &refresh_secret),
        ] {
            if secret.len() < MIN_SECRET_LENGTH {
                return Err(AuthError::ConfigurationError(format!(
                    "{} secret must be at least {MIN_SECRET_LENGTH} bytes, got {}",
                    domain.as_str(),
                    secret.len()
                )));
            }
        }

        if access_secret == refresh_secret {
            return Err(AuthError::ConfigurationError(
                "access and refresh secrets must differ".to_owned(),
            ));
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            access_expiry: Duration::hours(24),
            refresh_expiry: Duration::days(7),
            issuer: ISSUER.to_owned(),
        })
    }

    #[must_use]
    pub fn with_access_expiry(mut self, expiry: Duration) -> Self {
        self.access_expiry = expiry;
        self
    }

    #[must_use]
    pub fn with_refresh_expiry(mut self, expiry: Duration) -> Self {
        self.refresh_expiry = expiry;
        self
    }

    pub fn access_expiry(&self) -> Duration {
        self.access_expiry
    }

    pub fn refresh_expiry(&self) -> Duration {
        self.refresh_expiry
    }

    pub fn expiry(&self, domain: TokenDomain) -> Duration {
        match domain {
            TokenDomain::Access => self.access_expiry,
            TokenDomain::Refresh => self.refresh_expiry,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }
}
