//! Process configuration, read once at startup from `MARQUEE_*` environment
//! variables.
//!
//! ```text
//! MARQUEE_ACCESS_SECRET=...       required, >= 32 bytes
//! MARQUEE_REFRESH_SECRET=...      required, >= 32 bytes, != access secret
//! MARQUEE_BIND_ADDR=0.0.0.0:8080
//! MARQUEE_ALLOWED_ORIGINS=http://localhost:5173,https://marquee.example
//! MARQUEE_STORE_TIMEOUT_SECS=30
//! MARQUEE_ENFORCE_SESSION_CURRENCY=false
//! MARQUEE_RECOMMENDED_MOVIE_LIMIT=5
//! MARQUEE_BOOTSTRAP_ADMIN_EMAIL=...
//! MARQUEE_BOOTSTRAP_ADMIN_PASSWORD=...
//! MARQUEE_LOG=info
//! ```
//!
//! Secrets and bootstrap credentials are taken verbatim. Every other value
//! goes through figment's type guessing.

use std::time::Duration;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::api::axum::SessionSettings;
use crate::jwt::JwtConfig;
use crate::{AuthError, SecretString};

pub const ENV_PREFIX: &str = "MARQUEE_";

/// Keys read as plain strings instead of through `Env`'s type guessing.
const RAW_KEYS: [&str; 4] = [
    "access_secret",
    "refresh_secret",
    "bootstrap_admin_email",
    "bootstrap_admin_password",
];

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServiceConfig {
    pub access_secret: Option<SecretString>,
    pub refresh_secret: Option<SecretString>,

    pub bind_addr: String,

    /// Comma-separated list of CORS origins.
    pub allowed_origins: String,

    /// Deadline for every store call.
    pub store_timeout_secs: u64,

    pub enforce_session_currency: bool,

    /// Maximum number of movies `/recommendedmovies` returns.
    pub recommended_movie_limit: usize,

    /// Seeds one ADMIN identity at startup when both are set.
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<SecretString>,

    /// `tracing_subscriber::EnvFilter` directive.
    pub log: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            access_secret: None,
            refresh_secret: None,
            bind_addr: "0.0.0.0:8080".to_string(),
            allowed_origins: "http://localhost:5173".to_string(),
            store_timeout_secs: 30,
            enforce_session_currency: false,
            recommended_movie_limit: crate::catalog::DEFAULT_RECOMMENDATION_LIMIT,
            bootstrap_admin_email: None,
            bootstrap_admin_password: None,
            log: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` if a variable has the wrong type.
    pub fn load() -> Result<Self, AuthError> {
        let mut figment =
            Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX));

        // `Env` guesses value types, so a secret like `[abc...]` would
        // come through as a sequence. Secrets are always taken verbatim.
        for key in RAW_KEYS {
            if let Ok(value) = std::env::var(format!("{ENV_PREFIX}{}", key.to_uppercase())) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }

        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self, AuthError> {
        figment
            .extract()
            .map_err(|e| AuthError::ConfigurationError(e.to_string()))
    }

    /// Builds the signing configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ConfigurationError` if either secret is missing,
    /// too short, or both are equal. Startup must not proceed in that case.
    pub fn jwt_config(&self) -> Result<JwtConfig, AuthError> {
        let access = self
            .access_secret
            .clone()
            .ok_or_else(|| missing("ACCESS_SECRET"))?;
        let refresh = self
            .refresh_secret
            .clone()
            .ok_or_else(|| missing("REFRESH_SECRET"))?;

        JwtConfig::new(access, refresh)
    }

    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            enforce_session_currency: self.enforce_session_currency,
        }
    }

    /// Both bootstrap credentials, or `None` if either is unset.
    pub fn bootstrap_admin(&self) -> Option<(&str, &SecretString)> {
        match (&self.bootstrap_admin_email, &self.bootstrap_admin_password) {
            (Some(email), Some(password)) => Some((email.as_str(), password)),
            _ => None,
        }
    }
}

fn missing(key: &str) -> AuthError {
    AuthError::ConfigurationError(format!("{ENV_PREFIX}{key} is not set"))
}
