//! Signed session tokens.
//!
//! Two independent signing domains exist, access and refresh, each with its
//! own secret and expiry. A token signed in one domain never validates in
//! the other.
//!
//! # Example
//!
//! ```ignore
//! use marquee::jwt::{JwtConfig, JwtService, TokenDomain};
//!
//! let config = JwtConfig::new(access_secret, refresh_secret)?;
//! let service = JwtService::new(config);
//!
//! let pair = service.issue(&identity)?;
//! let claims = service.validate(pair.access_token.expose_secret(), TokenDomain::Access)?;
//! ```

mod claims;
mod config;
mod service;

pub use claims::{Identity, IdentityClaims, TokenDomain};
pub use config::{ISSUER, JwtConfig, MIN_SECRET_LENGTH};
pub use service::{JwtService, TokenPair};
