//! Session Store Adapter.
//!
//! The single currently valid token pair of an identity lives inline on its
//! user record. [`SessionStore`] is the only code that writes it.

mod store;

pub(crate) use store::bounded;
pub use store::{DEFAULT_STORE_TIMEOUT, SessionStore};
