//! Movie catalog access.
//!
//! Listing and genre lookups are public; everything else sits behind the
//! session middleware, and review edits additionally behind the ADMIN role.

mod store;

pub use store::{CatalogStore, DEFAULT_RECOMMENDATION_LIMIT};
