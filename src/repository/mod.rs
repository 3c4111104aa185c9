//! Storage abstraction for user records, their session state, and the
//! movie catalog.
//!
//! Implement [`UserRepository`] and [`MovieRepository`] to back the service
//! with your own database. The in-memory stores are provided for development
//! and tests.

mod memory;
mod memory_catalog;
mod movie;
mod user;

pub use memory::InMemoryUserRepository;
pub use memory_catalog::InMemoryMovieRepository;
pub use movie::{Genre, Movie, MovieRepository, Ranking, UNRANKED_VALUE};
pub use user::{NewUser, Role, SessionRecord, User, UserRepository};
