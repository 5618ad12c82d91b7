//! Repository implementations
//!
//! Concrete implementations of the store traits defined in seatguard-core,
//! using sqlx for PostgreSQL access.

pub mod user_repo;

pub use user_repo::PgUserStore;
