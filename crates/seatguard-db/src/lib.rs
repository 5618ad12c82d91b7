//! SeatGuard Database Layer
//!
//! This crate provides PostgreSQL access for the SeatGuard notifier. It includes:
//!
//! - Connection pool management with sqlx
//! - A read-only `UserStore` implementation for seat counts and administrators

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use seatguard_core::{AppError, AppResult};
pub use sqlx::PgPool;
