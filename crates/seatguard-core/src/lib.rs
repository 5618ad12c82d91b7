//! SeatGuard Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the SeatGuard notifier. It includes:
//!
//! - Domain models (subscription state, administrators, notification events)
//! - Collaborator traits for licensing, billing, user storage and email
//! - Unified error handling split into dependency and delivery failures
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
