//! # Factory Shared
//!
//! Shared configuration, constants, telemetry and helpers for the factory
//! registry crates.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
