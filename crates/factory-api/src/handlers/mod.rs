//! HTTP handlers

pub mod auth;
pub mod health;
pub mod users;
pub mod factories;
pub mod equipment;
pub mod properties;
