//! Common types

/// Primary key type of every table (`BIGSERIAL`).
pub type EntityId = i64;
