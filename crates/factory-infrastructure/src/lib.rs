//! # Factory Infrastructure
//!
//! Repository adapters: PostgreSQL through sqlx, plus an in-memory store
//! with the same constraint semantics.

pub mod database;

pub use database::{
    create_pool, ping, postgres_repositories, run_migrations, InMemoryStore,
};
