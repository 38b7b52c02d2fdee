//! # Factory Core
//!
//! Domain entities, repository traits, tenant access control and the
//! services that compose them.

pub mod domain;
pub mod access;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use access::Principal;
pub use error::DomainError;
