//! # Factory Security
//!
//! Security utilities: JWT issuing/validation and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtError, JwtService, TokenKind, TokenPair};
pub use password::{PasswordError, PasswordService};
