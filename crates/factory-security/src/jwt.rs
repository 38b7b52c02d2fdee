//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use factory_shared::constants::{TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use factory_shared::EntityId;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Expected {expected} token")]
    WrongTokenType { expected: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => TOKEN_TYPE_ACCESS,
            TokenKind::Refresh => TOKEN_TYPE_REFRESH,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<EntityId, JwtError> {
        self.sub
            .parse()
            .map_err(|_| JwtError::ValidationError("subject is not a user id".to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// HS256 signer/validator for access and refresh tokens.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    /// Expiries are in seconds.
    pub fn new(secret: &str, access_expiry: i64, refresh_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry: access_expiry,
            refresh_token_expiry: refresh_expiry,
        }
    }

    pub fn generate_pair(&self, user_id: EntityId) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access: self.generate_access_token(user_id)?,
            refresh: self.generate_refresh_token(user_id)?,
        })
    }

    pub fn generate_access_token(&self, user_id: EntityId) -> Result<String, JwtError> {
        self.generate_token(user_id, TokenKind::Access, self.access_token_expiry)
    }

    pub fn generate_refresh_token(&self, user_id: EntityId) -> Result<String, JwtError> {
        self.generate_token(user_id, TokenKind::Refresh, self.refresh_token_expiry)
    }

    fn generate_token(&self, user_id: EntityId, kind: TokenKind, expiry: i64) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type: kind.as_str().to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    /// Verifies signature and expiry, then checks the token is of `kind`.
    pub fn validate_token(&self, token: &str, kind: TokenKind) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })?;

        if claims.token_type != kind.as_str() {
            return Err(JwtError::WrongTokenType { expected: kind.as_str() });
        }
        Ok(claims)
    }
}
