// ============================================================================
// Factory Core - Authentication Service
// File: crates/factory-core/src/services/auth_service.rs
// ============================================================================
//! Credential verification and token issuance

use std::sync::Arc;
use tracing::{error, info, warn};

use factory_security::{JwtError, JwtService, PasswordService, TokenKind, TokenPair};
use factory_shared::utils::{mask_email, normalize_email};

use crate::domain::User;
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Exchanges credentials for tokens and resolves bearer tokens to users.
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { user_repo, jwt }
    }

    /// Verify email and password
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = normalize_email(email);

        // 1. Find user by email
        let user = self.user_repo.find_by_email(&email).await?.ok_or_else(|| {
            warn!("Login failed: email not found: {}", mask_email(&email));
            DomainError::InvalidCredentials
        })?;

        // 2. Verify password
        let password_valid = PasswordService::verify(password, &user.password_hash)
            .map_err(|_e| DomainError::InvalidCredentials)?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", mask_email(&email));
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Check if user can login
        if !user.can_login() {
            warn!("Login failed: user {} is inactive", user.id);
            return Err(DomainError::UserNotActive);
        }

        Ok(user)
    }

    /// Login with email and password, returning an access/refresh pair
    pub async fn obtain_pair(&self, email: &str, password: &str) -> Result<TokenPair, DomainError> {
        let user = self.authenticate(email, password).await?;

        let pair = self
            .jwt
            .generate_pair(user.id)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        if let Err(e) = self.user_repo.record_login(user.id).await {
            error!("Failed to update last login: {}", e);
            // Don't fail login for this
        }

        info!("Token pair issued for user {}", user.id);
        Ok(pair)
    }

    /// Issue a new access token from a refresh token
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, DomainError> {
        let user = self.resolve(refresh_token, TokenKind::Refresh).await?;
        self.jwt
            .generate_access_token(user.id)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))
    }

    /// Resolve the subject of a bearer access token
    pub async fn authenticate_bearer(&self, access_token: &str) -> Result<User, DomainError> {
        self.resolve(access_token, TokenKind::Access).await
    }

    async fn resolve(&self, token: &str, kind: TokenKind) -> Result<User, DomainError> {
        let claims = self.jwt.validate_token(token, kind).map_err(|e| match e {
            JwtError::TokenExpired => DomainError::InvalidToken("token has expired".to_string()),
            other => DomainError::InvalidToken(other.to_string()),
        })?;
        let user_id = claims
            .user_id()
            .map_err(|e| DomainError::InvalidToken(e.to_string()))?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::InvalidToken("user no longer exists".to_string()))?;

        if !user.can_login() {
            return Err(DomainError::UserNotActive);
        }
        Ok(user)
    }
}
