//! Bearer-token authentication.
//!
//! Tokens are issued elsewhere; this service only verifies HS256 JWTs whose
//! `sub` is a user id, then loads the user to check status and role.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::user::{User, UserRole, UserStatus};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Verification key for session tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Returns the user id carried by a valid token.
    pub fn verify(&self, token: &str) -> Result<i64, AppError> {
        let decoded = decode::<Claims>(token, &self.key, &Validation::new(Algorithm::HS256))
            .map_err(|e| {
                warn!(error = %e, "JWT token validation failed");
                AppError::Unauthorized
            })?;

        decoded.claims.sub.parse::<i64>().map_err(|_| {
            warn!(sub = %decoded.claims.sub, "JWT subject is not a user id");
            AppError::Unauthorized
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    (!token.is_empty()).then_some(token)
}

/// Any signed-in user whose account is active.
#[derive(Debug)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            warn!("Authentication failed: missing Authorization header");
            return Err(AppError::Unauthorized);
        };
        let user_id = state.tokens.verify(token)?;

        let user = state.users.find_user(user_id).await?.ok_or_else(|| {
            warn!(user_id, "Authentication failed: user not found");
            AppError::Unauthorized
        })?;

        if user.status != UserStatus::Active {
            warn!(user_id, status = user.status.as_str(), "Rejected inactive account");
            return Err(AppError::Forbidden);
        }

        debug!(user_id, "User authenticated");
        Ok(AuthUser(user))
    }
}

/// An active user with the admin role.
#[derive(Debug)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Admin {
            warn!(user_id = user.id, "Admin route requested by non-admin");
            return Err(AppError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}
