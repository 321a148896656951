use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AuthResponseDto, LoginDto, RegisterDto};
use crate::features::auth::model::{Account, AccountRole, CurrentUser};
use crate::features::auth::password;
use crate::features::auth::services::TokenService;

/// Service for registration, login, and bearer-token authentication.
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>) -> Self {
        Self { pool, tokens }
    }

    /// Register a new account. The role defaults to citizen; department and
    /// admin accounts are created through the same path by seeding.
    pub async fn register(&self, dto: &RegisterDto) -> Result<AuthResponseDto> {
        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM accounts WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to check existing account: {:?}", e);
                    AppError::Database(e)
                })?;

        if existing.is_some() {
            return Err(AppError::Conflict("Account already exists".to_string()));
        }

        let password_hash = password::hash_password(&dto.password)?;
        let role = dto.role.unwrap_or(AccountRole::Citizen);

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create account: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Registered account {} with role {}",
            account.id,
            account.role.as_str()
        );

        let token = self.tokens.issue(account.id, account.role)?;
        Ok(AuthResponseDto::from_account(account, token))
    }

    /// Authenticate email + password and issue a token.
    ///
    /// Unknown email and wrong password produce the same message so the
    /// endpoint cannot be used to enumerate accounts.
    pub async fn login(&self, dto: &LoginDto) -> Result<AuthResponseDto> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password_hash, role, created_at FROM accounts WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up account: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !password::verify_password(&dto.password, &account.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.tokens.issue(account.id, account.role)?;
        Ok(AuthResponseDto::from_account(account, token))
    }

    /// Resolve a bearer token into the current user.
    ///
    /// The account row is re-read on every request so role changes and
    /// deletions take effect immediately, not at token expiry.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser> {
        let claims = self.tokens.verify(token)?;

        let account = sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password_hash, role, created_at FROM accounts WHERE id = $1",
        )
        .bind(claims.sub)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load account for token: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;

        Ok(account.into())
    }
}
