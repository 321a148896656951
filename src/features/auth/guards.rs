//! Role-based authorization guards.
//!
//! Guards reject with 403 (role mismatch) rather than 401: the auth
//! middleware has already established who the caller is.

use crate::core::error::AppError;
use crate::features::auth::model::{AccountRole, CurrentUser};
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard requiring the admin role.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if user.role != AccountRole::Admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

/// Guard requiring department-level access.
///
/// Admins pass as well: the department report views are shared between
/// the two back-office roles.
pub struct RequireDepartment(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireDepartment
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !matches!(user.role, AccountRole::Department | AccountRole::Admin) {
            return Err(AppError::Forbidden(
                "Department access required".to_string(),
            ));
        }

        Ok(RequireDepartment(user.clone()))
    }
}
