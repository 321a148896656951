use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::{Account, AccountRole};

/// Registration input. Role is optional and defaults to citizen;
/// department/admin accounts are created by administrative seeding
/// through the same endpoint.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "a valid email is required"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    pub role: Option<AccountRole>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginDto {
    #[validate(email(message = "a valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Account summary plus a bearer token, returned by register and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: AccountRole,
    pub token: String,
}

impl AuthResponseDto {
    pub fn from_account(account: Account, token: String) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
            token,
        }
    }
}
