use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Account role. Department-role accounts are expected (by convention,
/// not constraint) to carry a display name matching a directory entry,
/// since report access checks compare names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Citizen,
    Department,
    Admin,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Citizen => "citizen",
            AccountRole::Department => "department",
            AccountRole::Admin => "admin",
        }
    }
}

/// Database model for an account
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
}

/// The authenticated caller, resolved by the auth middleware from a
/// verified bearer token and a fresh account lookup.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: AccountRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == AccountRole::Admin
    }
}

impl From<Account> for CurrentUser {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
        }
    }
}
