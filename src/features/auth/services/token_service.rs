use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AccountRole;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the account's database id.
    pub sub: Uuid,
    /// The account's role at issue time.
    pub role: AccountRole,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Issues and validates HS256 bearer tokens for all three roles.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_expiry_hours: config.token_expiry_hours,
        }
    }

    /// Issue a signed access token for the given account.
    pub fn issue(&self, account_id: Uuid, role: AccountRole) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id,
            role,
            exp: (now + Duration::hours(self.token_expiry_hours)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate a token and return its claims.
    ///
    /// Expired or tampered tokens fail with an authentication error, which
    /// the middleware surfaces as 401 before any component logic runs.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(AuthConfig {
            jwt_secret: "test-secret-not-for-production".to_string(),
            token_expiry_hours: 1,
        })
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let svc = service();
        let id = Uuid::new_v4();
        let token = svc.issue(id, AccountRole::Citizen).unwrap();

        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, AccountRole::Citizen);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let svc = service();
        let token = svc.issue(Uuid::new_v4(), AccountRole::Admin).unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('x');

        assert!(svc.verify(&tampered).is_err());
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let svc = service();
        let other = TokenService::new(AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            token_expiry_hours: 1,
        });
        let token = other.issue(Uuid::new_v4(), AccountRole::Department).unwrap();

        assert!(svc.verify(&token).is_err());
    }
}
