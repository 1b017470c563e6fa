use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::AppError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

#[derive(Clone)]
pub struct JwtConfig {
    secret: String,
    expires_in: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: &str, expires_in_hours: i64) -> Self {
        Self {
            secret: secret.to_string(),
            expires_in: Duration::hours(expires_in_hours),
        }
    }

    pub fn generate_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expires_in).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    pub fn verify_token(&self, token: &str) -> Result<Uuid, AppError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized("Token inválido ou expirado.".to_string()))?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Token inválido ou expirado.".to_string()))
    }
}
