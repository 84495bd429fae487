use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::User;

/// Identity facts embedded in an access token. Self-contained and stateless;
/// expiry is enforced by the verifier, not by any server-side record.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User, expire_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            user_id: user.id,
            tenant_id: user.tenant_id,
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(expire_minutes)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

/// Decode and validate a token (signature + expiry). No HTTP surface consumes
/// this yet; /auth/me stays a 501 until bearer extraction is designed.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}
