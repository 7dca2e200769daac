use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Who a token authenticates as (spec §4.1: "subject, role, and optionally
/// a deviceId").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Device,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Device => "device",
            Self::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Signs and verifies device/admin bearer tokens. Holds both keys so it can
/// be constructed once at bootstrap and shared behind an `Arc`.
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtCodec {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, sub: &str, role: Role, device_id: Option<&str>, ttl_secs: u64) -> CoreResult<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            role,
            device_id: device_id.map(str::to_string),
            exp: now + ttl_secs as i64,
            iat: now,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| CoreError::InvalidToken(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> CoreResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => CoreError::TokenExpired,
                _ => CoreError::InvalidToken(e.to_string()),
            }
        })?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_matching_claims() {
        let codec = JwtCodec::new("test-secret");
        let token = codec.issue("lobby-1", Role::Device, Some("lobby-1"), 3600).unwrap();
        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, "lobby-1");
        assert_eq!(claims.role, Role::Device);
        assert_eq!(claims.device_id.as_deref(), Some("lobby-1"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = JwtCodec::new("secret-a");
        let verifier = JwtCodec::new("secret-b");
        let token = issuer.issue("admin-1", Role::Admin, None, 3600).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = JwtCodec::new("test-secret");
        let past = chrono::Utc::now().timestamp() - 3600;
        let claims = Claims {
            sub: "admin-1".to_string(),
            role: Role::Admin,
            device_id: None,
            exp: past,
            iat: past - 10,
        };
        let token = encode(&Header::default(), &claims, &codec.encoding).unwrap();
        assert!(matches!(codec.verify(&token), Err(CoreError::TokenExpired)));
    }
}
