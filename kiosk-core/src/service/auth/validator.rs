use std::sync::Arc;

use super::jwt::{Claims, JwtCodec, Role};
use crate::error::{CoreError, CoreResult};
use crate::models::{DeviceId, UserId};

/// The result of successfully validating a bearer token (spec §4.1): who it
/// belongs to, and — for device tokens — which device.
#[derive(Debug, Clone)]
pub enum AuthContext {
    Device { device_id: DeviceId },
    Admin { user_id: UserId },
}

impl AuthContext {
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Device { .. } => Role::Device,
            Self::Admin { .. } => Role::Admin,
        }
    }
}

/// Extracts `(subject, role, optional deviceId)` from a signed bearer token
/// and rejects anything malformed, unsigned, expired, or of the wrong role
/// (spec §4.1, invariant I2: every inbound frame and REST call is
/// authenticated before reaching a handler).
pub struct BearerValidator {
    codec: Arc<JwtCodec>,
}

impl BearerValidator {
    #[must_use]
    pub const fn new(codec: Arc<JwtCodec>) -> Self {
        Self { codec }
    }

    pub fn validate(&self, raw_header: &str) -> CoreResult<AuthContext> {
        let token = strip_bearer(raw_header)?;
        let claims = self.codec.verify(token)?;
        Self::context_from_claims(&claims)
    }

    pub fn validate_device(&self, raw_header: &str) -> CoreResult<DeviceId> {
        match self.validate(raw_header)? {
            AuthContext::Device { device_id } => Ok(device_id),
            AuthContext::Admin { .. } => Err(CoreError::RoleMismatch {
                expected: Role::Device.as_str().to_string(),
                actual: Role::Admin.as_str().to_string(),
            }),
        }
    }

    pub fn validate_admin(&self, raw_header: &str) -> CoreResult<UserId> {
        match self.validate(raw_header)? {
            AuthContext::Admin { user_id } => Ok(user_id),
            AuthContext::Device { .. } => Err(CoreError::RoleMismatch {
                expected: Role::Admin.as_str().to_string(),
                actual: Role::Device.as_str().to_string(),
            }),
        }
    }

    fn context_from_claims(claims: &Claims) -> CoreResult<AuthContext> {
        match claims.role {
            Role::Device => {
                let device_id = claims
                    .device_id
                    .clone()
                    .ok_or_else(|| CoreError::InvalidToken("device token missing deviceId".into()))?;
                Ok(AuthContext::Device {
                    device_id: DeviceId::from(device_id),
                })
            }
            Role::Admin => Ok(AuthContext::Admin {
                user_id: UserId::from(claims.sub.clone()),
            }),
        }
    }
}

fn strip_bearer(raw_header: &str) -> CoreResult<&str> {
    raw_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CoreError::InvalidToken("missing or malformed Authorization header".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> (BearerValidator, Arc<JwtCodec>) {
        let codec = Arc::new(JwtCodec::new("test-secret"));
        (BearerValidator::new(codec.clone()), codec)
    }

    #[test]
    fn device_token_resolves_device_context() {
        let (validator, codec) = validator();
        let token = codec.issue("lobby-1", Role::Device, Some("lobby-1"), 3600).unwrap();
        let header = format!("Bearer {token}");
        let device_id = validator.validate_device(&header).unwrap();
        assert_eq!(device_id.as_str(), "lobby-1");
    }

    #[test]
    fn admin_token_rejected_by_validate_device() {
        let (validator, codec) = validator();
        let token = codec.issue("alice", Role::Admin, None, 3600).unwrap();
        let header = format!("Bearer {token}");
        assert!(matches!(
            validator.validate_device(&header),
            Err(CoreError::RoleMismatch { .. })
        ));
    }

    #[test]
    fn missing_bearer_prefix_is_rejected() {
        let (validator, _codec) = validator();
        assert!(validator.validate("not-a-bearer-token").is_err());
    }

    #[test]
    fn empty_token_is_rejected() {
        let (validator, _codec) = validator();
        assert!(validator.validate("Bearer ").is_err());
    }
}
