use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod password;
pub mod permissions;

pub use permissions::{Action, PermissionError, PermissionRule, PermissionTable, Resource};

/// Coarse-grained identity attribute carried in every token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims as minted by the backend auth service
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub user_type: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Decoded, verified identity of the caller for the lifetime of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    pub subject_id: i64,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthPayload {
    fn from_claims(claims: Claims) -> Result<Self, TokenError> {
        let issued_at = timestamp(claims.iat)?;
        let expires_at = timestamp(claims.exp)?;
        Ok(Self {
            subject_id: claims.user_id,
            role: claims.user_type,
            issued_at,
            expires_at,
        })
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, TokenError> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| TokenError::InvalidToken(format!("timestamp out of range: {}", secs)))
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token has expired")]
    TokenExpired,

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("token secret is not configured")]
    MissingSecret,
}

/// Verifies bearer tokens issued by the auth service.
///
/// Built once at startup from the shared signing secret. Tokens are checked
/// with zero clock leeway so an `exp` in the past is always rejected.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn verify(&self, token: &str) -> Result<AuthPayload, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            _ => TokenError::InvalidToken(e.to_string()),
        })?;

        AuthPayload::from_claims(data.claims)
    }

    /// Mirror of [`TokenCodec::verify`]. The gateway never mints tokens for
    /// callers; this exists for tests and local tooling.
    pub fn issue(&self, payload: &AuthPayload) -> Result<String, TokenError> {
        let claims = Claims {
            user_id: payload.subject_id,
            user_type: payload.role,
            iat: payload.issued_at.timestamp(),
            exp: payload.expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn payload(role: Role, ttl: Duration) -> AuthPayload {
        let now = Utc.timestamp_opt(Utc::now().timestamp(), 0).unwrap();
        AuthPayload {
            subject_id: 42,
            role,
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    #[test]
    fn issued_token_verifies_to_same_payload() {
        let codec = TokenCodec::new("secret").unwrap();
        let original = payload(Role::Admin, Duration::hours(1));
        let token = codec.issue(&original).unwrap();
        assert_eq!(codec.verify(&token).unwrap(), original);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let codec = TokenCodec::new("secret").unwrap();
        let token = codec.issue(&payload(Role::User, Duration::seconds(-5))).unwrap();
        assert!(matches!(codec.verify(&token), Err(TokenError::TokenExpired)));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let ours = TokenCodec::new("secret").unwrap();
        let theirs = TokenCodec::new("other-secret").unwrap();
        let token = theirs.issue(&payload(Role::User, Duration::hours(1))).unwrap();
        assert!(matches!(ours.verify(&token), Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn garbage_is_invalid() {
        let codec = TokenCodec::new("secret").unwrap();
        assert!(matches!(codec.verify("not.a.jwt"), Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn unknown_role_is_invalid() {
        #[derive(Serialize)]
        struct Foreign {
            user_id: i64,
            user_type: &'static str,
            iat: i64,
            exp: i64,
        }
        let now = Utc::now().timestamp();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Foreign { user_id: 1, user_type: "superuser", iat: now, exp: now + 60 },
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        let codec = TokenCodec::new("secret").unwrap();
        assert!(matches!(codec.verify(&token), Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(TokenCodec::new(""), Err(TokenError::MissingSecret)));
    }
}
