//! JWT verification for bearer tokens
//!
//! Tokens are HS256-signed by the session issuer. Only access tokens are
//! accepted on the API; the `sub` claim carries the caller's user id.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use review_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub token_type: TokenType,
}

impl Claims {
    /// The user id in `sub`, or `InvalidToken` when it is not a snowflake.
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_access_token(&self) -> bool {
        self.token_type == TokenType::Access
    }
}

/// Verifies (and, for tooling, signs) access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    /// `access_token_expiry` is in seconds.
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Sign an access token for `user_id`.
    ///
    /// The API never calls this on a request path; it exists so operators
    /// and tests can act as a given user.
    pub fn issue_access_token(&self, user_id: Snowflake) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            token_type: TokenType::Access,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to encode JWT: {e}")))
    }

    /// Decode and validate signature and expiry
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// Validate an access token and return the caller's user id
    pub fn validate_access_token(&self, token: &str) -> Result<Snowflake, AppError> {
        let claims = self.decode_token(token)?;
        if !claims.is_access_token() {
            return Err(AppError::InvalidToken);
        }
        claims.user_id()
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-long-enough";

    fn service() -> JwtService {
        JwtService::new(SECRET, 900)
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issued_token_validates() {
        let service = service();
        let token = service.issue_access_token(Snowflake::new(12345)).unwrap();

        assert_eq!(
            service.validate_access_token(&token).unwrap(),
            Snowflake::new(12345)
        );
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = JwtService::new("another-secret", 900)
            .issue_access_token(Snowflake::new(1))
            .unwrap();
        assert!(matches!(
            service().validate_access_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: "1".into(),
                iat: now - 3600,
                exp: now - 1800,
                token_type: TokenType::Access,
            },
            SECRET,
        );
        assert!(matches!(
            service().validate_access_token(&token),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_refresh_token_is_not_access() {
        let now = Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: "1".into(),
                iat: now,
                exp: now + 600,
                token_type: TokenType::Refresh,
            },
            SECRET,
        );
        assert!(matches!(
            service().validate_access_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_non_numeric_subject() {
        let now = Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: "alice".into(),
                iat: now,
                exp: now + 600,
                token_type: TokenType::Access,
            },
            SECRET,
        );
        assert!(matches!(
            service().validate_access_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            service().decode_token("invalid.token.here"),
            Err(AppError::InvalidToken)
        ));
    }
}
