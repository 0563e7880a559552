//! Signed bearer tokens for the admin API
//!
//! HS256 via `jsonwebtoken`. Access and refresh tokens share the secret and
//! differ only in lifetime and the `kind` claim.

use chrono::{Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user id
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub kind: TokenKind,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// What `/auth/login` and `/auth/refresh` hand back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtService {
    /// Lifetimes are in seconds
    #[must_use]
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        let secret = secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_ttl: Duration::seconds(access_ttl_secs),
            refresh_ttl: Duration::seconds(refresh_ttl_secs),
        }
    }

    pub fn issue_pair(&self, user_id: Uuid, username: &str) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.sign(user_id, username, TokenKind::Access)?,
            refresh_token: self.sign(user_id, username, TokenKind::Refresh)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_ttl.num_seconds(),
        })
    }

    fn sign(&self, user_id: Uuid, username: &str, kind: TokenKind) -> Result<String, AppError> {
        let issued = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: issued.timestamp(),
            exp: (issued + ttl).timestamp(),
            kind,
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("signing admin token: {e}")))
    }

    /// Check signature, expiry and kind. A refresh token presented as an
    /// access token (or the reverse) is `InvalidToken`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AppError> {
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })?
            .claims;
        if claims.kind != expected {
            return Err(AppError::InvalidToken);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_ttl", &self.access_ttl.num_seconds())
            .field("refresh_ttl", &self.refresh_ttl.num_seconds())
            .finish_non_exhaustive()
    }
}
