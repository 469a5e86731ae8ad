/// 인증 토큰 발급 및 검증
// region:    --- Imports
use crate::error::ServiceError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

// endregion: --- Imports

// region:    --- Token

/// 토큰 기본 유효 기간 (일)
const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// JWT 페이로드
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// 토큰 발급
pub fn issue_token(user_id: i64, secret: &str) -> Result<String, ServiceError> {
    let ttl_days = std::env::var("JWT_EXPIRE_DAYS")
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or(DEFAULT_TOKEN_TTL_DAYS);

    let now = Utc::now();
    let claims = Claims {
        id: user_id,
        iat: now.timestamp(),
        exp: (now + Duration::days(ttl_days)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Internal(e.to_string()))
}

/// 토큰 검증
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ServiceError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ServiceError::Unauthorized("Invalid or expired token.".to_string()))
}

// endregion: --- Token

// region:    --- Auth Extractor

/// 인증된 사용자
/// Authorization: Bearer 헤더의 토큰에서 추출한다.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ServiceError::Unauthorized("User is not authenticated.".to_string())
            })?;

        let token = header_value.strip_prefix("Bearer ").ok_or_else(|| {
            ServiceError::Unauthorized("User is not authenticated.".to_string())
        })?;

        let secret = std::env::var("JWT_SECRET_KEY")
            .map_err(|_| ServiceError::Internal("JWT_SECRET_KEY must be set".to_string()))?;

        let claims = verify_token(token, &secret)?;
        Ok(AuthUser {
            user_id: claims.id,
        })
    }
}

// endregion: --- Auth Extractor
