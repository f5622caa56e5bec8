//! JWT 签发与校验
//!
//! 签名算法固定为 HS256，解码侧不接受任何算法协商。

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Subject cannot be empty")]
    EmptySubject,

    #[error("Malformed token")]
    Malformed,

    #[error("Bad token signature")]
    BadSignature,

    #[error("Missing required claim: {0}")]
    MissingClaim(&'static str),

    #[error("Token expired")]
    Expired,

    #[error("Token encoding failed: {0}")]
    Encode(String),
}

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    #[serde(default)]
    pub sub: String,
    /// Issued at
    #[serde(default)]
    pub iat: i64,
    /// Expiration time
    #[serde(default)]
    pub exp: i64,
}

/// 校验通过后的令牌内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedToken {
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Token 服务
///
/// 无可变状态，Clone 后可在任意数量的并发调用间共享。
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// 令牌有效期
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 为 subject 签发令牌，iat = now，exp = now + ttl
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::EmptySubject);
        }

        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// 校验令牌并返回其声明
    ///
    /// 仅接受 HS256，leeway 为 0。调用方仍须自行复查 `expires_at`
    /// 是否在未来，过期强制不依赖这里的时钟处理。
    pub fn parse(&self, token: &str) -> Result<ParsedToken, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(map_decode_error)?;
        let claims = data.claims;

        if claims.sub.is_empty() {
            return Err(TokenError::MissingClaim("sub"));
        }

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or(TokenError::Malformed)?;
        let issued_at = Utc
            .timestamp_opt(claims.iat, 0)
            .single()
            .ok_or(TokenError::Malformed)?;

        Ok(ParsedToken {
            subject: claims.sub,
            issued_at,
            expires_at,
        })
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::ImmatureSignature => TokenError::BadSignature,
        ErrorKind::MissingRequiredClaim(claim) if claim.as_str() == "sub" => {
            TokenError::MissingClaim("sub")
        }
        ErrorKind::MissingRequiredClaim(_) => TokenError::MissingClaim("exp"),
        _ => TokenError::Malformed,
    }
}
