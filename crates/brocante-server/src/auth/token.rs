//! JWT token service

use std::sync::LazyLock;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use moka::sync::Cache;

use brocante_common::Role;

use crate::auth::model::JwtPayload;

/// Cached token data containing the full payload
#[derive(Clone)]
struct CachedTokenData {
    claims: JwtPayload,
}

/// JWT token cache to avoid repeated validation of the same token
static TOKEN_CACHE: LazyLock<Cache<String, CachedTokenData>> = LazyLock::new(|| {
    Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes TTL
        .build()
});

/// Decode and validate a JWT token with caching
pub fn decode_jwt_token_cached(
    token: &str,
    secret_key: &str,
) -> jsonwebtoken::errors::Result<jsonwebtoken::TokenData<JwtPayload>> {
    // Check cache first - use token directly for lookup
    if let Some(cached) = TOKEN_CACHE.get(token) {
        let now = chrono::Utc::now().timestamp();
        if cached.claims.exp > now {
            return Ok(jsonwebtoken::TokenData {
                header: jsonwebtoken::Header::default(),
                claims: cached.claims,
            });
        }
        // Token expired in cache, invalidate it
        TOKEN_CACHE.invalidate(token);
    }

    // Cache miss or expired - perform actual validation
    let result = decode_jwt_token(token, secret_key)?;

    TOKEN_CACHE.insert(
        token.to_string(),
        CachedTokenData {
            claims: result.claims.clone(),
        },
    );

    Ok(result)
}

/// Decode and validate a JWT token without caching
pub fn decode_jwt_token(
    token: &str,
    secret_key: &str,
) -> jsonwebtoken::errors::Result<jsonwebtoken::TokenData<JwtPayload>> {
    let decoding_key = DecodingKey::from_base64_secret(secret_key)?;
    decode::<JwtPayload>(token, &decoding_key, &Validation::default())
}

/// Encode a JWT token for an authenticated account
pub fn encode_jwt_token(
    sub: &str,
    uid: i64,
    role: Role,
    secret_key: &str,
    expire_seconds: i64,
) -> jsonwebtoken::errors::Result<String> {
    let exp = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::seconds(expire_seconds))
        .unwrap_or_else(chrono::Utc::now)
        .timestamp();

    let payload = JwtPayload {
        sub: sub.to_string(),
        uid,
        role,
        exp,
    };

    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_base64_secret(secret_key)?;
    encode(&header, &payload, &encoding_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::constants::DEFAULT_TOKEN_SECRET_KEY;

    #[test]
    fn test_token_round_trip() {
        let token =
            encode_jwt_token("marie", 7, Role::Seller, DEFAULT_TOKEN_SECRET_KEY, 3600).unwrap();
        let decoded = decode_jwt_token(&token, DEFAULT_TOKEN_SECRET_KEY).unwrap();
        assert_eq!(decoded.claims.sub, "marie");
        assert_eq!(decoded.claims.uid, 7);
        assert_eq!(decoded.claims.role, Role::Seller);
    }

    #[test]
    fn test_cached_decode_matches_uncached() {
        let token =
            encode_jwt_token("paul", 3, Role::User, DEFAULT_TOKEN_SECRET_KEY, 3600).unwrap();
        let first = decode_jwt_token_cached(&token, DEFAULT_TOKEN_SECRET_KEY).unwrap();
        let second = decode_jwt_token_cached(&token, DEFAULT_TOKEN_SECRET_KEY).unwrap();
        assert_eq!(first.claims.sub, second.claims.sub);
        assert_eq!(first.claims.uid, second.claims.uid);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token =
            encode_jwt_token("old", 1, Role::User, DEFAULT_TOKEN_SECRET_KEY, -60).unwrap();
        assert!(decode_jwt_token(&token, DEFAULT_TOKEN_SECRET_KEY).is_err());
    }
}
