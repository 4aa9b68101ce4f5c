//! Signed user tokens for joining video calls.
//!
//! The video provider accepts HS256 JWTs signed with the API secret, with a
//! `user_id` claim. Tokens are valid for one hour and backdated a minute to
//! absorb clock skew between us and the provider.

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

pub const TOKEN_TTL_SECS: i64 = 3600;
pub const ISSUED_AT_LEEWAY_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn create_user_token(api_secret: &str, user_id: &str) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = TokenClaims {
        user_id: user_id.to_string(),
        exp: now + TOKEN_TTL_SECS,
        iat: now - ISSUED_AT_LEEWAY_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(api_secret.as_bytes()),
    )
    .context("Failed to sign user token")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn decode_claims(token: &str, secret: &str) -> TokenClaims {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .unwrap()
        .claims
    }

    #[test]
    fn test_token_carries_user_id() {
        let token = create_user_token("s3cret", "guest-abc12345").unwrap();
        let claims = decode_claims(&token, "s3cret");
        assert_eq!(claims.user_id, "guest-abc12345");
    }

    #[test]
    fn test_token_lifetime_window() {
        let before = Utc::now().timestamp();
        let token = create_user_token("s3cret", "guest-x").unwrap();
        let claims = decode_claims(&token, "s3cret");

        assert!(claims.iat <= before - ISSUED_AT_LEEWAY_SECS + 5);
        assert!(claims.exp >= before + TOKEN_TTL_SECS - 5);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS + ISSUED_AT_LEEWAY_SECS);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_user_token("s3cret", "guest-x").unwrap();
        let validation = Validation::new(Algorithm::HS256);
        let result = decode::<TokenClaims>(
            &token,
            &DecodingKey::from_secret(b"other"),
            &validation,
        );
        assert!(result.is_err());
    }
}
