// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session tokens: HS256 JWTs carrying the user id.
//!
//! Tokens have no `exp` claim and there is no revocation list. Rotating the
//! signing key invalidates every outstanding token at once.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies session tokens with a server-held secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(signing_key: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
            validation,
        }
    }

    /// Create a token for `user_id`.
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let claims = Claims {
            sub: user_id.to_string(),
            iat,
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Check a token's signature and return the user id it carries.
    ///
    /// Does not check that the user still exists.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let token = strip_bearer(token);
        if token.is_empty() {
            return Err(TokenError::Invalid);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::Invalid);
        }
        Ok(data.claims.sub)
    }
}

/// The header carries the raw token; a `Bearer ` prefix is tolerated.
fn strip_bearer(value: &str) -> &str {
    let value = value.trim();
    value.strip_prefix("Bearer ").unwrap_or(value).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test_jwt_key_32_bytes_minimum!!!";

    #[test]
    fn test_token_round_trip() {
        let tokens = TokenService::new(KEY);
        let token = tokens.issue("user-123").unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), "user-123");
    }

    #[test]
    fn test_bearer_prefix_tolerated() {
        let tokens = TokenService::new(KEY);
        let token = tokens.issue("user-123").unwrap();
        assert_eq!(
            tokens.verify(&format!("Bearer {}", token)).unwrap(),
            "user-123"
        );
    }

    #[test]
    fn test_other_secret_rejected() {
        let ours = TokenService::new(KEY);
        let theirs = TokenService::new(b"another_key_that_is_32_bytes_ok!");
        let token = theirs.issue("user-123").unwrap();
        assert!(matches!(ours.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_rejected() {
        let tokens = TokenService::new(KEY);
        for bad in ["", "   ", "Bearer ", "not-a-token", "a.b.c"] {
            assert!(
                matches!(tokens.verify(bad), Err(TokenError::Invalid)),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let tokens = TokenService::new(KEY);
        let token = tokens.issue("user-123").unwrap();
        let forged = tokens.issue("user-456").unwrap();

        // Splice the forged payload onto the original signature.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert!(matches!(tokens.verify(&spliced), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_token_has_no_expiry() {
        let tokens = TokenService::new(KEY);
        let token = tokens.issue("user-123").unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        let data = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(KEY), &validation)
            .unwrap();

        assert!(data.claims.get("exp").is_none());
        assert_eq!(data.claims["sub"], "user-123");
    }
}
