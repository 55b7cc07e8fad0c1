//! JWT token utilities for authentication.
//!
//! Provides signed, time-bounded bearer tokens that carry a player's identity.
//! Tokens are self-contained: validation needs only the signing secret.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::models::AuthenticatedIdentity;
use crate::database::models::Role;
use crate::errors::{AuthError, AuthResult};

/// Longest validity window a token may be issued with (one year).
pub const MAX_EXPIRES_IN_SECONDS: u64 = 365 * 24 * 60 * 60;

/// JWT Claims structure carrying the authenticated identity
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// Account role
    pub role: Role,
    /// Balance at issuance; may be stale by the time the token is presented
    pub balance: i64,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// Issues and validates HS256 tokens with a process-wide secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl TokenIssuer {
    /// Create a new TokenIssuer from the signing secret and validity window.
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        TokenIssuer {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds,
        }
    }

    /// Seconds a freshly issued token stays valid.
    pub fn expires_in_seconds(&self) -> u64 {
        self.expires_in_seconds
    }

    /// Generate a token for the identity, valid from now.
    pub fn issue(&self, identity: &AuthenticatedIdentity) -> AuthResult<String> {
        self.issue_at(identity, Utc::now())
    }

    fn issue_at(&self, identity: &AuthenticatedIdentity, now: DateTime<Utc>) -> AuthResult<String> {
        let exp = i64::try_from(self.expires_in_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|window| now.checked_add_signed(window))
            .ok_or_else(|| {
                AuthError::internal(format!(
                    "Token lifetime of {} seconds is out of range",
                    self.expires_in_seconds
                ))
            })?;

        let claims = Claims {
            sub: identity.username.clone(),
            role: identity.role,
            balance: identity.balance,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("Token generation failed: {}", e)))
    }

    /// Validate a token and rebuild the identity it was issued for.
    ///
    /// The signature is checked before any claim; a token that fails it is
    /// `TokenInvalid` regardless of its expiry. A token is expired from the
    /// second named in `exp` onward.
    pub fn validate(&self, token: &str) -> AuthResult<AuthenticatedIdentity> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    debug!("Rejected expired token");
                    AuthError::TokenExpired
                }
                kind => {
                    debug!("Rejected invalid token: {:?}", kind);
                    AuthError::TokenInvalid
                }
            })?;

        // jsonwebtoken still accepts exp == now
        let exp = i64::try_from(claims.exp).unwrap_or(i64::MAX);
        if exp <= Utc::now().timestamp() {
            debug!("Rejected expired token");
            return Err(AuthError::TokenExpired);
        }

        Ok(AuthenticatedIdentity {
            username: claims.sub,
            role: claims.role,
            balance: claims.balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret-key-12345", 3600)
    }

    fn bob() -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            username: "bob".to_string(),
            role: Role::User,
            balance: 1000,
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let issuer = issuer();
        let token = issuer.issue(&bob()).unwrap();
        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);

        let identity = issuer.validate(&token).unwrap();
        assert_eq!(identity, bob());
    }

    #[test]
    fn test_admin_role_survives_round_trip() {
        let issuer = issuer();
        let admin = AuthenticatedIdentity {
            role: Role::Admin,
            ..bob()
        };
        let token = issuer.issue(&admin).unwrap();
        assert_eq!(issuer.validate(&token).unwrap().role, Role::Admin);
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = issuer();
        let issued_at = Utc::now() - TimeDelta::hours(2);
        let token = issuer.issue_at(&bob(), issued_at).unwrap();

        assert!(matches!(issuer.validate(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_flipped_signature_byte_rejected() {
        let issuer = issuer();
        let token = issuer.issue(&bob()).unwrap();

        let (signed, signature) = token.rsplit_once('.').unwrap();
        let mut bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
        bytes[0] ^= 0x01;
        let tampered = format!("{}.{}", signed, URL_SAFE_NO_PAD.encode(bytes));

        assert!(matches!(issuer.validate(&tampered), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let issuer = issuer();
        let token = issuer.issue(&bob()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let mut claims: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        claims["role"] = serde_json::json!("ADMIN");
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(matches!(issuer.validate(&forged), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_forged_expired_token_is_invalid_not_expired() {
        let other = TokenIssuer::new("another-secret", 3600);
        let token = other
            .issue_at(&bob(), Utc::now() - TimeDelta::hours(2))
            .unwrap();

        assert!(matches!(issuer().validate(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_different_secrets_reject() {
        let token = TokenIssuer::new("secret1", 3600).issue(&bob()).unwrap();
        let result = TokenIssuer::new("secret2", 3600).validate(&token);
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let issuer = issuer();
        for token in ["", "invalid.token.here", "a.b", "....", "not a token at all"] {
            assert!(
                matches!(issuer.validate(token), Err(AuthError::TokenInvalid)),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let exp = (Utc::now() + TimeDelta::hours(1)).timestamp();
        let payload = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"sub":"bob","role":"ADMIN","balance":1000,"exp":{},"iat":{}}}"#,
            exp,
            Utc::now().timestamp()
        ));
        let token = format!("{}.{}.", header, payload);

        assert!(matches!(issuer().validate(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_claims_carry_expiry_window() {
        let issuer = issuer();
        let now = Utc::now();
        let token = issuer.issue_at(&bob(), now).unwrap();

        let claims = decode::<Claims>(&token, &issuer.decoding_key, &issuer.validation)
            .unwrap()
            .claims;
        assert_eq!(claims.iat, now.timestamp() as usize);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_expires_at_its_exp_second() {
        let issuer = issuer();
        let issued_at = Utc::now() - TimeDelta::seconds(3600);
        let token = issuer.issue_at(&bob(), issued_at).unwrap();

        assert!(matches!(issuer.validate(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_unrepresentable_lifetime_is_an_error() {
        for expires_in_seconds in [10_000_000_000_000_000, u64::MAX] {
            let issuer = TokenIssuer::new("test-secret-key-12345", expires_in_seconds);
            assert!(
                matches!(issuer.issue(&bob()), Err(AuthError::Internal { .. })),
                "lifetime {}",
                expires_in_seconds
            );
        }
    }

    #[test]
    fn test_longest_allowed_lifetime_validates() {
        let issuer = TokenIssuer::new("test-secret-key-12345", MAX_EXPIRES_IN_SECONDS);
        let token = issuer.issue(&bob()).unwrap();
        assert_eq!(issuer.validate(&token).unwrap(), bob());
    }
}
