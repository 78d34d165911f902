use std::fmt;

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};

use crate::modules::admin::application::ports::outgoing::{
    AccessTokenVerifier, SessionClaims, TokenError,
};

/// Audience and role the backend stamps on signed-in user sessions.
pub const SESSION_AUDIENCE: &str = "authenticated";

/// Verifies HS256 session tokens with the backend's JWT secret.
#[derive(Clone)]
pub struct SupabaseJwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for SupabaseJwtVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseJwtVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl SupabaseJwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;
        validation.set_audience(&[SESSION_AUDIENCE]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl AccessTokenVerifier for SupabaseJwtVerifier {
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let decoded = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Session token rejected: expired");
                    TokenError::Expired
                }
                ErrorKind::ImmatureSignature => {
                    tracing::warn!("Session token rejected: not yet valid");
                    TokenError::NotYetValid
                }
                ErrorKind::InvalidSignature => {
                    tracing::error!("Security alert: invalid session token signature");
                    TokenError::InvalidSignature
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!("Session token rejected: wrong audience");
                    TokenError::InvalidAudience
                }
                ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                    tracing::error!("Security alert: malformed or wrong-algorithm session token");
                    TokenError::Malformed
                }
                _ => {
                    tracing::warn!("Session token rejected: {}", e);
                    TokenError::Malformed
                }
            })?;

        let claims = decoded.claims;
        if claims.role != SESSION_AUDIENCE {
            tracing::warn!("Session token rejected: role {}", claims.role);
            return Err(TokenError::NotAuthenticated(claims.role));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::auth_helper::{
        session_token, signed_token, TEST_JWT_SECRET,
    };
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_verify_accepts_authenticated_session() {
        let user_id = Uuid::new_v4();
        let verifier = SupabaseJwtVerifier::new(TEST_JWT_SECRET);

        let claims = verifier.verify(&session_token(user_id)).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, "authenticated");
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let verifier = SupabaseJwtVerifier::new(TEST_JWT_SECRET);
        let token = signed_token(
            TEST_JWT_SECRET,
            json!({
                "sub": Uuid::new_v4(),
                "role": "authenticated",
                "aud": "authenticated",
                "exp": Utc::now().timestamp() - 3600,
            }),
        );

        assert_eq!(verifier.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_verify_tolerates_small_clock_skew() {
        let verifier = SupabaseJwtVerifier::new(TEST_JWT_SECRET);
        let token = signed_token(
            TEST_JWT_SECRET,
            json!({
                "sub": Uuid::new_v4(),
                "role": "authenticated",
                "aud": "authenticated",
                "exp": Utc::now().timestamp() - 10,
            }),
        );

        assert!(verifier.verify(&token).is_ok());
    }

    #[test]
    fn test_verify_rejects_foreign_secret() {
        let verifier = SupabaseJwtVerifier::new(TEST_JWT_SECRET);
        let token = signed_token(
            "another_secret_that_is_long_enough_to_sign",
            json!({
                "sub": Uuid::new_v4(),
                "role": "authenticated",
                "aud": "authenticated",
                "exp": Utc::now().timestamp() + 3600,
            }),
        );

        assert_eq!(
            verifier.verify(&token).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_verify_rejects_anon_role() {
        let verifier = SupabaseJwtVerifier::new(TEST_JWT_SECRET);
        let token = signed_token(
            TEST_JWT_SECRET,
            json!({
                "sub": Uuid::new_v4(),
                "role": "anon",
                "aud": "authenticated",
                "exp": Utc::now().timestamp() + 3600,
            }),
        );

        assert_eq!(
            verifier.verify(&token).unwrap_err(),
            TokenError::NotAuthenticated("anon".to_string())
        );
    }

    #[test]
    fn test_verify_rejects_wrong_audience() {
        let verifier = SupabaseJwtVerifier::new(TEST_JWT_SECRET);
        let token = signed_token(
            TEST_JWT_SECRET,
            json!({
                "sub": Uuid::new_v4(),
                "role": "authenticated",
                "aud": "storage",
                "exp": Utc::now().timestamp() + 3600,
            }),
        );

        assert_eq!(
            verifier.verify(&token).unwrap_err(),
            TokenError::InvalidAudience
        );
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let verifier = SupabaseJwtVerifier::new(TEST_JWT_SECRET);
        assert_eq!(
            verifier.verify("not.a.jwt").unwrap_err(),
            TokenError::Malformed
        );
    }
}
