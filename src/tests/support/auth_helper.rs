use std::sync::Arc;

use actix_web::web;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

use crate::modules::admin::adapter::outgoing::SupabaseJwtVerifier;
use crate::modules::admin::application::ports::outgoing::AccessTokenVerifier;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn signed_token(secret: &str, claims: serde_json::Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// A valid signed-in session for `user_id`, good for an hour.
pub fn session_token(user_id: Uuid) -> String {
    signed_token(
        TEST_JWT_SECRET,
        json!({
            "sub": user_id,
            "role": "authenticated",
            "aud": "authenticated",
            "exp": Utc::now().timestamp() + 3600,
            "email": "admin@example.com",
        }),
    )
}

pub fn bearer(user_id: Uuid) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", session_token(user_id)))
}

pub fn verifier_data() -> web::Data<Arc<dyn AccessTokenVerifier + Send + Sync>> {
    let verifier: Arc<dyn AccessTokenVerifier + Send + Sync> =
        Arc::new(SupabaseJwtVerifier::new(TEST_JWT_SECRET));
    web::Data::new(verifier)
}
