use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    sync::Arc,
};
use uuid::Uuid;

use crate::modules::admin::application::ports::outgoing::{AccessTokenVerifier, TokenError};
use crate::shared::api::ApiResponse;

/// A signed-in backend session. The raw token is kept so writes run as this user.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub user_id: Uuid,
    pub access_token: String,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AdminSession {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let verifier = match req.app_data::<web::Data<Arc<dyn AccessTokenVerifier + Send + Sync>>>()
        {
            Some(verifier) => verifier,
            None => {
                tracing::error!("Access token verifier is not registered");
                return ready(Err(create_api_error(ApiResponse::internal_error())));
            }
        };

        let token = match extract_token_from_header(req) {
            Some(t) => t,
            None => {
                return ready(Err(create_api_error(ApiResponse::unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                ))));
            }
        };

        match verifier.verify(&token) {
            Ok(claims) => ready(Ok(AdminSession {
                user_id: claims.sub,
                access_token: token,
            })),
            Err(TokenError::Expired) => ready(Err(create_api_error(ApiResponse::unauthorized(
                "TOKEN_EXPIRED",
                "Session has expired",
            )))),
            Err(TokenError::NotAuthenticated(_)) => ready(Err(create_api_error(
                ApiResponse::forbidden("NOT_SIGNED_IN", "A signed-in session is required"),
            ))),
            Err(_) => ready(Err(create_api_error(ApiResponse::unauthorized(
                "INVALID_TOKEN",
                "Invalid or expired token",
            )))),
        }
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}
