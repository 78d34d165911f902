use crate::shared::api::ApiResponse;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::web::JsonConfig;

/// Admin forms and contact messages are small; anything larger is refused.
pub const JSON_BODY_LIMIT: usize = 64 * 1024;

pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            let message = err.to_string();
            let response = match &err {
                JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                    ApiResponse::error(
                        actix_web::http::StatusCode::PAYLOAD_TOO_LARGE,
                        "PAYLOAD_TOO_LARGE",
                        &message,
                    )
                }
                JsonPayloadError::ContentType => {
                    ApiResponse::bad_request("UNSUPPORTED_CONTENT_TYPE", &message)
                }
                _ => ApiResponse::bad_request("MALFORMED_JSON", &message),
            };
            InternalError::from_response(err, response).into()
        })
}
