// src/api/schemas.rs
use serde::Serialize;
use utoipa::ToSchema;

/// Envelope of every 2xx body
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

/// Envelope of every 4xx/5xx body
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
    /// Rejected admin forms echo the editor session here so values survive
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable code, e.g. `INVALID_FORM` or `REMOTE_TABLE_ERROR`
    #[schema(example = "REMOTE_TABLE_ERROR")]
    pub code: String,

    #[schema(example = "Network error: connection refused")]
    pub message: String,
}
