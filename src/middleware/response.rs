use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Wrapper for success responses. A bare resource is returned as-is; a message
/// wraps it as `{message, data}` matching the source API's envelope.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: Option<String>,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Plain 200 with the resource as the body
    pub fn success(data: T) -> Self {
        Self {
            data,
            message: None,
            status_code: StatusCode::OK,
        }
    }

    /// 200 with `{message, data}`
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            data,
            message: Some(message.into()),
            status_code: StatusCode::OK,
        }
    }

    /// 201 with `{message, data}`
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            data,
            message: Some(message.into()),
            status_code: StatusCode::CREATED,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Failed to serialize response data" })),
                )
                    .into_response();
            }
        };

        let body = match self.message {
            Some(message) => json!({ "message": message, "data": data_value }),
            None => data_value,
        };

        (self.status_code, Json(body)).into_response()
    }
}

/// Handler return type: success envelope or taxonomy error
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
