//! Uniform `{ success, message, data, statusCode? }` envelope.
//!
//! Every endpoint answers with this shape, on success and on failure, so
//! clients branch on `success` rather than on transport errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, message: String::new(), data, status_code: None }
    }
}

impl ApiResponse<Value> {
    /// Success with an informational note and an empty list, used when a
    /// delete matched nothing.
    pub fn soft_miss(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), data: json!([]), status_code: None }
    }

    pub fn error(message: impl Into<String>, status: StatusCode) -> Self {
        Self { success: false, message: message.into(), data: json!({}), status_code: Some(status.as_u16()) }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self
            .status_code
            .and_then(|c| StatusCode::from_u16(c).ok())
            .unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdBody;

    #[test]
    fn ok_has_empty_message_and_no_status() {
        let v = serde_json::to_value(ApiResponse::ok(IdBody { id: 3 })).unwrap();
        assert_eq!(v, json!({"success": true, "message": "", "data": {"id": 3}}));
    }

    #[test]
    fn soft_miss_is_successful_with_empty_data() {
        let v = serde_json::to_value(ApiResponse::soft_miss("Category not found")).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["message"], "Category not found");
        assert_eq!(v["data"], json!([]));
        assert!(v.get("statusCode").is_none());
    }

    #[test]
    fn error_carries_status_code() {
        let v = serde_json::to_value(ApiResponse::error("Product not exist", StatusCode::NOT_FOUND)).unwrap();
        assert_eq!(v, json!({"success": false, "message": "Product not exist", "data": {}, "statusCode": 404}));
    }

    #[test]
    fn http_status_follows_envelope() {
        assert_eq!(ApiResponse::ok(1).into_response().status(), StatusCode::OK);
        let resp = ApiResponse::error("boom", StatusCode::INTERNAL_SERVER_ERROR).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
