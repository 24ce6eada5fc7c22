//! 核心错误处理模块

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::ErrorBody;

/// 对外返回的统一内部错误信息，不泄露细节
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 请求字段缺失或取值无效
    #[error("{0}")]
    Validation(String),
    /// 请求体不是 JSON 对象
    #[error("{0}")]
    MalformedBody(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    /// 路径参数无法解析，例如 ID 不是合法的 UTF-8
    #[error("{0}")]
    InvalidPath(String),
    #[error("route not found")]
    RouteNotFound,
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::Validation(_) | CoreError::MalformedBody(_) | CoreError::InvalidPath(_) => {
                StatusCode::BAD_REQUEST
            }
            CoreError::NotFound(_) | CoreError::RouteNotFound => StatusCode::NOT_FOUND,
            CoreError::Timeout => StatusCode::REQUEST_TIMEOUT,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PathRejection> for CoreError {
    fn from(rejection: PathRejection) -> Self {
        // 缺少路径参数属于路由配置错误
        if rejection.status().is_server_error() {
            CoreError::Internal(rejection.body_text())
        } else {
            CoreError::InvalidPath(rejection.body_text())
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            CoreError::Internal(detail) => {
                error!(detail = %detail, "unhandled error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: CoreError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let (status, body) = render(CoreError::Validation("name and price are required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "name and price are required" }));

        let (status, body) = render(CoreError::NotFound("product")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "product not found");

        let (status, body) = render(CoreError::RouteNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "route not found");

        let (status, body) = render(CoreError::Timeout).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["error"], "request timed out");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let (status, body) = render(CoreError::Internal("store exploded at line 42".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": INTERNAL_ERROR_MESSAGE }));
    }
}
