//! 核心中间件模块

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;

use super::error::CoreError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 为记录日志而缓冲的请求体上限，与 axum 默认的请求体限制一致
const MAX_LOGGED_BODY: usize = 2 * 1024 * 1024;

/// 请求日志中间件
///
/// 记录方法、路径、状态码和耗时；POST/PUT/PATCH 请求额外记录请求体。
/// 每个请求分配一个 request id，并通过 `x-request-id` 响应头返回。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let req = if matches!(method, Method::POST | Method::PUT | Method::PATCH) {
        let (parts, body) = req.into_parts();
        let bytes = match to_bytes(body, MAX_LOGGED_BODY).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(request_id = %request_id, error = %err, "failed to buffer request body");
                return CoreError::MalformedBody("failed to read request body".to_string())
                    .into_response();
            }
        };
        info!(
            request_id = %request_id,
            body = %String::from_utf8_lossy(&bytes),
            "{} {} body", method, path
        );
        Request::from_parts(parts, Body::from(bytes))
    } else {
        req
    };

    let mut response = next.run(req).await;
    let status = response.status();

    info!(
        request_id = %request_id,
        status = status.as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "[{}] {} {}", method, status.as_u16(), path
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// 请求超时中间件，超时后返回 408 与 JSON 错误体
pub async fn timeout_middleware(State(limit): State<Duration>, req: Request, next: Next) -> Response {
    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(limit_ms = limit.as_millis() as u64, "request timed out");
            CoreError::Timeout.into_response()
        }
    }
}
