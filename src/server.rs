//! HTTP 服务组装与启动

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::app::{
    docs::{self, OPENAPI_PATH},
    products::{self, seed::sample_products, ProductService},
    route_not_found, system, AppState, API_BASE,
};
use crate::config::Config;
use crate::common::{
    middleware::{request_logging_middleware, timeout_middleware},
    response::panic_response,
};
use crate::infrastructure::store::ProductStore;

/// 根据配置创建应用状态，按需写入示例商品
pub fn app_state(config: &Config) -> AppState {
    let store = if config.catalog.seed_sample_data {
        ProductStore::with_products(config.catalog.id_length, sample_products())
    } else {
        ProductStore::new(config.catalog.id_length)
    };
    info!("✅ 商品存储已初始化，共 {} 个商品", store.len());

    AppState {
        product_service: ProductService::new(Arc::new(store)),
    }
}

/// 组装路由与中间件
pub fn build_router(state: AppState, config: &Config) -> anyhow::Result<Router> {
    let origin = HeaderValue::from_str(&config.cors.allowed_origin)
        .with_context(|| format!("无效的跨域来源: {}", config.cors.allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/", get(system::welcome).fallback(route_not_found))
        .route("/health", get(system::health_check).fallback(route_not_found))
        .route(OPENAPI_PATH, get(docs::openapi_json).fallback(route_not_found))
        .nest(API_BASE, products::router())
        .fallback(route_not_found)
        // 由内到外：超时、panic 兜底、请求日志、追踪、跨域
        .layer(middleware::from_fn_with_state(
            Duration::from_secs(config.http.timeout_seconds),
            timeout_middleware,
        ))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(app)
}

/// 启动服务，直到收到 Ctrl-C
pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = app_state(&config);
    let app = build_router(state, &config)?;

    let addr = config.http.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {addr}"))?;

    info!("🚀 商品目录服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    {API_BASE}/products       - 获取所有商品");
    info!("   POST   {API_BASE}/products       - 创建商品");
    info!("   GET    {API_BASE}/products/:id   - 获取商品");
    info!("   PATCH  {API_BASE}/products/:id   - 更新商品");
    info!("   DELETE {API_BASE}/products/:id   - 删除商品");
    info!("   GET    {OPENAPI_PATH}  - API 文档");
    info!("   GET    /health                - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务运行失败")?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "无法监听 Ctrl-C 信号");
        std::future::pending::<()>().await;
    }
    info!("收到停止信号，正在关闭...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let mut config = Config::default();
        config.catalog.seed_sample_data = false;
        build_router(app_state(&config), &config).unwrap()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_crud_scenario() {
        let app = test_app();

        let (status, created) =
            send(&app, "POST", "/api/products", Some(json!({ "name": "Pan", "price": 100 }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["category"], "uncategorized");
        assert_eq!(created["quantity"], 0);
        let id = created["id"].as_str().unwrap().to_string();
        let item = format!("/api/products/{id}");

        let (status, updated) = send(&app, "PATCH", &item, Some(json!({ "quantity": 5 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["quantity"], 5);
        assert_eq!(updated["price"], 100.0);

        let (status, body) = send(&app, "DELETE", &item, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(&app, "GET", &item, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "product not found" }));
    }

    #[tokio::test]
    async fn test_unrouted_requests() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/api/orders", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "route not found" }));

        let (status, body) = send(&app, "PUT", "/api/products/abc123", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "route not found" }));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let app = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_request_id_and_cors_headers() {
        let app = test_app();

        let request = Request::builder()
            .uri("/api/products")
            .header(header::ORIGIN, "http://localhost:3001")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3001"
        );
    }

    #[tokio::test]
    async fn test_docs_and_health() {
        let app = test_app();

        let (status, doc) = send(&app, "GET", OPENAPI_PATH, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/api/products"].is_object());

        let (status, health) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["products"], 0);
    }

    #[test]
    fn test_seeded_state() {
        let state = app_state(&Config::default());
        assert_eq!(state.product_service.product_count(), 10);
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let mut config = Config::default();
        config.cors.allowed_origin = "http://bad\norigin".to_string();
        assert!(build_router(app_state(&config), &config).is_err());
    }
}
