//! 应用层

pub mod docs;
pub mod products;
pub mod system;

use crate::common::error::CoreError;
use products::ProductService;

/// API 路径前缀，前端以此为固定的 base path
pub const API_BASE: &str = "/api";

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

/// 未匹配路由的兜底处理器
pub async fn route_not_found() -> CoreError {
    CoreError::RouteNotFound
}
