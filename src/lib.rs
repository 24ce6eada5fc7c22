//! # 锅具商店商品目录
//!
//! 基于 Axum 的商品目录服务：
//! - 内存商品存储，按插入顺序保存
//! - 商品 CRUD REST API 与 OpenAPI 文档
//! - 供前端使用的 HTTP 客户端与列表状态

pub mod app;
pub mod client;
pub mod config;
pub mod common;
pub mod infrastructure;
pub mod server;

pub use app::products::{Product, ProductService};
pub use config::{Config, ConfigError};
pub use infrastructure::store::ProductStore;
