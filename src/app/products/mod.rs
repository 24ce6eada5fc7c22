//! 商品目录：模型、业务服务与 HTTP 处理器

pub mod handler;
pub mod model;
pub mod seed;
pub mod service;

pub use handler::router;
pub use model::{NewProduct, Product, ProductInput, ProductPatch};
pub use service::ProductService;
