//! 商品目录前端：HTTP 客户端与列表状态

pub mod api;
pub mod view;

pub use api::{CatalogClient, ClientError, ProductPayload, DEFAULT_BASE_URL};
pub use view::{CatalogView, DraftError, ProductDraft, ViewError};
