//! OpenAPI 文档

use axum::response::Json;
use utoipa::OpenApi;

use super::products::{handler, Product, ProductInput};
use crate::common::response::ErrorBody;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pot Shop Catalog API",
        version = "1.0.0",
        description = "CRUD API over the in-memory cookware catalog"
    ),
    paths(
        handler::list_products,
        handler::get_product,
        handler::create_product,
        handler::update_product,
        handler::delete_product
    ),
    components(schemas(Product, ProductInput, ErrorBody)),
    tags((name = "products", description = "Catalog products"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
