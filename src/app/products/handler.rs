//! 商品处理器

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::Json,
    routing::get,
    Router,
};

use super::model::Product;
use crate::app::{route_not_found, AppState};
use crate::common::error::CoreError;

/// 路径中的商品 ID，解析失败时返回 JSON 错误
#[derive(Debug)]
pub struct ProductId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}

/// 商品路由，挂载在 API 前缀之下
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(list_products)
                .post(create_product)
                .fallback(route_not_found),
        )
        .route(
            "/products/:id",
            get(get_product)
                .patch(update_product)
                .delete(delete_product)
                .fallback(route_not_found),
        )
}

/// 获取全部商品
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "All products in insertion order", body = [Product])
    )
)]
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.product_service.list_products())
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Undecodable product id", body = ErrorBody),
        (status = 404, description = "Unknown product id", body = ErrorBody)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Json<Product>, CoreError> {
    let product = state.product_service.get_product(&id)?;
    Ok(Json(product))
}

/// 创建商品，`name` 与 `price` 必填
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing name or price", body = ErrorBody)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let product = state.product_service.create_product(&body)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// 部分更新商品
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Invalid field value", body = ErrorBody),
        (status = 404, description = "Unknown product id", body = ErrorBody)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    body: Bytes,
) -> Result<Json<Product>, CoreError> {
    let product = state.product_service.update_product(&id, &body)?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Unknown product id", body = ErrorBody)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<StatusCode, CoreError> {
    state.product_service.delete_product(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
