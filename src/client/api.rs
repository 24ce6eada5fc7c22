//! 商品目录 HTTP 客户端

use reqwest::{header, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::app::products::Product;
use crate::common::response::ErrorBody;

/// 默认的 API 地址
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(err) => err.status(),
            ClientError::Api { status, .. } => Some(*status),
        }
    }
}

/// 创建与更新时发送的请求体，未设置的字段不会发送
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self.http.get(self.url("/products")).send().await?;
        decode(response).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        let response = self.http.get(self.product_url(id)).send().await?;
        decode(response).await
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ClientError> {
        let response = self
            .http
            .post(self.url("/products"))
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update_product(
        &self,
        id: &str,
        payload: &ProductPayload,
    ) -> Result<Product, ClientError> {
        let response = self
            .http
            .patch(self.product_url(id))
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.product_url(id)).send().await?;
        check(response).await.map(drop)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn product_url(&self, id: &str) -> String {
        self.url(&format!("/products/{id}"))
    }
}

/// 非 2xx 响应转换为 `ClientError::Api`，优先使用服务端返回的错误信息
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        });

    Err(ClientError::Api { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    Ok(check(response).await?.json::<T>().await?)
}
