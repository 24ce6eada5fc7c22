//! 前端状态：商品表单与本地商品列表
//!
//! 本地列表只在服务端确认后才变化。

use super::api::{CatalogClient, ClientError, ProductPayload};
use crate::app::products::{model::DEFAULT_CATEGORY, Product};

/// 表单校验错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("enter a product name")]
    MissingName,
    #[error("enter a valid price")]
    InvalidPrice,
}

/// 商品编辑表单，字段保持用户输入的原始文本
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
        }
    }
}

impl ProductDraft {
    /// 校验表单并生成请求体：名称必填，价格必须大于 0
    pub fn validate(&self) -> Result<ProductPayload, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }

        let price = match self.price.trim().parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => price,
            _ => return Err(DraftError::InvalidPrice),
        };

        let category = match self.category.trim() {
            "" => DEFAULT_CATEGORY,
            category => category,
        };

        let quantity = match self.quantity.trim().parse::<f64>() {
            Ok(q) if q.is_finite() && q > 0.0 => q.trunc() as u64,
            _ => 0,
        };

        Ok(ProductPayload {
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            description: Some(self.description.trim().to_string()),
            price: Some(price),
            quantity: Some(quantity),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Invalid(#[from] DraftError),
    #[error("failed to load products: {0}")]
    Load(#[source] ClientError),
    #[error("failed to save product: {0}")]
    Save(#[source] ClientError),
    #[error("failed to delete product: {0}")]
    Delete(#[source] ClientError),
}

/// 商品列表视图
#[derive(Debug)]
pub struct CatalogView {
    client: CatalogClient,
    products: Vec<Product>,
}

impl CatalogView {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            products: Vec::new(),
        }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// 从服务端重新加载全部商品
    pub async fn load(&mut self) -> Result<&[Product], ViewError> {
        self.products = self.client.list_products().await.map_err(ViewError::Load)?;
        Ok(&self.products)
    }

    /// 创建商品并追加到本地列表末尾
    pub async fn create(&mut self, draft: &ProductDraft) -> Result<Product, ViewError> {
        let payload = draft.validate()?;
        let product = self
            .client
            .create_product(&payload)
            .await
            .map_err(ViewError::Save)?;
        self.products.push(product.clone());
        Ok(product)
    }

    /// 更新商品并替换本地列表中的对应项
    pub async fn update(&mut self, id: &str, draft: &ProductDraft) -> Result<Product, ViewError> {
        let payload = draft.validate()?;
        let product = self
            .client
            .update_product(id, &payload)
            .await
            .map_err(ViewError::Save)?;
        for entry in self.products.iter_mut().filter(|p| p.id == id) {
            *entry = product.clone();
        }
        Ok(product)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ViewError> {
        self.client
            .delete_product(id)
            .await
            .map_err(ViewError::Delete)?;
        self.products.retain(|p| p.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, price: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price: price.to_string(),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn test_draft_defaults() {
        let payload = ProductDraft {
            description: "  Steel  ".to_string(),
            quantity: "abc".to_string(),
            ..draft("  Pan ", "100")
        }
        .validate()
        .unwrap();

        assert_eq!(payload.name.as_deref(), Some("Pan"));
        assert_eq!(payload.category.as_deref(), Some(DEFAULT_CATEGORY));
        assert_eq!(payload.description.as_deref(), Some("Steel"));
        assert_eq!(payload.price, Some(100.0));
        assert_eq!(payload.quantity, Some(0));
    }

    #[test]
    fn test_draft_rejects_missing_fields() {
        assert_eq!(draft("   ", "100").validate(), Err(DraftError::MissingName));
        assert_eq!(draft("Pan", "").validate(), Err(DraftError::InvalidPrice));
        assert_eq!(draft("Pan", "0").validate(), Err(DraftError::InvalidPrice));
        assert_eq!(draft("Pan", "-3").validate(), Err(DraftError::InvalidPrice));
        assert_eq!(draft("Pan", "cheap").validate(), Err(DraftError::InvalidPrice));
    }

    #[test]
    fn test_draft_from_product() {
        let product = Product {
            id: "abc123".to_string(),
            name: "Wok".to_string(),
            category: "Frying pans".to_string(),
            description: String::new(),
            price: 2800.0,
            quantity: 9,
        };
        let payload = ProductDraft::from(&product).validate().unwrap();
        assert_eq!(payload.price, Some(2800.0));
        assert_eq!(payload.quantity, Some(9));
        assert_eq!(payload.category.as_deref(), Some("Frying pans"));
    }
}
