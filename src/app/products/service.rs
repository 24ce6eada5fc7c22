//! 商品业务服务

use std::sync::Arc;
use tracing::{debug, info};

use super::model::{NewProduct, Product, ProductInput, ProductPatch};
use crate::common::error::CoreError;
use crate::infrastructure::store::ProductStore;

const PRODUCT: &str = "product";

#[derive(Clone)]
pub struct ProductService {
    store: Arc<ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<ProductStore>) -> Self {
        Self { store }
    }

    pub fn list_products(&self) -> Vec<Product> {
        self.store.list()
    }

    pub fn get_product(&self, id: &str) -> Result<Product, CoreError> {
        self.store
            .find_by_id(id)
            .ok_or(CoreError::NotFound(PRODUCT))
    }

    pub fn create_product(&self, body: &[u8]) -> Result<Product, CoreError> {
        let new = NewProduct::from_input(ProductInput::from_body(body)?)?;
        let product = self.store.insert(new);
        info!(id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// 未知 ID 优先返回 404，即使请求体本身也无效
    pub fn update_product(&self, id: &str, body: &[u8]) -> Result<Product, CoreError> {
        let patch = match ProductInput::from_body(body).and_then(ProductPatch::from_input) {
            Ok(patch) => patch,
            Err(_) if self.store.find_by_id(id).is_none() => {
                return Err(CoreError::NotFound(PRODUCT))
            }
            Err(err) => return Err(err),
        };

        if patch.is_empty() {
            debug!(id = %id, "empty patch");
        }

        let product = self
            .store
            .update(id, patch)
            .ok_or(CoreError::NotFound(PRODUCT))?;
        info!(id = %product.id, "product updated");
        Ok(product)
    }

    pub fn delete_product(&self, id: &str) -> Result<(), CoreError> {
        if !self.store.remove(id) {
            return Err(CoreError::NotFound(PRODUCT));
        }
        info!(id = %id, "product deleted");
        Ok(())
    }

    pub fn product_count(&self) -> usize {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> ProductService {
        ProductService::new(Arc::new(ProductStore::new(6)))
    }

    fn input(value: serde_json::Value) -> Vec<u8> {
        value.to_string().into_bytes()
    }

    #[test]
    fn test_create_and_get() {
        let service = service();
        let created = service
            .create_product(&input(json!({ "name": "Pan", "price": 100 })))
            .unwrap();

        assert_eq!(service.get_product(&created.id).unwrap(), created);
        assert_eq!(created.category, "uncategorized");
        assert_eq!(created.quantity, 0);
    }

    #[test]
    fn test_invalid_create_leaves_store_untouched() {
        let service = service();
        service
            .create_product(&input(json!({ "name": "Pan", "price": 100 })))
            .unwrap();

        for body in [json!({ "name": "Pot" }), json!({ "price": 5 }), json!({})] {
            let err = service.create_product(&input(body)).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
        assert_eq!(service.product_count(), 1);
    }

    #[test]
    fn test_update_price_zero_is_ignored() {
        let service = service();
        let created = service
            .create_product(&input(json!({ "name": "Pan", "price": 100 })))
            .unwrap();

        let unchanged = service
            .update_product(&created.id, &input(json!({ "price": 0 })))
            .unwrap();
        assert_eq!(unchanged, created);

        let unchanged = service.update_product(&created.id, &input(json!({}))).unwrap();
        assert_eq!(unchanged, created);
    }

    #[test]
    fn test_update_unknown_id_wins_over_invalid_body() {
        let service = service();
        let err = service
            .update_product("missing", &input(json!({ "price": "free" })))
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));

        let created = service
            .create_product(&input(json!({ "name": "Pan", "price": 100 })))
            .unwrap();
        let err = service
            .update_product(&created.id, &input(json!({ "price": "free" })))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = service.update_product("missing", b"{not json").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
        let err = service.update_product(&created.id, b"{not json").unwrap_err();
        assert!(matches!(err, CoreError::MalformedBody(_)));
    }

    #[test]
    fn test_delete_twice() {
        let service = service();
        let created = service
            .create_product(&input(json!({ "name": "Pan", "price": 100 })))
            .unwrap();

        assert!(service.delete_product(&created.id).is_ok());
        assert!(matches!(
            service.delete_product(&created.id),
            Err(CoreError::NotFound(_))
        ));
        assert!(matches!(
            service.get_product(&created.id),
            Err(CoreError::NotFound(_))
        ));
    }
}
