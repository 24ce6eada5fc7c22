//! 内存商品存储

use rand::{distributions::Alphanumeric, Rng};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::app::products::model::{NewProduct, Product, ProductPatch, DEFAULT_CATEGORY};

/// 按插入顺序保存商品的内存存储
///
/// 所有操作都在同一把锁内完成，多线程运行时下写操作互斥。
#[derive(Debug)]
pub struct ProductStore {
    products: Mutex<Vec<Product>>,
    id_length: usize,
}

impl ProductStore {
    pub fn new(id_length: usize) -> Self {
        Self {
            products: Mutex::new(Vec::new()),
            id_length,
        }
    }

    /// 创建存储并依次写入初始商品
    pub fn with_products(id_length: usize, seed: impl IntoIterator<Item = NewProduct>) -> Self {
        let store = Self::new(id_length);
        for product in seed {
            store.insert(product);
        }
        store
    }

    pub fn list(&self) -> Vec<Product> {
        self.lock().clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Product> {
        self.lock().iter().find(|p| p.id == id).cloned()
    }

    pub fn insert(&self, new: NewProduct) -> Product {
        let mut products = self.lock();
        let product = Product {
            id: self.generate_id(&products),
            name: new.name,
            category: new.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            description: new.description.unwrap_or_default(),
            price: new.price,
            quantity: new.quantity,
        };
        products.push(product.clone());
        product
    }

    pub fn update(&self, id: &str, patch: ProductPatch) -> Option<Product> {
        let mut products = self.lock();
        let product = products.iter_mut().find(|p| p.id == id)?;
        patch.apply_to(product);
        Some(product.clone())
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut products = self.lock();
        let before = products.len();
        products.retain(|p| p.id != id);
        products.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // 锁内没有会 panic 的操作，中毒时数据仍然完整
    fn lock(&self) -> MutexGuard<'_, Vec<Product>> {
        self.products.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 生成随机字母数字 ID，与已有 ID 冲突时重新生成
    fn generate_id(&self, existing: &[Product]) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(self.id_length)
                .map(char::from)
                .collect();
            if !existing.iter().any(|p| p.id == id) {
                return id;
            }
        }
    }
}
