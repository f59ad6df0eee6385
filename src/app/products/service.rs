//! 商品目录服务
//!
//! 商品保存在进程内的 `Vec` 中，按插入顺序排列；每个操作在一次加锁内
//! 完成读改写。图片文件的删除先于记录修改执行，文件删除失败时记录保持不变。

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

use super::model::{NewProduct, Product, ProductInput, ProductPatch};
use super::seed::seed_products;
use crate::app::images::storage::ImageStorage;
use crate::core::error::CoreError;
use crate::utils::{unique_short_id, PRODUCT_ID_LEN};

#[derive(Clone)]
pub struct ProductService {
    products: Arc<Mutex<Vec<Product>>>,
    images: ImageStorage,
}

impl ProductService {
    /// 空目录
    pub fn new(images: ImageStorage) -> Self {
        Self {
            products: Arc::new(Mutex::new(Vec::new())),
            images,
        }
    }

    /// 带初始数据的目录
    pub fn seeded(images: ImageStorage) -> Self {
        let mut products = Vec::new();
        for new in seed_products() {
            let id = unique_short_id(PRODUCT_ID_LEN, |c| products.iter().any(|p: &Product| p.id == c));
            products.push(Product::from_new(id, new));
        }

        Self {
            products: Arc::new(Mutex::new(products)),
            images,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Product>>, CoreError> {
        self.products
            .lock()
            .map_err(|_| CoreError::internal("商品存储锁已中毒"))
    }

    fn not_found() -> CoreError {
        CoreError::not_found("Product not found")
    }

    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(self.lock()?.len())
    }

    pub fn list(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.lock()?.clone())
    }

    pub fn get(&self, id: &str) -> Result<Product, CoreError> {
        self.lock()?
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    pub fn create(&self, input: ProductInput) -> Result<Product, CoreError> {
        let new = input.validate()?;
        self.insert(new)
    }

    /// 插入已校验的商品并分配新 ID
    pub fn insert(&self, new: NewProduct) -> Result<Product, CoreError> {
        let mut products = self.lock()?;
        let id = unique_short_id(PRODUCT_ID_LEN, |c| products.iter().any(|p| p.id == c));
        let product = Product::from_new(id, new);
        products.push(product.clone());

        info!("商品已创建: {} ({})", product.id, product.name);
        Ok(product)
    }

    pub fn update(&self, id: &str, patch: ProductPatch) -> Result<Product, CoreError> {
        let mut products = self.lock()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(Self::not_found)?;

        let changes = patch.validate()?;
        if let Some(old) = changes.replaces_image_of(product) {
            self.images.remove_reference(old)?;
        }
        product.apply(changes);

        info!("商品已更新: {}", product.id);
        Ok(product.clone())
    }

    pub fn delete(&self, id: &str) -> Result<(), CoreError> {
        let mut products = self.lock()?;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(Self::not_found)?;

        if let Some(image) = &products[index].image {
            self.images.remove_reference(image)?;
        }
        let removed = products.remove(index);

        info!("商品已删除: {} ({})", removed.id, removed.name);
        Ok(())
    }
}
