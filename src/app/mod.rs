//! 应用层：商品目录与图片上传

pub mod images;
pub mod products;

use images::storage::ImageStorage;
use products::service::ProductService;

/// 处理器共享的应用状态
#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
    pub images: ImageStorage,
}

impl AppState {
    /// 带初始商品数据的状态
    pub fn seeded(images: ImageStorage) -> Self {
        Self {
            product_service: ProductService::seeded(images.clone()),
            images,
        }
    }
}
