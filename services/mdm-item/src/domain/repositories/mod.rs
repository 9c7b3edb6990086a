//! 仓储接口模块

use std::sync::Arc;

mod batch_repository;
mod item_repository;
mod qa_review_repository;
mod storage_repository;
mod supplier_product_repository;
mod supplier_repository;
mod transaction_repository;

pub use batch_repository::BatchRepository;
pub use item_repository::ItemRepository;
pub use qa_review_repository::QaReviewRepository;
pub use storage_repository::{StorageLocationRepository, StorageZoneRepository};
pub use supplier_product_repository::SupplierProductRepository;
pub use supplier_repository::SupplierRepository;
pub use transaction_repository::InventoryTransactionRepository;

/// 服务使用的全部仓储
#[derive(Clone)]
pub struct Repositories {
    pub items: Arc<dyn ItemRepository>,
    pub suppliers: Arc<dyn SupplierRepository>,
    pub supplier_products: Arc<dyn SupplierProductRepository>,
    pub batches: Arc<dyn BatchRepository>,
    pub storage_zones: Arc<dyn StorageZoneRepository>,
    pub storage_locations: Arc<dyn StorageLocationRepository>,
    pub qa_reviews: Arc<dyn QaReviewRepository>,
    pub transactions: Arc<dyn InventoryTransactionRepository>,
}
