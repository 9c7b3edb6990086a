//! 实体模块

mod batch;
mod inventory_transaction;
mod item_record;
mod qa_review;
mod storage;
mod supplier;
mod supplier_product;

pub use batch::Batch;
pub use inventory_transaction::InventoryTransaction;
pub use item_record::ItemRecord;
pub use qa_review::QaReview;
pub use storage::{StorageLocation, StorageZone};
pub use supplier::Supplier;
pub use supplier_product::SupplierProduct;
