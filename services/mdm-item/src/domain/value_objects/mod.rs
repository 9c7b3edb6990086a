//! 值对象模块

mod codes;

pub use codes::{
    BatchId, CodeError, ItemCode, LocationId, QaReviewId, StorageZoneId, SupplierId,
    SupplierProductKey, TransactionId,
};
