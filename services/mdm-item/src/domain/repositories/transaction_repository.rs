//! 库存事务仓储接口

use async_trait::async_trait;
use cuba_errors::AppResult;
use cuba_ports::Repository;

use crate::domain::entities::InventoryTransaction;
use crate::domain::value_objects::{BatchId, ItemCode, TransactionId};

/// 事务流水只追加，查询结果按发生时间排序
#[async_trait]
pub trait InventoryTransactionRepository: Repository<InventoryTransaction, TransactionId> {
    async fn find_by_item(&self, item_code: &ItemCode) -> AppResult<Vec<InventoryTransaction>>;

    async fn find_by_batch(&self, batch_id: &BatchId) -> AppResult<Vec<InventoryTransaction>>;
}
