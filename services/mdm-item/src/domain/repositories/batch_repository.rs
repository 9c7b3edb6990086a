//! 批次仓储接口

use async_trait::async_trait;
use chrono::NaiveDate;
use cuba_errors::AppResult;
use cuba_ports::Repository;

use crate::domain::entities::Batch;
use crate::domain::value_objects::{BatchId, ItemCode};

#[async_trait]
pub trait BatchRepository: Repository<Batch, BatchId> {
    async fn find_by_item(&self, item_code: &ItemCode) -> AppResult<Vec<Batch>>;

    /// 效期不晚于 `on_or_before` 的批次（含已过期）
    async fn find_expiring(&self, on_or_before: NaiveDate) -> AppResult<Vec<Batch>>;
}
