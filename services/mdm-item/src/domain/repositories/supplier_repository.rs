//! 供应商仓储接口

use async_trait::async_trait;
use chrono::NaiveDate;
use cuba_errors::AppResult;
use cuba_ports::Repository;

use crate::domain::entities::Supplier;
use crate::domain::value_objects::SupplierId;

#[async_trait]
pub trait SupplierRepository: Repository<Supplier, SupplierId> {
    async fn list_all(&self) -> AppResult<Vec<Supplier>>;

    /// 下次复审日期不晚于 `on_or_before` 的供应商
    async fn find_due_for_review(&self, on_or_before: NaiveDate) -> AppResult<Vec<Supplier>>;
}
