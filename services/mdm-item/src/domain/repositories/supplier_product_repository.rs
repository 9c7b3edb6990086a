//! 供应商-物料仓储接口

use async_trait::async_trait;
use chrono::NaiveDate;
use cuba_errors::AppResult;
use cuba_ports::Repository;

use crate::domain::entities::SupplierProduct;
use crate::domain::value_objects::{ItemCode, SupplierId, SupplierProductKey};

#[async_trait]
pub trait SupplierProductRepository: Repository<SupplierProduct, SupplierProductKey> {
    /// 某物料的全部供货记录
    async fn find_by_item(&self, item_code: &ItemCode) -> AppResult<Vec<SupplierProduct>>;

    /// 某供应商的全部供货记录
    async fn find_by_supplier(&self, supplier_id: &SupplierId) -> AppResult<Vec<SupplierProduct>>;

    async fn find_due_for_review(&self, on_or_before: NaiveDate) -> AppResult<Vec<SupplierProduct>>;
}
