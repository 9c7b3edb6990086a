//! 物料仓储接口

use async_trait::async_trait;
use cuba_errors::AppResult;
use cuba_ports::Repository;

use crate::domain::entities::ItemRecord;
use crate::domain::enums::Category;
use crate::domain::value_objects::ItemCode;

/// 物料仓储接口
#[async_trait]
pub trait ItemRepository: Repository<ItemRecord, ItemCode> {
    /// 全部物料，按编码排序
    async fn list_all(&self) -> AppResult<Vec<ItemRecord>>;

    /// 按分类查找
    async fn find_by_category(&self, category: Category) -> AppResult<Vec<ItemRecord>>;
}
