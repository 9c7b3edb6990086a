//! 内存仓储实现
//!
//! 单个 `RwLock` 串行化写入，读取返回克隆。
//! 写入前调用 [`Persistable::prepare_for_save`]，存入的始终是规范化后的副本。

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use cuba_domain_core::{Entity, Persistable};
use cuba_errors::AppResult;
use cuba_ports::Repository;
use tokio::sync::RwLock;

use crate::domain::entities::{
    Batch, InventoryTransaction, ItemRecord, QaReview, StorageLocation, StorageZone, Supplier,
    SupplierProduct,
};
use crate::domain::enums::Category;
use crate::domain::repositories::{
    BatchRepository, InventoryTransactionRepository, ItemRepository, QaReviewRepository,
    Repositories, StorageLocationRepository, StorageZoneRepository, SupplierProductRepository,
    SupplierRepository,
};
use crate::domain::value_objects::{BatchId, ItemCode, StorageZoneId, SupplierId};

/// 基于 `HashMap` 的通用内存仓储
pub struct InMemoryRepository<T: Entity> {
    records: Arc<RwLock<HashMap<T::Id, T>>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> InMemoryRepository<T>
where
    T: Entity + Clone,
    T::Id: Ord,
{
    /// 按主键排序后过滤
    async fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let records = self.records.read().await;
        let mut selected: Vec<T> = records.values().filter(|r| predicate(r)).cloned().collect();
        selected.sort_by(|a, b| a.id().cmp(b.id()));
        selected
    }
}

#[async_trait]
impl<T> Repository<T, T::Id> for InMemoryRepository<T>
where
    T: Entity + Persistable + Clone + Send + Sync + 'static,
    T::Id: Eq + Hash + Clone + Send + Sync,
{
    async fn find_by_id(&self, id: &T::Id) -> AppResult<Option<T>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn save(&self, entity: &T) -> AppResult<()> {
        let mut stored = entity.clone();
        stored.prepare_for_save();
        self.records.write().await.insert(stored.id().clone(), stored);
        Ok(())
    }

    async fn delete(&self, id: &T::Id) -> AppResult<()> {
        self.records.write().await.remove(id);
        Ok(())
    }

    async fn exists(&self, id: &T::Id) -> AppResult<bool> {
        Ok(self.records.read().await.contains_key(id))
    }
}

fn due_on_or_before(next_review_due: Option<NaiveDate>, on_or_before: NaiveDate) -> bool {
    next_review_due.is_some_and(|due| due <= on_or_before)
}

#[async_trait]
impl ItemRepository for InMemoryRepository<ItemRecord> {
    async fn list_all(&self) -> AppResult<Vec<ItemRecord>> {
        Ok(self.select(|_| true).await)
    }

    async fn find_by_category(&self, category: Category) -> AppResult<Vec<ItemRecord>> {
        Ok(self.select(|item| item.category() == category).await)
    }
}

#[async_trait]
impl SupplierRepository for InMemoryRepository<Supplier> {
    async fn list_all(&self) -> AppResult<Vec<Supplier>> {
        Ok(self.select(|_| true).await)
    }

    async fn find_due_for_review(&self, on_or_before: NaiveDate) -> AppResult<Vec<Supplier>> {
        Ok(self
            .select(|s| due_on_or_before(s.next_review_due(), on_or_before))
            .await)
    }
}

#[async_trait]
impl SupplierProductRepository for InMemoryRepository<SupplierProduct> {
    async fn find_by_item(&self, item_code: &ItemCode) -> AppResult<Vec<SupplierProduct>> {
        Ok(self.select(|sp| sp.item_code() == item_code).await)
    }

    async fn find_by_supplier(&self, supplier_id: &SupplierId) -> AppResult<Vec<SupplierProduct>> {
        Ok(self.select(|sp| sp.supplier_id() == supplier_id).await)
    }

    async fn find_due_for_review(&self, on_or_before: NaiveDate) -> AppResult<Vec<SupplierProduct>> {
        Ok(self
            .select(|sp| due_on_or_before(sp.next_review_due(), on_or_before))
            .await)
    }
}

#[async_trait]
impl BatchRepository for InMemoryRepository<Batch> {
    async fn find_by_item(&self, item_code: &ItemCode) -> AppResult<Vec<Batch>> {
        Ok(self.select(|b| b.item_code() == item_code).await)
    }

    async fn find_expiring(&self, on_or_before: NaiveDate) -> AppResult<Vec<Batch>> {
        Ok(self
            .select(|b| b.expiry_date().is_some_and(|expiry| expiry <= on_or_before))
            .await)
    }
}

#[async_trait]
impl StorageZoneRepository for InMemoryRepository<StorageZone> {
    async fn list_all(&self) -> AppResult<Vec<StorageZone>> {
        Ok(self.select(|_| true).await)
    }
}

#[async_trait]
impl StorageLocationRepository for InMemoryRepository<StorageLocation> {
    async fn find_by_zone(&self, zone_id: &StorageZoneId) -> AppResult<Vec<StorageLocation>> {
        Ok(self.select(|l| l.zone_id() == zone_id).await)
    }
}

#[async_trait]
impl QaReviewRepository for InMemoryRepository<QaReview> {
    async fn find_by_batch(&self, batch_id: &BatchId) -> AppResult<Vec<QaReview>> {
        let mut reviews = self.select(|r| r.batch_id() == batch_id).await;
        reviews.sort_by_key(|r| r.review_date());
        Ok(reviews)
    }
}

#[async_trait]
impl InventoryTransactionRepository for InMemoryRepository<InventoryTransaction> {
    async fn find_by_item(&self, item_code: &ItemCode) -> AppResult<Vec<InventoryTransaction>> {
        let mut transactions = self.select(|t| t.item_code() == item_code).await;
        transactions.sort_by_key(|t| t.occurred_at());
        Ok(transactions)
    }

    async fn find_by_batch(&self, batch_id: &BatchId) -> AppResult<Vec<InventoryTransaction>> {
        let mut transactions = self.select(|t| t.batch_id() == Some(batch_id)).await;
        transactions.sort_by_key(|t| t.occurred_at());
        Ok(transactions)
    }
}

pub type InMemoryItemRepository = InMemoryRepository<ItemRecord>;
pub type InMemorySupplierRepository = InMemoryRepository<Supplier>;
pub type InMemorySupplierProductRepository = InMemoryRepository<SupplierProduct>;
pub type InMemoryBatchRepository = InMemoryRepository<Batch>;
pub type InMemoryStorageZoneRepository = InMemoryRepository<StorageZone>;
pub type InMemoryStorageLocationRepository = InMemoryRepository<StorageLocation>;
pub type InMemoryQaReviewRepository = InMemoryRepository<QaReview>;
pub type InMemoryTransactionRepository = InMemoryRepository<InventoryTransaction>;

/// 全部使用内存实现的仓储集合
pub fn in_memory_repositories() -> Repositories {
    Repositories {
        items: Arc::new(InMemoryItemRepository::new()),
        suppliers: Arc::new(InMemorySupplierRepository::new()),
        supplier_products: Arc::new(InMemorySupplierProductRepository::new()),
        batches: Arc::new(InMemoryBatchRepository::new()),
        storage_zones: Arc::new(InMemoryStorageZoneRepository::new()),
        storage_locations: Arc::new(InMemoryStorageLocationRepository::new()),
        qa_reviews: Arc::new(InMemoryQaReviewRepository::new()),
        transactions: Arc::new(InMemoryTransactionRepository::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::{Grade, TraceabilityLevel, UnitOfMeasure};
    use cuba_domain_core::DerivedFields;

    fn item(code: &str, category: Category, subtype: &str) -> ItemRecord {
        ItemRecord::new(
            ItemCode::new(code).unwrap(),
            code,
            UnitOfMeasure::Piece,
            category,
            subtype,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_overwrites_and_lists_sorted() {
        let repo = InMemoryItemRepository::new();
        repo.save(&item("PKG-BOT-0002", Category::Packaging, "Bottle")).await.unwrap();
        repo.save(&item("PKG-BOT-0001", Category::Packaging, "Bottle")).await.unwrap();
        repo.save(&item("PKG-BOT-0001", Category::Packaging, "Cap")).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].item_record_id().as_str(), "PKG-BOT-0001");
        assert_eq!(all[0].subtype(), "Cap");
    }

    #[tokio::test]
    async fn test_find_by_category_and_delete() {
        let repo = InMemoryItemRepository::new();
        repo.save(&item("PKG-BOT-0001", Category::Packaging, "Bottle")).await.unwrap();
        repo.save(&item("STA-PEN-0001", Category::Stationery, "Marker")).await.unwrap();

        let packaging = repo.find_by_category(Category::Packaging).await.unwrap();
        assert_eq!(packaging.len(), 1);

        let code = ItemCode::new("PKG-BOT-0001").unwrap();
        repo.delete(&code).await.unwrap();
        assert!(!repo.exists(&code).await.unwrap());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_suppliers_due_for_review() {
        let repo = InMemorySupplierRepository::new();
        let reviewed = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        let mut due = Supplier::new(SupplierId::new("SUP-001").unwrap(), "A", "", "")
            .with_last_reviewed_on(Some(reviewed));
        due.recalculate_derived_fields();
        let mut never = Supplier::new(SupplierId::new("SUP-002").unwrap(), "B", "", "");
        never.recalculate_derived_fields();
        repo.save(&due).await.unwrap();
        repo.save(&never).await.unwrap();

        let cutoff = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let found = repo.find_due_for_review(cutoff).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].supplier_id().as_str(), "SUP-001");
    }

    #[tokio::test]
    async fn test_save_recomputes_item_derived_fields() {
        let repo = InMemoryItemRepository::new();
        let mut record = item("CHE-SOL-0001", Category::Chemical, "Solvent");
        record.set_grade(Grade::Usp);
        assert!(!record.derived().qa_required);

        repo.save(&record).await.unwrap();

        let stored = repo
            .find_by_id(record.item_record_id())
            .await
            .unwrap()
            .unwrap();
        assert!(stored.derived().qa_required);
        assert_eq!(stored.derived().traceability_level, TraceabilityLevel::BatchLevel);
        assert!(stored.derived().coa_mandatory);
    }

    #[tokio::test]
    async fn test_save_recomputes_supplier_review_due() {
        let repo = InMemorySupplierRepository::new();
        let reviewed = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let supplier = Supplier::new(SupplierId::new("SUP-003").unwrap(), "C", "", "")
            .with_last_reviewed_on(Some(reviewed));
        assert_eq!(supplier.next_review_due(), None);

        repo.save(&supplier).await.unwrap();

        let stored = repo.find_by_id(supplier.supplier_id()).await.unwrap().unwrap();
        assert_eq!(stored.next_review_due(), NaiveDate::from_ymd_opt(2025, 1, 14));
    }
}
