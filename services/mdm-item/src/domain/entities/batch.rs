//! 批次实体

use chrono::NaiveDate;
use cuba_common::AuditInfo;
use cuba_domain_core::{AggregateRoot, Entity, Persistable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::enums::{BatchSource, BatchType, QaStatus};
use crate::domain::services::ExpiryStatus;
use crate::domain::value_objects::{BatchId, ItemCode, LocationId, SupplierId};

/// 批次
///
/// 新登记批次一律为待检状态，QA 结论通过 [`Batch::set_qa_status`] 记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    batch_id: BatchId,
    item_code: ItemCode,
    /// 外购批次的供应商
    supplier_id: Option<SupplierId>,
    source: BatchSource,
    batch_type: BatchType,
    quantity: Decimal,
    received_on: Option<NaiveDate>,
    manufactured_on: Option<NaiveDate>,
    expiry_date: Option<NaiveDate>,
    qa_status: QaStatus,
    #[serde(default)]
    storage_location: Option<LocationId>,
    notes: String,
    audit_info: AuditInfo,
}

impl Batch {
    pub fn new(batch_id: BatchId, item_code: ItemCode, source: BatchSource, quantity: Decimal) -> Self {
        Self {
            batch_id,
            item_code,
            supplier_id: None,
            source,
            batch_type: BatchType::Production,
            quantity,
            received_on: None,
            manufactured_on: None,
            expiry_date: None,
            qa_status: QaStatus::Pending,
            storage_location: None,
            notes: String::new(),
            audit_info: AuditInfo::default(),
        }
    }

    pub fn batch_id(&self) -> &BatchId {
        &self.batch_id
    }

    pub fn item_code(&self) -> &ItemCode {
        &self.item_code
    }

    pub fn supplier_id(&self) -> Option<&SupplierId> {
        self.supplier_id.as_ref()
    }

    pub fn source(&self) -> BatchSource {
        self.source
    }

    pub fn batch_type(&self) -> BatchType {
        self.batch_type
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn received_on(&self) -> Option<NaiveDate> {
        self.received_on
    }

    pub fn manufactured_on(&self) -> Option<NaiveDate> {
        self.manufactured_on
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    pub fn qa_status(&self) -> QaStatus {
        self.qa_status
    }

    pub fn storage_location(&self) -> Option<&LocationId> {
        self.storage_location.as_ref()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// 无效期的批次返回 `None`
    pub fn expiry_status(&self, today: NaiveDate, soon_days: u32, warning_days: u32) -> Option<ExpiryStatus> {
        self.expiry_date
            .map(|expiry| ExpiryStatus::classify(expiry, today, soon_days, warning_days))
    }

    pub fn with_supplier(mut self, supplier_id: Option<SupplierId>) -> Self {
        self.supplier_id = supplier_id;
        self
    }

    pub fn with_batch_type(mut self, batch_type: BatchType) -> Self {
        self.batch_type = batch_type;
        self
    }

    pub fn with_dates(
        mut self,
        received_on: Option<NaiveDate>,
        manufactured_on: Option<NaiveDate>,
        expiry_date: Option<NaiveDate>,
    ) -> Self {
        self.received_on = received_on;
        self.manufactured_on = manufactured_on;
        self.expiry_date = expiry_date;
        self
    }

    pub fn with_storage_location(mut self, location: Option<LocationId>) -> Self {
        self.storage_location = location;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn set_qa_status(&mut self, status: QaStatus) {
        self.qa_status = status;
    }

    /// 移库；库区兼容性由调用方校验
    pub fn move_to(&mut self, location: LocationId) {
        self.storage_location = Some(location);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }
}

impl Entity for Batch {
    type Id = BatchId;

    fn id(&self) -> &Self::Id {
        &self.batch_id
    }
}

impl Persistable for Batch {}

impl AggregateRoot for Batch {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_batch_is_pending() {
        let batch = Batch::new(
            BatchId::new("LOT-2024/001").unwrap(),
            ItemCode::new("CHE-SOL-0001").unwrap(),
            BatchSource::External,
            Decimal::from_str("12.5").unwrap(),
        );
        assert_eq!(batch.qa_status(), QaStatus::Pending);
        assert!(batch.storage_location().is_none());
        assert_eq!(batch.expiry_status(date(2024, 1, 1), 7, 30), None);
    }

    #[test]
    fn test_expiry_status() {
        let batch = Batch::new(
            BatchId::new("LOT-1").unwrap(),
            ItemCode::new("CHE-SOL-0001").unwrap(),
            BatchSource::Internal,
            Decimal::ONE,
        )
        .with_dates(None, None, Some(date(2024, 3, 10)));

        assert_eq!(batch.expiry_status(date(2024, 3, 5), 7, 30), Some(ExpiryStatus::ExpiringSoon));
        assert_eq!(batch.expiry_status(date(2024, 3, 11), 7, 30), Some(ExpiryStatus::Expired));
    }

    #[test]
    fn test_move_to_location() {
        let mut batch = Batch::new(
            BatchId::new("LOT-2").unwrap(),
            ItemCode::new("CHE-SOL-0001").unwrap(),
            BatchSource::External,
            Decimal::ONE,
        )
        .with_storage_location(Some(LocationId::new("A-01").unwrap()));
        batch.move_to(LocationId::new("B-02").unwrap());
        assert_eq!(batch.storage_location().map(|l| l.as_str()), Some("B-02"));
    }
}
