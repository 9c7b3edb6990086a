//! 库存事务流水

use chrono::{DateTime, Utc};
use cuba_common::AuditInfo;
use cuba_domain_core::{AggregateRoot, Entity, Persistable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::enums::{QaStatus, StockEffect, TransactionType, UnitOfMeasure};
use crate::domain::services::{
    DocumentCheck, DocumentChecks, DocumentKind, DocumentRequirements, find_document_gaps,
};
use crate::domain::value_objects::{BatchId, ItemCode, LocationId, QaReviewId, SupplierId, TransactionId};

/// 库存事务
///
/// 数量按正数登记，方向由事务类型决定；盘点调整 (`ADJ-CYCLE`) 允许负数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    transaction_id: TransactionId,
    occurred_at: DateTime<Utc>,
    /// 经办人
    user: String,
    transaction_type: TransactionType,
    item_code: ItemCode,
    batch_id: Option<BatchId>,
    supplier_id: Option<SupplierId>,
    /// 供应商货号
    product_code: String,
    quantity: Decimal,
    unit: UnitOfMeasure,
    coa_provided: bool,
    sds_provided: bool,
    label_applied: bool,
    storage_location: Option<LocationId>,
    qa_status: Option<QaStatus>,
    qa_review_id: Option<QaReviewId>,
    comments: String,
    audit_info: AuditInfo,
}

impl InventoryTransaction {
    pub fn new(
        transaction_id: TransactionId,
        occurred_at: DateTime<Utc>,
        transaction_type: TransactionType,
        item_code: ItemCode,
        quantity: Decimal,
        unit: UnitOfMeasure,
    ) -> Self {
        Self {
            transaction_id,
            occurred_at,
            user: String::new(),
            transaction_type,
            item_code,
            batch_id: None,
            supplier_id: None,
            product_code: String::new(),
            quantity,
            unit,
            coa_provided: false,
            sds_provided: false,
            label_applied: false,
            storage_location: None,
            qa_status: None,
            qa_review_id: None,
            comments: String::new(),
            audit_info: AuditInfo::default(),
        }
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn item_code(&self) -> &ItemCode {
        &self.item_code
    }

    pub fn batch_id(&self) -> Option<&BatchId> {
        self.batch_id.as_ref()
    }

    pub fn supplier_id(&self) -> Option<&SupplierId> {
        self.supplier_id.as_ref()
    }

    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit(&self) -> UnitOfMeasure {
        self.unit
    }

    pub fn coa_provided(&self) -> bool {
        self.coa_provided
    }

    pub fn sds_provided(&self) -> bool {
        self.sds_provided
    }

    pub fn label_applied(&self) -> bool {
        self.label_applied
    }

    pub fn storage_location(&self) -> Option<&LocationId> {
        self.storage_location.as_ref()
    }

    pub fn qa_status(&self) -> Option<QaStatus> {
        self.qa_status
    }

    pub fn qa_review_id(&self) -> Option<&QaReviewId> {
        self.qa_review_id.as_ref()
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// 对在库数量的影响
    pub fn signed_quantity(&self) -> Decimal {
        match self.transaction_type.stock_effect() {
            StockEffect::Inbound | StockEffect::Signed => self.quantity,
            StockEffect::Outbound => -self.quantity,
            StockEffect::Neutral => Decimal::ZERO,
        }
    }

    /// 收货时缺少的强制文件；收货只登记 COA 与 SDS，规格书在 QA 审核时核对
    pub fn missing_documents(&self, requirements: &DocumentRequirements) -> Vec<DocumentKind> {
        if !self.transaction_type.is_receipt() {
            return Vec::new();
        }
        let requirements = DocumentRequirements {
            spec_required: false,
            ..*requirements
        };
        let checks = DocumentChecks {
            coa: DocumentCheck::provided(self.coa_provided),
            sds: DocumentCheck::provided(self.sds_provided),
            spec: DocumentCheck::default(),
        };
        find_document_gaps(&requirements, &checks)
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_batch(mut self, batch_id: Option<BatchId>) -> Self {
        self.batch_id = batch_id;
        self
    }

    pub fn with_supplier(mut self, supplier_id: Option<SupplierId>, product_code: impl Into<String>) -> Self {
        self.supplier_id = supplier_id;
        self.product_code = product_code.into();
        self
    }

    pub fn with_documents(mut self, coa_provided: bool, sds_provided: bool, label_applied: bool) -> Self {
        self.coa_provided = coa_provided;
        self.sds_provided = sds_provided;
        self.label_applied = label_applied;
        self
    }

    pub fn with_storage_location(mut self, location: Option<LocationId>) -> Self {
        self.storage_location = location;
        self
    }

    pub fn with_qa(mut self, qa_status: Option<QaStatus>, qa_review_id: Option<QaReviewId>) -> Self {
        self.qa_status = qa_status;
        self.qa_review_id = qa_review_id;
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }
}

impl Entity for InventoryTransaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.transaction_id
    }
}

impl Persistable for InventoryTransaction {}

impl AggregateRoot for InventoryTransaction {
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

    fn transaction(transaction_type: TransactionType, quantity: i64) -> InventoryTransaction {
        InventoryTransaction::new(
            TransactionId::new("TX-0001").unwrap(),
            Utc::now(),
            transaction_type,
            ItemCode::new("CHE-SOL-0001").unwrap(),
            Decimal::from(quantity),
            UnitOfMeasure::Kilogram,
        )
    }

    #[test]
    fn test_signed_quantity_follows_type() {
        assert_eq!(transaction(TransactionType::PurchaseReceipt, 5).signed_quantity(), Decimal::from(5));
        assert_eq!(transaction(TransactionType::IssueToManufacturing, 5).signed_quantity(), Decimal::from(-5));
        assert_eq!(transaction(TransactionType::CycleCountAdjustment, -2).signed_quantity(), Decimal::from(-2));
        assert_eq!(transaction(TransactionType::Transfer, 5).signed_quantity(), Decimal::ZERO);
    }

    #[test]
    fn test_receipt_missing_documents() {
        let requirements = DocumentRequirements {
            coa_mandatory: true,
            sds_mandatory: true,
            spec_required: true,
        };
        let receipt = transaction(TransactionType::PurchaseReceipt, 5).with_documents(true, false, true);
        assert_eq!(receipt.missing_documents(&requirements), vec![DocumentKind::Sds]);

        let issue = transaction(TransactionType::IssueToQc, 1);
        assert!(issue.missing_documents(&requirements).is_empty());
    }
}
