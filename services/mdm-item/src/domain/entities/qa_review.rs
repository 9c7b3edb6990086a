//! 批次 QA 审核记录

use chrono::NaiveDate;
use cuba_common::AuditInfo;
use cuba_domain_core::{AggregateRoot, Entity, Persistable};
use cuba_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::domain::enums::{DocumentMatch, QaStatus, ReviewOutcome};
use crate::domain::services::{
    DocumentChecks, DocumentKind, DocumentRequirements, find_document_gaps,
};
use crate::domain::value_objects::{BatchId, ItemCode, QaReviewId, SupplierId};

/// QA 审核记录
///
/// 文件缺口在 [`QaReview::evaluate_documents`] 中按物料的文件要求计算并随记录保存。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaReview {
    qa_review_id: QaReviewId,
    batch_id: BatchId,
    item_code: ItemCode,
    supplier_id: Option<SupplierId>,
    documents: DocumentChecks,
    label_attached: bool,
    document_match: DocumentMatch,
    outcome: ReviewOutcome,
    reviewer: String,
    review_date: NaiveDate,
    /// 审核文件存档链接
    qa_file_link: String,
    comments: String,
    document_gaps: Vec<DocumentKind>,
    audit_info: AuditInfo,
}

impl QaReview {
    pub fn new(
        qa_review_id: QaReviewId,
        batch_id: BatchId,
        item_code: ItemCode,
        outcome: ReviewOutcome,
        review_date: NaiveDate,
    ) -> Self {
        Self {
            qa_review_id,
            batch_id,
            item_code,
            supplier_id: None,
            documents: DocumentChecks::default(),
            label_attached: false,
            document_match: DocumentMatch::No,
            outcome,
            reviewer: String::new(),
            review_date,
            qa_file_link: String::new(),
            comments: String::new(),
            document_gaps: Vec::new(),
            audit_info: AuditInfo::default(),
        }
    }

    pub fn qa_review_id(&self) -> &QaReviewId {
        &self.qa_review_id
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

    pub fn documents(&self) -> &DocumentChecks {
        &self.documents
    }

    pub fn label_attached(&self) -> bool {
        self.label_attached
    }

    pub fn document_match(&self) -> DocumentMatch {
        self.document_match
    }

    pub fn outcome(&self) -> ReviewOutcome {
        self.outcome
    }

    pub fn reviewer(&self) -> &str {
        &self.reviewer
    }

    pub fn review_date(&self) -> NaiveDate {
        self.review_date
    }

    pub fn qa_file_link(&self) -> &str {
        &self.qa_file_link
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn document_gaps(&self) -> &[DocumentKind] {
        &self.document_gaps
    }

    /// 审核后批次应处的 QA 状态
    pub fn resulting_qa_status(&self) -> QaStatus {
        self.outcome.resulting_qa_status()
    }

    pub fn with_supplier(mut self, supplier_id: Option<SupplierId>) -> Self {
        self.supplier_id = supplier_id;
        self
    }

    pub fn with_documents(mut self, documents: DocumentChecks, label_attached: bool, document_match: DocumentMatch) -> Self {
        self.documents = documents;
        self.label_attached = label_attached;
        self.document_match = document_match;
        self
    }

    pub fn with_reviewer(mut self, reviewer: impl Into<String>) -> Self {
        self.reviewer = reviewer.into();
        self
    }

    pub fn with_file_link(mut self, qa_file_link: impl Into<String>) -> Self {
        self.qa_file_link = qa_file_link.into();
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn evaluate_documents(&mut self, requirements: &DocumentRequirements) {
        self.document_gaps = find_document_gaps(requirements, &self.documents);
    }

    /// 放行结论要求强制文件齐全且批号一致
    pub fn ensure_outcome_supported(&self) -> AppResult<()> {
        if self.outcome != ReviewOutcome::Approved {
            return Ok(());
        }
        if !self.document_gaps.is_empty() {
            let missing: Vec<&str> = self.document_gaps.iter().map(DocumentKind::code).collect();
            return Err(AppError::failed_precondition(format!(
                "batch {} cannot be approved: missing or mismatched {}",
                self.batch_id,
                missing.join(", ")
            )));
        }
        if self.document_match != DocumentMatch::Yes {
            return Err(AppError::failed_precondition(format!(
                "batch {} cannot be approved: document match is {}",
                self.batch_id, self.document_match
            )));
        }
        Ok(())
    }
}

impl Entity for QaReview {
    type Id = QaReviewId;

    fn id(&self) -> &Self::Id {
        &self.qa_review_id
    }
}

impl Persistable for QaReview {}

impl AggregateRoot for QaReview {
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
    use crate::domain::services::DocumentCheck;

    fn review(outcome: ReviewOutcome) -> QaReview {
        QaReview::new(
            QaReviewId::new("QA-0001").unwrap(),
            BatchId::new("LOT-1").unwrap(),
            ItemCode::new("CHE-SOL-0001").unwrap(),
            outcome,
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        )
    }

    fn coa_only() -> DocumentRequirements {
        DocumentRequirements {
            coa_mandatory: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_approval_blocked_by_missing_coa() {
        let mut review = review(ReviewOutcome::Approved).with_documents(
            DocumentChecks::default(),
            true,
            DocumentMatch::Yes,
        );
        review.evaluate_documents(&coa_only());

        assert_eq!(review.document_gaps(), &[DocumentKind::Coa]);
        assert!(matches!(
            review.ensure_outcome_supported(),
            Err(AppError::FailedPrecondition(_))
        ));
    }

    #[test]
    fn test_approval_blocked_by_partial_match() {
        let documents = DocumentChecks {
            coa: DocumentCheck::provided(true),
            ..Default::default()
        };
        let mut review = review(ReviewOutcome::Approved).with_documents(documents, true, DocumentMatch::Partial);
        review.evaluate_documents(&coa_only());

        assert!(review.document_gaps().is_empty());
        assert!(review.ensure_outcome_supported().is_err());
    }

    #[test]
    fn test_rejection_needs_no_documents() {
        let mut review = review(ReviewOutcome::Rejected);
        review.evaluate_documents(&coa_only());

        assert!(review.ensure_outcome_supported().is_ok());
        assert_eq!(review.resulting_qa_status(), QaStatus::Rejected);
    }
}
