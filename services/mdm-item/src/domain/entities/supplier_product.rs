//! 供应商-物料关联

use chrono::NaiveDate;
use cuba_common::AuditInfo;
use cuba_domain_core::{AggregateRoot, DerivedFields, Entity, Persistable};
use serde::{Deserialize, Serialize};

use super::ItemRecord;
use crate::domain::enums::{BatchCodeQuality, Grade, ReviewFrequency, TraceabilityLevel};
use crate::domain::services::{
    ReviewStatus, compute_detailed_traceability_level, compute_next_review_due,
};
use crate::domain::value_objects::{ItemCode, SupplierId, SupplierProductKey};

/// 某供应商供应某物料的记录
///
/// 同一 (物料, 供应商) 组合唯一。`next_review_due` 和 `is_default` 为派生字段，
/// 反序列化后重算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredSupplierProduct")]
pub struct SupplierProduct {
    key: SupplierProductKey,
    manufacturer_name: String,
    /// 供应商目录号
    product_code: String,
    grade: Grade,
    batch_code_format_known: bool,
    batch_code_quality: BatchCodeQuality,
    traceability_level: TraceabilityLevel,
    spec_sheet_url: Option<String>,

    preferred_vendor: bool,
    spec_verified: bool,
    approved: bool,

    last_reviewed_on: Option<NaiveDate>,
    review_frequency: Option<ReviewFrequency>,
    next_review_due: Option<NaiveDate>,
    is_default: bool,

    audit_info: AuditInfo,
}

impl SupplierProduct {
    pub fn new(item_code: ItemCode, supplier_id: SupplierId) -> Self {
        Self {
            key: SupplierProductKey::new(item_code, supplier_id),
            manufacturer_name: String::new(),
            product_code: String::new(),
            grade: Grade::Unspecified,
            batch_code_format_known: false,
            batch_code_quality: BatchCodeQuality::Medium,
            traceability_level: TraceabilityLevel::None,
            spec_sheet_url: None,
            preferred_vendor: false,
            spec_verified: false,
            approved: false,
            last_reviewed_on: None,
            review_frequency: Some(ReviewFrequency::SixMonths),
            next_review_due: None,
            is_default: false,
            audit_info: AuditInfo::default(),
        }
    }

    pub fn key(&self) -> &SupplierProductKey {
        &self.key
    }

    pub fn item_code(&self) -> &ItemCode {
        &self.key.item_code
    }

    pub fn supplier_id(&self) -> &SupplierId {
        &self.key.supplier_id
    }

    pub fn manufacturer_name(&self) -> &str {
        &self.manufacturer_name
    }

    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn batch_code_format_known(&self) -> bool {
        self.batch_code_format_known
    }

    pub fn batch_code_quality(&self) -> BatchCodeQuality {
        self.batch_code_quality
    }

    pub fn traceability_level(&self) -> TraceabilityLevel {
        self.traceability_level
    }

    pub fn spec_sheet_url(&self) -> Option<&str> {
        self.spec_sheet_url.as_deref()
    }

    pub fn preferred_vendor(&self) -> bool {
        self.preferred_vendor
    }

    pub fn spec_verified(&self) -> bool {
        self.spec_verified
    }

    pub fn approved(&self) -> bool {
        self.approved
    }

    pub fn last_reviewed_on(&self) -> Option<NaiveDate> {
        self.last_reviewed_on
    }

    pub fn review_frequency(&self) -> Option<ReviewFrequency> {
        self.review_frequency
    }

    pub fn next_review_due(&self) -> Option<NaiveDate> {
        self.next_review_due
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn review_status(&self, today: NaiveDate, warning_days: u32) -> ReviewStatus {
        ReviewStatus::evaluate(self.next_review_due, today, warning_days)
    }

    /// 供货等级与物料登记等级一致（物料未登记等级时不做比较）
    pub fn grade_matches_item(&self, item: &ItemRecord) -> bool {
        item.grade() == Grade::Unspecified || self.grade == item.grade()
    }

    /// 按物料 QA 要求与本供货的批号/规格核验情况给出建议追溯级别
    pub fn suggested_traceability_level(&self, item: &ItemRecord) -> TraceabilityLevel {
        compute_detailed_traceability_level(
            item.qa_required(),
            item.contamination_risk(),
            self.batch_code_format_known,
            self.spec_verified,
        )
    }

    // Builder
    pub fn with_manufacturer(mut self, manufacturer_name: impl Into<String>) -> Self {
        self.manufacturer_name = manufacturer_name.into();
        self
    }

    pub fn with_product_code(mut self, product_code: impl Into<String>) -> Self {
        self.product_code = product_code.into();
        self
    }

    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = grade;
        self
    }

    pub fn with_batch_code(mut self, format_known: bool, quality: BatchCodeQuality) -> Self {
        self.batch_code_format_known = format_known;
        self.batch_code_quality = quality;
        self
    }

    pub fn with_traceability_level(mut self, level: TraceabilityLevel) -> Self {
        self.traceability_level = level;
        self
    }

    pub fn with_spec_sheet_url(mut self, url: Option<String>) -> Self {
        self.spec_sheet_url = url;
        self
    }

    pub fn with_review(mut self, last_reviewed_on: Option<NaiveDate>, frequency: Option<ReviewFrequency>) -> Self {
        self.last_reviewed_on = last_reviewed_on;
        self.review_frequency = frequency;
        self
    }

    // Setters
    pub fn set_manufacturer(&mut self, manufacturer_name: impl Into<String>) {
        self.manufacturer_name = manufacturer_name.into();
    }

    pub fn set_product_code(&mut self, product_code: impl Into<String>) {
        self.product_code = product_code.into();
    }

    pub fn set_grade(&mut self, grade: Grade) {
        self.grade = grade;
    }

    pub fn set_batch_code(&mut self, format_known: bool, quality: BatchCodeQuality) {
        self.batch_code_format_known = format_known;
        self.batch_code_quality = quality;
    }

    pub fn set_traceability_level(&mut self, level: TraceabilityLevel) {
        self.traceability_level = level;
    }

    pub fn set_spec_sheet_url(&mut self, url: Option<String>) {
        self.spec_sheet_url = url;
    }

    pub fn set_preferred_vendor(&mut self, preferred: bool) {
        self.preferred_vendor = preferred;
    }

    pub fn set_spec_verified(&mut self, verified: bool) {
        self.spec_verified = verified;
    }

    pub fn set_approved(&mut self, approved: bool) {
        self.approved = approved;
    }

    pub fn set_review_frequency(&mut self, frequency: Option<ReviewFrequency>) {
        self.review_frequency = frequency;
    }

    pub fn record_review(&mut self, reviewed_on: NaiveDate) {
        self.last_reviewed_on = Some(reviewed_on);
    }
}

impl DerivedFields for SupplierProduct {
    fn recalculate_derived_fields(&mut self) {
        self.next_review_due = compute_next_review_due(self.last_reviewed_on, self.review_frequency);
        self.is_default = self.approved && self.preferred_vendor;
    }
}

impl Persistable for SupplierProduct {
    fn prepare_for_save(&mut self) {
        self.recalculate_derived_fields();
    }
}

#[derive(Deserialize)]
struct StoredSupplierProduct {
    key: SupplierProductKey,
    #[serde(default)]
    manufacturer_name: String,
    #[serde(default)]
    product_code: String,
    #[serde(default)]
    grade: Grade,
    #[serde(default)]
    batch_code_format_known: bool,
    #[serde(default)]
    batch_code_quality: BatchCodeQuality,
    #[serde(default)]
    traceability_level: TraceabilityLevel,
    #[serde(default)]
    spec_sheet_url: Option<String>,
    #[serde(default)]
    preferred_vendor: bool,
    #[serde(default)]
    spec_verified: bool,
    #[serde(default)]
    approved: bool,
    #[serde(default)]
    last_reviewed_on: Option<NaiveDate>,
    #[serde(default)]
    review_frequency: Option<ReviewFrequency>,
    #[serde(default)]
    audit_info: AuditInfo,
}

impl From<StoredSupplierProduct> for SupplierProduct {
    fn from(stored: StoredSupplierProduct) -> Self {
        let mut product = SupplierProduct {
            key: stored.key,
            manufacturer_name: stored.manufacturer_name,
            product_code: stored.product_code,
            grade: stored.grade,
            batch_code_format_known: stored.batch_code_format_known,
            batch_code_quality: stored.batch_code_quality,
            traceability_level: stored.traceability_level,
            spec_sheet_url: stored.spec_sheet_url,
            preferred_vendor: stored.preferred_vendor,
            spec_verified: stored.spec_verified,
            approved: stored.approved,
            last_reviewed_on: stored.last_reviewed_on,
            review_frequency: stored.review_frequency,
            next_review_due: None,
            is_default: false,
            audit_info: stored.audit_info,
        };
        product.recalculate_derived_fields();
        product
    }
}

impl Entity for SupplierProduct {
    type Id = SupplierProductKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}

impl AggregateRoot for SupplierProduct {
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
    use crate::domain::enums::{Category, ContaminationRisk, UnitOfMeasure};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pairing() -> SupplierProduct {
        SupplierProduct::new(
            ItemCode::new("CHE-SOL-0001").unwrap(),
            SupplierId::new("SUP-001").unwrap(),
        )
    }

    #[test]
    fn test_default_requires_approval_and_preference() {
        let mut sp = pairing();
        sp.set_preferred_vendor(true);
        sp.recalculate_derived_fields();
        assert!(!sp.is_default());

        sp.set_approved(true);
        sp.recalculate_derived_fields();
        assert!(sp.is_default());

        sp.set_preferred_vendor(false);
        sp.recalculate_derived_fields();
        assert!(!sp.is_default());
    }

    #[test]
    fn test_six_month_review_by_default() {
        let mut sp = pairing().with_review(Some(date(2024, 1, 15)), Some(ReviewFrequency::SixMonths));
        sp.recalculate_derived_fields();
        assert_eq!(sp.next_review_due(), Some(date(2024, 7, 13)));
        assert_eq!(sp.review_status(date(2024, 7, 1), 30), ReviewStatus::DueSoon);
    }

    #[test]
    fn test_suggested_traceability() {
        let mut item = ItemRecord::new(
            ItemCode::new("CHE-SOL-0001").unwrap(),
            "Ethanol",
            UnitOfMeasure::Liter,
            Category::Chemical,
            "Solvent",
        )
        .unwrap()
        .with_critical_to_product(true)
        .with_contamination_risk(ContaminationRisk::Low);
        item.recalculate_derived_fields();

        let sp = pairing().with_batch_code(true, BatchCodeQuality::High);
        assert_eq!(sp.suggested_traceability_level(&item), TraceabilityLevel::BatchLevel);

        let mut verified = sp.clone();
        verified.set_spec_verified(true);
        assert_eq!(verified.suggested_traceability_level(&item), TraceabilityLevel::Full);

        let unknown = pairing();
        assert_eq!(unknown.suggested_traceability_level(&item), TraceabilityLevel::Basic);
    }

    #[test]
    fn test_deserialize_recomputes_default_flag() {
        let mut sp = pairing();
        sp.set_preferred_vendor(true);
        sp.recalculate_derived_fields();

        let mut json = serde_json::to_value(&sp).unwrap();
        json["is_default"] = serde_json::Value::Bool(true);
        let loaded: SupplierProduct = serde_json::from_value(json).unwrap();
        assert!(!loaded.is_default());
        assert_eq!(loaded.key(), sp.key());
    }
}
