//! 供应商聚合根

use chrono::NaiveDate;
use cuba_common::AuditInfo;
use cuba_domain_core::{AggregateRoot, DerivedFields, Entity, Persistable};
use serde::{Deserialize, Serialize};

use crate::domain::enums::ReviewFrequency;
use crate::domain::services::{ReviewStatus, compute_next_review_due};
use crate::domain::value_objects::SupplierId;

/// 供应商主数据
///
/// `next_review_due` 不从存储读取，反序列化后按复审记录重算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredSupplier")]
pub struct Supplier {
    supplier_id: SupplierId,
    /// 法定全称
    supplier_name: String,
    /// 内部供应商所属单位
    business_unit: String,
    address: String,
    /// 原产国代码
    country_of_origin: String,
    certifications: Vec<String>,

    // QA 审批
    approved: bool,
    approved_on: Option<NaiveDate>,
    last_reviewed_on: Option<NaiveDate>,
    /// `None` 表示未设置或取值无法识别
    review_frequency: Option<ReviewFrequency>,
    /// 派生：下次复审日期
    next_review_due: Option<NaiveDate>,

    notes: String,
    audit_info: AuditInfo,
}

impl Supplier {
    pub fn new(
        supplier_id: SupplierId,
        supplier_name: impl Into<String>,
        address: impl Into<String>,
        country_of_origin: impl Into<String>,
    ) -> Self {
        Self {
            supplier_id,
            supplier_name: supplier_name.into(),
            business_unit: String::new(),
            address: address.into(),
            country_of_origin: country_of_origin.into(),
            certifications: Vec::new(),
            approved: false,
            approved_on: None,
            last_reviewed_on: None,
            review_frequency: Some(ReviewFrequency::OneYear),
            next_review_due: None,
            notes: String::new(),
            audit_info: AuditInfo::default(),
        }
    }

    // Getters
    pub fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    pub fn supplier_name(&self) -> &str {
        &self.supplier_name
    }

    pub fn business_unit(&self) -> &str {
        &self.business_unit
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn country_of_origin(&self) -> &str {
        &self.country_of_origin
    }

    pub fn certifications(&self) -> &[String] {
        &self.certifications
    }

    pub fn approved(&self) -> bool {
        self.approved
    }

    pub fn approved_on(&self) -> Option<NaiveDate> {
        self.approved_on
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

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn review_status(&self, today: NaiveDate, warning_days: u32) -> ReviewStatus {
        ReviewStatus::evaluate(self.next_review_due, today, warning_days)
    }

    // Builder pattern setters
    pub fn with_business_unit(mut self, unit: impl Into<String>) -> Self {
        self.business_unit = unit.into();
        self
    }

    pub fn with_certifications(mut self, certifications: Vec<String>) -> Self {
        self.certifications = certifications;
        self
    }

    pub fn with_review_frequency(mut self, frequency: Option<ReviewFrequency>) -> Self {
        self.review_frequency = frequency;
        self
    }

    pub fn with_last_reviewed_on(mut self, date: Option<NaiveDate>) -> Self {
        self.last_reviewed_on = date;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    // Mutable setters
    pub fn rename(&mut self, name: impl Into<String>) {
        self.supplier_name = name.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    pub fn set_certifications(&mut self, certifications: Vec<String>) {
        self.certifications = certifications;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn set_review_frequency(&mut self, frequency: Option<ReviewFrequency>) {
        self.review_frequency = frequency;
    }

    /// 登记一次 QA 复审
    pub fn record_review(&mut self, reviewed_on: NaiveDate) {
        self.last_reviewed_on = Some(reviewed_on);
    }

    pub fn approve(&mut self, approved_on: NaiveDate) {
        self.approved = true;
        self.approved_on = Some(approved_on);
    }

    pub fn revoke_approval(&mut self) {
        self.approved = false;
        self.approved_on = None;
    }
}

impl DerivedFields for Supplier {
    fn recalculate_derived_fields(&mut self) {
        self.next_review_due = compute_next_review_due(self.last_reviewed_on, self.review_frequency);
    }
}

impl Persistable for Supplier {
    fn prepare_for_save(&mut self) {
        self.recalculate_derived_fields();
    }
}

#[derive(Deserialize)]
struct StoredSupplier {
    supplier_id: SupplierId,
    supplier_name: String,
    #[serde(default)]
    business_unit: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    country_of_origin: String,
    #[serde(default)]
    certifications: Vec<String>,
    #[serde(default)]
    approved: bool,
    #[serde(default)]
    approved_on: Option<NaiveDate>,
    #[serde(default)]
    last_reviewed_on: Option<NaiveDate>,
    #[serde(default)]
    review_frequency: Option<ReviewFrequency>,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    audit_info: AuditInfo,
}

impl From<StoredSupplier> for Supplier {
    fn from(stored: StoredSupplier) -> Self {
        let mut supplier = Supplier {
            supplier_id: stored.supplier_id,
            supplier_name: stored.supplier_name,
            business_unit: stored.business_unit,
            address: stored.address,
            country_of_origin: stored.country_of_origin,
            certifications: stored.certifications,
            approved: stored.approved,
            approved_on: stored.approved_on,
            last_reviewed_on: stored.last_reviewed_on,
            review_frequency: stored.review_frequency,
            next_review_due: None,
            notes: stored.notes,
            audit_info: stored.audit_info,
        };
        supplier.recalculate_derived_fields();
        supplier
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.supplier_id
    }
}

impl AggregateRoot for Supplier {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
