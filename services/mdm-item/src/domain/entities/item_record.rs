//! 物料记录聚合根

use cuba_common::AuditInfo;
use cuba_domain_core::{AggregateRoot, DerivedFields, Entity, Persistable};
use cuba_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::domain::enums::{
    Category, ContaminationRisk, Grade, HazardClass, TraceabilityLevel, UnitOfMeasure,
};
use crate::domain::services::{DerivedItemFields, ItemAttributes, compute_derived_item_fields};
use crate::domain::value_objects::ItemCode;

/// 物料记录
///
/// 合规相关字段（QA 要求、追溯级别、文件要求、隔离要求）只能通过
/// [`DerivedFields::recalculate_derived_fields`] 更新。反序列化时只保留
/// 已登记的追溯级别，其余派生字段按输入重算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredItemRecord")]
pub struct ItemRecord {
    /// 物料编码
    item_record_id: ItemCode,
    /// 标准名称（与标签、QA 文件一致）
    item_name: String,
    unit_of_measure: UnitOfMeasure,
    category: Category,
    /// 分类下的功能子类型
    subtype: String,

    // 合规输入
    grade: Grade,
    hazard_class: HazardClass,
    /// 化学品族（仅展示用）
    chemical_family: String,
    contamination_risk: ContaminationRisk,
    critical_to_product: bool,
    spec_verified: bool,

    /// 派生字段
    derived: DerivedItemFields,

    audit_info: AuditInfo,
}

impl ItemRecord {
    /// 创建新物料，子类型必须属于所选分类
    pub fn new(
        item_record_id: ItemCode,
        item_name: impl Into<String>,
        unit_of_measure: UnitOfMeasure,
        category: Category,
        subtype: impl Into<String>,
    ) -> AppResult<Self> {
        let subtype = subtype.into();
        ensure_subtype(category, &subtype)?;

        Ok(Self {
            item_record_id,
            item_name: item_name.into(),
            unit_of_measure,
            category,
            subtype,
            grade: Grade::Unspecified,
            hazard_class: HazardClass::Unspecified,
            chemical_family: String::new(),
            contamination_risk: ContaminationRisk::Low,
            critical_to_product: false,
            spec_verified: false,
            derived: DerivedItemFields::default(),
            audit_info: AuditInfo::default(),
        })
    }

    // ========== Getters ==========

    pub fn item_record_id(&self) -> &ItemCode {
        &self.item_record_id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn unit_of_measure(&self) -> UnitOfMeasure {
        self.unit_of_measure
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn hazard_class(&self) -> HazardClass {
        self.hazard_class
    }

    pub fn chemical_family(&self) -> &str {
        &self.chemical_family
    }

    pub fn contamination_risk(&self) -> ContaminationRisk {
        self.contamination_risk
    }

    pub fn critical_to_product(&self) -> bool {
        self.critical_to_product
    }

    pub fn spec_verified(&self) -> bool {
        self.spec_verified
    }

    pub fn derived(&self) -> &DerivedItemFields {
        &self.derived
    }

    pub fn qa_required(&self) -> bool {
        self.derived.qa_required
    }

    pub fn traceability_level(&self) -> TraceabilityLevel {
        self.derived.traceability_level
    }

    pub fn coa_mandatory(&self) -> bool {
        self.derived.coa_mandatory
    }

    pub fn sds_mandatory(&self) -> bool {
        self.derived.sds_mandatory
    }

    pub fn spec_required(&self) -> bool {
        self.derived.spec_required
    }

    pub fn segregation_rule_required(&self) -> bool {
        self.derived.segregation_rule_required
    }

    /// 派生计算的输入快照
    pub fn attributes(&self) -> ItemAttributes {
        ItemAttributes {
            grade: self.grade,
            critical_to_product: self.critical_to_product,
            contamination_risk: self.contamination_risk,
            hazard_class: self.hazard_class,
            traceability_level: self.derived.traceability_level,
        }
    }

    // ========== Builder ==========

    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = grade;
        self
    }

    pub fn with_hazard_class(mut self, hazard_class: HazardClass) -> Self {
        self.hazard_class = hazard_class;
        self
    }

    pub fn with_chemical_family(mut self, family: impl Into<String>) -> Self {
        self.chemical_family = family.into();
        self
    }

    pub fn with_contamination_risk(mut self, risk: ContaminationRisk) -> Self {
        self.contamination_risk = risk;
        self
    }

    pub fn with_critical_to_product(mut self, critical: bool) -> Self {
        self.critical_to_product = critical;
        self
    }

    pub fn with_spec_verified(mut self, verified: bool) -> Self {
        self.spec_verified = verified;
        self
    }

    /// 沿用已登记的追溯级别（会参与下一次 QA 判定，随后被覆盖）
    pub fn with_recorded_traceability_level(mut self, level: TraceabilityLevel) -> Self {
        self.derived.traceability_level = level;
        self
    }

    // ========== 更新 ==========

    pub fn rename(&mut self, item_name: impl Into<String>) {
        self.item_name = item_name.into();
    }

    pub fn set_unit_of_measure(&mut self, unit: UnitOfMeasure) {
        self.unit_of_measure = unit;
    }

    /// 变更分类/子类型；只改其一时另一项沿用当前值
    pub fn reclassify(&mut self, category: Option<Category>, subtype: Option<String>) -> AppResult<()> {
        let category = category.unwrap_or(self.category);
        let subtype = subtype.unwrap_or_else(|| self.subtype.clone());
        ensure_subtype(category, &subtype)?;
        self.category = category;
        self.subtype = subtype;
        Ok(())
    }

    pub fn set_grade(&mut self, grade: Grade) {
        self.grade = grade;
    }

    pub fn set_hazard_class(&mut self, hazard_class: HazardClass) {
        self.hazard_class = hazard_class;
    }

    pub fn set_chemical_family(&mut self, family: impl Into<String>) {
        self.chemical_family = family.into();
    }

    pub fn set_contamination_risk(&mut self, risk: ContaminationRisk) {
        self.contamination_risk = risk;
    }

    pub fn set_critical_to_product(&mut self, critical: bool) {
        self.critical_to_product = critical;
    }

    pub fn set_spec_verified(&mut self, verified: bool) {
        self.spec_verified = verified;
    }
}

fn ensure_subtype(category: Category, subtype: &str) -> AppResult<()> {
    if category.allows_subtype(subtype) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "subtype {:?} is not valid for category {}",
            subtype, category
        )))
    }
}

impl DerivedFields for ItemRecord {
    fn recalculate_derived_fields(&mut self) {
        self.derived = compute_derived_item_fields(&self.attributes());
    }
}

impl Persistable for ItemRecord {
    fn prepare_for_save(&mut self) {
        self.recalculate_derived_fields();
    }
}

/// 存储格式
#[derive(Deserialize)]
struct StoredItemRecord {
    item_record_id: ItemCode,
    item_name: String,
    unit_of_measure: UnitOfMeasure,
    category: Category,
    subtype: String,
    #[serde(default)]
    grade: Grade,
    #[serde(default)]
    hazard_class: HazardClass,
    #[serde(default)]
    chemical_family: String,
    #[serde(default)]
    contamination_risk: ContaminationRisk,
    #[serde(default)]
    critical_to_product: bool,
    #[serde(default)]
    spec_verified: bool,
    #[serde(default)]
    derived: DerivedItemFields,
    #[serde(default)]
    audit_info: AuditInfo,
}

impl TryFrom<StoredItemRecord> for ItemRecord {
    type Error = AppError;

    fn try_from(stored: StoredItemRecord) -> Result<Self, Self::Error> {
        let mut item = ItemRecord::new(
            stored.item_record_id,
            stored.item_name,
            stored.unit_of_measure,
            stored.category,
            stored.subtype,
        )?
        .with_grade(stored.grade)
        .with_hazard_class(stored.hazard_class)
        .with_chemical_family(stored.chemical_family)
        .with_contamination_risk(stored.contamination_risk)
        .with_critical_to_product(stored.critical_to_product)
        .with_spec_verified(stored.spec_verified)
        .with_recorded_traceability_level(stored.derived.traceability_level);

        item.audit_info = stored.audit_info;
        item.recalculate_derived_fields();
        Ok(item)
    }
}

impl Entity for ItemRecord {
    type Id = ItemCode;

    fn id(&self) -> &Self::Id {
        &self.item_record_id
    }
}

impl AggregateRoot for ItemRecord {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
