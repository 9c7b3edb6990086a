//! 合规派生字段计算
//!
//! 根据物料的等级、关键性、污染风险、危险类别推导 QA 要求、追溯级别、
//! 随货文件（COA/SDS/规格书）和隔离存放要求。
//!
//! 全部为纯函数：无 I/O、无错误分支，相同输入恒得相同输出。

use serde::{Deserialize, Serialize};

use crate::domain::enums::{ContaminationRisk, Grade, HazardClass, TraceabilityLevel};

/// 参与派生计算的物料输入字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemAttributes {
    pub grade: Grade,
    pub critical_to_product: bool,
    pub contamination_risk: ContaminationRisk,
    pub hazard_class: HazardClass,
    /// 当前已存储的追溯级别（计算后会被覆盖）
    pub traceability_level: TraceabilityLevel,
}

/// 随货文件要求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentRequirements {
    /// 需要分析证书 (COA)
    pub coa_mandatory: bool,
    /// 需要安全数据表 (SDS)
    pub sds_mandatory: bool,
    /// 需要规格书
    pub spec_required: bool,
}

/// 物料派生字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivedItemFields {
    pub qa_required: bool,
    pub traceability_level: TraceabilityLevel,
    pub coa_mandatory: bool,
    pub sds_mandatory: bool,
    pub spec_required: bool,
    pub segregation_rule_required: bool,
}

impl DerivedItemFields {
    pub fn documents(&self) -> DocumentRequirements {
        DocumentRequirements {
            coa_mandatory: self.coa_mandatory,
            sds_mandatory: self.sds_mandatory,
            spec_required: self.spec_required,
        }
    }
}

/// 是否需要 QA 审核
///
/// 任一条件成立即需要：药典/食品级等级、关键物料、高污染风险、批次级及以上追溯
pub fn compute_qa_required(
    grade: Grade,
    critical_to_product: bool,
    contamination_risk: ContaminationRisk,
    traceability_level: TraceabilityLevel,
) -> bool {
    grade.mandates_qa()
        || critical_to_product
        || contamination_risk == ContaminationRisk::High
        || traceability_level.is_batch_tracked()
}

/// 追溯级别（保存路径使用的简化规则）
pub fn compute_traceability_level(
    qa_required: bool,
    contamination_risk: ContaminationRisk,
) -> TraceabilityLevel {
    if qa_required && contamination_risk == ContaminationRisk::High {
        TraceabilityLevel::Full
    } else if qa_required {
        TraceabilityLevel::BatchLevel
    } else {
        TraceabilityLevel::None
    }
}

/// 追溯级别（四输入的详细规则）
///
/// 与简化规则不等价，不参与物料保存；供应商-物料审核时作为建议值使用。
pub fn compute_detailed_traceability_level(
    qa_required: bool,
    contamination_risk: ContaminationRisk,
    batch_code_format_known: bool,
    spec_verified: bool,
) -> TraceabilityLevel {
    if !qa_required && contamination_risk == ContaminationRisk::Low {
        return TraceabilityLevel::None;
    }
    if qa_required && (contamination_risk == ContaminationRisk::Medium || !batch_code_format_known)
    {
        return TraceabilityLevel::Basic;
    }
    if qa_required && batch_code_format_known && !spec_verified {
        return TraceabilityLevel::BatchLevel;
    }
    if qa_required && batch_code_format_known && spec_verified {
        return TraceabilityLevel::Full;
    }
    TraceabilityLevel::None
}

/// 随货文件要求
///
/// COA 与规格书使用同一条件，两者恒相等
pub fn compute_document_requirements(
    qa_required: bool,
    hazard_class: HazardClass,
    traceability_level: TraceabilityLevel,
) -> DocumentRequirements {
    let batch_documents = qa_required || traceability_level.is_batch_tracked();

    DocumentRequirements {
        coa_mandatory: batch_documents,
        sds_mandatory: hazard_class.is_hazardous(),
        spec_required: batch_documents,
    }
}

/// 是否需要隔离存放
pub fn compute_segregation_required(hazard_class: HazardClass) -> bool {
    hazard_class.requires_segregation()
}

/// 计算全部派生字段
///
/// 顺序固定：QA 要求 -> 追溯级别 -> 文件要求 -> 隔离要求，
/// 后一步使用前一步刚算出的值。
pub fn compute_derived_item_fields(attributes: &ItemAttributes) -> DerivedItemFields {
    let qa_required = compute_qa_required(
        attributes.grade,
        attributes.critical_to_product,
        attributes.contamination_risk,
        attributes.traceability_level,
    );

    let traceability_level = compute_traceability_level(qa_required, attributes.contamination_risk);

    let documents =
        compute_document_requirements(qa_required, attributes.hazard_class, traceability_level);

    DerivedItemFields {
        qa_required,
        traceability_level,
        coa_mandatory: documents.coa_mandatory,
        sds_mandatory: documents.sds_mandatory,
        spec_required: documents.spec_required,
        segregation_rule_required: compute_segregation_required(attributes.hazard_class),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_attributes() -> Vec<ItemAttributes> {
        let mut out = Vec::new();
        for grade in Grade::ALL {
            for critical_to_product in [false, true] {
                for contamination_risk in ContaminationRisk::ALL {
                    for hazard_class in HazardClass::ALL {
                        for traceability_level in TraceabilityLevel::ALL {
                            out.push(ItemAttributes {
                                grade,
                                critical_to_product,
                                contamination_risk,
                                hazard_class,
                                traceability_level,
                            });
                        }
                    }
                }
            }
        }
        out
    }

    fn qa(a: &ItemAttributes) -> bool {
        compute_qa_required(
            a.grade,
            a.critical_to_product,
            a.contamination_risk,
            a.traceability_level,
        )
    }

    #[test]
    fn test_qa_grade_triggers() {
        for a in all_attributes().iter().filter(|a| a.grade.mandates_qa()) {
            assert!(qa(a), "{a:?}");
        }
    }

    #[test]
    fn test_qa_critical_triggers() {
        for a in all_attributes().iter().filter(|a| a.critical_to_product) {
            assert!(qa(a), "{a:?}");
        }
    }

    #[test]
    fn test_qa_high_risk_triggers() {
        for a in all_attributes()
            .iter()
            .filter(|a| a.contamination_risk == ContaminationRisk::High)
        {
            assert!(qa(a), "{a:?}");
        }
    }

    #[test]
    fn test_qa_not_required_when_no_trigger() {
        for a in all_attributes().iter().filter(|a| {
            !a.grade.mandates_qa()
                && !a.critical_to_product
                && a.contamination_risk != ContaminationRisk::High
                && !a.traceability_level.is_batch_tracked()
        }) {
            assert!(!qa(a), "{a:?}");
        }
    }

    #[test]
    fn test_qa_existing_traceability_triggers() {
        assert!(compute_qa_required(
            Grade::Lab,
            false,
            ContaminationRisk::Low,
            TraceabilityLevel::BatchLevel,
        ));
        assert!(!compute_qa_required(
            Grade::Lab,
            false,
            ContaminationRisk::Low,
            TraceabilityLevel::Basic,
        ));
    }

    #[test]
    fn test_simplified_traceability() {
        assert_eq!(
            compute_traceability_level(true, ContaminationRisk::High),
            TraceabilityLevel::Full
        );
        assert_eq!(
            compute_traceability_level(true, ContaminationRisk::Medium),
            TraceabilityLevel::BatchLevel
        );
        assert_eq!(
            compute_traceability_level(true, ContaminationRisk::Low),
            TraceabilityLevel::BatchLevel
        );
        for risk in ContaminationRisk::ALL {
            assert_eq!(compute_traceability_level(false, risk), TraceabilityLevel::None);
        }
    }

    #[test]
    fn test_detailed_traceability_table() {
        use ContaminationRisk::{High, Low, Medium};
        use TraceabilityLevel as T;

        let cases = [
            // (qa, risk, batch code known, spec verified, expected)
            (false, Low, true, true, T::None),
            (false, Medium, true, true, T::None),
            (false, High, false, false, T::None),
            (true, Medium, true, true, T::Basic),
            (true, Low, false, true, T::Basic),
            (true, High, false, false, T::Basic),
            (true, Low, true, false, T::BatchLevel),
            (true, High, true, false, T::BatchLevel),
            (true, Low, true, true, T::Full),
            (true, High, true, true, T::Full),
        ];

        for (qa_required, risk, known, verified, expected) in cases {
            assert_eq!(
                compute_detailed_traceability_level(qa_required, risk, known, verified),
                expected,
                "qa={qa_required} risk={risk} known={known} verified={verified}"
            );
        }
    }

    #[test]
    fn test_rules_are_not_equivalent() {
        // 同一输入两条规则结果不同
        assert_ne!(
            compute_traceability_level(true, ContaminationRisk::Medium),
            compute_detailed_traceability_level(true, ContaminationRisk::Medium, true, true)
        );
    }

    #[test]
    fn test_document_requirements_vectors() {
        assert_eq!(
            compute_document_requirements(false, HazardClass::None, TraceabilityLevel::None),
            DocumentRequirements {
                coa_mandatory: false,
                sds_mandatory: false,
                spec_required: false,
            }
        );
        assert_eq!(
            compute_document_requirements(false, HazardClass::Corrosive, TraceabilityLevel::None),
            DocumentRequirements {
                coa_mandatory: false,
                sds_mandatory: true,
                spec_required: false,
            }
        );
        assert_eq!(
            compute_document_requirements(false, HazardClass::Unspecified, TraceabilityLevel::Full),
            DocumentRequirements {
                coa_mandatory: true,
                sds_mandatory: false,
                spec_required: true,
            }
        );
    }

    #[test]
    fn test_coa_and_spec_always_equal() {
        for qa_required in [false, true] {
            for hazard in HazardClass::ALL {
                for level in TraceabilityLevel::ALL {
                    let docs = compute_document_requirements(qa_required, hazard, level);
                    assert_eq!(docs.coa_mandatory, docs.spec_required);
                }
            }
        }
    }

    #[test]
    fn test_segregation() {
        assert!(compute_segregation_required(HazardClass::Flammable));
        assert!(compute_segregation_required(HazardClass::Corrosive));
        assert!(compute_segregation_required(HazardClass::Oxidizer));
        assert!(compute_segregation_required(HazardClass::Reactive));
        assert!(!compute_segregation_required(HazardClass::Toxic));
        assert!(!compute_segregation_required(HazardClass::None));
        assert!(!compute_segregation_required(HazardClass::Unspecified));
    }

    #[test]
    fn test_derivation_is_idempotent() {
        for a in all_attributes() {
            assert_eq!(compute_derived_item_fields(&a), compute_derived_item_fields(&a));
        }
    }

    #[test]
    fn test_derived_traceability_follows_qa() {
        for a in all_attributes() {
            let derived = compute_derived_item_fields(&a);
            assert_eq!(
                derived.traceability_level,
                compute_traceability_level(derived.qa_required, a.contamination_risk)
            );
            assert_eq!(derived.coa_mandatory, derived.qa_required);
        }
    }
}
