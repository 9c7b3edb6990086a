//! 随货文件核对
//!
//! 把物料派生出的文件要求与收货、QA 审核时的实际核对结果对比，
//! 找出缺失或不一致的强制文件。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DocumentRequirements;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Coa,
    Sds,
    Spec,
}

impl DocumentKind {
    pub fn code(&self) -> &'static str {
        match self {
            DocumentKind::Coa => "COA",
            DocumentKind::Sds => "SDS",
            DocumentKind::Spec => "Spec",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 单份文件的核对结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentCheck {
    /// 已附文件
    pub attached: bool,
    /// 内容与批次、规格一致
    pub matched: bool,
}

impl DocumentCheck {
    pub fn new(attached: bool, matched: bool) -> Self {
        Self { attached, matched }
    }

    /// 只知道是否提供（库存事务只登记提供与否）
    pub fn provided(provided: bool) -> Self {
        Self::new(provided, provided)
    }

    fn satisfied(&self) -> bool {
        self.attached && self.matched
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentChecks {
    pub coa: DocumentCheck,
    pub sds: DocumentCheck,
    pub spec: DocumentCheck,
}

/// 强制文件中未附或不一致的部分，按 COA、SDS、规格书顺序返回
pub fn find_document_gaps(
    requirements: &DocumentRequirements,
    checks: &DocumentChecks,
) -> Vec<DocumentKind> {
    [
        (requirements.coa_mandatory, checks.coa, DocumentKind::Coa),
        (requirements.sds_mandatory, checks.sds, DocumentKind::Sds),
        (requirements.spec_required, checks.spec, DocumentKind::Spec),
    ]
    .into_iter()
    .filter(|(mandatory, check, _)| *mandatory && !check.satisfied())
    .map(|(_, _, kind)| kind)
    .collect()
}
