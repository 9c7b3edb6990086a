//! QA 审核结论枚举

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{QaStatus, UnknownChoice};

/// 批次 QA 审核结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewOutcome {
    Approved,
    /// 有条件接收
    Conditional,
    Rejected,
    /// 上报处理
    Escalated,
}

impl ReviewOutcome {
    pub const ALL: [ReviewOutcome; 4] = [
        ReviewOutcome::Approved,
        ReviewOutcome::Conditional,
        ReviewOutcome::Rejected,
        ReviewOutcome::Escalated,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ReviewOutcome::Approved => "Approved",
            ReviewOutcome::Conditional => "Conditional",
            ReviewOutcome::Rejected => "Rejected",
            ReviewOutcome::Escalated => "Escalated",
        }
    }

    /// 审核后批次的 QA 状态；未决结论一律隔离
    pub fn resulting_qa_status(&self) -> QaStatus {
        match self {
            ReviewOutcome::Approved => QaStatus::Approved,
            ReviewOutcome::Rejected => QaStatus::Rejected,
            ReviewOutcome::Conditional | ReviewOutcome::Escalated => QaStatus::Quarantined,
        }
    }
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReviewOutcome {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|o| o.code() == s)
            .ok_or_else(|| UnknownChoice::new("review outcome", s))
    }
}

/// 各文件批号是否一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentMatch {
    Yes,
    Partial,
    No,
}

impl DocumentMatch {
    pub const ALL: [DocumentMatch; 3] = [DocumentMatch::Yes, DocumentMatch::Partial, DocumentMatch::No];

    pub fn code(&self) -> &'static str {
        match self {
            DocumentMatch::Yes => "Yes",
            DocumentMatch::Partial => "Partial",
            DocumentMatch::No => "No",
        }
    }
}

impl fmt::Display for DocumentMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DocumentMatch {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.code() == s)
            .ok_or_else(|| UnknownChoice::new("document match", s))
    }
}
