//! 批次相关枚举

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownChoice;

/// 批次 QA 处置状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QaStatus {
    /// 待检
    #[default]
    Pending,
    /// 放行
    Approved,
    /// 隔离
    Quarantined,
    /// 拒收
    Rejected,
}

impl QaStatus {
    pub const ALL: [QaStatus; 4] = [
        QaStatus::Pending,
        QaStatus::Approved,
        QaStatus::Quarantined,
        QaStatus::Rejected,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            QaStatus::Pending => "Pending",
            QaStatus::Approved => "Approved",
            QaStatus::Quarantined => "Quarantined",
            QaStatus::Rejected => "Rejected",
        }
    }

    /// 是否可用于生产/发货
    pub fn is_released(&self) -> bool {
        matches!(self, QaStatus::Approved)
    }

    /// 仍可做 QA 审核（待检或隔离中）
    pub fn awaiting_review(&self) -> bool {
        matches!(self, QaStatus::Pending | QaStatus::Quarantined)
    }
}

impl fmt::Display for QaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for QaStatus {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|q| q.code() == s)
            .ok_or_else(|| UnknownChoice::new("QA status", s))
    }
}

/// 批次来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BatchSource {
    #[default]
    External,
    Internal,
    /// 合同制造商
    #[serde(rename = "CM")]
    ContractManufacturer,
}

impl BatchSource {
    pub fn code(&self) -> &'static str {
        match self {
            BatchSource::External => "External",
            BatchSource::Internal => "Internal",
            BatchSource::ContractManufacturer => "CM",
        }
    }
}

/// 批次类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BatchType {
    #[default]
    Production,
    #[serde(rename = "R&D")]
    ResearchAndDevelopment,
    Sample,
    Return,
}

impl BatchType {
    pub fn code(&self) -> &'static str {
        match self {
            BatchType::Production => "Production",
            BatchType::ResearchAndDevelopment => "R&D",
            BatchType::Sample => "Sample",
            BatchType::Return => "Return",
        }
    }
}

/// 供应商批号质量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BatchCodeQuality {
    High,
    #[default]
    Medium,
    Low,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qa_status_defaults_to_pending() {
        assert_eq!(QaStatus::default(), QaStatus::Pending);
        assert!(!QaStatus::Pending.is_released());
        assert!(QaStatus::Approved.is_released());
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&BatchSource::ContractManufacturer).unwrap(), "\"CM\"");
        assert_eq!(serde_json::to_string(&BatchType::ResearchAndDevelopment).unwrap(), "\"R&D\"");
        assert_eq!(BatchType::ResearchAndDevelopment.code(), "R&D");
        assert_eq!("Quarantined".parse::<QaStatus>().unwrap(), QaStatus::Quarantined);
    }
}
