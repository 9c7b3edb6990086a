//! 复审频率枚举

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownChoice;

/// QA 复审频率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewFrequency {
    #[serde(rename = "6 months")]
    SixMonths,
    #[serde(rename = "1 year")]
    OneYear,
    /// 仅在变更时人工复审
    #[serde(rename = "On change")]
    OnChange,
}

impl ReviewFrequency {
    pub const ALL: [ReviewFrequency; 3] = [
        ReviewFrequency::SixMonths,
        ReviewFrequency::OneYear,
        ReviewFrequency::OnChange,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ReviewFrequency::SixMonths => "6 months",
            ReviewFrequency::OneYear => "1 year",
            ReviewFrequency::OnChange => "On change",
        }
    }

    /// 固定天数间隔；`OnChange` 不自动排期
    pub fn interval_days(&self) -> Option<u64> {
        match self {
            ReviewFrequency::SixMonths => Some(180),
            ReviewFrequency::OneYear => Some(365),
            ReviewFrequency::OnChange => None,
        }
    }
}

impl fmt::Display for ReviewFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReviewFrequency {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.code() == s)
            .ok_or_else(|| UnknownChoice::new("review frequency", s))
    }
}
