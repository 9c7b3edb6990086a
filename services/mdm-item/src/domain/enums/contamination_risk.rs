//! 污染风险枚举

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownChoice;

/// 污染风险等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ContaminationRisk {
    #[default]
    Low,
    Medium,
    High,
}

impl ContaminationRisk {
    pub const ALL: [ContaminationRisk; 3] = [
        ContaminationRisk::Low,
        ContaminationRisk::Medium,
        ContaminationRisk::High,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ContaminationRisk::Low => "Low",
            ContaminationRisk::Medium => "Medium",
            ContaminationRisk::High => "High",
        }
    }
}

impl fmt::Display for ContaminationRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ContaminationRisk {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.code() == s)
            .ok_or_else(|| UnknownChoice::new("contamination risk", s))
    }
}
