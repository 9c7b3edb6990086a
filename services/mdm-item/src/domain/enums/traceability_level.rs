//! 追溯级别枚举

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownChoice;

/// 追溯级别，按粒度递增排序: None < Basic < Batch-level < Full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum TraceabilityLevel {
    #[default]
    None,
    Basic,
    #[serde(rename = "Batch-level")]
    BatchLevel,
    Full,
}

impl TraceabilityLevel {
    pub const ALL: [TraceabilityLevel; 4] = [
        TraceabilityLevel::None,
        TraceabilityLevel::Basic,
        TraceabilityLevel::BatchLevel,
        TraceabilityLevel::Full,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TraceabilityLevel::None => "None",
            TraceabilityLevel::Basic => "Basic",
            TraceabilityLevel::BatchLevel => "Batch-level",
            TraceabilityLevel::Full => "Full",
        }
    }

    /// 批次级及以上
    pub fn is_batch_tracked(&self) -> bool {
        matches!(self, TraceabilityLevel::BatchLevel | TraceabilityLevel::Full)
    }
}

impl fmt::Display for TraceabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TraceabilityLevel {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| UnknownChoice::new("traceability level", s))
    }
}
