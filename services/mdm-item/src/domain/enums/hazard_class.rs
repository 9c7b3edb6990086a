//! 危险类别枚举

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownChoice;

/// SDS 上登记的危险类别
///
/// `Unspecified`（未填写）与 `None`（明确无危险）是两个不同的取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HazardClass {
    /// 未填写
    #[default]
    #[serde(rename = "")]
    Unspecified,
    /// 无危险
    None,
    Flammable,
    Oxidizer,
    Corrosive,
    Toxic,
    Reactive,
}

impl HazardClass {
    pub const ALL: [HazardClass; 7] = [
        HazardClass::Unspecified,
        HazardClass::None,
        HazardClass::Flammable,
        HazardClass::Oxidizer,
        HazardClass::Corrosive,
        HazardClass::Toxic,
        HazardClass::Reactive,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            HazardClass::Unspecified => "",
            HazardClass::None => "None",
            HazardClass::Flammable => "Flammable",
            HazardClass::Oxidizer => "Oxidizer",
            HazardClass::Corrosive => "Corrosive",
            HazardClass::Toxic => "Toxic",
            HazardClass::Reactive => "Reactive",
        }
    }

    /// 已填写且确有危险
    pub fn is_hazardous(&self) -> bool {
        !matches!(self, HazardClass::Unspecified | HazardClass::None)
    }

    /// 需要隔离存放（毒性物质不在此列）
    pub fn requires_segregation(&self) -> bool {
        matches!(
            self,
            HazardClass::Flammable
                | HazardClass::Corrosive
                | HazardClass::Oxidizer
                | HazardClass::Reactive
        )
    }
}

impl fmt::Display for HazardClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HazardClass {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|h| h.code() == s)
            .ok_or_else(|| UnknownChoice::new("hazard class", s))
    }
}
