//! 纯度/规格等级枚举

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownChoice;

/// 物料等级
///
/// `Food` 不在录入选项中，但历史记录中存在，且参与 QA 判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Grade {
    /// 未填写
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "ACS")]
    Acs,
    #[serde(rename = "USP")]
    Usp,
    #[serde(rename = "FCC")]
    Fcc,
    Lab,
    Tech,
    Custom,
    Food,
}

impl Grade {
    pub const ALL: [Grade; 8] = [
        Grade::Unspecified,
        Grade::Acs,
        Grade::Usp,
        Grade::Fcc,
        Grade::Lab,
        Grade::Tech,
        Grade::Custom,
        Grade::Food,
    ];

    /// 存储编码
    pub fn code(&self) -> &'static str {
        match self {
            Grade::Unspecified => "",
            Grade::Acs => "ACS",
            Grade::Usp => "USP",
            Grade::Fcc => "FCC",
            Grade::Lab => "Lab",
            Grade::Tech => "Tech",
            Grade::Custom => "Custom",
            Grade::Food => "Food",
        }
    }

    /// 药典/食品级等级强制 QA
    pub fn mandates_qa(&self) -> bool {
        matches!(self, Grade::Usp | Grade::Fcc | Grade::Acs | Grade::Food)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Grade {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.code() == s)
            .ok_or_else(|| UnknownChoice::new("grade", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_unspecified() {
        assert_eq!("".parse::<Grade>().unwrap(), Grade::Unspecified);
        assert_eq!("  ".parse::<Grade>().unwrap(), Grade::Unspecified);
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert_eq!("USP".parse::<Grade>().unwrap(), Grade::Usp);
        assert!("usp".parse::<Grade>().is_err());
    }

    #[test]
    fn test_mandates_qa() {
        let mandated: Vec<_> = Grade::ALL.into_iter().filter(Grade::mandates_qa).collect();
        assert_eq!(mandated, vec![Grade::Acs, Grade::Usp, Grade::Fcc, Grade::Food]);
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Grade::Acs).unwrap(), "\"ACS\"");
        assert_eq!(serde_json::to_string(&Grade::Unspecified).unwrap(), "\"\"");
        let grade: Grade = serde_json::from_str("\"Tech\"").unwrap();
        assert_eq!(grade, Grade::Tech);
    }
}
