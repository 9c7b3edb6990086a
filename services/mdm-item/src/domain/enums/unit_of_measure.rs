//! 计量单位枚举

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownChoice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "bottle")]
    Bottle,
    #[serde(rename = "pcs")]
    Piece,
    #[serde(rename = "box")]
    Box,
}

impl UnitOfMeasure {
    pub const ALL: [UnitOfMeasure; 7] = [
        UnitOfMeasure::Kilogram,
        UnitOfMeasure::Gram,
        UnitOfMeasure::Liter,
        UnitOfMeasure::Milliliter,
        UnitOfMeasure::Bottle,
        UnitOfMeasure::Piece,
        UnitOfMeasure::Box,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            UnitOfMeasure::Kilogram => "kg",
            UnitOfMeasure::Gram => "g",
            UnitOfMeasure::Liter => "L",
            UnitOfMeasure::Milliliter => "ml",
            UnitOfMeasure::Bottle => "bottle",
            UnitOfMeasure::Piece => "pcs",
            UnitOfMeasure::Box => "box",
        }
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UnitOfMeasure {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|u| u.code() == s)
            .ok_or_else(|| UnknownChoice::new("unit of measure", s))
    }
}
