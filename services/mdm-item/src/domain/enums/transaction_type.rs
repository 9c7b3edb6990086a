//! 库存事务类型

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownChoice;

/// 事务对库存数量的影响
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockEffect {
    Inbound,
    Outbound,
    /// 数量带符号（盘点调整）
    Signed,
    /// 不改变数量（移库、冻结、解冻）
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "RCV-PUR")]
    PurchaseReceipt,
    #[serde(rename = "RCV-INT")]
    InternalProductionReceipt,
    #[serde(rename = "RCV-PACK")]
    PackagingReceipt,
    #[serde(rename = "RCV-ENG")]
    EngineeringReceipt,
    #[serde(rename = "RCV-MIS")]
    MiscellaneousReceipt,
    #[serde(rename = "RCV-FG")]
    FinishedGoodsReceipt,
    #[serde(rename = "ISS-MISC")]
    MiscellaneousIssue,
    #[serde(rename = "ISS-MFG")]
    IssueToManufacturing,
    #[serde(rename = "ISS-QC")]
    IssueToQc,
    #[serde(rename = "ISS-RND")]
    IssueToRnd,
    #[serde(rename = "ADJ-CYCLE")]
    CycleCountAdjustment,
    #[serde(rename = "ADJ-GAIN")]
    AdjustmentGain,
    #[serde(rename = "ADJ-LOSS")]
    AdjustmentLoss,
    #[serde(rename = "XFER")]
    Transfer,
    #[serde(rename = "RET-VND")]
    ReturnToVendor,
    #[serde(rename = "RET-INT")]
    InternalReturn,
    #[serde(rename = "SCRAP")]
    Scrap,
    #[serde(rename = "SHIP-CUS")]
    CustomerShipment,
    #[serde(rename = "SHIP-CM")]
    ContractManufacturerShipment,
    #[serde(rename = "BLOCK")]
    Block,
    #[serde(rename = "RELEASE")]
    Release,
    #[serde(rename = "SAMPLE-IN")]
    SampleIn,
    #[serde(rename = "SAMPLE-OUT")]
    SampleOut,
}

impl TransactionType {
    pub const ALL: [TransactionType; 23] = [
        TransactionType::PurchaseReceipt,
        TransactionType::InternalProductionReceipt,
        TransactionType::PackagingReceipt,
        TransactionType::EngineeringReceipt,
        TransactionType::MiscellaneousReceipt,
        TransactionType::FinishedGoodsReceipt,
        TransactionType::MiscellaneousIssue,
        TransactionType::IssueToManufacturing,
        TransactionType::IssueToQc,
        TransactionType::IssueToRnd,
        TransactionType::CycleCountAdjustment,
        TransactionType::AdjustmentGain,
        TransactionType::AdjustmentLoss,
        TransactionType::Transfer,
        TransactionType::ReturnToVendor,
        TransactionType::InternalReturn,
        TransactionType::Scrap,
        TransactionType::CustomerShipment,
        TransactionType::ContractManufacturerShipment,
        TransactionType::Block,
        TransactionType::Release,
        TransactionType::SampleIn,
        TransactionType::SampleOut,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TransactionType::PurchaseReceipt => "RCV-PUR",
            TransactionType::InternalProductionReceipt => "RCV-INT",
            TransactionType::PackagingReceipt => "RCV-PACK",
            TransactionType::EngineeringReceipt => "RCV-ENG",
            TransactionType::MiscellaneousReceipt => "RCV-MIS",
            TransactionType::FinishedGoodsReceipt => "RCV-FG",
            TransactionType::MiscellaneousIssue => "ISS-MISC",
            TransactionType::IssueToManufacturing => "ISS-MFG",
            TransactionType::IssueToQc => "ISS-QC",
            TransactionType::IssueToRnd => "ISS-RND",
            TransactionType::CycleCountAdjustment => "ADJ-CYCLE",
            TransactionType::AdjustmentGain => "ADJ-GAIN",
            TransactionType::AdjustmentLoss => "ADJ-LOSS",
            TransactionType::Transfer => "XFER",
            TransactionType::ReturnToVendor => "RET-VND",
            TransactionType::InternalReturn => "RET-INT",
            TransactionType::Scrap => "SCRAP",
            TransactionType::CustomerShipment => "SHIP-CUS",
            TransactionType::ContractManufacturerShipment => "SHIP-CM",
            TransactionType::Block => "BLOCK",
            TransactionType::Release => "RELEASE",
            TransactionType::SampleIn => "SAMPLE-IN",
            TransactionType::SampleOut => "SAMPLE-OUT",
        }
    }

    pub fn stock_effect(&self) -> StockEffect {
        use TransactionType::*;
        match self {
            PurchaseReceipt | InternalProductionReceipt | PackagingReceipt | EngineeringReceipt
            | MiscellaneousReceipt | FinishedGoodsReceipt | AdjustmentGain | InternalReturn
            | SampleIn => StockEffect::Inbound,
            MiscellaneousIssue | IssueToManufacturing | IssueToQc | IssueToRnd | AdjustmentLoss
            | ReturnToVendor | Scrap | CustomerShipment | ContractManufacturerShipment
            | SampleOut => StockEffect::Outbound,
            CycleCountAdjustment => StockEffect::Signed,
            Transfer | Block | Release => StockEffect::Neutral,
        }
    }

    /// 外来收货，需要核对随货文件
    pub fn is_receipt(&self) -> bool {
        self.code().starts_with("RCV-") || matches!(self, TransactionType::SampleIn)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TransactionType {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| UnknownChoice::new("transaction type", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_serde() {
        for t in TransactionType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.code()));
            assert_eq!(t.code().parse::<TransactionType>().unwrap(), t);
        }
    }

    #[test]
    fn test_stock_effect() {
        assert_eq!(TransactionType::PurchaseReceipt.stock_effect(), StockEffect::Inbound);
        assert_eq!(TransactionType::Scrap.stock_effect(), StockEffect::Outbound);
        assert_eq!(TransactionType::CycleCountAdjustment.stock_effect(), StockEffect::Signed);
        assert_eq!(TransactionType::Transfer.stock_effect(), StockEffect::Neutral);
        assert!(TransactionType::FinishedGoodsReceipt.is_receipt());
        assert!(!TransactionType::InternalReturn.is_receipt());
    }
}
