//! 批次命令

use chrono::NaiveDate;
use cuba_common::UserId;
use cuba_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::enums::{BatchSource, BatchType};

/// 登记批次命令
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterBatchCommand {
    pub batch_id: String,
    pub item_code: String,
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub source: BatchSource,
    #[serde(default)]
    pub batch_type: BatchType,
    pub quantity: Decimal,
    #[serde(default)]
    pub received_on: Option<NaiveDate>,
    #[serde(default)]
    pub manufactured_on: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// 入库库位
    #[serde(default)]
    pub storage_location: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

impl RegisterBatchCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.quantity.is_sign_negative() {
            return Err(AppError::validation("quantity must not be negative"));
        }
        if let (Some(manufactured), Some(expiry)) = (self.manufactured_on, self.expiry_date) {
            if expiry < manufactured {
                return Err(AppError::validation("expiry date precedes manufacture date"));
            }
        }
        Ok(())
    }
}

/// 记录批次 QA 处置
#[derive(Debug, Clone)]
pub struct RecordBatchDispositionCommand {
    pub batch_id: String,
    pub qa_status: String,
    pub notes: Option<String>,
    pub user_id: Option<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> RegisterBatchCommand {
        serde_json::from_str(
            r#"{"batch_id":"LOT-1","item_code":"CHE-SOL-0001","quantity":"2.5",
                "manufactured_on":"2024-01-01","expiry_date":"2025-01-01"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let cmd = command();
        assert_eq!(cmd.source, BatchSource::External);
        assert_eq!(cmd.batch_type, BatchType::Production);
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_quantity_and_inverted_dates() {
        let mut cmd = command();
        cmd.quantity = Decimal::NEGATIVE_ONE;
        assert!(cmd.validate().is_err());

        let mut cmd = command();
        cmd.expiry_date = NaiveDate::from_ymd_opt(2023, 12, 31);
        assert!(cmd.validate().is_err());
    }
}
