//! 库存事务命令

use chrono::{DateTime, Utc};
use cuba_common::UserId;
use cuba_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::Deserialize;

/// 登记库存事务命令
#[derive(Debug, Clone, Deserialize)]
pub struct RecordTransactionCommand {
    pub transaction_id: String,
    pub occurred_at: DateTime<Utc>,
    /// 经办人
    pub user: String,
    /// 事务类型编码，如 `RCV-PUR`
    pub transaction_type: String,
    pub item_code: String,
    #[serde(default)]
    pub batch_id: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub product_code: String,
    pub quantity: Decimal,
    /// 缺省使用物料的计量单位
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub coa_provided: bool,
    #[serde(default)]
    pub sds_provided: bool,
    #[serde(default)]
    pub label_applied: bool,
    #[serde(default)]
    pub storage_location: Option<String>,
    #[serde(default)]
    pub qa_review_id: Option<String>,
    #[serde(default)]
    pub comments: String,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

impl RecordTransactionCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.user.trim().is_empty() {
            return Err(AppError::validation("user must not be empty"));
        }
        if self.quantity.is_zero() {
            return Err(AppError::validation("quantity must not be zero"));
        }
        Ok(())
    }
}
