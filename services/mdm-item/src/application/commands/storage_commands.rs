//! 库区、库位命令

use cuba_common::UserId;
use cuba_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::Deserialize;

/// 创建库区命令
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStorageZoneCommand {
    pub zone_id: String,
    pub zone_name: String,
    #[serde(default)]
    pub temperature_range: String,
    #[serde(default)]
    pub humidity_controlled: bool,
    /// 可存放的危险类别编码
    #[serde(default)]
    pub hazard_compatibility: Vec<String>,
    #[serde(default)]
    pub default_for_category: Option<String>,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

impl CreateStorageZoneCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.zone_name.trim().is_empty() {
            return Err(AppError::validation("zone name must not be empty"));
        }
        Ok(())
    }
}

/// 创建库位命令
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStorageLocationCommand {
    pub location_id: String,
    pub zone_id: String,
    #[serde(default)]
    pub rack_shelf: String,
    #[serde(default)]
    pub max_capacity: Option<Decimal>,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

impl CreateStorageLocationCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.max_capacity.is_some_and(|c| c.is_sign_negative()) {
            return Err(AppError::validation("max capacity must not be negative"));
        }
        Ok(())
    }
}

/// 批次移库
#[derive(Debug, Clone)]
pub struct AssignBatchLocationCommand {
    pub batch_id: String,
    pub location_id: String,
    pub user_id: Option<UserId>,
}
