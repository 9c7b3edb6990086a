//! 供应商与供应商-物料命令

use chrono::NaiveDate;
use cuba_common::UserId;
use cuba_errors::{AppError, AppResult};
use serde::Deserialize;

use crate::domain::enums::BatchCodeQuality;

/// 创建供应商命令
///
/// `review_frequency` 省略时取默认（1 年），传空串表示不排期。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSupplierCommand {
    pub supplier_id: String,
    pub supplier_name: String,
    #[serde(default)]
    pub business_unit: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub country_of_origin: String,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub approved_on: Option<NaiveDate>,
    #[serde(default)]
    pub last_reviewed_on: Option<NaiveDate>,
    #[serde(default)]
    pub review_frequency: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

impl CreateSupplierCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.supplier_name.trim().is_empty() {
            return Err(AppError::validation("supplier name must not be empty"));
        }
        if !self.country_of_origin.is_empty()
            && (self.country_of_origin.len() != 3
                || !self.country_of_origin.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(AppError::validation("country of origin must be a 3-letter code"));
        }
        Ok(())
    }
}

/// 更新供应商命令
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSupplierCommand {
    pub supplier_id: String,
    pub supplier_name: Option<String>,
    pub address: Option<String>,
    pub certifications: Option<Vec<String>>,
    pub review_frequency: Option<String>,
    pub notes: Option<String>,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

impl UpdateSupplierCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.supplier_name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("supplier name must not be empty"));
        }
        Ok(())
    }
}

/// 设置/撤销供应商 QA 批准
#[derive(Debug, Clone)]
pub struct ApproveSupplierCommand {
    pub supplier_id: String,
    pub approved: bool,
    pub effective_on: NaiveDate,
    pub user_id: Option<UserId>,
}

/// 登记一次复审；可同时调整复审频率
#[derive(Debug, Clone)]
pub struct RecordReviewCommand {
    pub reviewed_on: NaiveDate,
    pub review_frequency: Option<String>,
    pub user_id: Option<UserId>,
}

/// 创建供应商-物料关联命令
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSupplierProductCommand {
    pub item_code: String,
    pub supplier_id: String,
    #[serde(default)]
    pub manufacturer_name: String,
    #[serde(default)]
    pub product_code: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub batch_code_format_known: bool,
    #[serde(default)]
    pub batch_code_quality: BatchCodeQuality,
    #[serde(default)]
    pub traceability_level: Option<String>,
    #[serde(default)]
    pub spec_sheet_url: Option<String>,
    #[serde(default)]
    pub preferred_vendor: bool,
    #[serde(default)]
    pub spec_verified: bool,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub last_reviewed_on: Option<NaiveDate>,
    /// 省略时取默认（6 个月），传空串表示不排期
    #[serde(default)]
    pub review_frequency: Option<String>,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

impl CreateSupplierProductCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_spec_sheet_url(self.spec_sheet_url.as_deref())
    }
}

/// 更新供应商-物料关联命令
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSupplierProductCommand {
    pub item_code: String,
    pub supplier_id: String,
    pub manufacturer_name: Option<String>,
    pub product_code: Option<String>,
    pub grade: Option<String>,
    pub batch_code_format_known: Option<bool>,
    pub batch_code_quality: Option<BatchCodeQuality>,
    pub traceability_level: Option<String>,
    pub spec_sheet_url: Option<String>,
    pub preferred_vendor: Option<bool>,
    pub spec_verified: Option<bool>,
    pub approved: Option<bool>,
    pub review_frequency: Option<String>,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

impl UpdateSupplierProductCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_spec_sheet_url(self.spec_sheet_url.as_deref())
    }
}

fn validate_spec_sheet_url(url: Option<&str>) -> AppResult<()> {
    match url {
        Some(url) if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) => {
            Err(AppError::validation("spec sheet url must be an http(s) url"))
        }
        _ => Ok(()),
    }
}
