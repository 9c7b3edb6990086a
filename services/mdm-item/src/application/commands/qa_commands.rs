//! QA 审核命令

use chrono::NaiveDate;
use cuba_common::UserId;
use cuba_errors::{AppError, AppResult};
use serde::Deserialize;

/// 登记批次 QA 审核命令
///
/// `document_match` 与 `outcome` 以存储编码传入（`Yes`/`Partial`/`No`，
/// `Approved`/`Conditional`/`Rejected`/`Escalated`）。
#[derive(Debug, Clone, Deserialize)]
pub struct RecordQaReviewCommand {
    pub qa_review_id: String,
    pub batch_id: String,
    #[serde(default)]
    pub coa_attached: bool,
    #[serde(default)]
    pub coa_match: bool,
    #[serde(default)]
    pub sds_attached: bool,
    #[serde(default)]
    pub sds_match: bool,
    #[serde(default)]
    pub spec_attached: bool,
    #[serde(default)]
    pub spec_match: bool,
    #[serde(default)]
    pub label_attached: bool,
    pub document_match: String,
    pub outcome: String,
    pub reviewer: String,
    pub review_date: NaiveDate,
    #[serde(default)]
    pub qa_file_link: String,
    #[serde(default)]
    pub comments: String,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

impl RecordQaReviewCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.reviewer.trim().is_empty() {
            return Err(AppError::validation("reviewer must not be empty"));
        }
        Ok(())
    }
}
