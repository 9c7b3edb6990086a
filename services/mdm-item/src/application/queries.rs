//! Queries

use chrono::NaiveDate;

/// 复审提醒查询：返回已逾期或在提醒窗口内到期的记录
#[derive(Debug, Clone, Copy)]
pub struct ReviewDueQuery {
    pub as_of: NaiveDate,
}

/// 效期预警查询：返回已过期或在预警窗口内到期的批次
#[derive(Debug, Clone, Copy)]
pub struct ExpiringBatchesQuery {
    pub as_of: NaiveDate,
}
