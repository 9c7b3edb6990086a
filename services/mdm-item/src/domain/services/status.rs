//! 日期驱动的状态分类：复审提醒、批次效期

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 复审状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewStatus {
    /// 无自动排期（未复审过或仅变更时复审）
    Unscheduled,
    /// 已逾期
    Overdue,
    /// 提醒窗口内到期
    DueSoon,
    Scheduled,
}

impl ReviewStatus {
    pub fn evaluate(next_review_due: Option<NaiveDate>, today: NaiveDate, warning_days: u32) -> Self {
        let Some(due) = next_review_due else {
            return ReviewStatus::Unscheduled;
        };

        let remaining = (due - today).num_days();
        if remaining < 0 {
            ReviewStatus::Overdue
        } else if remaining <= i64::from(warning_days) {
            ReviewStatus::DueSoon
        } else {
            ReviewStatus::Scheduled
        }
    }

    pub fn needs_attention(&self) -> bool {
        matches!(self, ReviewStatus::Overdue | ReviewStatus::DueSoon)
    }
}

/// 批次效期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryStatus {
    Expired,
    /// 短窗口内（默认 7 天）到期
    ExpiringSoon,
    /// 预警窗口内（默认 30 天）到期
    ExpiringWithinWarning,
    Valid,
}

impl ExpiryStatus {
    /// 当天到期视为即将到期，不算过期
    pub fn classify(expiry_date: NaiveDate, today: NaiveDate, soon_days: u32, warning_days: u32) -> Self {
        let remaining = (expiry_date - today).num_days();
        if remaining < 0 {
            ExpiryStatus::Expired
        } else if remaining <= i64::from(soon_days) {
            ExpiryStatus::ExpiringSoon
        } else if remaining <= i64::from(warning_days) {
            ExpiryStatus::ExpiringWithinWarning
        } else {
            ExpiryStatus::Valid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_review_status() {
        let today = date(2024, 6, 1);
        assert_eq!(ReviewStatus::evaluate(None, today, 30), ReviewStatus::Unscheduled);
        assert_eq!(
            ReviewStatus::evaluate(Some(date(2024, 5, 31)), today, 30),
            ReviewStatus::Overdue
        );
        assert_eq!(ReviewStatus::evaluate(Some(today), today, 30), ReviewStatus::DueSoon);
        assert_eq!(
            ReviewStatus::evaluate(Some(date(2024, 7, 1)), today, 30),
            ReviewStatus::DueSoon
        );
        assert_eq!(
            ReviewStatus::evaluate(Some(date(2024, 7, 2)), today, 30),
            ReviewStatus::Scheduled
        );
        assert!(ReviewStatus::Overdue.needs_attention());
        assert!(!ReviewStatus::Unscheduled.needs_attention());
    }

    #[test]
    fn test_expiry_windows() {
        let today = date(2024, 6, 1);
        let classify = |d| ExpiryStatus::classify(d, today, 7, 30);

        assert_eq!(classify(date(2024, 5, 31)), ExpiryStatus::Expired);
        assert_eq!(classify(today), ExpiryStatus::ExpiringSoon);
        assert_eq!(classify(date(2024, 6, 8)), ExpiryStatus::ExpiringSoon);
        assert_eq!(classify(date(2024, 6, 9)), ExpiryStatus::ExpiringWithinWarning);
        assert_eq!(classify(date(2024, 7, 1)), ExpiryStatus::ExpiringWithinWarning);
        assert_eq!(classify(date(2024, 7, 2)), ExpiryStatus::Valid);
    }
}
