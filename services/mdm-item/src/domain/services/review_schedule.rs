//! 复审排期
//!
//! 供应商和供应商-物料共用同一规则。间隔按固定天数（180/365）计算，不按日历月。

use chrono::{Days, NaiveDate};

use crate::domain::enums::ReviewFrequency;

/// 计算下次复审日期
///
/// `review_frequency` 为 `None` 表示取值不在闭合集合内，此时返回 `None`，
/// 不沿用旧值。
pub fn compute_next_review_due(
    last_reviewed_on: Option<NaiveDate>,
    review_frequency: Option<ReviewFrequency>,
) -> Option<NaiveDate> {
    let last_reviewed_on = last_reviewed_on?;
    let days = review_frequency?.interval_days()?;
    last_reviewed_on.checked_add_days(Days::new(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_six_months_is_180_days() {
        assert_eq!(
            compute_next_review_due(Some(date(2024, 1, 15)), Some(ReviewFrequency::SixMonths)),
            Some(date(2024, 7, 13))
        );
    }

    #[test]
    fn test_one_year_is_365_days() {
        assert_eq!(
            compute_next_review_due(Some(date(2024, 1, 15)), Some(ReviewFrequency::OneYear)),
            Some(date(2025, 1, 14))
        );
    }

    #[test]
    fn test_end_of_month_uses_day_arithmetic() {
        assert_eq!(
            compute_next_review_due(Some(date(2024, 1, 31)), Some(ReviewFrequency::SixMonths)),
            Some(date(2024, 7, 29))
        );
    }

    #[test]
    fn test_unset_last_review() {
        for frequency in ReviewFrequency::ALL {
            assert_eq!(compute_next_review_due(None, Some(frequency)), None);
        }
    }

    #[test]
    fn test_on_change_is_manual() {
        assert_eq!(
            compute_next_review_due(Some(date(2024, 1, 15)), Some(ReviewFrequency::OnChange)),
            None
        );
    }

    #[test]
    fn test_unrecognised_frequency_clears_date() {
        assert_eq!(compute_next_review_due(Some(date(2024, 1, 15)), None), None);
    }

    #[test]
    fn test_overflow_yields_none() {
        assert_eq!(
            compute_next_review_due(Some(NaiveDate::MAX), Some(ReviewFrequency::OneYear)),
            None
        );
    }
}
