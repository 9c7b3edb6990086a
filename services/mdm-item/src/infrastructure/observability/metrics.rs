//! mdm-item Metrics
//!
//! 业务指标记录

use metrics::counter;

use crate::domain::enums::{ReviewFrequency, ReviewOutcome, TraceabilityLevel, TransactionType};

/// 记录一次物料派生计算
pub fn record_derivation(qa_required: bool, traceability: TraceabilityLevel) {
    let labels = [
        ("qa_required", qa_required.to_string()),
        ("traceability", traceability.code().to_string()),
    ];
    counter!("mdm_item_derivations_total", &labels).increment(1);
}

/// 记录一次复审排期计算
pub fn record_review_schedule(entity: &'static str, frequency: Option<ReviewFrequency>) {
    let frequency = frequency.map_or("unset", |f| f.code());
    let labels = [("entity", entity.to_string()), ("frequency", frequency.to_string())];
    counter!("mdm_review_schedules_total", &labels).increment(1);
}

/// 记录一次保存
pub fn record_save(operation: &'static str) {
    counter!("mdm_item_saves_total", "operation" => operation).increment(1);
}

/// 记录一次批次 QA 审核
pub fn record_qa_review(outcome: ReviewOutcome) {
    counter!("mdm_qa_reviews_total", "outcome" => outcome.code()).increment(1);
}

/// 记录一次库存事务
pub fn record_transaction(transaction_type: TransactionType) {
    counter!("mdm_inventory_transactions_total", "type" => transaction_type.code()).increment(1);
}
