//! 枚举模块

mod batch_status;
mod category;
mod choice;
mod contamination_risk;
mod grade;
mod hazard_class;
mod qa_review;
mod review_frequency;
mod traceability_level;
mod transaction_type;
mod unit_of_measure;

pub use batch_status::{BatchCodeQuality, BatchSource, BatchType, QaStatus};
pub use category::Category;
pub use choice::UnknownChoice;
pub use contamination_risk::ContaminationRisk;
pub use grade::Grade;
pub use hazard_class::HazardClass;
pub use qa_review::{DocumentMatch, ReviewOutcome};
pub use review_frequency::ReviewFrequency;
pub use traceability_level::TraceabilityLevel;
pub use transaction_type::{StockEffect, TransactionType};
pub use unit_of_measure::UnitOfMeasure;
