//! 领域服务：合规规则引擎、复审排期、日期状态、随货文件核对

pub mod compliance;
mod document_checks;
pub mod review_schedule;
mod status;

pub use compliance::{
    DerivedItemFields, DocumentRequirements, ItemAttributes, compute_derived_item_fields,
    compute_detailed_traceability_level, compute_document_requirements, compute_qa_required,
    compute_segregation_required, compute_traceability_level,
};
pub use document_checks::{DocumentCheck, DocumentChecks, DocumentKind, find_document_gaps};
pub use review_schedule::compute_next_review_due;
pub use status::{ExpiryStatus, ReviewStatus};
