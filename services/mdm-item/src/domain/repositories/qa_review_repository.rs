//! QA 审核仓储接口

use async_trait::async_trait;
use cuba_errors::AppResult;
use cuba_ports::Repository;

use crate::domain::entities::QaReview;
use crate::domain::value_objects::{BatchId, QaReviewId};

#[async_trait]
pub trait QaReviewRepository: Repository<QaReview, QaReviewId> {
    /// 某批次的全部审核，按审核日期排序
    async fn find_by_batch(&self, batch_id: &BatchId) -> AppResult<Vec<QaReview>>;
}
