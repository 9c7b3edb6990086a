//! 库区、库位仓储接口

use async_trait::async_trait;
use cuba_errors::AppResult;
use cuba_ports::Repository;

use crate::domain::entities::{StorageLocation, StorageZone};
use crate::domain::value_objects::{LocationId, StorageZoneId};

#[async_trait]
pub trait StorageZoneRepository: Repository<StorageZone, StorageZoneId> {
    async fn list_all(&self) -> AppResult<Vec<StorageZone>>;
}

#[async_trait]
pub trait StorageLocationRepository: Repository<StorageLocation, LocationId> {
    async fn find_by_zone(&self, zone_id: &StorageZoneId) -> AppResult<Vec<StorageLocation>>;
}
