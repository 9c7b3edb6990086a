//! 持久化实现

mod memory;

pub use memory::{
    InMemoryBatchRepository, InMemoryItemRepository, InMemoryQaReviewRepository,
    InMemoryRepository, InMemoryStorageLocationRepository, InMemoryStorageZoneRepository,
    InMemorySupplierProductRepository, InMemorySupplierRepository, InMemoryTransactionRepository,
    in_memory_repositories,
};
