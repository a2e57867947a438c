//! Persistence seam for submitted orders.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use order_core::OrderRequest;

/// Errors from the persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the write.
    #[error("storage failed: {0}")]
    Backend(String),
}

/// One-way sink for validated order records.
///
/// Each submission is a single independent, non-retried write; whatever
/// consistency the backend guarantees is the backend's concern.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert one order record.
    async fn insert(&self, order: &OrderRequest) -> Result<(), StoreError>;
}

/// In-memory store, for tests and local development.
#[derive(Debug, Default)]
pub struct MemoryStore {
    orders: Mutex<Vec<OrderRequest>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.lock().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.orders.lock().await.is_empty()
    }

    /// Snapshot of the stored orders.
    pub async fn orders(&self) -> Vec<OrderRequest> {
        self.orders.lock().await.clone()
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert(&self, order: &OrderRequest) -> Result<(), StoreError> {
        self.orders.lock().await.push(order.clone());
        Ok(())
    }
}

/// A store that fails every write, for exercising the failure path.
#[derive(Debug, Default)]
pub struct RejectingStore;

#[async_trait]
impl OrderStore for RejectingStore {
    async fn insert(&self, _order: &OrderRequest) -> Result<(), StoreError> {
        Err(StoreError::Backend("write rejected".to_string()))
    }
}
