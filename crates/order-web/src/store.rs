//! SQLite-backed order store for the intake flow.

use assistant::async_trait;
use database::Database;
use intake::{OrderStore, StoreError};
use order_core::OrderRequest;

/// [`OrderStore`] implementation over the SQLite `orders` table.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Wrap a connected database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderStore for SqliteStore {
    async fn insert(&self, order: &OrderRequest) -> Result<(), StoreError> {
        database::order::insert_order(self.db.pool(), order)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_through_store_trait() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        let store = SqliteStore::new(db.clone());
        store.insert(&OrderRequest::default()).await.unwrap();

        assert_eq!(database::order::count_orders(db.pool()).await.unwrap(), 1);
    }
}
