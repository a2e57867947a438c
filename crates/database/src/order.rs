//! Order persistence operations.

use sqlx::SqlitePool;
use tracing::info;

use order_core::{OrderRequest, OrderStatus};

use crate::error::{DatabaseError, Result};
use crate::models::OrderRow;

/// Insert a submitted order record, returning its row id.
///
/// Each submission is a single independent write; retrying after a failure
/// is the caller's (or the buyer's) decision.
pub async fn insert_order(pool: &SqlitePool, order: &OrderRequest) -> Result<i64> {
    let status = match order.status {
        OrderStatus::New => "new",
        OrderStatus::Pending => "pending",
    };

    let result = sqlx::query(
        r#"
        INSERT INTO orders (
            product, quantity, packaging, destination, incoterms, delivery_date,
            buyer_name, company, email, phone, notes, status, source
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&order.product)
    .bind(&order.quantity)
    .bind(&order.packaging)
    .bind(&order.destination)
    .bind(&order.incoterms)
    .bind(&order.delivery_date)
    .bind(&order.buyer_name)
    .bind(&order.company)
    .bind(&order.email)
    .bind(&order.phone)
    .bind(&order.notes)
    .bind(status)
    .bind(&order.source)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    info!(id, product = %order.product, "Order persisted");
    Ok(id)
}

/// Fetch one order by id.
pub async fn get_order(pool: &SqlitePool, id: i64) -> Result<OrderRow> {
    sqlx::query_as::<_, OrderRow>(
        r#"
        SELECT id, product, quantity, packaging, destination, incoterms, delivery_date,
               buyer_name, company, email, phone, notes, status, source, created_at
        FROM orders
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DatabaseError::NotFound {
        entity: "Order",
        id: id.to_string(),
    })
}

/// List all orders, newest first.
pub async fn list_orders(pool: &SqlitePool) -> Result<Vec<OrderRow>> {
    let orders = sqlx::query_as::<_, OrderRow>(
        r#"
        SELECT id, product, quantity, packaging, destination, incoterms, delivery_date,
               buyer_name, company, email, phone, notes, status, source, created_at
        FROM orders
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

/// Count persisted orders.
pub async fn count_orders(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
