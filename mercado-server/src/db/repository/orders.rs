//! Order Repository
//!
//! The order placement workflow and the customer history read. Placement
//! is the only multi-statement write path in the system: order header,
//! line items, payment record, and stock decrements commit together or
//! not at all.
//!
//! The conditional stock decrement is the transaction's first statement
//! and its affected-row count is always checked: zero rows means the
//! stock ran out and the whole order is rolled back. Decrementing first
//! also makes concurrent checkouts serialize on the database write lock,
//! so the losing request re-evaluates against committed stock and fails
//! with the insufficiency error instead of overselling.

use super::{RepoError, RepoResult};
use shared::models::{CartItem, CustomerOrder, OrderLineView, OrderSummary};
use shared::util::now_millis;
use sqlx::SqlitePool;

/// The only status ever written; transitions belong to a future
/// fulfillment workflow.
pub const ORDER_STATUS_PENDING: &str = "Pending";

/// 下单（单商品，隐含数量 1）
///
/// Returns the created order id.
pub async fn place_order(
    pool: &SqlitePool,
    customer_id: i64,
    product_id: i64,
    payment_method: &str,
) -> RepoResult<i64> {
    // Price lookup happens before the transaction: an unknown product is
    // a 404 regardless of stock, and the transaction below must open
    // with a write.
    let price: Option<f64> = sqlx::query_scalar("SELECT price FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_optional(pool)
        .await?;
    let price = price.ok_or_else(|| RepoError::NotFound("Product not found".to_string()))?;

    ensure_customer_exists(pool, customer_id).await?;

    let mut tx = pool.begin().await?;

    let updated =
        sqlx::query("UPDATE products SET remaining = remaining - 1 WHERE id = ? AND remaining > 0")
            .bind(product_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    if updated == 0 {
        // Rolled back on drop
        return Err(RepoError::Validation(format!(
            "Not enough stock for product {product_id}"
        )));
    }

    let order_id = insert_order_header(&mut tx, customer_id, price).await?;

    sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES (?, ?, 1)")
        .bind(order_id)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

    insert_payment(&mut tx, order_id, payment_method).await?;

    tx.commit().await?;

    tracing::info!(order_id, customer_id, product_id, "Order placed");
    Ok(order_id)
}

/// 下单（购物车，多商品）
///
/// Lines are processed in input order; the first offending line decides
/// the error. Any failure rolls back every decrement already applied.
pub async fn place_cart_order(
    pool: &SqlitePool,
    customer_id: i64,
    items: &[CartItem],
    payment_method: &str,
) -> RepoResult<i64> {
    if items.is_empty() {
        return Err(RepoError::Validation("No products in the order".to_string()));
    }
    for item in items {
        if item.quantity <= 0 {
            return Err(RepoError::Validation(format!(
                "Invalid quantity for product {}",
                item.product_id
            )));
        }
    }

    ensure_customer_exists(pool, customer_id).await?;

    let mut tx = pool.begin().await?;
    let mut total_cost = 0.0_f64;

    for item in items {
        let updated = sqlx::query(
            "UPDATE products SET remaining = remaining - ?1 WHERE id = ?2 AND remaining >= ?1",
        )
        .bind(item.quantity)
        .bind(item.product_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            // Distinguish a missing product from exhausted stock
            let remaining: Option<i64> =
                sqlx::query_scalar("SELECT remaining FROM products WHERE id = ?")
                    .bind(item.product_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            return Err(match remaining {
                None => RepoError::NotFound(format!("Product {} not found", item.product_id)),
                Some(_) => RepoError::Validation(format!(
                    "Not enough stock for product {}",
                    item.product_id
                )),
            });
        }

        let price: f64 = sqlx::query_scalar("SELECT price FROM products WHERE id = ?")
            .bind(item.product_id)
            .fetch_one(&mut *tx)
            .await?;
        total_cost += price * item.quantity as f64;
    }

    let order_id = insert_order_header(&mut tx, customer_id, total_cost).await?;

    for item in items {
        sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES (?, ?, ?)")
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
    }

    insert_payment(&mut tx, order_id, payment_method).await?;

    tx.commit().await?;

    tracing::info!(
        order_id,
        customer_id,
        lines = items.len(),
        "Cart order placed"
    );
    Ok(order_id)
}

/// 查询客户的全部订单（含已解析的行项目），按下单时间倒序
///
/// Line items join the product's *current* name and price, not a
/// snapshot of the price paid. Zero orders is an empty result, not an
/// error.
pub async fn list_customer_orders(
    pool: &SqlitePool,
    customer_id: i64,
) -> RepoResult<Vec<CustomerOrder>> {
    let orders = sqlx::query_as::<_, OrderSummary>(
        "SELECT o.id, o.order_date, o.total_cost, o.status, u.username AS customer_name
         FROM orders o
         JOIN users u ON o.customer_id = u.id
         WHERE o.customer_id = ?
         ORDER BY o.order_date DESC, o.id DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let lines = sqlx::query_as::<_, OrderLineView>(
        "SELECT oi.order_id, oi.product_id, p.name, p.price, oi.quantity
         FROM order_items oi
         JOIN products p ON oi.product_id = p.id
         JOIN orders o ON oi.order_id = o.id
         WHERE o.customer_id = ?
         ORDER BY oi.order_id, oi.product_id",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(orders
        .into_iter()
        .map(|order| {
            let products = lines
                .iter()
                .filter(|line| line.order_id == order.id)
                .cloned()
                .collect();
            CustomerOrder { order, products }
        })
        .collect())
}

async fn ensure_customer_exists(pool: &SqlitePool, customer_id: i64) -> RepoResult<()> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
        .bind(customer_id)
        .fetch_optional(pool)
        .await?;
    exists
        .map(|_| ())
        .ok_or_else(|| RepoError::NotFound("Customer not found".to_string()))
}

async fn insert_order_header(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    customer_id: i64,
    total_cost: f64,
) -> RepoResult<i64> {
    let order_id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (customer_id, order_date, total_cost, status)
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(customer_id)
    .bind(now_millis())
    .bind(total_cost)
    .bind(ORDER_STATUS_PENDING)
    .fetch_one(&mut **tx)
    .await?;
    Ok(order_id)
}

async fn insert_payment(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    order_id: i64,
    payment_method: &str,
) -> RepoResult<()> {
    sqlx::query("INSERT INTO payments (order_id, payment_mode) VALUES (?, ?)")
        .bind(order_id)
        .bind(payment_method)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory SQLite pool with the order-workflow schema and the
    /// standard seed: customer 1, product 7 (20.00, stock 3), product 9
    /// (15.00, stock 5).
    async fn test_pool() -> SqlitePool {
        // Single connection: every handle must see the same in-memory db
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                email TEXT NOT NULL,
                phonenumber TEXT,
                address TEXT,
                role TEXT NOT NULL DEFAULT 'Customer',
                created_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE products (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                price REAL NOT NULL,
                remaining INTEGER NOT NULL DEFAULT 0 CHECK (remaining >= 0),
                category_id INTEGER,
                image_url TEXT,
                created_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE orders (
                id INTEGER PRIMARY KEY,
                customer_id INTEGER NOT NULL,
                order_date INTEGER NOT NULL DEFAULT 0,
                total_cost REAL NOT NULL,
                status TEXT NOT NULL DEFAULT 'Pending'
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE order_items (
                order_id INTEGER NOT NULL,
                product_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL CHECK (quantity > 0)
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE payments (
                id INTEGER PRIMARY KEY,
                order_id INTEGER NOT NULL,
                payment_mode TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO users (id, username, password_hash, email) VALUES (1, 'alice', 'x', 'alice@example.com')",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO products (id, name, price, remaining) VALUES
                (7, 'Olive Oil 1L', 20.0, 3),
                (9, 'Basmati Rice 5kg', 15.0, 5)",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    async fn remaining_stock(pool: &SqlitePool, product_id: i64) -> i64 {
        sqlx::query_scalar("SELECT remaining FROM products WHERE id = ?")
            .bind(product_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_place_order_decrements_stock_and_records_rows() {
        let pool = test_pool().await;

        let order_id = place_order(&pool, 1, 7, "Cash").await.unwrap();

        let (total, status): (f64, String) =
            sqlx::query_as("SELECT total_cost, status FROM orders WHERE id = ?")
                .bind(order_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(total, 20.0);
        assert_eq!(status, "Pending");
        assert_eq!(remaining_stock(&pool, 7).await, 2);

        let qty: i64 = sqlx::query_scalar(
            "SELECT quantity FROM order_items WHERE order_id = ? AND product_id = 7",
        )
        .bind(order_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(qty, 1);

        let mode: String = sqlx::query_scalar("SELECT payment_mode FROM payments WHERE order_id = ?")
            .bind(order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(mode, "Cash");
    }

    #[tokio::test]
    async fn test_place_order_unknown_product() {
        let pool = test_pool().await;

        let err = place_order(&pool, 1, 999, "Cash").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
        assert_eq!(count(&pool, "orders").await, 0);
    }

    #[tokio::test]
    async fn test_place_order_unknown_customer() {
        let pool = test_pool().await;

        let err = place_order(&pool, 42, 7, "Cash").await.unwrap_err();
        match err {
            RepoError::NotFound(msg) => assert_eq!(msg, "Customer not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(remaining_stock(&pool, 7).await, 3);
    }

    #[tokio::test]
    async fn test_place_order_exhausted_stock_rolls_back() {
        let pool = test_pool().await;
        sqlx::query("UPDATE products SET remaining = 0 WHERE id = 7")
            .execute(&pool)
            .await
            .unwrap();

        let err = place_order(&pool, 1, 7, "Cash").await.unwrap_err();
        match err {
            RepoError::Validation(msg) => assert_eq!(msg, "Not enough stock for product 7"),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(remaining_stock(&pool, 7).await, 0);
        assert_eq!(count(&pool, "orders").await, 0);
        assert_eq!(count(&pool, "payments").await, 0);
    }

    #[tokio::test]
    async fn test_cart_order_totals_and_decrements() {
        let pool = test_pool().await;
        let items = vec![
            CartItem {
                product_id: 7,
                quantity: 2,
            },
            CartItem {
                product_id: 9,
                quantity: 1,
            },
        ];

        let order_id = place_cart_order(&pool, 1, &items, "Credit Card")
            .await
            .unwrap();

        let total: f64 = sqlx::query_scalar("SELECT total_cost FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 55.0); // 2 * 20.00 + 1 * 15.00
        assert_eq!(remaining_stock(&pool, 7).await, 1);
        assert_eq!(remaining_stock(&pool, 9).await, 4);
        assert_eq!(count(&pool, "order_items").await, 2);
        assert_eq!(count(&pool, "payments").await, 1);
    }

    #[tokio::test]
    async fn test_cart_order_unknown_product_rolls_back_everything() {
        let pool = test_pool().await;
        let items = vec![
            CartItem {
                product_id: 7,
                quantity: 1,
            },
            CartItem {
                product_id: 999,
                quantity: 1,
            },
        ];

        let err = place_cart_order(&pool, 1, &items, "Cash").await.unwrap_err();
        match err {
            RepoError::NotFound(msg) => assert_eq!(msg, "Product 999 not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }

        // The decrement applied for product 7 must have been rolled back
        assert_eq!(remaining_stock(&pool, 7).await, 3);
        assert_eq!(count(&pool, "orders").await, 0);
        assert_eq!(count(&pool, "order_items").await, 0);
        assert_eq!(count(&pool, "payments").await, 0);
    }

    #[tokio::test]
    async fn test_cart_order_insufficient_stock_rolls_back() {
        let pool = test_pool().await;
        let items = vec![CartItem {
            product_id: 7,
            quantity: 4, // only 3 in stock
        }];

        let err = place_cart_order(&pool, 1, &items, "Cash").await.unwrap_err();
        match err {
            RepoError::Validation(msg) => assert_eq!(msg, "Not enough stock for product 7"),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(remaining_stock(&pool, 7).await, 3);
        assert_eq!(count(&pool, "orders").await, 0);
    }

    #[tokio::test]
    async fn test_cart_order_rejects_empty_cart() {
        let pool = test_pool().await;

        let err = place_cart_order(&pool, 1, &[], "Cash").await.unwrap_err();
        match err {
            RepoError::Validation(msg) => assert_eq!(msg, "No products in the order"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cart_order_rejects_nonpositive_quantity() {
        let pool = test_pool().await;
        let items = vec![CartItem {
            product_id: 7,
            quantity: 0,
        }];

        let err = place_cart_order(&pool, 1, &items, "Cash").await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert_eq!(remaining_stock(&pool, 7).await, 3);
    }

    #[tokio::test]
    async fn test_history_newest_first_with_resolved_lines() {
        let pool = test_pool().await;

        let first = place_order(&pool, 1, 7, "Cash").await.unwrap();
        let items = vec![CartItem {
            product_id: 9,
            quantity: 2,
        }];
        let second = place_cart_order(&pool, 1, &items, "Online").await.unwrap();

        let history = list_customer_orders(&pool, 1).await.unwrap();
        assert_eq!(history.len(), 2);

        // Same-millisecond placements fall back to id order, newest first
        assert_eq!(history[0].order.id, second);
        assert_eq!(history[1].order.id, first);
        assert_eq!(history[0].order.customer_name, "alice");

        assert_eq!(history[0].products.len(), 1);
        assert_eq!(history[0].products[0].product_id, 9);
        assert_eq!(history[0].products[0].name, "Basmati Rice 5kg");
        assert_eq!(history[0].products[0].price, 15.0);
        assert_eq!(history[0].products[0].quantity, 2);

        assert_eq!(history[1].products.len(), 1);
        assert_eq!(history[1].products[0].product_id, 7);
    }

    #[tokio::test]
    async fn test_history_empty_for_customer_without_orders() {
        let pool = test_pool().await;

        let history = list_customer_orders(&pool, 1).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_orders_only_ever_pending() {
        let pool = test_pool().await;

        place_order(&pool, 1, 7, "Cash").await.unwrap();
        let items = vec![CartItem {
            product_id: 9,
            quantity: 1,
        }];
        place_cart_order(&pool, 1, &items, "Cash").await.unwrap();

        let statuses: Vec<String> = sqlx::query_scalar("SELECT DISTINCT status FROM orders")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(statuses, vec!["Pending".to_string()]);
    }
}
