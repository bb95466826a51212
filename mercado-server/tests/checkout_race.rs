//! 并发下单测试 - 同一件库存只能卖出一次
//!
//! 使用文件型 SQLite（WAL），两个请求并发抢购 remaining = 1 的商品。
//! 条件扣减是事务的第一条语句，失败方在写锁上排队后按已提交库存
//! 重新求值，必须得到库存不足错误而不是超卖。

use mercado_server::db::DbService;
use mercado_server::db::repository::{RepoError, orders};
use tempfile::TempDir;

async fn setup_db(dir: &TempDir, initial_stock: i64) -> DbService {
    let db_path = dir.path().join("race.db");
    let db = DbService::new(db_path.to_str().unwrap()).await.unwrap();

    sqlx::query(
        "INSERT INTO users (id, username, password_hash, email, created_at)
         VALUES (1, 'alice', 'x', 'alice@example.com', 0)",
    )
    .execute(&db.pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO products (id, name, price, remaining, created_at)
         VALUES (7, 'Olive Oil 1L', 20.0, ?, 0)",
    )
    .bind(initial_stock)
    .execute(&db.pool)
    .await
    .unwrap();

    db
}

async fn remaining_stock(db: &DbService) -> i64 {
    sqlx::query_scalar("SELECT remaining FROM products WHERE id = 7")
        .fetch_one(&db.pool)
        .await
        .unwrap()
}

async fn order_count(db: &DbService) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&db.pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_two_concurrent_checkouts_sell_one_unit() {
    let dir = TempDir::new().unwrap();
    let db = setup_db(&dir, 1).await;

    let pool_a = db.pool.clone();
    let pool_b = db.pool.clone();

    let a = tokio::spawn(async move { orders::place_order(&pool_a, 1, 7, "Cash").await });
    let b = tokio::spawn(async move { orders::place_order(&pool_b, 1, 7, "Cash").await });

    let results = [a.await.unwrap(), b.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();

    assert_eq!(successes, 1, "exactly one checkout may win the last unit");
    let loser = results.iter().find(|r| r.is_err()).unwrap();
    match loser {
        Err(RepoError::Validation(msg)) => {
            assert_eq!(msg, "Not enough stock for product 7");
        }
        other => panic!("expected stock-insufficiency validation error, got {other:?}"),
    }

    assert_eq!(remaining_stock(&db).await, 0);
    assert_eq!(order_count(&db).await, 1);
}

#[tokio::test]
async fn test_contended_stock_never_oversells() {
    let dir = TempDir::new().unwrap();
    let db = setup_db(&dir, 3).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = db.pool.clone();
        handles.push(tokio::spawn(async move {
            orders::place_order(&pool, 1, 7, "Cash").await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(RepoError::Validation(msg)) => {
                assert_eq!(msg, "Not enough stock for product 7");
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(successes, 3, "exactly the available stock may be sold");
    assert_eq!(remaining_stock(&db).await, 0);
    assert_eq!(order_count(&db).await, 3);

    // Each winner left a complete order: one line item and one payment
    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    let payments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(items, 3);
    assert_eq!(payments, 3);
}

#[tokio::test]
async fn test_concurrent_cart_checkouts_roll_back_losers() {
    let dir = TempDir::new().unwrap();
    let db = setup_db(&dir, 2).await;

    // Both carts want both remaining units; only one can have them.
    let make_items = || {
        vec![shared::models::CartItem {
            product_id: 7,
            quantity: 2,
        }]
    };

    let pool_a = db.pool.clone();
    let items_a = make_items();
    let a = tokio::spawn(async move { orders::place_cart_order(&pool_a, 1, &items_a, "Online").await });

    let pool_b = db.pool.clone();
    let items_b = make_items();
    let b = tokio::spawn(async move { orders::place_cart_order(&pool_b, 1, &items_b, "Online").await });

    let results = [a.await.unwrap(), b.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();

    assert_eq!(successes, 1);
    assert_eq!(remaining_stock(&db).await, 0);
    assert_eq!(order_count(&db).await, 1);

    let total: f64 = sqlx::query_scalar("SELECT total_cost FROM orders")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(total, 40.0);
}
