//! Product Repository
//!
//! Catalog reads plus product creation. Stock decrements do NOT live
//! here; they belong to the order placement transaction in
//! [`super::orders`].

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str =
    "SELECT id, name, description, price, remaining, category_id, image_url, created_at FROM products";

/// 获取所有商品
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!("{PRODUCT_SELECT} ORDER BY id");
    let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// 按 ID 获取商品
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// 按名称/描述模糊搜索（大小写不敏感，最多 20 条）
pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<Product>> {
    let pattern = format!("%{query}%");
    let sql = format!("{PRODUCT_SELECT} WHERE name LIKE ?1 OR description LIKE ?1 LIMIT 20");
    let rows = sqlx::query_as::<_, Product>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// 创建商品（初始库存默认 0）
pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO products (name, description, price, remaining, category_id, image_url, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.remaining.unwrap_or(0))
    .bind(data.category_id)
    .bind(&data.image_url)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
}
