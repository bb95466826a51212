//! Category Repository

use super::RepoResult;
use shared::models::Category;
use sqlx::SqlitePool;

/// 获取所有分类
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT id, name, description FROM categories ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
