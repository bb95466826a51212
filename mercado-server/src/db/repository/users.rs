//! User Repository
//!
//! Credentials live in the `users` table; a customer is a user with
//! `role = 'Customer'`. Password hashing/verification happens in the
//! auth layer; this module only stores and fetches rows.

use super::{RepoError, RepoResult};
use shared::models::{ProfileUpdate, RegisterRequest, User, UserProfile};
use shared::util::now_millis;
use sqlx::SqlitePool;

const PROFILE_SELECT: &str =
    "SELECT id, username, email, phonenumber, address, role FROM users";

/// 注册新用户（角色固定为 Customer），返回新用户 ID
///
/// The username is checked first for a friendly error, and the UNIQUE
/// constraint still backstops a racing duplicate.
pub async fn create(
    pool: &SqlitePool,
    data: &RegisterRequest,
    password_hash: &str,
) -> RepoResult<i64> {
    if find_by_username(pool, &data.username).await?.is_some() {
        return Err(RepoError::Duplicate("Username already exists".to_string()));
    }

    let result: Result<i64, sqlx::Error> = sqlx::query_scalar(
        "INSERT INTO users (username, password_hash, email, phonenumber, address, role, created_at)
         VALUES (?, ?, ?, ?, ?, 'Customer', ?) RETURNING id",
    )
    .bind(&data.username)
    .bind(password_hash)
    .bind(&data.email)
    .bind(&data.phonenumber)
    .bind(&data.address)
    .bind(now_millis())
    .fetch_one(pool)
    .await;

    match result {
        Ok(id) => Ok(id),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(RepoError::Duplicate("Username already exists".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// 按用户名查找（含密码哈希，仅供登录校验）
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let row = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, email, phonenumber, address, role, created_at
         FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// 按 ID 查找公开资料（任意角色，供 /auth/profile 使用）
pub async fn find_profile(pool: &SqlitePool, id: i64) -> RepoResult<Option<UserProfile>> {
    let sql = format!("{PROFILE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, UserProfile>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// 按 ID 查找客户资料（仅 Customer 角色）
pub async fn find_customer_profile(pool: &SqlitePool, id: i64) -> RepoResult<Option<UserProfile>> {
    let sql = format!("{PROFILE_SELECT} WHERE id = ? AND role = 'Customer'");
    let row = sqlx::query_as::<_, UserProfile>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// 获取所有客户
pub async fn list_customers(pool: &SqlitePool) -> RepoResult<Vec<UserProfile>> {
    let sql = format!("{PROFILE_SELECT} WHERE role = 'Customer' ORDER BY id");
    let rows = sqlx::query_as::<_, UserProfile>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// 更新客户资料（缺省字段保持原值）
pub async fn update_customer_profile(
    pool: &SqlitePool,
    id: i64,
    update: &ProfileUpdate,
) -> RepoResult<UserProfile> {
    let updated = sqlx::query(
        "UPDATE users SET
             email = COALESCE(?, email),
             phonenumber = COALESCE(?, phonenumber),
             address = COALESCE(?, address)
         WHERE id = ? AND role = 'Customer'",
    )
    .bind(&update.email)
    .bind(&update.phonenumber)
    .bind(&update.address)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(RepoError::NotFound("Customer not found".to_string()));
    }

    find_customer_profile(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to reload customer profile".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
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
            "INSERT INTO users (id, username, password_hash, email, role) VALUES
                (1, 'alice', 'hash-a', 'alice@example.com', 'Customer'),
                (2, 'bob', 'hash-b', 'bob@example.com', 'Customer'),
                (3, 'admin', 'hash-c', 'admin@example.com', 'Admin')",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    fn register_request(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: "secret".to_string(),
            email: format!("{username}@example.com"),
            phonenumber: None,
            address: Some("1 Market St".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;

        let id = create(&pool, &register_request("carol"), "argon2-hash")
            .await
            .unwrap();
        let user = find_by_username(&pool, "carol").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.password_hash, "argon2-hash");
        assert_eq!(user.role, "Customer");
    }

    #[tokio::test]
    async fn test_create_duplicate_username() {
        let pool = test_pool().await;

        let err = create(&pool, &register_request("alice"), "h")
            .await
            .unwrap_err();
        match err {
            RepoError::Duplicate(msg) => assert_eq!(msg, "Username already exists"),
            other => panic!("expected Duplicate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_customers_filters_by_role() {
        let pool = test_pool().await;

        let customers = list_customers(&pool).await.unwrap();
        assert_eq!(customers.len(), 2);
        assert!(customers.iter().all(|c| c.role == "Customer"));
    }

    #[tokio::test]
    async fn test_customer_profile_excludes_other_roles() {
        let pool = test_pool().await;

        assert!(find_customer_profile(&pool, 1).await.unwrap().is_some());
        assert!(find_customer_profile(&pool, 3).await.unwrap().is_none());
        // but the role-agnostic lookup still sees the admin
        assert!(find_profile(&pool, 3).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_partial_profile_update_keeps_missing_fields() {
        let pool = test_pool().await;

        let updated = update_customer_profile(
            &pool,
            1,
            &ProfileUpdate {
                email: None,
                phonenumber: Some("555-0101".to_string()),
                address: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.phonenumber.as_deref(), Some("555-0101"));
    }

    #[tokio::test]
    async fn test_update_unknown_customer() {
        let pool = test_pool().await;

        let err = update_customer_profile(&pool, 99, &ProfileUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
