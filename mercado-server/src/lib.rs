//! Mercado Server - 超市电商后端
//!
//! 单进程 axum 服务，SQLite (sqlx) 存储。核心是下单工作流：订单头、
//! 行项目、支付记录与库存扣减在同一事务中落库，要么全部提交，要么
//! 全部回滚。
//!
//! # 模块结构
//!
//! ```text
//! mercado-server/src/
//! ├── core/    # 配置、共享状态
//! ├── auth/    # Argon2 口令、JWT、Bearer 中间件
//! ├── api/     # HTTP 路由和处理器
//! ├── db/      # 连接池、迁移、仓储层（下单工作流在 db/repository/orders）
//! └── utils/   # 输入校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::CurrentUser;
pub use crate::core::{Config, ServerState};
pub use shared::{AppError, AppResult};
