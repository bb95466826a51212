//! Authentication: password hashing, JWT issuance, bearer middleware

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, create_token, decode_token};
pub use middleware::{CurrentUser, auth_middleware};
pub use password::{hash_password, verify_password};
