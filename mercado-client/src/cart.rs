//! 本地购物车 - JSON 文件持久化
//!
//! 购物车内容在每次变更后写回磁盘，构造时重新加载，因此跨进程
//! 重启保留。结账通过购物车下单接口提交全部行项目，成功后清空。

use crate::{ClientResult, MercadoClient};
use serde::{Deserialize, Serialize};
use shared::models::CartItem;
use shared::response::OrderCreated;
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted cart file contents
#[derive(Debug, Default, Serialize, Deserialize)]
struct CartFile {
    items: Vec<CartItem>,
}

/// Locally persisted shopping cart
#[derive(Debug)]
pub struct LocalCart {
    items: Vec<CartItem>,
    path: PathBuf,
}

impl LocalCart {
    /// 打开购物车，如存在持久化文件则恢复其内容
    ///
    /// A corrupt or unreadable file starts an empty cart rather than
    /// failing: the cart is a convenience, not a ledger.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = Self::load(&path).unwrap_or_default();
        Self { items, path }
    }

    fn load(path: &Path) -> Option<Vec<CartItem>> {
        if !path.exists() {
            return None;
        }
        let json = fs::read_to_string(path).ok()?;
        let file: CartFile = serde_json::from_str(&json).ok()?;
        Some(file.items)
    }

    /// 写回磁盘（每次变更后调用）
    fn persist(&self) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = CartFile {
            items: self.items.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Current cart lines
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 添加商品；已存在的行合并数量
    pub fn add(&mut self, product_id: i64, quantity: i64) -> ClientResult<()> {
        if quantity <= 0 {
            return Err(crate::ClientError::Validation(
                "quantity must be positive".to_string(),
            ));
        }
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => line.quantity += quantity,
            None => self.items.push(CartItem {
                product_id,
                quantity,
            }),
        }
        self.persist()
    }

    /// 设置某行数量；0 或负数等同于移除
    pub fn set_quantity(&mut self, product_id: i64, quantity: i64) -> ClientResult<()> {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => line.quantity = quantity,
            None => self.items.push(CartItem {
                product_id,
                quantity,
            }),
        }
        self.persist()
    }

    /// 移除某行
    pub fn remove(&mut self, product_id: i64) -> ClientResult<()> {
        self.items.retain(|i| i.product_id != product_id);
        self.persist()
    }

    /// 清空购物车
    pub fn clear(&mut self) -> ClientResult<()> {
        self.items.clear();
        self.persist()
    }

    /// 结账：整车提交到服务端，成功后清空本地状态
    ///
    /// On failure the cart contents stay untouched so the customer can
    /// adjust quantities and retry.
    pub async fn checkout(
        &mut self,
        client: &MercadoClient,
        customer_id: i64,
        payment_method: &str,
    ) -> ClientResult<OrderCreated> {
        let created = client
            .place_cart_order(customer_id, &self.items, payment_method)
            .await?;
        self.clear()?;
        Ok(created)
    }
}
