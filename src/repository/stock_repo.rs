// ==========================================
// 制造业进销存系统 - 库存数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑,状态/价值判定在引擎层
// ==========================================

use crate::domain::stock::StockInventory;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// StockRepository - 库存仓储
// ==========================================

/// 库存仓储
/// 职责: 管理 stock_inventory 表的 CRUD 操作
pub struct StockRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StockRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 行映射
    fn map_row(row: &Row<'_>) -> SqliteResult<StockInventory> {
        Ok(StockInventory {
            product_id: row.get(0)?,
            product_name: row.get(1)?,
            current_quantity: row.get(2)?,
            minimum_level: row.get(3)?,
            maximum_level: row.get(4)?,
            unit_price: row.get(5)?,
            created_at: row.get::<_, DateTime<Utc>>(6)?,
            updated_at: row.get::<_, DateTime<Utc>>(7)?,
        })
    }

    const COLUMNS: &'static str = "product_id, product_name, current_quantity, \
         minimum_level, maximum_level, unit_price, created_at, updated_at";

    /// 查询全部库存（按产品号排序）
    pub fn find_all(&self) -> RepositoryResult<Vec<StockInventory>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM stock_inventory ORDER BY product_id",
            Self::COLUMNS
        ))?;

        let stocks = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<StockInventory>>>()?;

        Ok(stocks)
    }

    /// 按产品号查询单条库存
    ///
    /// # 返回
    /// - Ok(Some(StockInventory)): 找到
    /// - Ok(None): 未找到
    pub fn find_by_product_id(&self, product_id: &str) -> RepositoryResult<Option<StockInventory>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM stock_inventory WHERE product_id = ?1",
            Self::COLUMNS
        ))?;

        let stock = stmt.query_row(params![product_id], Self::map_row).optional()?;

        Ok(stock)
    }

    /// 插入库存记录
    pub fn insert(&self, stock: &StockInventory) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO stock_inventory (
                product_id, product_name, current_quantity,
                minimum_level, maximum_level, unit_price, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                stock.product_id,
                stock.product_name,
                stock.current_quantity,
                stock.minimum_level,
                stock.maximum_level,
                stock.unit_price,
                stock.created_at,
                stock.updated_at,
            ],
        )?;

        Ok(())
    }

    /// 更新库存记录（全字段）
    pub fn update(&self, stock: &StockInventory) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"
            UPDATE stock_inventory SET
                product_name = ?2, current_quantity = ?3,
                minimum_level = ?4, maximum_level = ?5,
                unit_price = ?6, updated_at = ?7
            WHERE product_id = ?1
            "#,
            params![
                stock.product_id,
                stock.product_name,
                stock.current_quantity,
                stock.minimum_level,
                stock.maximum_level,
                stock.unit_price,
                Utc::now(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "StockInventory".to_string(),
                id: stock.product_id.clone(),
            });
        }

        Ok(())
    }

    /// 调整库存数量
    pub fn update_quantity(&self, product_id: &str, new_quantity: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "UPDATE stock_inventory SET current_quantity = ?2, updated_at = ?3 WHERE product_id = ?1",
            params![product_id, new_quantity, Utc::now()],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "StockInventory".to_string(),
                id: product_id.to_string(),
            });
        }

        Ok(())
    }

    /// 删除库存记录
    pub fn delete(&self, product_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "DELETE FROM stock_inventory WHERE product_id = ?1",
            params![product_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "StockInventory".to_string(),
                id: product_id.to_string(),
            });
        }

        Ok(())
    }
}
