// ==========================================
// 制造业进销存系统 - 产品数据仓储
// ==========================================

use crate::domain::product::Product;
use crate::domain::types::ProductCategory;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ProductRepository - 产品仓储
// ==========================================

/// 产品仓储
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<Product> {
        let category_str: String = row.get(2)?;
        Ok(Product {
            product_id: row.get(0)?,
            name: row.get(1)?,
            // 未知类别按原材料处理,避免历史脏数据中断查询
            category: ProductCategory::from_str(&category_str)
                .unwrap_or(ProductCategory::RawMaterial),
            is_active: row.get(3)?,
            created_at: row.get::<_, DateTime<Utc>>(4)?,
            updated_at: row.get::<_, DateTime<Utc>>(5)?,
        })
    }

    const COLUMNS: &'static str = "product_id, name, category, is_active, created_at, updated_at";

    /// 查询全部在用产品（按产品号排序）
    pub fn find_all_active(&self) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM product WHERE is_active = 1 ORDER BY product_id",
            Self::COLUMNS
        ))?;

        let products = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<Product>>>()?;

        Ok(products)
    }

    /// 按 ID 查询
    pub fn find_by_id(&self, product_id: &str) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM product WHERE product_id = ?1",
            Self::COLUMNS
        ))?;

        let product = stmt.query_row(params![product_id], Self::map_row).optional()?;

        Ok(product)
    }

    /// 插入产品
    pub fn insert(&self, product: &Product) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO product (
                product_id, name, category, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                product.product_id,
                product.name,
                product.category.to_db_str(),
                product.is_active,
                product.created_at,
                product.updated_at,
            ],
        )?;

        Ok(())
    }

    /// 更新产品
    pub fn update(&self, product: &Product) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"
            UPDATE product SET
                name = ?2, category = ?3, is_active = ?4, updated_at = ?5
            WHERE product_id = ?1
            "#,
            params![
                product.product_id,
                product.name,
                product.category.to_db_str(),
                product.is_active,
                Utc::now(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Product".to_string(),
                id: product.product_id.clone(),
            });
        }

        Ok(())
    }

    /// 删除产品
    pub fn delete(&self, product_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "DELETE FROM product WHERE product_id = ?1",
            params![product_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Product".to_string(),
                id: product_id.to_string(),
            });
        }

        Ok(())
    }
}
