// ==========================================
// 制造业进销存系统 - 交易方数据仓储
// ==========================================
// 供应商/客户分表,仓储结构一致
// ==========================================

use crate::domain::party::{Customer, Supplier};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// SupplierRepository - 供应商仓储
// ==========================================

/// 供应商仓储
pub struct SupplierRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SupplierRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<Supplier> {
        Ok(Supplier {
            supplier_id: row.get(0)?,
            name: row.get(1)?,
            phone: row.get(2)?,
            address: row.get(3)?,
            is_active: row.get(4)?,
            created_at: row.get::<_, DateTime<Utc>>(5)?,
            updated_at: row.get::<_, DateTime<Utc>>(6)?,
        })
    }

    const COLUMNS: &'static str =
        "supplier_id, name, phone, address, is_active, created_at, updated_at";

    /// 查询全部在用供应商（按名称排序）
    pub fn find_all_active(&self) -> RepositoryResult<Vec<Supplier>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM supplier WHERE is_active = 1 ORDER BY name",
            Self::COLUMNS
        ))?;

        let suppliers = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<Supplier>>>()?;

        Ok(suppliers)
    }

    /// 按 ID 查询
    pub fn find_by_id(&self, supplier_id: &str) -> RepositoryResult<Option<Supplier>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM supplier WHERE supplier_id = ?1",
            Self::COLUMNS
        ))?;

        let supplier = stmt.query_row(params![supplier_id], Self::map_row).optional()?;

        Ok(supplier)
    }

    /// 插入供应商
    pub fn insert(&self, supplier: &Supplier) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO supplier (
                supplier_id, name, phone, address, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                supplier.supplier_id,
                supplier.name,
                supplier.phone,
                supplier.address,
                supplier.is_active,
                supplier.created_at,
                supplier.updated_at,
            ],
        )?;

        Ok(())
    }

    /// 更新供应商
    pub fn update(&self, supplier: &Supplier) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"
            UPDATE supplier SET
                name = ?2, phone = ?3, address = ?4, is_active = ?5, updated_at = ?6
            WHERE supplier_id = ?1
            "#,
            params![
                supplier.supplier_id,
                supplier.name,
                supplier.phone,
                supplier.address,
                supplier.is_active,
                Utc::now(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Supplier".to_string(),
                id: supplier.supplier_id.clone(),
            });
        }

        Ok(())
    }

    /// 删除供应商
    pub fn delete(&self, supplier_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "DELETE FROM supplier WHERE supplier_id = ?1",
            params![supplier_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Supplier".to_string(),
                id: supplier_id.to_string(),
            });
        }

        Ok(())
    }
}

// ==========================================
// CustomerRepository - 客户仓储
// ==========================================

/// 客户仓储
pub struct CustomerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CustomerRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<Customer> {
        Ok(Customer {
            customer_id: row.get(0)?,
            name: row.get(1)?,
            phone: row.get(2)?,
            address: row.get(3)?,
            is_active: row.get(4)?,
            created_at: row.get::<_, DateTime<Utc>>(5)?,
            updated_at: row.get::<_, DateTime<Utc>>(6)?,
        })
    }

    const COLUMNS: &'static str =
        "customer_id, name, phone, address, is_active, created_at, updated_at";

    /// 查询全部在用客户（按名称排序）
    pub fn find_all_active(&self) -> RepositoryResult<Vec<Customer>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM customer WHERE is_active = 1 ORDER BY name",
            Self::COLUMNS
        ))?;

        let customers = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<Customer>>>()?;

        Ok(customers)
    }

    /// 按 ID 查询
    pub fn find_by_id(&self, customer_id: &str) -> RepositoryResult<Option<Customer>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM customer WHERE customer_id = ?1",
            Self::COLUMNS
        ))?;

        let customer = stmt.query_row(params![customer_id], Self::map_row).optional()?;

        Ok(customer)
    }

    /// 插入客户
    pub fn insert(&self, customer: &Customer) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO customer (
                customer_id, name, phone, address, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                customer.customer_id,
                customer.name,
                customer.phone,
                customer.address,
                customer.is_active,
                customer.created_at,
                customer.updated_at,
            ],
        )?;

        Ok(())
    }

    /// 更新客户
    pub fn update(&self, customer: &Customer) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"
            UPDATE customer SET
                name = ?2, phone = ?3, address = ?4, is_active = ?5, updated_at = ?6
            WHERE customer_id = ?1
            "#,
            params![
                customer.customer_id,
                customer.name,
                customer.phone,
                customer.address,
                customer.is_active,
                Utc::now(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Customer".to_string(),
                id: customer.customer_id.clone(),
            });
        }

        Ok(())
    }

    /// 删除客户
    pub fn delete(&self, customer_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "DELETE FROM customer WHERE customer_id = ?1",
            params![customer_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Customer".to_string(),
                id: customer_id.to_string(),
            });
        }

        Ok(())
    }
}
