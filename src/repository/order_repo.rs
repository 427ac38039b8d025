// ==========================================
// 制造业进销存系统 - 订单数据仓储
// ==========================================
// 采购单/销售单同构,按 OrderKind 路由到对应表
// 红线: Repository 不含业务逻辑,付款计算在付款台账引擎
// ==========================================

use crate::domain::order::{Order, PaymentRecord};
use crate::domain::types::{OrderKind, PaymentStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// OrderRepository - 订单仓储
// ==========================================

/// 订单仓储
/// 职责: 管理 purchase_order / sales_order 表的 CRUD 与付款回写
pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
    kind: OrderKind,
}

impl OrderRepository {
    /// 从已有连接创建仓储实例
    ///
    /// # 参数
    /// - conn: 共享连接
    /// - kind: 订单类型,决定读写哪张表
    pub fn from_connection(conn: Arc<Mutex<Connection>>, kind: OrderKind) -> Self {
        Self { conn, kind }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 订单类型对应的表名
    fn table(&self) -> &'static str {
        match self.kind {
            OrderKind::Purchase => "purchase_order",
            OrderKind::Sales => "sales_order",
        }
    }

    /// 行映射
    fn map_row(row: &Row<'_>) -> SqliteResult<Order> {
        Ok(Order {
            order_id: row.get(0)?,
            party_id: row.get(1)?,
            total_amount: row.get(2)?,
            paid_amount: row.get(3)?,
            payment_status: PaymentStatus::from_str(&row.get::<_, String>(4)?),
            order_date: NaiveDate::parse_from_str(&row.get::<_, String>(5)?, "%Y-%m-%d")
                .unwrap_or_else(|_| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
            created_at: row.get::<_, DateTime<Utc>>(6)?,
            updated_at: row.get::<_, DateTime<Utc>>(7)?,
        })
    }

    const COLUMNS: &'static str = "order_id, party_id, total_amount, paid_amount, \
         payment_status, order_date, created_at, updated_at";

    /// 查询全部订单（按下单日期倒序）
    pub fn find_all(&self) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} ORDER BY order_date DESC, order_id",
            Self::COLUMNS,
            self.table()
        ))?;

        let orders = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<Order>>>()?;

        Ok(orders)
    }

    /// 按订单号查询
    pub fn find_by_id(&self, order_id: &str) -> RepositoryResult<Option<Order>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} WHERE order_id = ?1",
            Self::COLUMNS,
            self.table()
        ))?;

        let order = stmt.query_row(params![order_id], Self::map_row).optional()?;

        Ok(order)
    }

    /// 按交易方查询订单列表
    pub fn find_by_party(&self, party_id: &str) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} WHERE party_id = ?1 ORDER BY order_date DESC",
            Self::COLUMNS,
            self.table()
        ))?;

        let orders = stmt
            .query_map(params![party_id], Self::map_row)?
            .collect::<SqliteResult<Vec<Order>>>()?;

        Ok(orders)
    }

    /// 插入订单
    pub fn insert(&self, order: &Order) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let order_date_str = order.order_date.format("%Y-%m-%d").to_string();

        conn.execute(
            &format!(
                r#"
                INSERT INTO {} (
                    order_id, party_id, total_amount, paid_amount,
                    payment_status, order_date, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                self.table()
            ),
            params![
                order.order_id,
                order.party_id,
                order.total_amount,
                order.paid_amount,
                order.payment_status.to_db_str(),
                order_date_str,
                order.created_at,
                order.updated_at,
            ],
        )?;

        Ok(())
    }

    /// 更新订单（全字段）
    pub fn update(&self, order: &Order) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let order_date_str = order.order_date.format("%Y-%m-%d").to_string();

        let affected = conn.execute(
            &format!(
                r#"
                UPDATE {} SET
                    party_id = ?2, total_amount = ?3, paid_amount = ?4,
                    payment_status = ?5, order_date = ?6, updated_at = ?7
                WHERE order_id = ?1
                "#,
                self.table()
            ),
            params![
                order.order_id,
                order.party_id,
                order.total_amount,
                order.paid_amount,
                order.payment_status.to_db_str(),
                order_date_str,
                Utc::now(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: self.table().to_string(),
                id: order.order_id.clone(),
            });
        }

        Ok(())
    }

    /// 回写付款结果（仅已付金额与状态）
    pub fn update_payment(
        &self,
        order_id: &str,
        new_paid_amount: f64,
        new_status: PaymentStatus,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            &format!(
                "UPDATE {} SET paid_amount = ?2, payment_status = ?3, updated_at = ?4 \
                 WHERE order_id = ?1",
                self.table()
            ),
            params![order_id, new_paid_amount, new_status.to_db_str(), Utc::now()],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: self.table().to_string(),
                id: order_id.to_string(),
            });
        }

        Ok(())
    }

    /// 原子入账: 订单回写 + 付款流水插入在同一事务内提交
    ///
    /// 两条写入要么同时生效要么同时回滚,避免台账与订单 paid_amount 脱节
    ///
    /// # 参数
    /// - order_id: 订单号
    /// - new_paid_amount: 新的已付金额（引擎已截断）
    /// - new_status: 新的付款状态
    /// - record: 付款流水
    pub fn apply_payment(
        &self,
        order_id: &str,
        new_paid_amount: f64,
        new_status: PaymentStatus,
        record: &PaymentRecord,
    ) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;

        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let affected = tx.execute(
            &format!(
                "UPDATE {} SET paid_amount = ?2, payment_status = ?3, updated_at = ?4 \
                 WHERE order_id = ?1",
                self.table()
            ),
            params![order_id, new_paid_amount, new_status.to_db_str(), Utc::now()],
        )?;

        if affected == 0 {
            // Transaction drop 即回滚
            return Err(RepositoryError::NotFound {
                entity: self.table().to_string(),
                id: order_id.to_string(),
            });
        }

        tx.execute(
            r#"
            INSERT INTO payment_record (
                record_id, order_id, order_kind, amount,
                method, reference, notes, paid_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                record.record_id,
                record.order_id,
                record.order_kind.to_db_str(),
                record.amount,
                record.method.to_db_str(),
                record.reference,
                record.notes,
                record.paid_at,
            ],
        )?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(())
    }

    /// 删除订单
    pub fn delete(&self, order_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            &format!("DELETE FROM {} WHERE order_id = ?1", self.table()),
            params![order_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: self.table().to_string(),
                id: order_id.to_string(),
            });
        }

        Ok(())
    }
}
