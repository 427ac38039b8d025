// ==========================================
// 制造业进销存系统 - 付款流水仓储
// ==========================================
// 流水追加式,只提供插入与查询,无更新/删除
// ==========================================

use crate::domain::order::PaymentRecord;
use crate::domain::types::{OrderKind, PaymentMethod};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// PaymentRecordRepository - 付款流水仓储
// ==========================================

/// 付款流水仓储
pub struct PaymentRecordRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PaymentRecordRepository {
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
    fn map_row(row: &Row<'_>) -> SqliteResult<PaymentRecord> {
        Ok(PaymentRecord {
            record_id: row.get(0)?,
            order_id: row.get(1)?,
            order_kind: OrderKind::from_str(&row.get::<_, String>(2)?),
            amount: row.get(3)?,
            method: PaymentMethod::from_str(&row.get::<_, String>(4)?),
            reference: row.get(5)?,
            notes: row.get(6)?,
            paid_at: row.get::<_, DateTime<Utc>>(7)?,
        })
    }

    const COLUMNS: &'static str =
        "record_id, order_id, order_kind, amount, method, reference, notes, paid_at";

    /// 插入流水
    pub fn insert(&self, record: &PaymentRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
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

        Ok(())
    }

    /// 查询某订单的付款历史（按付款时间顺序）
    pub fn find_by_order(
        &self,
        kind: OrderKind,
        order_id: &str,
    ) -> RepositoryResult<Vec<PaymentRecord>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM payment_record \
             WHERE order_kind = ?1 AND order_id = ?2 ORDER BY paid_at",
            Self::COLUMNS
        ))?;

        let records = stmt
            .query_map(params![kind.to_db_str(), order_id], Self::map_row)?
            .collect::<SqliteResult<Vec<PaymentRecord>>>()?;

        Ok(records)
    }

    /// 查询最近流水
    pub fn find_recent(&self, limit: i32) -> RepositoryResult<Vec<PaymentRecord>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM payment_record ORDER BY paid_at DESC LIMIT ?1",
            Self::COLUMNS
        ))?;

        let records = stmt
            .query_map(params![limit], Self::map_row)?
            .collect::<SqliteResult<Vec<PaymentRecord>>>()?;

        Ok(records)
    }
}
