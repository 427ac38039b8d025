// ==========================================
// 制造业进销存系统 - 生产记录仓储
// ==========================================

use crate::domain::production::ProductionRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ProductionRepository - 生产记录仓储
// ==========================================

/// 生产记录仓储
pub struct ProductionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductionRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<ProductionRecord> {
        Ok(ProductionRecord {
            production_id: row.get(0)?,
            production_date: NaiveDate::parse_from_str(&row.get::<_, String>(1)?, "%Y-%m-%d")
                .unwrap_or_else(|_| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
            machine_code: row.get(2)?,
            input_quantity: row.get(3)?,
            output_quantity: row.get(4)?,
            waste_quantity: row.get(5)?,
            created_at: row.get::<_, DateTime<Utc>>(6)?,
            updated_at: row.get::<_, DateTime<Utc>>(7)?,
        })
    }

    const COLUMNS: &'static str = "production_id, production_date, machine_code, \
         input_quantity, output_quantity, waste_quantity, created_at, updated_at";

    /// 查询全部生产记录（按生产日期倒序）
    pub fn find_all(&self) -> RepositoryResult<Vec<ProductionRecord>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM production_record ORDER BY production_date DESC, production_id",
            Self::COLUMNS
        ))?;

        let records = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<ProductionRecord>>>()?;

        Ok(records)
    }

    /// 按 ID 查询
    pub fn find_by_id(&self, production_id: &str) -> RepositoryResult<Option<ProductionRecord>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM production_record WHERE production_id = ?1",
            Self::COLUMNS
        ))?;

        let record = stmt
            .query_row(params![production_id], Self::map_row)
            .optional()?;

        Ok(record)
    }

    /// 按日期范围查询
    pub fn find_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepositoryResult<Vec<ProductionRecord>> {
        let conn = self.get_conn()?;
        let start_str = start_date.format("%Y-%m-%d").to_string();
        let end_str = end_date.format("%Y-%m-%d").to_string();

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM production_record \
             WHERE production_date BETWEEN ?1 AND ?2 ORDER BY production_date",
            Self::COLUMNS
        ))?;

        let records = stmt
            .query_map(params![start_str, end_str], Self::map_row)?
            .collect::<SqliteResult<Vec<ProductionRecord>>>()?;

        Ok(records)
    }

    /// 插入生产记录
    pub fn insert(&self, record: &ProductionRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let date_str = record.production_date.format("%Y-%m-%d").to_string();

        conn.execute(
            r#"
            INSERT INTO production_record (
                production_id, production_date, machine_code,
                input_quantity, output_quantity, waste_quantity, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                record.production_id,
                date_str,
                record.machine_code,
                record.input_quantity,
                record.output_quantity,
                record.waste_quantity,
                record.created_at,
                record.updated_at,
            ],
        )?;

        Ok(())
    }

    /// 更新生产记录（全字段）
    pub fn update(&self, record: &ProductionRecord) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let date_str = record.production_date.format("%Y-%m-%d").to_string();

        let affected = conn.execute(
            r#"
            UPDATE production_record SET
                production_date = ?2, machine_code = ?3,
                input_quantity = ?4, output_quantity = ?5, waste_quantity = ?6,
                updated_at = ?7
            WHERE production_id = ?1
            "#,
            params![
                record.production_id,
                date_str,
                record.machine_code,
                record.input_quantity,
                record.output_quantity,
                record.waste_quantity,
                Utc::now(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ProductionRecord".to_string(),
                id: record.production_id.clone(),
            });
        }

        Ok(())
    }

    /// 删除生产记录
    pub fn delete(&self, production_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "DELETE FROM production_record WHERE production_id = ?1",
            params![production_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ProductionRecord".to_string(),
                id: production_id.to_string(),
            });
        }

        Ok(())
    }
}
