// ==========================================
// 制造业进销存系统 - 员工数据仓储
// ==========================================

use crate::domain::staff::Staff;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// StaffRepository - 员工仓储
// ==========================================

/// 员工仓储
pub struct StaffRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StaffRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<Staff> {
        Ok(Staff {
            employee_id: row.get(0)?,
            name: row.get(1)?,
            position: row.get(2)?,
            monthly_salary: row.get(3)?,
            is_active: row.get(4)?,
            created_at: row.get::<_, DateTime<Utc>>(5)?,
            updated_at: row.get::<_, DateTime<Utc>>(6)?,
        })
    }

    const COLUMNS: &'static str =
        "employee_id, name, position, monthly_salary, is_active, created_at, updated_at";

    /// 查询全部员工（按工号排序）
    pub fn find_all(&self) -> RepositoryResult<Vec<Staff>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM staff ORDER BY employee_id",
            Self::COLUMNS
        ))?;

        let staff = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<Staff>>>()?;

        Ok(staff)
    }

    /// 查询全部在职员工
    pub fn find_all_active(&self) -> RepositoryResult<Vec<Staff>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM staff WHERE is_active = 1 ORDER BY employee_id",
            Self::COLUMNS
        ))?;

        let staff = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<Staff>>>()?;

        Ok(staff)
    }

    /// 按工号查询
    pub fn find_by_id(&self, employee_id: &str) -> RepositoryResult<Option<Staff>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM staff WHERE employee_id = ?1",
            Self::COLUMNS
        ))?;

        let staff = stmt.query_row(params![employee_id], Self::map_row).optional()?;

        Ok(staff)
    }

    /// 插入员工
    pub fn insert(&self, staff: &Staff) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO staff (
                employee_id, name, position, monthly_salary, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                staff.employee_id,
                staff.name,
                staff.position,
                staff.monthly_salary,
                staff.is_active,
                staff.created_at,
                staff.updated_at,
            ],
        )?;

        Ok(())
    }

    /// 更新员工
    pub fn update(&self, staff: &Staff) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"
            UPDATE staff SET
                name = ?2, position = ?3, monthly_salary = ?4, is_active = ?5, updated_at = ?6
            WHERE employee_id = ?1
            "#,
            params![
                staff.employee_id,
                staff.name,
                staff.position,
                staff.monthly_salary,
                staff.is_active,
                Utc::now(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Staff".to_string(),
                id: staff.employee_id.clone(),
            });
        }

        Ok(())
    }

    /// 删除员工
    pub fn delete(&self, employee_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "DELETE FROM staff WHERE employee_id = ?1",
            params![employee_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Staff".to_string(),
                id: employee_id.to_string(),
            });
        }

        Ok(())
    }
}
