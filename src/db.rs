// ==========================================
// 制造业进销存系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 提供建库入口 init_schema (幂等)
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
///
/// 说明：版本号用于提示/告警（不做自动迁移），避免静默在旧库上运行。
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建库（幂等）
///
/// 全部使用 CREATE TABLE IF NOT EXISTS，已有库上重复执行安全
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS supplier (
            supplier_id   TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            phone         TEXT,
            address       TEXT,
            is_active     INTEGER NOT NULL DEFAULT 1,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS customer (
            customer_id   TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            phone         TEXT,
            address       TEXT,
            is_active     INTEGER NOT NULL DEFAULT 1,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS product (
            product_id    TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            category      TEXT NOT NULL,
            is_active     INTEGER NOT NULL DEFAULT 1,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS stock_inventory (
            product_id       TEXT PRIMARY KEY,
            product_name     TEXT NOT NULL,
            current_quantity INTEGER NOT NULL CHECK (current_quantity >= 0),
            minimum_level    INTEGER NOT NULL,
            maximum_level    INTEGER NOT NULL,
            unit_price       REAL NOT NULL,
            created_at       TEXT NOT NULL,
            updated_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS purchase_order (
            order_id       TEXT PRIMARY KEY,
            party_id       TEXT NOT NULL,
            total_amount   REAL NOT NULL CHECK (total_amount >= 0),
            paid_amount    REAL NOT NULL DEFAULT 0,
            payment_status TEXT NOT NULL DEFAULT 'PENDING',
            order_date     TEXT NOT NULL,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sales_order (
            order_id       TEXT PRIMARY KEY,
            party_id       TEXT NOT NULL,
            total_amount   REAL NOT NULL CHECK (total_amount >= 0),
            paid_amount    REAL NOT NULL DEFAULT 0,
            payment_status TEXT NOT NULL DEFAULT 'PENDING',
            order_date     TEXT NOT NULL,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS payment_record (
            record_id  TEXT PRIMARY KEY,
            order_id   TEXT NOT NULL,
            order_kind TEXT NOT NULL,
            amount     REAL NOT NULL CHECK (amount > 0),
            method     TEXT NOT NULL,
            reference  TEXT,
            notes      TEXT,
            paid_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_payment_record_order
            ON payment_record (order_kind, order_id);

        CREATE TABLE IF NOT EXISTS production_record (
            production_id   TEXT PRIMARY KEY,
            production_date TEXT NOT NULL,
            machine_code    TEXT NOT NULL,
            input_quantity  INTEGER NOT NULL CHECK (input_quantity > 0),
            output_quantity INTEGER NOT NULL CHECK (output_quantity >= 0),
            waste_quantity  INTEGER NOT NULL CHECK (waste_quantity >= 0),
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS staff (
            employee_id    TEXT PRIMARY KEY,
            name           TEXT NOT NULL,
            position       TEXT NOT NULL,
            monthly_salary REAL NOT NULL CHECK (monthly_salary >= 0),
            is_active      INTEGER NOT NULL DEFAULT 1,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key      TEXT NOT NULL,
            value    TEXT NOT NULL,
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        );
        "#,
    )?;

    // 首次建库时写入版本号
    let existing: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    if existing.is_none() {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_SCHEMA_VERSION],
        )?;
    }

    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
