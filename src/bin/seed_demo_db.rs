// ==========================================
// 制造业进销存系统 - 演示数据初始化工具
// ==========================================
// 用途: 建库并写入一套演示数据,便于联调/验收
// 用法: seed_demo_db [db_path]  (缺省使用用户数据目录)
// ==========================================

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

use factory_jxc::config::default_db_path;
use factory_jxc::db::{init_schema, open_sqlite_connection};
use factory_jxc::domain::party::{Customer, Supplier};
use factory_jxc::domain::product::Product;
use factory_jxc::domain::staff::Staff;
use factory_jxc::domain::types::{OrderKind, ProductCategory};
use factory_jxc::logging;
use factory_jxc::repository::order_repo::OrderRepository;
use factory_jxc::repository::party_repo::{CustomerRepository, SupplierRepository};
use factory_jxc::repository::product_repo::ProductRepository;
use factory_jxc::repository::staff_repo::StaffRepository;
use factory_jxc::repository::stock_repo::StockRepository;
use factory_jxc::api::{OrderApi, ProductionApi, StockApi};
use factory_jxc::repository::production_repo::ProductionRepository;

fn main() -> Result<()> {
    logging::init();

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| default_db_path().to_string_lossy().to_string());

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        std::fs::create_dir_all(parent).context("创建数据目录失败")?;
    }

    tracing::info!(db_path = %db_path, "初始化演示数据库");

    let conn = open_sqlite_connection(&db_path).context("打开数据库失败")?;
    init_schema(&conn).context("建库失败")?;
    let conn = Arc::new(Mutex::new(conn));

    seed(&conn)?;

    tracing::info!("演示数据写入完成");
    Ok(())
}

fn seed(conn: &Arc<Mutex<rusqlite::Connection>>) -> Result<()> {
    let now = Utc::now();

    // ===== 交易方 =====
    let supplier_repo = SupplierRepository::from_connection(conn.clone());
    for (id, name) in [("S001", "原料供应一厂"), ("S002", "华北钢贸")] {
        supplier_repo.insert(&Supplier {
            supplier_id: id.to_string(),
            name: name.to_string(),
            phone: Some("010-88880000".to_string()),
            address: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        })?;
    }

    let customer_repo = CustomerRepository::from_connection(conn.clone());
    for (id, name) in [("C001", "华东经销"), ("C002", "南方贸易")] {
        customer_repo.insert(&Customer {
            customer_id: id.to_string(),
            name: name.to_string(),
            phone: Some("021-66660000".to_string()),
            address: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        })?;
    }

    // ===== 产品与库存 =====
    let product_repo = Arc::new(ProductRepository::from_connection(conn.clone()));
    let products = [
        ("P001", "热轧卷", ProductCategory::RawMaterial),
        ("P002", "冷轧板", ProductCategory::FinishedGood),
        ("P003", "切边料", ProductCategory::ByProduct),
    ];
    for (id, name, category) in products {
        product_repo.insert(&Product {
            product_id: id.to_string(),
            name: name.to_string(),
            category,
            is_active: true,
            created_at: now,
            updated_at: now,
        })?;
    }

    let stock_repo = Arc::new(StockRepository::from_connection(conn.clone()));
    let stock_api = StockApi::new(stock_repo, product_repo);
    stock_api.create_stock("P001", "热轧卷", 800, 100, 2000, 3200.0)?;
    stock_api.create_stock("P002", "冷轧板", 5, 10, 1000, 4100.0)?; // 低库存示例
    stock_api.create_stock("P003", "切边料", 0, 5, 500, 600.0)?; // 缺货示例

    // ===== 订单 =====
    let purchase_api = OrderApi::new(Arc::new(OrderRepository::from_connection(
        conn.clone(),
        OrderKind::Purchase,
    )));
    purchase_api.create_order(
        "PO-2026-001",
        "S001",
        25000.0,
        15000.0,
        NaiveDate::from_ymd_opt(2026, 7, 20).unwrap(),
    )?;

    let sales_api = OrderApi::new(Arc::new(OrderRepository::from_connection(
        conn.clone(),
        OrderKind::Sales,
    )));
    sales_api.create_order(
        "SO-2026-001",
        "C001",
        18000.0,
        0.0,
        NaiveDate::from_ymd_opt(2026, 7, 22).unwrap(),
    )?;

    // ===== 员工 =====
    let staff_repo = StaffRepository::from_connection(conn.clone());
    let staff = [
        ("E001", "张三", "操作工", 6500.0, true),
        ("E002", "李四", "质检员", 7200.0, true),
        ("E003", "王五", "会计", 9000.0, false),
    ];
    for (id, name, position, salary, active) in staff {
        staff_repo.insert(&Staff {
            employee_id: id.to_string(),
            name: name.to_string(),
            position: position.to_string(),
            monthly_salary: salary,
            is_active: active,
            created_at: now,
            updated_at: now,
        })?;
    }

    // ===== 生产记录 =====
    let production_api = ProductionApi::new(Arc::new(ProductionRepository::from_connection(
        conn.clone(),
    )));
    production_api.record_run(
        NaiveDate::from_ymd_opt(2026, 7, 25).unwrap(),
        "M-07",
        1000,
        650,
        300,
    )?;

    Ok(())
}
