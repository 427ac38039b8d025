// ==========================================
// API 集成测试环境
// ==========================================
// 每个测试独立 tempfile 数据库,建库后组装全部仓储与 API
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tempfile::TempDir;

use factory_jxc::api::{
    DashboardApi, OrderApi, PaymentApi, ProductionApi, ReportApi, StockApi,
};
use factory_jxc::db::{init_schema, open_sqlite_connection};
use factory_jxc::domain::types::OrderKind;
use factory_jxc::repository::order_repo::OrderRepository;
use factory_jxc::repository::party_repo::{CustomerRepository, SupplierRepository};
use factory_jxc::repository::payment_record_repo::PaymentRecordRepository;
use factory_jxc::repository::product_repo::ProductRepository;
use factory_jxc::repository::production_repo::ProductionRepository;
use factory_jxc::repository::staff_repo::StaffRepository;
use factory_jxc::repository::stock_repo::StockRepository;

/// API 测试环境
///
/// 持有 TempDir 保证数据库文件在测试期间存活
pub struct ApiTestEnv {
    _tmp_dir: TempDir,

    // ===== 仓储 (测试直接造数用) =====
    pub supplier_repo: Arc<SupplierRepository>,
    pub customer_repo: Arc<CustomerRepository>,
    pub product_repo: Arc<ProductRepository>,
    pub stock_repo: Arc<StockRepository>,
    pub purchase_repo: Arc<OrderRepository>,
    pub sales_repo: Arc<OrderRepository>,
    pub payment_record_repo: Arc<PaymentRecordRepository>,
    pub production_repo: Arc<ProductionRepository>,
    pub staff_repo: Arc<StaffRepository>,

    // ===== API =====
    pub stock_api: StockApi,
    pub purchase_order_api: OrderApi,
    pub sales_order_api: OrderApi,
    pub payment_api: PaymentApi,
    pub production_api: ProductionApi,
    pub report_api: ReportApi,
    pub dashboard_api: DashboardApi,
}

impl ApiTestEnv {
    pub fn new() -> anyhow::Result<Self> {
        factory_jxc::logging::init_test();

        let tmp_dir = TempDir::new()?;
        let db_path = tmp_dir.path().join("test.db");
        let conn = open_sqlite_connection(db_path.to_str().expect("路径非法"))?;
        init_schema(&conn)?;

        let conn: Arc<Mutex<Connection>> = Arc::new(Mutex::new(conn));

        let supplier_repo = Arc::new(SupplierRepository::from_connection(conn.clone()));
        let customer_repo = Arc::new(CustomerRepository::from_connection(conn.clone()));
        let product_repo = Arc::new(ProductRepository::from_connection(conn.clone()));
        let stock_repo = Arc::new(StockRepository::from_connection(conn.clone()));
        let purchase_repo = Arc::new(OrderRepository::from_connection(
            conn.clone(),
            OrderKind::Purchase,
        ));
        let sales_repo = Arc::new(OrderRepository::from_connection(
            conn.clone(),
            OrderKind::Sales,
        ));
        let payment_record_repo = Arc::new(PaymentRecordRepository::from_connection(conn.clone()));
        let production_repo = Arc::new(ProductionRepository::from_connection(conn.clone()));
        let staff_repo = Arc::new(StaffRepository::from_connection(conn.clone()));

        let stock_api = StockApi::new(stock_repo.clone(), product_repo.clone());
        let purchase_order_api = OrderApi::new(purchase_repo.clone());
        let sales_order_api = OrderApi::new(sales_repo.clone());
        let payment_api = PaymentApi::new(
            purchase_repo.clone(),
            sales_repo.clone(),
            payment_record_repo.clone(),
        );
        let production_api = ProductionApi::new(production_repo.clone());
        let report_api = ReportApi::new(
            customer_repo.clone(),
            supplier_repo.clone(),
            purchase_repo.clone(),
            sales_repo.clone(),
            staff_repo.clone(),
            stock_repo.clone(),
        );
        let dashboard_api = DashboardApi::new(
            supplier_repo.clone(),
            customer_repo.clone(),
            product_repo.clone(),
            staff_repo.clone(),
            stock_repo.clone(),
        );

        Ok(Self {
            _tmp_dir: tmp_dir,
            supplier_repo,
            customer_repo,
            product_repo,
            stock_repo,
            purchase_repo,
            sales_repo,
            payment_record_repo,
            production_repo,
            staff_repo,
            stock_api,
            purchase_order_api,
            sales_order_api,
            payment_api,
            production_api,
            report_api,
            dashboard_api,
        })
    }
}
