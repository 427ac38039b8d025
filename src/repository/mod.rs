// ==========================================
// 制造业进销存系统 - 数据仓储层
// ==========================================
// 职责: 数据访问,不含业务逻辑
// 连接以 Arc<Mutex<Connection>> 由调用方注入 (from_connection)
// ==========================================

pub mod error;
pub mod order_repo;
pub mod party_repo;
pub mod payment_record_repo;
pub mod product_repo;
pub mod production_repo;
pub mod staff_repo;
pub mod stock_repo;

// 重导出
pub use error::{RepositoryError, RepositoryResult};
pub use order_repo::OrderRepository;
pub use party_repo::{CustomerRepository, SupplierRepository};
pub use payment_record_repo::PaymentRecordRepository;
pub use product_repo::ProductRepository;
pub use production_repo::ProductionRepository;
pub use staff_repo::StaffRepository;
pub use stock_repo::StockRepository;
