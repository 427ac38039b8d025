// ==========================================
// 制造业进销存系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 小型制造企业记录管理 (采购/销售/员工/生产/库存)
// 核心是业务规则计算层: 引擎对快照纯计算,落库由调用方编排
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建库）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    OrderKind, PaymentMethod, PaymentStatus, ProductCategory, StockStatus, SystemHealth,
};

// 领域实体
pub use domain::{
    Customer, Order, PaymentRecord, Product, ProductionRecord, Staff, StockInventory, Supplier,
};

// 引擎
pub use engine::{
    DashboardMetricsComposer, PaymentLedger, ProductionYieldCalculator, ReportAggregator,
    StockValuationEngine,
};

// API
pub use api::{DashboardApi, OrderApi, PaymentApi, ProductionApi, ReportApi, StockApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "制造业进销存管理系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
