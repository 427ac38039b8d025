// ==========================================
// 制造业进销存系统 - 引擎层
// ==========================================
// 职责: 业务规则计算,纯函数,不拼 SQL,不写库
// 引擎对调用方提供的快照计算派生值,落库由调用方负责
// ==========================================

pub mod dashboard;
pub mod error;
pub mod payment_ledger;
pub mod production_yield;
pub mod report;
pub mod stock_valuation;

// 重导出核心引擎
pub use dashboard::{DashboardMetricsComposer, DashboardSnapshot};
pub use error::{EngineError, EngineResult};
pub use payment_ledger::{PaymentLedger, PaymentOutcome};
pub use production_yield::{ProductionSummary, ProductionYieldCalculator};
pub use report::{
    CustomerReportRow, ReportAggregator, SalaryReport, SalaryReportRow, StockReportRow,
    SupplierReportRow,
};
pub use stock_valuation::{StockAlerts, StockValuationEngine, ValuationSummary};
