// ==========================================
// 制造业进销存系统 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 库存状态 (Stock Status)
// ==========================================
// 判定: 数量=0 → OutOfStock; 数量<=下限 → Low;
//       数量>=上限 → Overstock; 其余 → Normal
// 相等时偏向更紧急的状态 (Low/Overstock 优先于 Normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    OutOfStock, // 缺货
    Low,        // 低库存
    Normal,     // 正常
    Overstock,  // 积压
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::OutOfStock => write!(f, "OUT_OF_STOCK"),
            StockStatus::Low => write!(f, "LOW"),
            StockStatus::Normal => write!(f, "NORMAL"),
            StockStatus::Overstock => write!(f, "OVERSTOCK"),
        }
    }
}

impl StockStatus {
    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "OUT_OF_STOCK",
            StockStatus::Low => "LOW",
            StockStatus::Normal => "NORMAL",
            StockStatus::Overstock => "OVERSTOCK",
        }
    }
}

// ==========================================
// 付款状态 (Payment Status)
// ==========================================
// 判定: paid >= total → Paid; paid > 0 → Partial; 否则 Pending
// 顺序: Pending < Partial < Paid (有效付款下单调不回退)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending, // 未付款
    Partial, // 部分付款
    Paid,    // 已付清
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Partial => write!(f, "PARTIAL"),
            PaymentStatus::Paid => write!(f, "PAID"),
        }
    }
}

impl PaymentStatus {
    /// 从字符串解析付款状态
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "PAID" => PaymentStatus::Paid,
            "PARTIAL" => PaymentStatus::Partial,
            _ => PaymentStatus::Pending, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Partial => "PARTIAL",
            PaymentStatus::Paid => "PAID",
        }
    }
}

// ==========================================
// 付款方式 (Payment Method)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,         // 现金
    BankTransfer, // 银行转账
    Cheque,       // 支票
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "CASH"),
            PaymentMethod::BankTransfer => write!(f, "BANK_TRANSFER"),
            PaymentMethod::Cheque => write!(f, "CHEQUE"),
        }
    }
}

impl PaymentMethod {
    /// 从字符串解析付款方式
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "BANK_TRANSFER" => PaymentMethod::BankTransfer,
            "CHEQUE" => PaymentMethod::Cheque,
            _ => PaymentMethod::Cash, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Cheque => "CHEQUE",
        }
    }
}

// ==========================================
// 订单类型 (Order Kind)
// ==========================================
// 采购单与销售单同构,仅存储表不同
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Purchase, // 采购单 (对供应商)
    Sales,    // 销售单 (对客户)
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Purchase => write!(f, "PURCHASE"),
            OrderKind::Sales => write!(f, "SALES"),
        }
    }
}

impl OrderKind {
    /// 从字符串解析订单类型
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "SALES" => OrderKind::Sales,
            _ => OrderKind::Purchase,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            OrderKind::Purchase => "PURCHASE",
            OrderKind::Sales => "SALES",
        }
    }
}

// ==========================================
// 产品类别 (Product Category)
// ==========================================
// 估值汇总按类别分桶
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    RawMaterial,  // 原材料
    FinishedGood, // 成品
    ByProduct,    // 副产品
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCategory::RawMaterial => write!(f, "RAW_MATERIAL"),
            ProductCategory::FinishedGood => write!(f, "FINISHED_GOOD"),
            ProductCategory::ByProduct => write!(f, "BY_PRODUCT"),
        }
    }
}

impl ProductCategory {
    /// 从字符串解析产品类别
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "RAW_MATERIAL" => Some(ProductCategory::RawMaterial),
            "FINISHED_GOOD" => Some(ProductCategory::FinishedGood),
            "BY_PRODUCT" => Some(ProductCategory::ByProduct),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ProductCategory::RawMaterial => "RAW_MATERIAL",
            ProductCategory::FinishedGood => "FINISHED_GOOD",
            ProductCategory::ByProduct => "BY_PRODUCT",
        }
    }
}

// ==========================================
// 系统健康状态 (System Health)
// ==========================================
// 仅用于驾驶舱展示,不触发告警副作用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemHealth {
    Ok,      // 正常
    Warning, // 存在低库存/缺货
}

impl fmt::Display for SystemHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemHealth::Ok => write!(f, "OK"),
            SystemHealth::Warning => write!(f, "Warning"),
        }
    }
}
