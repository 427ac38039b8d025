// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{NaiveDate, Utc};
use factory_jxc::domain::order::Order;
use factory_jxc::domain::party::{Customer, Supplier};
use factory_jxc::domain::product::Product;
use factory_jxc::domain::staff::Staff;
use factory_jxc::domain::stock::StockInventory;
use factory_jxc::domain::types::{PaymentStatus, ProductCategory};
use factory_jxc::engine::payment_ledger::PaymentLedger;

// ==========================================
// StockInventory 构建器
// ==========================================

pub struct StockBuilder {
    product_id: String,
    product_name: Option<String>,
    current_quantity: i64,
    minimum_level: i64,
    maximum_level: i64,
    unit_price: f64,
}

impl StockBuilder {
    pub fn new(product_id: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            product_name: None,
            current_quantity: 100,
            minimum_level: 10,
            maximum_level: 1000,
            unit_price: 50.0,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.product_name = Some(name.to_string());
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.current_quantity = quantity;
        self
    }

    pub fn levels(mut self, minimum: i64, maximum: i64) -> Self {
        self.minimum_level = minimum;
        self.maximum_level = maximum;
        self
    }

    pub fn unit_price(mut self, price: f64) -> Self {
        self.unit_price = price;
        self
    }

    pub fn build(self) -> StockInventory {
        let now = Utc::now();
        StockInventory {
            product_name: self
                .product_name
                .unwrap_or_else(|| format!("产品{}", self.product_id)),
            product_id: self.product_id,
            current_quantity: self.current_quantity,
            minimum_level: self.minimum_level,
            maximum_level: self.maximum_level,
            unit_price: self.unit_price,
            created_at: now,
            updated_at: now,
        }
    }
}

// ==========================================
// Order 构建器
// ==========================================

pub struct OrderBuilder {
    order_id: String,
    party_id: String,
    total_amount: f64,
    paid_amount: f64,
    order_date: NaiveDate,
}

impl OrderBuilder {
    pub fn new(order_id: &str, party_id: &str) -> Self {
        Self {
            order_id: order_id.to_string(),
            party_id: party_id.to_string(),
            total_amount: 10000.0,
            paid_amount: 0.0,
            order_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        }
    }

    pub fn total(mut self, total: f64) -> Self {
        self.total_amount = total;
        self
    }

    pub fn paid(mut self, paid: f64) -> Self {
        self.paid_amount = paid;
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.order_date = date;
        self
    }

    pub fn build(self) -> Order {
        let now = Utc::now();
        Order {
            order_id: self.order_id,
            party_id: self.party_id,
            total_amount: self.total_amount,
            paid_amount: self.paid_amount,
            payment_status: PaymentLedger::derive_status(self.paid_amount, self.total_amount),
            order_date: self.order_date,
            created_at: now,
            updated_at: now,
        }
    }
}

// ==========================================
// 简单实体构造
// ==========================================

pub fn supplier(id: &str, name: &str) -> Supplier {
    let now = Utc::now();
    Supplier {
        supplier_id: id.to_string(),
        name: name.to_string(),
        phone: None,
        address: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn customer(id: &str, name: &str) -> Customer {
    let now = Utc::now();
    Customer {
        customer_id: id.to_string(),
        name: name.to_string(),
        phone: None,
        address: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn product(id: &str, name: &str, category: ProductCategory) -> Product {
    let now = Utc::now();
    Product {
        product_id: id.to_string(),
        name: name.to_string(),
        category,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn staff(id: &str, name: &str, salary: f64, active: bool) -> Staff {
    let now = Utc::now();
    Staff {
        employee_id: id.to_string(),
        name: name.to_string(),
        position: "操作工".to_string(),
        monthly_salary: salary,
        is_active: active,
        created_at: now,
        updated_at: now,
    }
}
