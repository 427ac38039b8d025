// ==========================================
// 制造业进销存系统 - 订单 API
// ==========================================
// 职责: 采购/销售订单的创建与查询
// 付款入账见 payment_api
// ==========================================

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator;
use crate::domain::order::Order;
use crate::engine::payment_ledger::PaymentLedger;
use crate::repository::order_repo::OrderRepository;

// ==========================================
// OrderApi - 订单 API
// ==========================================
// 单实例只操作一种订单 (构造时由注入的仓储决定采购或销售)
pub struct OrderApi {
    order_repo: Arc<OrderRepository>,
}

impl OrderApi {
    /// 创建新的 OrderApi 实例
    pub fn new(order_repo: Arc<OrderRepository>) -> Self {
        Self { order_repo }
    }

    /// 创建订单
    ///
    /// # 校验
    /// - 订单号/交易方必填
    /// - 总额 >= 0
    /// - 0 <= 初始已付 <= 总额
    pub fn create_order(
        &self,
        order_id: &str,
        party_id: &str,
        total_amount: f64,
        paid_amount: f64,
        order_date: NaiveDate,
    ) -> ApiResult<Order> {
        let order_id = validator::require_non_empty("订单号", order_id)?;
        let party_id = validator::require_non_empty("交易方", party_id)?;

        if !total_amount.is_finite() || total_amount < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "订单总额必须为非负数, 实际为 {}",
                total_amount
            )));
        }
        if !paid_amount.is_finite() || paid_amount < 0.0 || paid_amount > total_amount {
            return Err(ApiError::InvalidInput(format!(
                "已付金额必须在 0 与总额之间, 实际为 {}",
                paid_amount
            )));
        }

        let now = Utc::now();
        let order = Order {
            order_id,
            party_id,
            total_amount,
            paid_amount,
            payment_status: PaymentLedger::derive_status(paid_amount, total_amount),
            order_date,
            created_at: now,
            updated_at: now,
        };

        self.order_repo.insert(&order)?;
        tracing::info!(order_id = %order.order_id, total = order.total_amount, "创建订单");

        Ok(order)
    }

    /// 查询全部订单
    pub fn list_orders(&self) -> ApiResult<Vec<Order>> {
        Ok(self.order_repo.find_all()?)
    }

    /// 按订单号查询
    pub fn get_order(&self, order_id: &str) -> ApiResult<Order> {
        let order_id = validator::require_non_empty("订单号", order_id)?;

        self.order_repo
            .find_by_id(&order_id)?
            .ok_or_else(|| ApiError::NotFound(format!("订单(order_id={})不存在", order_id)))
    }

    /// 按交易方查询订单
    pub fn list_orders_by_party(&self, party_id: &str) -> ApiResult<Vec<Order>> {
        let party_id = validator::require_non_empty("交易方", party_id)?;
        Ok(self.order_repo.find_by_party(&party_id)?)
    }

    /// 删除订单
    pub fn delete_order(&self, order_id: &str) -> ApiResult<()> {
        self.order_repo.delete(order_id)?;
        Ok(())
    }
}
