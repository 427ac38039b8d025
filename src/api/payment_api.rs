// ==========================================
// 制造业进销存系统 - 付款 API
// ==========================================
// 职责: 付款入账流程编排
// 流程: 读订单快照 → 付款台账引擎计算 → 仓储原子落库
// 订单回写与流水插入在同一事务内提交 (apply_payment)
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator;
use crate::domain::order::PaymentRecord;
use crate::domain::types::{OrderKind, PaymentMethod};
use crate::engine::payment_ledger::{PaymentLedger, PaymentOutcome};
use crate::repository::order_repo::OrderRepository;
use crate::repository::payment_record_repo::PaymentRecordRepository;

// ==========================================
// PaymentApi - 付款 API
// ==========================================
pub struct PaymentApi {
    purchase_repo: Arc<OrderRepository>,
    sales_repo: Arc<OrderRepository>,
    payment_record_repo: Arc<PaymentRecordRepository>,
    ledger: PaymentLedger,
}

impl PaymentApi {
    /// 创建新的 PaymentApi 实例
    ///
    /// # 参数
    /// - purchase_repo: 采购单仓储
    /// - sales_repo: 销售单仓储
    /// - payment_record_repo: 付款流水仓储 (历史查询)
    pub fn new(
        purchase_repo: Arc<OrderRepository>,
        sales_repo: Arc<OrderRepository>,
        payment_record_repo: Arc<PaymentRecordRepository>,
    ) -> Self {
        Self {
            purchase_repo,
            sales_repo,
            payment_record_repo,
            ledger: PaymentLedger::new(),
        }
    }

    /// 订单类型 → 对应仓储
    fn repo_for(&self, kind: OrderKind) -> &OrderRepository {
        match kind {
            OrderKind::Purchase => &self.purchase_repo,
            OrderKind::Sales => &self.sales_repo,
        }
    }

    // ==========================================
    // 入账接口
    // ==========================================

    /// 记录一笔付款
    ///
    /// 超出未结余额的金额由引擎静默截断入账,流水保留请求金额;
    /// 引擎校验失败时不产生任何写入
    ///
    /// # 参数
    /// - kind: 订单类型 (采购/销售)
    /// - order_id: 订单号
    /// - amount: 付款金额
    /// - method: 付款方式
    /// - reference: 凭证号 (可选)
    /// - notes: 备注 (可选)
    ///
    /// # 返回
    /// - Ok(PaymentOutcome): 已落库的入账结果
    /// - Err(ApiError): 校验失败或数据库错误
    pub fn record_payment(
        &self,
        kind: OrderKind,
        order_id: &str,
        amount: f64,
        method: PaymentMethod,
        reference: Option<String>,
        notes: Option<String>,
    ) -> ApiResult<PaymentOutcome> {
        let order_id = validator::require_non_empty("订单号", order_id)?;

        let repo = self.repo_for(kind);
        let order = repo
            .find_by_id(&order_id)?
            .ok_or_else(|| ApiError::NotFound(format!("订单(order_id={})不存在", order_id)))?;

        // 引擎计算 (无副作用,失败即返回)
        let outcome = self
            .ledger
            .record_payment(&order, kind, amount, method, reference, notes)?;

        // 原子落库: 订单回写 + 流水插入
        repo.apply_payment(
            &order_id,
            outcome.new_paid_amount,
            outcome.new_status,
            &outcome.record,
        )?;

        tracing::info!(
            order_id = %order_id,
            kind = %kind,
            amount,
            new_paid = outcome.new_paid_amount,
            new_status = %outcome.new_status,
            "付款入账"
        );

        Ok(outcome)
    }

    /// 记录一笔付款（表单文本入口）
    ///
    /// 对话框传入的金额文本在此解析,非法文本直接报错,不触发引擎
    pub fn record_payment_from_text(
        &self,
        kind: OrderKind,
        order_id: &str,
        amount_text: &str,
        method: PaymentMethod,
        reference: Option<String>,
        notes: Option<String>,
    ) -> ApiResult<PaymentOutcome> {
        let amount = validator::parse_positive_amount("付款金额", amount_text)?;
        self.record_payment(kind, order_id, amount, method, reference, notes)
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询某订单的付款历史
    pub fn payment_history(
        &self,
        kind: OrderKind,
        order_id: &str,
    ) -> ApiResult<Vec<PaymentRecord>> {
        let order_id = validator::require_non_empty("订单号", order_id)?;
        Ok(self.payment_record_repo.find_by_order(kind, &order_id)?)
    }

    /// 查询最近付款流水
    pub fn recent_payments(&self, limit: i32) -> ApiResult<Vec<PaymentRecord>> {
        if limit <= 0 || limit > 1000 {
            return Err(ApiError::InvalidInput(
                "limit必须在1-1000之间".to_string(),
            ));
        }

        Ok(self.payment_record_repo.find_recent(limit)?)
    }
}
