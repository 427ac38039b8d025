// ==========================================
// 制造业进销存系统 - 付款台账引擎
// ==========================================
// 职责: 订单付款入账计算 + 付款状态判定
// 输入: 订单快照 + 本次付款参数
// 输出: PaymentOutcome (新已付金额/新状态/付款流水)
// 红线: 引擎只算不写,订单回写与流水落库由调用方
//       通过 OrderRepository::apply_payment 原子提交
// ==========================================

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::order::{Order, PaymentRecord};
use crate::domain::types::{OrderKind, PaymentMethod, PaymentStatus};
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// PaymentOutcome - 入账计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    /// 新的已付金额 (已按未结余额截断)
    pub new_paid_amount: f64,
    /// 新的付款状态
    pub new_status: PaymentStatus,
    /// 付款流水 (amount 为请求金额,审计口径)
    pub record: PaymentRecord,
}

// ==========================================
// PaymentLedger - 付款台账引擎
// ==========================================
pub struct PaymentLedger {
    // 无状态引擎,不需要注入依赖
}

impl PaymentLedger {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 记录一笔付款
    ///
    /// 规则:
    /// - amount <= 0 → 校验失败,无任何状态变化
    /// - 新已付金额 = min(已付 + 本次, 总额)
    ///   超出未结余额的部分静默截断,不拒绝 (沿用线上行为,见 DESIGN.md)
    /// - 流水中的 amount 保留请求金额,供审计对账
    ///
    /// # 参数
    /// - `order`: 订单快照
    /// - `kind`: 订单类型 (采购/销售)
    /// - `amount`: 本次付款金额
    /// - `method`: 付款方式
    /// - `reference`: 凭证号 (可选)
    /// - `notes`: 备注 (可选)
    ///
    /// # 返回
    /// - Ok(PaymentOutcome): 入账结果,由调用方原子落库
    /// - Err(EngineError::Validation): 金额非法
    pub fn record_payment(
        &self,
        order: &Order,
        kind: OrderKind,
        amount: f64,
        method: PaymentMethod,
        reference: Option<String>,
        notes: Option<String>,
    ) -> EngineResult<PaymentOutcome> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::field_value(
                "amount",
                format!("付款金额必须为正数, 实际为 {}", amount),
            ));
        }

        let new_paid_amount = (order.paid_amount + amount).min(order.total_amount);
        let new_status = Self::derive_status(new_paid_amount, order.total_amount);

        let record = PaymentRecord {
            record_id: Uuid::new_v4().to_string(),
            order_id: order.order_id.clone(),
            order_kind: kind,
            amount,
            method,
            reference,
            notes,
            paid_at: Utc::now(),
        };

        Ok(PaymentOutcome {
            new_paid_amount,
            new_status,
            record,
        })
    }

    /// 付款状态判定
    ///
    /// Paid if paid >= total; Partial if paid > 0; 否则 Pending
    pub fn derive_status(paid_amount: f64, total_amount: f64) -> PaymentStatus {
        if paid_amount >= total_amount {
            PaymentStatus::Paid
        } else if paid_amount > 0.0 {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Pending
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for PaymentLedger {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    /// 创建测试用的订单
    fn create_test_order(total_amount: f64, paid_amount: f64) -> Order {
        Order {
            order_id: "PO-2026-001".to_string(),
            party_id: "S001".to_string(),
            total_amount,
            paid_amount,
            payment_status: PaymentLedger::derive_status(paid_amount, total_amount),
            order_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_payment_partial() {
        // 总额 25000, 已付 0, 付款 10000 → 已付 10000, 状态 Partial
        let ledger = PaymentLedger::new();
        let order = create_test_order(25000.0, 0.0);

        let outcome = ledger
            .record_payment(
                &order,
                OrderKind::Purchase,
                10000.0,
                PaymentMethod::Cash,
                None,
                None,
            )
            .expect("入账失败");

        assert_eq!(outcome.new_paid_amount, 10000.0);
        assert_eq!(outcome.new_status, PaymentStatus::Partial);
        assert_eq!(outcome.record.amount, 10000.0);
        assert_eq!(outcome.record.order_id, "PO-2026-001");
    }

    #[test]
    fn test_record_payment_capped_at_total() {
        // 总额 25000, 已付 15000, 付款 15000 → 截断到 25000, 状态 Paid
        let ledger = PaymentLedger::new();
        let order = create_test_order(25000.0, 15000.0);

        let outcome = ledger
            .record_payment(
                &order,
                OrderKind::Purchase,
                15000.0,
                PaymentMethod::BankTransfer,
                Some("TRX-778".to_string()),
                None,
            )
            .expect("入账失败");

        assert_eq!(outcome.new_paid_amount, 25000.0);
        assert_eq!(outcome.new_status, PaymentStatus::Paid);
        // 流水保留请求金额,不是截断后的入账金额
        assert_eq!(outcome.record.amount, 15000.0);
    }

    #[test]
    fn test_record_payment_exact_settlement() {
        let ledger = PaymentLedger::new();
        let order = create_test_order(8000.0, 3000.0);

        let outcome = ledger
            .record_payment(
                &order,
                OrderKind::Sales,
                5000.0,
                PaymentMethod::Cash,
                None,
                None,
            )
            .expect("入账失败");

        assert_eq!(outcome.new_paid_amount, 8000.0);
        assert_eq!(outcome.new_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_record_payment_rejects_non_positive() {
        let ledger = PaymentLedger::new();
        let order = create_test_order(25000.0, 0.0);

        // 负数金额
        let result = ledger.record_payment(
            &order,
            OrderKind::Purchase,
            -5.0,
            PaymentMethod::Cash,
            None,
            None,
        );
        assert!(matches!(result, Err(EngineError::FieldValue { .. })));

        // 零金额
        let result = ledger.record_payment(
            &order,
            OrderKind::Purchase,
            0.0,
            PaymentMethod::Cash,
            None,
            None,
        );
        assert!(result.is_err());

        // NaN
        let result = ledger.record_payment(
            &order,
            OrderKind::Purchase,
            f64::NAN,
            PaymentMethod::Cash,
            None,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_paid_amount_never_exceeds_total() {
        let ledger = PaymentLedger::new();

        // 多组 (总额, 已付, 付款) 组合,入账后均不得超过总额
        let cases = [
            (100.0, 0.0, 1.0),
            (100.0, 0.0, 100.0),
            (100.0, 0.0, 999.0),
            (100.0, 99.5, 10.0),
            (0.0, 0.0, 50.0),
        ];

        for (total, paid, amount) in cases {
            let order = create_test_order(total, paid);
            let outcome = ledger
                .record_payment(
                    &order,
                    OrderKind::Sales,
                    amount,
                    PaymentMethod::Cash,
                    None,
                    None,
                )
                .expect("入账失败");

            assert!(
                outcome.new_paid_amount <= total,
                "total={} paid={} amount={} → new_paid={}",
                total,
                paid,
                amount,
                outcome.new_paid_amount
            );
        }
    }

    #[test]
    fn test_status_monotonic_under_payments() {
        // 连续有效付款下状态只进不退: Pending → Partial → Paid
        let ledger = PaymentLedger::new();
        let mut order = create_test_order(30000.0, 0.0);
        let mut last_status = order.payment_status;

        for amount in [5000.0, 10000.0, 10000.0, 20000.0] {
            let outcome = ledger
                .record_payment(
                    &order,
                    OrderKind::Purchase,
                    amount,
                    PaymentMethod::Cash,
                    None,
                    None,
                )
                .expect("入账失败");

            assert!(
                outcome.new_status >= last_status,
                "状态回退: {} → {}",
                last_status,
                outcome.new_status
            );

            last_status = outcome.new_status;
            order.paid_amount = outcome.new_paid_amount;
            order.payment_status = outcome.new_status;
        }

        assert_eq!(last_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_derive_status() {
        assert_eq!(
            PaymentLedger::derive_status(0.0, 100.0),
            PaymentStatus::Pending
        );
        assert_eq!(
            PaymentLedger::derive_status(40.0, 100.0),
            PaymentStatus::Partial
        );
        assert_eq!(
            PaymentLedger::derive_status(100.0, 100.0),
            PaymentStatus::Paid
        );
        // 零元订单: paid >= total 即 Paid
        assert_eq!(PaymentLedger::derive_status(0.0, 0.0), PaymentStatus::Paid);
    }

    #[test]
    fn test_record_carries_fresh_ids() {
        let ledger = PaymentLedger::new();
        let order = create_test_order(1000.0, 0.0);

        let first = ledger
            .record_payment(&order, OrderKind::Sales, 100.0, PaymentMethod::Cash, None, None)
            .expect("入账失败");
        let second = ledger
            .record_payment(&order, OrderKind::Sales, 100.0, PaymentMethod::Cash, None, None)
            .expect("入账失败");

        // 重复调用返回相等的值,但流水 ID 各自独立
        assert_eq!(first.new_paid_amount, second.new_paid_amount);
        assert_ne!(first.record.record_id, second.record.record_id);
    }
}
