//! # Payment Reconciliation
//!
//! Turns the operator-entered payment fields into a settled payment plan.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   PaymentContext states                             │
//! │                                                                     │
//! │            ┌────────────┐                                           │
//! │            │ Incomplete │  missing mode / name / phone              │
//! │            └─────┬──────┘                                           │
//! │        mode=UPI/CARD     mode=CASH                                  │
//! │            │                 │                                      │
//! │            ▼                 ▼                                      │
//! │   ┌──────────────┐   ┌────────────────┐   valid tender              │
//! │   │ ReadyNonCash │   │ AwaitingTender │ ──────────────┐             │
//! │   └──────┬───────┘   └────────────────┘               ▼             │
//! │          │                                     ┌───────────┐        │
//! │          └────────────────────────────────────►│ ReadyCash │        │
//! │                         reconcile()            └───────────┘        │
//! │                              │                                      │
//! │                              ▼                                      │
//! │                        PaymentPlan { paid, change }                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout is rejected while the context is anything other than ready;
//! the error names the missing or invalid fields so the operator can fix
//! them without losing the cart.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::PaymentMode;

// =============================================================================
// Tender Policy
// =============================================================================

/// Store policy for CASH tender below the total.
///
/// The historical behaviour accepts a shortfall and floors change at zero.
/// That is almost certainly a gap rather than a feature, so it is a policy
/// switch instead of a hard-coded rule: strict stores set
/// `allow_underpayment: false` and a short tender becomes a checkout error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TenderPolicy {
    pub allow_underpayment: bool,
}

impl Default for TenderPolicy {
    /// Matches the observed behaviour: accept and clamp.
    fn default() -> Self {
        TenderPolicy { allow_underpayment: true }
    }
}

impl TenderPolicy {
    /// Rejects CASH tender below the total.
    pub const fn strict() -> Self {
        TenderPolicy { allow_underpayment: false }
    }
}

// =============================================================================
// Payment Context
// =============================================================================

/// The operator-entered payment fields for the sale in progress.
///
/// Starts empty at session start and is reset to empty after a successful
/// checkout. `change due` is never stored here - it is derived during
/// reconciliation so a stale value can never be persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentContext {
    pub mode: Option<PaymentMode>,
    pub customer_name: String,
    pub customer_phone: String,
    /// Cash handed over, in paise. Only meaningful when mode is CASH.
    pub tendered_paise: Option<i64>,
}

/// Where the context sits in the state machine, for UI display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentState {
    /// Required fields are missing; `missing` names them.
    Incomplete { missing: Vec<&'static str> },
    /// CASH selected, customer fields present, tender not yet valid.
    AwaitingTender,
    /// CASH with a valid tender amount.
    ReadyCash,
    /// UPI or CARD with customer fields present.
    ReadyNonCash,
}

/// The settled outcome of reconciliation, ready to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentPlan {
    pub mode: PaymentMode,
    pub paid: Money,
    pub change: Money,
}

impl PaymentContext {
    /// Creates an empty context (no mode, no customer fields).
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to the initial empty state. Called after a successful
    /// checkout, never on failure.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.customer_name.trim().is_empty() {
            missing.push("customerName");
        }
        if self.customer_phone.trim().is_empty() {
            missing.push("customerPhone");
        }
        if self.mode.is_none() {
            missing.push("paymentMode");
        }
        missing
    }

    /// Classifies the context without committing to a plan.
    pub fn state(&self) -> PaymentState {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return PaymentState::Incomplete { missing };
        }
        match self.mode {
            Some(PaymentMode::Cash) => match self.tendered_paise {
                Some(t) if t >= 0 => PaymentState::ReadyCash,
                _ => PaymentState::AwaitingTender,
            },
            _ => PaymentState::ReadyNonCash,
        }
    }

    /// Reconciles the context against the cart total.
    ///
    /// - UPI/CARD: paid = total, change = 0; tender is never required.
    /// - CASH: paid = tendered, change = max(0, tendered − total). A
    ///   shortfall is an error only under a strict [`TenderPolicy`].
    ///
    /// Fails with a validation error naming every missing field, or an
    /// invalid-tender error; nothing is mutated on failure.
    pub fn reconcile(&self, total: Money, policy: &TenderPolicy) -> CoreResult<PaymentPlan> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::required(missing.join(", ")).into());
        }

        // missing_fields guarantees the mode is set here
        let mode = self.mode.ok_or_else(|| ValidationError::required("paymentMode"))?;

        match mode {
            PaymentMode::Cash => {
                let tendered_paise = self.tendered_paise.ok_or_else(|| {
                    ValidationError::required("paidAmount")
                })?;
                if tendered_paise < 0 {
                    return Err(ValidationError::Negative {
                        field: "paidAmount".to_string(),
                    }
                    .into());
                }

                let tendered = Money::from_paise(tendered_paise);
                if tendered < total && !policy.allow_underpayment {
                    return Err(CoreError::InsufficientTender { tendered, total });
                }

                Ok(PaymentPlan {
                    mode,
                    paid: tendered,
                    change: (tendered - total).clamp_zero(),
                })
            }
            PaymentMode::Upi | PaymentMode::Card => Ok(PaymentPlan {
                mode,
                paid: total,
                change: Money::zero(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(mode: PaymentMode) -> PaymentContext {
        PaymentContext {
            mode: Some(mode),
            customer_name: "Asha".to_string(),
            customer_phone: "9876543210".to_string(),
            tendered_paise: None,
        }
    }

    #[test]
    fn test_empty_context_is_incomplete() {
        let ctx = PaymentContext::new();
        match ctx.state() {
            PaymentState::Incomplete { missing } => {
                assert_eq!(missing, vec!["customerName", "customerPhone", "paymentMode"]);
            }
            other => panic!("expected Incomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_incomplete_blocks_checkout() {
        let ctx = PaymentContext::new();
        let err = ctx
            .reconcile(Money::from_paise(1000), &TenderPolicy::default())
            .unwrap_err();
        assert!(err.to_string().contains("customerName"));
        assert!(err.to_string().contains("paymentMode"));
    }

    #[test]
    fn test_cash_awaits_tender() {
        let ctx = filled(PaymentMode::Cash);
        assert_eq!(ctx.state(), PaymentState::AwaitingTender);

        let err = ctx
            .reconcile(Money::from_paise(1000), &TenderPolicy::default())
            .unwrap_err();
        assert!(err.to_string().contains("paidAmount"));
    }

    #[test]
    fn test_cash_with_tender_is_ready() {
        let mut ctx = filled(PaymentMode::Cash);
        ctx.tendered_paise = Some(30000);
        assert_eq!(ctx.state(), PaymentState::ReadyCash);

        // ₹300 against ₹236 → paid ₹300, change ₹64
        let plan = ctx
            .reconcile(Money::from_paise(23600), &TenderPolicy::default())
            .unwrap();
        assert_eq!(plan.paid.paise(), 30000);
        assert_eq!(plan.change.paise(), 6400);
    }

    #[test]
    fn test_cash_shortfall_clamps_under_default_policy() {
        let mut ctx = filled(PaymentMode::Cash);
        ctx.tendered_paise = Some(0);

        let plan = ctx
            .reconcile(Money::from_paise(5000), &TenderPolicy::default())
            .unwrap();
        assert_eq!(plan.paid.paise(), 0);
        assert_eq!(plan.change.paise(), 0); // clamped, not negative
    }

    #[test]
    fn test_cash_shortfall_rejected_under_strict_policy() {
        let mut ctx = filled(PaymentMode::Cash);
        ctx.tendered_paise = Some(3000);

        let err = ctx
            .reconcile(Money::from_paise(23600), &TenderPolicy::strict())
            .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientTender { .. }));
    }

    #[test]
    fn test_negative_tender_rejected() {
        let mut ctx = filled(PaymentMode::Cash);
        ctx.tendered_paise = Some(-100);

        let err = ctx
            .reconcile(Money::from_paise(1000), &TenderPolicy::default())
            .unwrap_err();
        assert!(err.to_string().contains("paidAmount"));
    }

    #[test]
    fn test_upi_never_requires_tender() {
        let ctx = filled(PaymentMode::Upi);
        assert_eq!(ctx.state(), PaymentState::ReadyNonCash);

        let plan = ctx
            .reconcile(Money::from_paise(23600), &TenderPolicy::strict())
            .unwrap();
        assert_eq!(plan.paid.paise(), 23600);
        assert!(plan.change.is_zero());
    }

    #[test]
    fn test_card_settles_exact_total() {
        let ctx = filled(PaymentMode::Card);
        let plan = ctx
            .reconcile(Money::from_paise(23600), &TenderPolicy::default())
            .unwrap();
        assert_eq!(plan.paid.paise(), 23600);
        assert!(plan.change.is_zero());
    }

    #[test]
    fn test_reset() {
        let mut ctx = filled(PaymentMode::Cash);
        ctx.tendered_paise = Some(100);
        ctx.reset();
        assert!(ctx.mode.is_none());
        assert!(ctx.customer_name.is_empty());
        assert!(ctx.tendered_paise.is_none());
    }
}
