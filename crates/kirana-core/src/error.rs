//! # Error Types
//!
//! Domain-specific error types for kirana-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  kirana-core errors (this file)                                     │
//! │  ├── CoreError        - checkout rule violations                    │
//! │  └── ValidationError  - input validation failures                   │
//! │                                                                     │
//! │  kirana-db errors (separate crate)                                  │
//! │  └── DbError          - persistence failures                        │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → PosError → operator message    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed checkout is always recoverable: the cart and payment context
//! are left untouched so the cashier can correct the input and retry.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Checkout rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted with no lines in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// CASH tender is below the total and the store policy rejects
    /// underpayment.
    ///
    /// Under the default policy a shortfall is accepted and change is
    /// floored at zero; this error only fires when
    /// `TenderPolicy::allow_underpayment` is false.
    #[error("Insufficient tender: received {tendered}, total is {total}")]
    InsufficientTender { tendered: Money, total: Money },

    /// Quantity exceeds the per-line maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These block checkout without mutating any state; the message names the
/// offending field so the operator knows what to fix.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (non-numeric amount, bad UUID, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for the missing-field case.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required { field: field.into() }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientTender {
            tendered: Money::from_paise(3000),
            total: Money::from_paise(23600),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient tender: received ₹30.00, total is ₹236.00"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("customerName");
        assert_eq!(err.to_string(), "customerName is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("paymentMode").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
