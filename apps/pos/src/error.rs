//! # POS Application Errors
//!
//! One error type for the session layer, wrapping the domain and database
//! errors beneath it. The command loop prints these and keeps running; a
//! checkout error never costs the cashier the cart.

use thiserror::Error;

use kirana_core::CoreError;
use kirana_db::DbError;

/// Errors surfaced to the operator.
#[derive(Debug, Error)]
pub enum PosError {
    /// Checkout pipeline error (empty cart, missing fields, short tender).
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Persistence error. The cart and payment fields are untouched, so
    /// the checkout can be retried.
    #[error("Could not save the sale: {0}")]
    Db(#[from] DbError),

    /// No product with the given short code.
    #[error("No product with code {0}")]
    UnknownCode(i64),
}

/// Result type for POS session operations.
pub type PosResult<T> = Result<T, PosError>;
