//! Core error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.
//!
//! Empty extraction results and empty match lists are NOT errors; they are
//! modeled as explicit outcomes so callers branch on them. Only genuinely
//! malformed input reaches this enum.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    #[error("Quantity must be a finite, non-negative number of meters, got {0}")]
    MalformedQuantity(f64),

    #[error("Discount must be between 0 and 100, got {0}")]
    InvalidDiscount(f64),
}

/// Result type alias for core quoting operations.
pub type QuoteResult<T> = Result<T, QuoteError>;
