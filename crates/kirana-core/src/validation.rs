//! # Validation Module
//!
//! Input validation rules shared by the admin tooling and the POS session.
//!
//! Validation runs before business logic so that a bad value is rejected
//! with a field-level message instead of surfacing later as a database
//! constraint error. The rules are deliberately lenient about format
//! (names and phone numbers are free text) and strict about the numeric
//! ranges the checkout math depends on.

use crate::error::ValidationError;
use crate::MAX_PRODUCT_CODE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Customer name: required, at most 100 characters. Returns the trimmed
/// value.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::required("customerName"));
    }
    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "customerName".to_string(),
            max: 100,
        });
    }
    Ok(name.to_string())
}

/// Customer phone: required, at most 20 characters, digits with optional
/// separators. Returns the trimmed value.
pub fn validate_customer_phone(phone: &str) -> ValidationResult<String> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(ValidationError::required("customerPhone"));
    }
    if phone.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "customerPhone".to_string(),
            max: 20,
        });
    }
    if !phone.chars().all(|c| c.is_ascii_digit() || "+- ".contains(c)) {
        return Err(ValidationError::InvalidFormat {
            field: "customerPhone".to_string(),
            reason: "must contain only digits, +, - and spaces".to_string(),
        });
    }
    Ok(phone.to_string())
}

/// Product name: required, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::required("productName"));
    }
    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "productName".to_string(),
            max: 200,
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Product code: the short key-in code, 1 to 999.
pub fn validate_product_code(code: i64) -> ValidationResult<()> {
    if code < 1 || code > MAX_PRODUCT_CODE {
        return Err(ValidationError::OutOfRange {
            field: "productCode".to_string(),
            min: 1,
            max: MAX_PRODUCT_CODE,
        });
    }
    Ok(())
}

/// Price in paise: non-negative (zero is allowed for free items).
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Tax rate in basis points: 0 to 10000 (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "taxRate".to_string(),
            min: 0,
            max: 10000,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_name() {
        assert_eq!(validate_customer_name("  Asha  ").unwrap(), "Asha");
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_customer_phone() {
        assert!(validate_customer_phone("9876543210").is_ok());
        assert!(validate_customer_phone("+91 98765-43210").is_ok());
        assert!(validate_customer_phone("").is_err());
        assert!(validate_customer_phone("call me").is_err());
    }

    #[test]
    fn test_product_name() {
        assert!(validate_product_name("Toor Dal 1kg").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"x".repeat(300)).is_err());
    }

    #[test]
    fn test_product_code() {
        assert!(validate_product_code(1).is_ok());
        assert!(validate_product_code(999).is_ok());
        assert!(validate_product_code(0).is_err());
        assert!(validate_product_code(1000).is_err());
    }

    #[test]
    fn test_price_paise() {
        assert!(validate_price_paise(0).is_ok());
        assert!(validate_price_paise(12000).is_ok());
        assert!(validate_price_paise(-1).is_err());
    }

    #[test]
    fn test_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(2800).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }
}
