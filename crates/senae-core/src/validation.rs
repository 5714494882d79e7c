//! # Validation Module
//!
//! Input validation for the tariff engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: API layer / CLI                                              │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Unknown JSON shapes rejected by serde                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Amounts, weights and counts must be finite and > 0                │
//! │  └── Customer fields must be present and well-formed                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Tariff strategies                                            │
//! │  └── Category ceilings (recovered as TariffOutcome::Failed)            │
//! │                                                                         │
//! │  Layers 1-2 reject the request. Layer 3 only flags the parcel.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use senae_core::validation::{validate_amount, validate_quantity};
//!
//! assert!(validate_amount("value", 49.99).is_ok());
//! assert!(validate_amount("weight", 0.0).is_err());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{BulkTariffItem, NewOrder, OrderLineItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a declared value, price or weight.
///
/// ## Rules
/// - Must be a finite number (no NaN, no infinity)
/// - Must be strictly positive
///
/// A zero or negative amount is a malformed request, never a category limit
/// violation.
pub fn validate_amount(field: &str, amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if amount <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an order line quantity. Must be positive; there is no upper
/// bound, a large quantity only matters through the category ceilings.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates the yearly importation count handed to category B.
///
/// Only zero is malformed. Any count above category B's annual limit is a
/// well-formed request that the strategy reports as
/// [`TariffError::ImportationsExceeded`](crate::error::TariffError).
pub fn validate_importations_count(count: u32) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::MustBePositive {
            field: "importations_count".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

fn require<'a>(field: &str, value: &'a str, max: usize) -> ValidationResult<&'a str> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value)
}

/// Validates the customer's full name (1-200 characters).
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    require("customer_name", name, 200).map(|_| ())
}

/// Validates an e-mail address.
///
/// Only the shape is checked: a local part, a single `@`, and a domain with
/// at least one inner dot.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = require("customer_email", email, 254)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "customer_email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must be local@domain"));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid("domain must contain a dot"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    Ok(())
}

/// Validates a cédula (10 digits) or RUC (13 digits).
///
/// ## Example
/// ```rust
/// use senae_core::validation::validate_cedula;
///
/// assert!(validate_cedula("1234567890").is_ok());
/// assert!(validate_cedula("1234567890001").is_ok());
/// assert!(validate_cedula("12345").is_err());
/// assert!(validate_cedula("12345abcde").is_err());
/// ```
pub fn validate_cedula(cedula: &str) -> ValidationResult<()> {
    let cedula = require("customer_cedula", cedula, 13)?;

    if !cedula.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "customer_cedula".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if cedula.len() < 10 {
        return Err(ValidationError::InvalidFormat {
            field: "customer_cedula".to_string(),
            reason: "must have 10 to 13 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a shipping address (1-500 characters).
pub fn validate_shipping_address(address: &str) -> ValidationResult<()> {
    require("shipping_address", address, 500).map(|_| ())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates the numeric fields of an order line that the aggregator relies
/// on. Product id and title are catalog data and pass through untouched.
pub fn validate_line_item(item: &OrderLineItem) -> ValidationResult<()> {
    validate_quantity(item.quantity)?;
    validate_amount("unit_price", item.unit_price)?;

    if let Some(weight) = item.weight {
        validate_amount("weight", weight)?;
    }

    if let Some(count) = item.importations_count {
        validate_importations_count(count)?;
    }

    Ok(())
}

/// Validates a bulk tariff row. The category code is left to the engine.
pub fn validate_bulk_item(item: &BulkTariffItem) -> ValidationResult<()> {
    validate_amount("total_value", item.total_value)?;
    validate_amount("total_weight", item.total_weight)
}

/// Validates the customer-facing part of a new order (not the items).
pub fn validate_customer(order: &NewOrder) -> ValidationResult<()> {
    validate_customer_name(&order.customer_name)?;
    validate_email(&order.customer_email)?;
    validate_cedula(&order.customer_cedula)?;
    validate_shipping_address(&order.shipping_address)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("value", 0.01).is_ok());
        assert!(validate_amount("value", 2000.0).is_ok());

        assert_eq!(
            validate_amount("value", 0.0),
            Err(ValidationError::MustBePositive {
                field: "value".to_string()
            })
        );
        assert!(validate_amount("value", -1.0).is_err());
        assert!(matches!(
            validate_amount("weight", f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(validate_amount("weight", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());
        assert!(validate_quantity(u32::MAX).is_ok());
        assert!(validate_quantity(0).is_err());
    }

    #[test]
    fn test_validate_importations_count() {
        assert!(validate_importations_count(1).is_ok());
        assert!(validate_importations_count(13).is_ok());
        assert!(validate_importations_count(1000).is_ok());
        assert_eq!(
            validate_importations_count(0),
            Err(ValidationError::MustBePositive {
                field: "importations_count".to_string()
            })
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("juan@email.com").is_ok());
        assert!(validate_email("j.perez@mail.example.ec").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("juan.email.com").is_err());
        assert!(validate_email("@email.com").is_err());
        assert!(validate_email("juan@email").is_err());
        assert!(validate_email("juan@email.").is_err());
        assert!(validate_email("juan@@email.com").is_err());
        assert!(validate_email("ju an@email.com").is_err());
    }

    #[test]
    fn test_validate_cedula() {
        assert!(validate_cedula("1234567890").is_ok());
        assert!(validate_cedula("1790012345001").is_ok());
        assert!(validate_cedula("").is_err());
        assert!(validate_cedula("123456789").is_err());
        assert!(validate_cedula("12345678901234").is_err());
        assert!(validate_cedula("12345-7890").is_err());
    }

    #[test]
    fn test_validate_line_item() {
        let mut item = OrderLineItem {
            product_id: "B0BSHF7WHW".to_string(),
            title: "Nike Air Max 270".to_string(),
            quantity: 1,
            unit_price: 150.0,
            weight: Some(0.9),
            category: Category::D,
            product_type: Some("footwear".to_string()),
            importations_count: None,
        };
        assert!(validate_line_item(&item).is_ok());

        item.product_id = "SKU.1".to_string();
        item.title = "T".repeat(500);
        item.quantity = 1000;
        assert!(validate_line_item(&item).is_ok());

        item.weight = Some(0.0);
        assert!(matches!(
            validate_line_item(&item),
            Err(ValidationError::MustBePositive { field }) if field == "weight"
        ));

        item.weight = None;
        item.unit_price = -3.0;
        assert!(validate_line_item(&item).is_err());
    }
}
