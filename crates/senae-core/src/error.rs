//! # Error Types
//!
//! Domain-specific error types for senae-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  senae-core errors (this file)                                         │
//! │  ├── CoreError        - Umbrella for order drafting                    │
//! │  ├── TariffError      - Business-rule boundaries (RECOVERED)           │
//! │  └── ValidationError  - Malformed input (PROPAGATED)                   │
//! │                                                                         │
//! │  Flow:                                                                  │
//! │    TariffError ──► caught by the dispatcher ──► TariffOutcome::Failed  │
//! │    ValidationError ──► Err(..) ──► caller (HTTP 400, CLI exit code)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (category, limits, field)
//! 3. Errors are enum variants, never String
//! 4. A limit violation is data, a malformed request is an error

use thiserror::Error;

use crate::types::Category;

// =============================================================================
// Core Error
// =============================================================================

/// Errors surfaced by the higher-level operations (order drafting).
#[derive(Debug, Error)]
pub enum CoreError {
    /// An order must carry at least one line item.
    #[error("Order must contain at least one item")]
    EmptyOrder,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Tariff Error
// =============================================================================

/// Business-rule failures raised by the category strategies.
///
/// These never escape [`crate::tariff::calculate_tariff`]: the dispatcher
/// turns them into a [`crate::types::TariffFailure`] so that one bad parcel
/// does not abort a whole order.
///
/// ## User Workflow
/// ```text
/// Order item: category B, $450, 2kg
///      │
///      ▼
/// category_b() ──► LimitExceeded { B, 4, 400 }
///      │
///      ▼
/// dispatcher ──► TariffOutcome::Failed { error: "...", category: "B", ... }
///      │
///      ▼
/// UI shows the item with its error, totals skip it
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TariffError {
    /// Declared value or weight is above the category ceiling.
    #[error("Parcel does not qualify for category {category} (max {max_weight}kg and ${max_value})")]
    LimitExceeded {
        category: Category,
        max_weight: f64,
        max_value: f64,
    },

    /// Category B allows a bounded number of importations per year.
    #[error("Exceeds the annual limit of {max} importations for category B (requested {requested})")]
    ImportationsExceeded { requested: u32, max: u32 },

    /// Category code outside {B, C, D}.
    #[error("Invalid customs category: {0}")]
    InvalidCategory(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when the request itself is malformed. They are checked
/// before any tariff formula runs and are propagated to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// NaN or infinite amounts.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (e.g., e-mail, cedula).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result of a single category strategy, before the dispatcher recovers it.
pub type StrategyResult<T> = Result<T, TariffError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_error_message() {
        let err = TariffError::LimitExceeded {
            category: Category::B,
            max_weight: 4.0,
            max_value: 400.0,
        };
        assert_eq!(
            err.to_string(),
            "Parcel does not qualify for category B (max 4kg and $400)"
        );
    }

    #[test]
    fn test_importations_error_message() {
        let err = TariffError::ImportationsExceeded {
            requested: 13,
            max: 12,
        };
        assert_eq!(
            err.to_string(),
            "Exceeds the annual limit of 12 importations for category B (requested 13)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "value".to_string(),
        };
        assert_eq!(err.to_string(), "value must be positive");

        let err = ValidationError::Required {
            field: "customer_name".to_string(),
        };
        assert_eq!(err.to_string(), "customer_name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::NotFinite {
            field: "weight".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
