//! # senae-core: Courier Tariff Engine for Ecuadorian Customs (SENAE)
//!
//! This crate classifies inbound courier parcels into SENAE categories and
//! computes the duties owed on them. Everything here is a pure function over
//! plain data: no I/O, no shared state, safe to call from any thread.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SENAE Tariff Pipeline                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Storefront / API layer / senae CLI                 │   │
//! │  │    product quote ──► order draft ──► bulk quote                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain structs / JSON                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ senae-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐   ┌────────────┐   ┌────────────┐             │   │
//! │  │   │ classifier │──►│   tariff   │──►│   order    │             │   │
//! │  │   │  B / C / D │   │ strategies │   │ aggregator │             │   │
//! │  │   └────────────┘   └────────────┘   └────────────┘             │   │
//! │  │   ┌────────────┐   ┌────────────┐   ┌────────────┐             │   │
//! │  │   │   types    │   │   money    │   │ validation │             │   │
//! │  │   └────────────┘   └────────────┘   └────────────┘             │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`classifier`] - Picks B, C or D from value, weight and a product hint
//! - [`tariff`] - Per-category duty formulas and the dispatcher
//! - [`order`] - Order aggregation, bulk calculation, order drafting
//! - [`quote`] - Classify-then-calculate for a single catalog product
//! - [`types`] - Domain types (Category, TariffOutcome, OrderLineItem, etc.)
//! - [`money`] - Cent rounding for totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Two Kinds of Failure
//!
//! 1. **Malformed input** (zero weight, NaN price, empty product id) is an
//!    `Err(ValidationError)`. The caller sent something wrong.
//! 2. **A parcel outside its category** is `Ok(TariffOutcome::Failed)`. The
//!    request was fine; the parcel just does not qualify. Orders keep such
//!    items and leave them out of the totals.
//!
//! ## Example Usage
//!
//! ```rust
//! use senae_core::{calculate_tariff, determine_category, Category, TariffOptions};
//!
//! let category = determine_category(1000.0, 10.0, "Electronics");
//! assert_eq!(category, Category::C);
//!
//! let outcome = calculate_tariff(category, 1000.0, 10.0, &TariffOptions::default()).unwrap();
//! let breakdown = outcome.breakdown().unwrap();
//!
//! // 10% tariff, 12% IVA on value + tariff, 0.5% FODINFA
//! assert!((breakdown.total_taxes - 237.0).abs() < 1e-9);
//! assert!((breakdown.total_cost - 1237.0).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod classifier;
pub mod error;
pub mod money;
pub mod order;
pub mod quote;
pub mod tariff;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use senae_core::calculate_tariff` instead of
// `use senae_core::tariff::calculate_tariff`

pub use classifier::{determine_category, fitting_category};
pub use error::{CoreError, CoreResult, TariffError, ValidationError};
pub use money::Money;
pub use order::{aggregate_order, calculate_bulk, draft_order, generate_order_number};
pub use quote::quote_product;
pub use tariff::{calculate_tariff, calculate_tariff_for_code};
pub use types::*;
pub use validation::ValidationResult;
