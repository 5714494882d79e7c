//! # Tariff Engine
//!
//! One calculation strategy per courier category, plus the dispatcher that
//! picks a strategy and turns business-rule failures into data.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate_tariff(category, value, weight, options)                     │
//! │       │                                                                 │
//! │       ├── validate value, weight ── Err(ValidationError) ──► caller    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  match category                                                         │
//! │       ├── B ──► category_b(value, weight, importations_count)          │
//! │       ├── C ──► category_c(value, weight)                              │
//! │       └── D ──► category_d(value, weight, product_type)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(breakdown)  ──► TariffOutcome::Calculated                          │
//! │  Err(TariffError) ──► TariffOutcome::Failed { error, category, ... }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Formulas
//! | category | tariff                         | IVA (12%)              | FODINFA (0.5%) |
//! |----------|--------------------------------|------------------------|----------------|
//! | B        | $42 fixed                      | -                      | -              |
//! | C        | 10% of value                   | (value + tariff) × 12% | value × 0.5%   |
//! | D        | 10% ADV + $5.5/kg or $6/pair   | (value + total) × 12%  | value × 0.5%   |

use tracing::debug;

use crate::error::{StrategyResult, TariffError};
use crate::types::{Category, TariffBreakdown, TariffFailure, TariffOptions, TariffOutcome, TaxRate};
use crate::validation::{validate_amount, validate_importations_count, ValidationResult};

// =============================================================================
// Rates & Constants
// =============================================================================

/// Fixed tariff per category-B importation.
pub const CATEGORY_B_TARIFF: f64 = 42.0;

/// Up to this many importations a year: $1,200 annual limit per recipient.
pub const CATEGORY_B_RECIPIENT_IMPORTS: u32 = 5;
pub const CATEGORY_B_RECIPIENT_LIMIT: f64 = 1200.0;

/// Up to this many importations a year: $2,400 annual limit (migrant sender).
pub const CATEGORY_B_MIGRANT_IMPORTS: u32 = 12;
pub const CATEGORY_B_MIGRANT_LIMIT: f64 = 2400.0;

/// Ad-valorem tariff for category C (average across products).
pub const CATEGORY_C_TARIFF_RATE: TaxRate = TaxRate::from_bps(1000);

/// Ad-valorem duty (ADV) for category D.
pub const ADV_RATE: TaxRate = TaxRate::from_bps(1000);

pub const IVA_RATE: TaxRate = TaxRate::from_bps(1200);
pub const FODINFA_RATE: TaxRate = TaxRate::from_bps(50);

/// Specific tariff for textiles, per kg.
pub const TEXTILE_TARIFF_PER_KG: f64 = 5.5;

/// Specific tariff for footwear, per pair (one pair per whole kg, min 1).
pub const FOOTWEAR_TARIFF_PER_PAIR: f64 = 6.0;

/// Category-D parcels above this value need an INEN certificate.
pub const INEN_EXEMPTION_LIMIT: f64 = 500.0;

/// Product type assumed for category D when none is given.
pub const DEFAULT_PRODUCT_TYPE: &str = "textiles";

// =============================================================================
// Product Kind
// =============================================================================

/// How category D charges its specific tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// Per kg. Also used for any unrecognised product type.
    Textiles,
    /// Per pair.
    Footwear,
}

impl ProductKind {
    /// `"footwear"` and `"calzado"` (any case) are footwear; everything else
    /// is charged as textiles.
    pub fn from_product_type(product_type: &str) -> Self {
        match product_type.trim().to_lowercase().as_str() {
            "footwear" | "calzado" => ProductKind::Footwear,
            _ => ProductKind::Textiles,
        }
    }

    /// Specific tariff for a parcel of this kind.
    pub fn specific_tariff(&self, weight: f64) -> f64 {
        match self {
            ProductKind::Textiles => TEXTILE_TARIFF_PER_KG * weight,
            ProductKind::Footwear => {
                let pairs = weight.floor().max(1.0);
                FOOTWEAR_TARIFF_PER_PAIR * pairs
            }
        }
    }
}

// =============================================================================
// Strategies
// =============================================================================

/// Category B: up to 4 kg and $400, fixed $42, free of tributes.
fn category_b(value: f64, weight: f64, importations_count: u32) -> StrategyResult<TariffBreakdown> {
    Category::B.limits().check(Category::B, value, weight)?;

    let annual_limit = if importations_count <= CATEGORY_B_RECIPIENT_IMPORTS {
        CATEGORY_B_RECIPIENT_LIMIT
    } else if importations_count <= CATEGORY_B_MIGRANT_IMPORTS {
        CATEGORY_B_MIGRANT_LIMIT
    } else {
        return Err(TariffError::ImportationsExceeded {
            requested: importations_count,
            max: CATEGORY_B_MIGRANT_IMPORTS,
        });
    };

    let tariff = CATEGORY_B_TARIFF;

    let mut breakdown = TariffBreakdown::new(Category::B, value, weight);
    breakdown.tariff = Some(tariff);
    breakdown.total_taxes = tariff;
    breakdown.total_cost = value + tariff;
    breakdown.importations_count = Some(importations_count);
    breakdown.annual_limit = Some(annual_limit);
    breakdown.free_of_tributes = Some(true);
    Ok(breakdown)
}

/// Category C: up to 50 kg and $2,000, needs a prior control document.
fn category_c(value: f64, weight: f64) -> StrategyResult<TariffBreakdown> {
    Category::C.limits().check(Category::C, value, weight)?;

    let tariff = CATEGORY_C_TARIFF_RATE.apply(value);
    let iva = IVA_RATE.apply(value + tariff);
    let fodinfa = FODINFA_RATE.apply(value);
    let total_taxes = tariff + iva + fodinfa;

    let mut breakdown = TariffBreakdown::new(Category::C, value, weight);
    breakdown.tariff = Some(tariff);
    breakdown.tariff_rate = Some(CATEGORY_C_TARIFF_RATE.fraction());
    breakdown.iva = iva;
    breakdown.iva_rate = Some(IVA_RATE.fraction());
    breakdown.fodinfa = fodinfa;
    breakdown.fodinfa_rate = Some(FODINFA_RATE.fraction());
    breakdown.total_taxes = total_taxes;
    breakdown.total_cost = value + total_taxes;
    breakdown.requires_control_document = Some(true);
    Ok(breakdown)
}

/// Category D: textiles and footwear, up to 20 kg and $2,000.
fn category_d(value: f64, weight: f64, product_type: &str) -> StrategyResult<TariffBreakdown> {
    Category::D.limits().check(Category::D, value, weight)?;

    let adv = ADV_RATE.apply(value);
    let specific_tariff = ProductKind::from_product_type(product_type).specific_tariff(weight);
    let total_tariff = adv + specific_tariff;
    let iva = IVA_RATE.apply(value + total_tariff);
    let fodinfa = FODINFA_RATE.apply(value);
    let total_taxes = total_tariff + iva + fodinfa;

    let mut breakdown = TariffBreakdown::new(Category::D, value, weight);
    breakdown.product_type = Some(product_type.to_string());
    breakdown.adv = adv;
    breakdown.adv_rate = Some(ADV_RATE.fraction());
    breakdown.specific_tariff = Some(specific_tariff);
    breakdown.total_tariff = Some(total_tariff);
    breakdown.iva = iva;
    breakdown.iva_rate = Some(IVA_RATE.fraction());
    breakdown.fodinfa = fodinfa;
    breakdown.fodinfa_rate = Some(FODINFA_RATE.fraction());
    breakdown.total_taxes = total_taxes;
    breakdown.total_cost = value + total_taxes;
    breakdown.requires_inen = Some(value > INEN_EXEMPTION_LIMIT);
    breakdown.inen_exemption_limit = Some(INEN_EXEMPTION_LIMIT);
    Ok(breakdown)
}

// =============================================================================
// Dispatcher
// =============================================================================

fn validate_inputs(value: f64, weight: f64, options: &TariffOptions) -> ValidationResult<()> {
    validate_amount("value", value)?;
    validate_amount("weight", weight)?;

    if let Some(count) = options.importations_count {
        validate_importations_count(count)?;
    }

    Ok(())
}

fn recovered(category: &str, value: f64, weight: f64, err: TariffError) -> TariffOutcome {
    debug!(category, value, weight, error = %err, "tariff calculation failed");

    TariffOutcome::Failed(TariffFailure {
        error: err.to_string(),
        category: category.to_string(),
        base_value: value,
        weight,
    })
}

/// Calculates the tariff for a parcel in a known category.
///
/// ## Errors
/// Only malformed input is an `Err`: non-positive or non-finite value or
/// weight, or an importation count of zero. Category limit violations come
/// back as `Ok(TariffOutcome::Failed(..))`.
///
/// ## Example
/// ```rust
/// use senae_core::tariff::calculate_tariff;
/// use senae_core::{Category, TariffOptions};
///
/// let outcome = calculate_tariff(Category::C, 1000.0, 10.0, &TariffOptions::default()).unwrap();
/// let breakdown = outcome.breakdown().unwrap();
/// assert!((breakdown.total_cost - 1237.0).abs() < 1e-9);
///
/// let too_heavy = calculate_tariff(Category::B, 100.0, 5.0, &TariffOptions::default()).unwrap();
/// assert!(too_heavy.is_error());
///
/// assert!(calculate_tariff(Category::B, 0.0, 1.0, &TariffOptions::default()).is_err());
/// ```
pub fn calculate_tariff(
    category: Category,
    value: f64,
    weight: f64,
    options: &TariffOptions,
) -> ValidationResult<TariffOutcome> {
    validate_inputs(value, weight, options)?;

    let result = match category {
        Category::B => category_b(value, weight, options.importations_count.unwrap_or(1)),
        Category::C => category_c(value, weight),
        Category::D => category_d(
            value,
            weight,
            options.product_type.as_deref().unwrap_or(DEFAULT_PRODUCT_TYPE),
        ),
    };

    Ok(match result {
        Ok(breakdown) => {
            debug!(
                category = category.code(),
                value,
                weight,
                total_taxes = breakdown.total_taxes,
                "tariff calculated"
            );
            TariffOutcome::Calculated(breakdown)
        }
        Err(err) => recovered(category.code(), value, weight, err),
    })
}

/// Same as [`calculate_tariff`] for a raw category code (`"b"`, `"C"`, ...).
///
/// An unknown code is recovered like any other business-rule failure:
/// `Ok(TariffOutcome::Failed)` with the code echoed back.
pub fn calculate_tariff_for_code(
    code: &str,
    value: f64,
    weight: f64,
    options: &TariffOptions,
) -> ValidationResult<TariffOutcome> {
    validate_inputs(value, weight, options)?;

    match code.parse::<Category>() {
        Ok(category) => calculate_tariff(category, value, weight, options),
        Err(err) => Ok(recovered(code, value, weight, err)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
