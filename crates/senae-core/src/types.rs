//! # Domain Types
//!
//! Core domain types used throughout the tariff engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │  TariffOutcome  │   │  OrderLineItem  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  B (≤4kg, $400) │   │  Calculated     │   │  product_id     │       │
//! │  │  C (≤50kg,$2000)│   │  Failed         │   │  quantity       │       │
//! │  │  D (≤20kg,$2000)│   │                 │   │  unit_price     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │   TaxTotals     │   │   OrderStatus   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  tariff, iva    │   │  Draft ...      │       │
//! │  │  1200 = 12%     │   │  fodinfa, adv   │   │  Cancelled      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Every type here is what the API layer and the document store persist, so
//! field names follow the JSON documents (`base_value`, `total_taxes`, ...).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{StrategyResult, TariffError};

// =============================================================================
// Category
// =============================================================================

/// Regulatory courier category.
///
/// - **B**: small, low-value parcels (fixed $42 tariff, free of tributes)
/// - **C**: general parcels (ad-valorem tariff + IVA + FODINFA)
/// - **D**: textiles and footwear (ADV + specific tariff + IVA + FODINFA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    B,
    C,
    D,
}

impl Category {
    /// All categories, in code order.
    pub const ALL: [Category; 3] = [Category::B, Category::C, Category::D];

    /// The one-letter code used on the wire.
    pub const fn code(&self) -> &'static str {
        match self {
            Category::B => "B",
            Category::C => "C",
            Category::D => "D",
        }
    }

    /// Weight and value ceilings for this category.
    pub const fn limits(&self) -> CategoryLimits {
        match self {
            Category::B => CategoryLimits {
                max_weight: 4.0,
                max_value: 400.0,
            },
            Category::C => CategoryLimits {
                max_weight: 50.0,
                max_value: 2000.0,
            },
            Category::D => CategoryLimits {
                max_weight: 20.0,
                max_value: 2000.0,
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parses a category code. Case-insensitive, surrounding whitespace ignored.
///
/// ```rust
/// use senae_core::Category;
///
/// assert_eq!("d".parse::<Category>().unwrap(), Category::D);
/// assert!(" X ".parse::<Category>().is_err());
/// ```
impl FromStr for Category {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "B" => Ok(Category::B),
            "C" => Ok(Category::C),
            "D" => Ok(Category::D),
            _ => Err(TariffError::InvalidCategory(s.to_string())),
        }
    }
}

// =============================================================================
// Category Limits
// =============================================================================

/// Inclusive ceilings for a category. Shared by the classifier and the
/// tariff strategies so both read the same numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryLimits {
    pub max_weight: f64,
    pub max_value: f64,
}

impl CategoryLimits {
    /// True when both value and weight are within the ceilings.
    #[inline]
    pub fn admits(&self, value: f64, weight: f64) -> bool {
        weight <= self.max_weight && value <= self.max_value
    }

    /// Same as [`admits`](Self::admits) but as a strategy precondition.
    pub fn check(&self, category: Category, value: f64, weight: f64) -> StrategyResult<()> {
        if self.admits(value, weight) {
            Ok(())
        } else {
            Err(TariffError::LimitExceeded {
                category,
                max_weight: self.max_weight,
                max_value: self.max_value,
            })
        }
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1200 bps = 12% (IVA), 50 bps = 0.5% (FODINFA)
///
/// The rates are exact integers; only the amounts they apply to are floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate as a fraction (1200 bps → 0.12).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Applies the rate to an amount.
    #[inline]
    pub fn apply(&self, amount: f64) -> f64 {
        amount * self.fraction()
    }
}

// =============================================================================
// Tariff Options
// =============================================================================

/// Category-specific knobs for a tariff calculation.
///
/// - `importations_count` is read by category B only (default 1)
/// - `product_type` is read by category D only (default `"textiles"`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TariffOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub importations_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub product_type: Option<String>,
}

impl TariffOptions {
    pub fn with_importations(mut self, count: u32) -> Self {
        self.importations_count = Some(count);
        self
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }
}

// =============================================================================
// Tariff Outcome
// =============================================================================

/// A successful tariff calculation.
///
/// The breakdown is flat on the wire. Keys that do not apply to the category
/// are omitted rather than zeroed:
///
/// | key                         | B | C | D |
/// |-----------------------------|---|---|---|
/// | `tariff`                    | ✓ | ✓ |   |
/// | `total_tariff`              |   |   | ✓ |
/// | `specific_tariff`           |   |   | ✓ |
/// | `iva`, `fodinfa`, `adv`     | ✓ (0) | ✓ | ✓ |
/// | `requires_control_document` |   | ✓ |   |
/// | `requires_inen`             |   |   | ✓ |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TariffBreakdown {
    pub category: Category,
    pub base_value: f64,
    pub weight: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub tariff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub tariff_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub specific_tariff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub total_tariff: Option<f64>,

    pub iva: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub iva_rate: Option<f64>,

    pub fodinfa: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub fodinfa_rate: Option<f64>,

    pub adv: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub adv_rate: Option<f64>,

    pub total_taxes: f64,
    pub total_cost: f64,

    // Category B
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub importations_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub annual_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub free_of_tributes: Option<bool>,

    // Category C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub requires_control_document: Option<bool>,

    // Category D
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub requires_inen: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub inen_exemption_limit: Option<f64>,
}

impl TariffBreakdown {
    /// Empty breakdown for a category; strategies fill in what applies.
    pub(crate) fn new(category: Category, base_value: f64, weight: f64) -> Self {
        TariffBreakdown {
            category,
            base_value,
            weight,
            tariff: None,
            tariff_rate: None,
            specific_tariff: None,
            total_tariff: None,
            iva: 0.0,
            iva_rate: None,
            fodinfa: 0.0,
            fodinfa_rate: None,
            adv: 0.0,
            adv_rate: None,
            total_taxes: 0.0,
            total_cost: base_value,
            importations_count: None,
            annual_limit: None,
            free_of_tributes: None,
            requires_control_document: None,
            product_type: None,
            requires_inen: None,
            inen_exemption_limit: None,
        }
    }

    /// The tariff component, whichever key carries it.
    ///
    /// B and C report `tariff`, D reports `total_tariff`. Both are summed so
    /// that order totals fold either key; no strategy sets both.
    pub fn tariff_component(&self) -> f64 {
        self.tariff.unwrap_or(0.0) + self.total_tariff.unwrap_or(0.0)
    }
}

/// A tariff calculation that hit a business-rule boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TariffFailure {
    pub error: String,
    /// Category code as supplied (may be an unknown code).
    pub category: String,
    pub base_value: f64,
    pub weight: f64,
}

/// Result of [`crate::tariff::calculate_tariff`].
///
/// Serialized untagged: a failure is recognised by its `error` key, exactly
/// like the documents the API layer stores. Callers must check
/// [`is_error`](Self::is_error) rather than expect an `Err`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum TariffOutcome {
    // Failed first: untagged deserialization tries variants in order and a
    // breakdown never has an `error` key.
    Failed(TariffFailure),
    Calculated(TariffBreakdown),
}

impl TariffOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, TariffOutcome::Failed(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            TariffOutcome::Failed(failure) => Some(&failure.error),
            TariffOutcome::Calculated(_) => None,
        }
    }

    pub fn breakdown(&self) -> Option<&TariffBreakdown> {
        match self {
            TariffOutcome::Calculated(breakdown) => Some(breakdown),
            TariffOutcome::Failed(_) => None,
        }
    }

    pub fn base_value(&self) -> f64 {
        match self {
            TariffOutcome::Calculated(b) => b.base_value,
            TariffOutcome::Failed(f) => f.base_value,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            TariffOutcome::Calculated(b) => b.weight,
            TariffOutcome::Failed(f) => f.weight,
        }
    }
}

// =============================================================================
// Order Line Item
// =============================================================================

/// Weight assumed per unit when the catalog has none.
pub const DEFAULT_UNIT_WEIGHT: f64 = 1.0;

/// A line in an order, as posted by the API layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLineItem {
    /// Catalog identifier (ASIN).
    #[serde(alias = "product_asin")]
    pub product_id: String,

    #[serde(alias = "product_title")]
    pub title: String,

    pub quantity: u32,

    /// Unit price in currency units (USD).
    pub unit_price: f64,

    /// Unit weight in kg. `None` means [`DEFAULT_UNIT_WEIGHT`].
    #[serde(default)]
    pub weight: Option<f64>,

    #[serde(alias = "senae_category")]
    pub category: Category,

    /// Overrides the derived product type ("textiles" for D, "general"
    /// otherwise).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub product_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub importations_count: Option<u32>,
}

impl OrderLineItem {
    pub fn unit_weight(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_UNIT_WEIGHT)
    }

    /// unit_price × quantity
    pub fn item_total_value(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }

    /// unit weight × quantity
    pub fn item_total_weight(&self) -> f64 {
        self.unit_weight() * self.quantity as f64
    }

    /// Options handed to the engine for this line.
    pub fn tariff_options(&self) -> TariffOptions {
        let product_type = self.product_type.clone().unwrap_or_else(|| {
            match self.category {
                Category::D => "textiles",
                Category::B | Category::C => "general",
            }
            .to_string()
        });

        TariffOptions {
            importations_count: self.importations_count,
            product_type: Some(product_type),
        }
    }
}

/// A line item after the engine has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcessedLineItem {
    #[serde(flatten)]
    pub item: OrderLineItem,
    pub item_total_value: f64,
    pub item_total_weight: f64,
    pub tariff_calculation: TariffOutcome,
}

// =============================================================================
// Totals
// =============================================================================

/// Summed tax components. `total_taxes` is always recomputed from the four
/// components, never accumulated on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxTotals {
    pub total_tariff: f64,
    pub total_iva: f64,
    pub total_fodinfa: f64,
    pub total_adv: f64,
    pub total_taxes: f64,
}

/// Order-level totals (successful items only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderTotals {
    pub total_value: f64,
    pub total_weight: f64,
    #[serde(flatten)]
    pub taxes: TaxTotals,
}

/// Output of [`crate::order::aggregate_order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderSummary {
    pub processed_items: Vec<ProcessedLineItem>,
    pub totals: OrderTotals,
    /// Items whose `tariff_calculation` carries an error.
    pub failed_items: usize,
}

impl OrderSummary {
    pub fn has_failures(&self) -> bool {
        self.failed_items > 0
    }
}

// =============================================================================
// Bulk Calculation
// =============================================================================

/// One row of a bulk tariff request. The category stays a raw code so that an
/// unknown code becomes a per-row error instead of rejecting the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkTariffItem {
    #[serde(alias = "senae_category")]
    pub category: String,
    pub total_value: f64,
    pub total_weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub product_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkItemCalculation {
    pub item: BulkTariffItem,
    pub tariff_calculation: TariffOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkTariffSummary {
    pub items_calculations: Vec<BulkItemCalculation>,
    pub total_tariffs: TaxTotals,
    pub failed_items: usize,
}

// =============================================================================
// Product Quote
// =============================================================================

/// A catalog product priced through the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductQuote {
    pub category: Category,
    pub price_used: f64,
    pub weight_used: f64,
    pub product_type: String,
    pub tariff_calculation: TariffOutcome,
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of a customer order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, tariffs computed, not yet confirmed.
    #[default]
    Draft,
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

// =============================================================================
// Orders
// =============================================================================

/// An order as submitted by the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    /// National identity number (cédula) or RUC.
    pub customer_cedula: String,
    pub items: Vec<OrderLineItem>,
    pub shipping_address: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// An order with tariffs computed, ready for the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderDraft {
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_cedula: String,
    pub items: Vec<ProcessedLineItem>,
    pub shipping_address: String,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub total_value: f64,
    pub total_weight: f64,
    pub total_tariffs: TaxTotals,
    pub failed_items: usize,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
