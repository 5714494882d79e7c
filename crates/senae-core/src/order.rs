//! # Order Aggregation
//!
//! Runs the tariff engine over every line of an order and folds the results
//! into order-level totals.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items ──► validate all ──► Err(ValidationError) if any is malformed   │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  for each item (input order):                                           │
//! │    value  = unit_price × quantity                                       │
//! │    weight = (weight or 1.0) × quantity                                  │
//! │    outcome = calculate_tariff(category, value, weight, options)         │
//! │        │                                                                │
//! │        ├── Calculated ──► fold value, weight, tariff, iva, fodinfa, adv│
//! │        └── Failed ──────► keep the item, skip it in every total        │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  round to cents, total_taxes = tariff + iva + fodinfa + adv            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tariff Key Folding
//! B and C report their duty under `tariff`, D under `total_tariff`. Both
//! keys are added into `total_tariff` (see
//! [`TariffBreakdown::tariff_component`]). No strategy sets both.
//!
//! D's ADV is part of its `total_tariff` and is also folded into
//! `total_adv`, so an order's `total_taxes` counts it twice. Per-item
//! `total_taxes` does not.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::{round2, Money};
use crate::tariff::{calculate_tariff, calculate_tariff_for_code};
use crate::types::{
    BulkItemCalculation, BulkTariffItem, BulkTariffSummary, NewOrder, OrderDraft, OrderLineItem,
    OrderStatus, OrderSummary, OrderTotals, ProcessedLineItem, TariffBreakdown, TariffOptions,
    TariffOutcome, TaxTotals,
};
use crate::validation::{validate_bulk_item, validate_customer, validate_line_item, ValidationResult};

/// Order number prefix used when none is configured.
pub const DEFAULT_ORDER_PREFIX: &str = "IBT";

/// Product type for bulk rows that do not name one.
pub const DEFAULT_BULK_PRODUCT_TYPE: &str = "general";

// =============================================================================
// Tax Accumulator
// =============================================================================

/// Running sums of the tax components, kept at full precision.
#[derive(Debug, Default)]
struct TaxAccumulator {
    tariff: f64,
    iva: f64,
    fodinfa: f64,
    adv: f64,
}

impl TaxAccumulator {
    fn add(&mut self, breakdown: &TariffBreakdown) {
        self.tariff += breakdown.tariff_component();
        self.iva += breakdown.iva;
        self.fodinfa += breakdown.fodinfa;
        self.adv += breakdown.adv;
    }

    /// Snaps each component to cents, then sums the rounded components so
    /// `total_taxes` always equals the sum of what is displayed.
    fn finish(&self) -> TaxTotals {
        let tariff = Money::from_amount(self.tariff);
        let iva = Money::from_amount(self.iva);
        let fodinfa = Money::from_amount(self.fodinfa);
        let adv = Money::from_amount(self.adv);

        TaxTotals {
            total_tariff: tariff.amount(),
            total_iva: iva.amount(),
            total_fodinfa: fodinfa.amount(),
            total_adv: adv.amount(),
            total_taxes: (tariff + iva + fodinfa + adv).amount(),
        }
    }
}

// =============================================================================
// Order Aggregation
// =============================================================================

/// Computes the tariff of every line and the order totals.
///
/// ## Errors
/// Any malformed line (zero quantity, non-positive price or weight, blank
/// product id) rejects the whole order before a single tariff is computed.
/// A line that breaks its category's limits does NOT: it is returned with a
/// failed `tariff_calculation` and left out of the totals.
///
/// ## Example
/// ```rust
/// use senae_core::order::aggregate_order;
/// use senae_core::{Category, OrderLineItem};
///
/// let items = vec![OrderLineItem {
///     product_id: "B08N5WRWNW".into(),
///     title: "Echo Dot (4th Gen)".into(),
///     quantity: 2,
///     unit_price: 49.99,
///     weight: Some(0.34),
///     category: Category::B,
///     product_type: None,
///     importations_count: None,
/// }];
///
/// let summary = aggregate_order(&items).unwrap();
/// assert_eq!(summary.totals.total_value, 99.98);
/// assert_eq!(summary.totals.total_weight, 0.68);
/// assert_eq!(summary.totals.taxes.total_tariff, 42.0);
/// ```
pub fn aggregate_order(items: &[OrderLineItem]) -> ValidationResult<OrderSummary> {
    for item in items {
        validate_line_item(item)?;
    }

    let mut taxes = TaxAccumulator::default();
    let mut total_value = 0.0;
    let mut total_weight = 0.0;
    let mut failed_items = 0;
    let mut processed_items = Vec::with_capacity(items.len());

    for item in items {
        let item_total_value = item.item_total_value();
        let item_total_weight = item.item_total_weight();

        let outcome = calculate_tariff(
            item.category,
            item_total_value,
            item_total_weight,
            &item.tariff_options(),
        )?;

        match &outcome {
            TariffOutcome::Calculated(breakdown) => {
                total_value += item_total_value;
                total_weight += item_total_weight;
                taxes.add(breakdown);
            }
            TariffOutcome::Failed(failure) => {
                warn!(
                    product_id = %item.product_id,
                    category = %item.category,
                    error = %failure.error,
                    "order item excluded from totals"
                );
                failed_items += 1;
            }
        }

        processed_items.push(ProcessedLineItem {
            item: item.clone(),
            item_total_value,
            item_total_weight,
            tariff_calculation: outcome,
        });
    }

    Ok(OrderSummary {
        processed_items,
        totals: OrderTotals {
            total_value: Money::from_amount(total_value).amount(),
            total_weight: round2(total_weight),
            taxes: taxes.finish(),
        },
        failed_items,
    })
}

// =============================================================================
// Bulk Calculation
// =============================================================================

/// Calculates tariffs for pre-totalled rows (value and weight already
/// multiplied out), e.g. a quote for a basket that is not an order yet.
///
/// Rows go through the code-based dispatcher, so an unknown category code is
/// a per-row failure. Totals only carry tax components.
pub fn calculate_bulk(items: &[BulkTariffItem]) -> ValidationResult<BulkTariffSummary> {
    for item in items {
        validate_bulk_item(item)?;
    }

    let mut taxes = TaxAccumulator::default();
    let mut failed_items = 0;
    let mut items_calculations = Vec::with_capacity(items.len());

    for item in items {
        let options = TariffOptions::default().with_product_type(
            item.product_type
                .as_deref()
                .unwrap_or(DEFAULT_BULK_PRODUCT_TYPE),
        );

        let outcome =
            calculate_tariff_for_code(&item.category, item.total_value, item.total_weight, &options)?;

        match outcome.breakdown() {
            Some(breakdown) => taxes.add(breakdown),
            None => failed_items += 1,
        }

        items_calculations.push(BulkItemCalculation {
            item: item.clone(),
            tariff_calculation: outcome,
        });
    }

    Ok(BulkTariffSummary {
        items_calculations,
        total_tariffs: taxes.finish(),
        failed_items,
    })
}

// =============================================================================
// Order Drafting
// =============================================================================

/// Builds an order number: `{prefix}-{YYYYMMDD}-{8 upper-case hex chars}`.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use senae_core::order::generate_order_number;
/// use uuid::Uuid;
///
/// let id = Uuid::parse_str("1a2b3c4d-0000-4000-8000-000000000000").unwrap();
/// let now = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
/// assert_eq!(generate_order_number("IBT", now, id), "IBT-20240309-1A2B3C4D");
/// ```
pub fn generate_order_number(prefix: &str, now: DateTime<Utc>, id: Uuid) -> String {
    let hex = id.simple().to_string();
    format!(
        "{}-{}-{}",
        prefix,
        now.format("%Y%m%d"),
        hex[..8].to_uppercase()
    )
}

/// Validates a new order, computes its tariffs and stamps it as a draft.
///
/// `now` and `id` are passed in so the draft is reproducible; callers
/// normally hand in `Utc::now()` and `Uuid::new_v4()`.
pub fn draft_order(
    request: NewOrder,
    prefix: &str,
    now: DateTime<Utc>,
    id: Uuid,
) -> CoreResult<OrderDraft> {
    validate_customer(&request)?;

    if request.items.is_empty() {
        return Err(CoreError::EmptyOrder);
    }

    let summary = aggregate_order(&request.items)?;
    let order_number = generate_order_number(prefix, now, id);

    info!(
        order_number = %order_number,
        items = summary.processed_items.len(),
        failed_items = summary.failed_items,
        total_value = %Money::from_amount(summary.totals.total_value),
        total_taxes = %Money::from_amount(summary.totals.taxes.total_taxes),
        "order drafted"
    );

    Ok(OrderDraft {
        order_number,
        customer_name: request.customer_name,
        customer_email: request.customer_email,
        customer_cedula: request.customer_cedula,
        items: summary.processed_items,
        shipping_address: request.shipping_address,
        notes: request.notes,
        status: OrderStatus::Draft,
        total_value: summary.totals.total_value,
        total_weight: summary.totals.total_weight,
        total_tariffs: summary.totals.taxes,
        failed_items: summary.failed_items,
        created_at: now,
        updated_at: now,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
