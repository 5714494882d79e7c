//! End-to-end properties of the classifier, tariff engine and aggregator,
//! exercised only through the public API.

use chrono::{TimeZone, Utc};
use senae_core::{
    aggregate_order, calculate_tariff, determine_category, draft_order, fitting_category,
    quote_product, Category, NewOrder, OrderDraft, OrderLineItem, OrderSummary, TariffOptions,
    TariffOutcome,
};
use serde_json::Value;
use uuid::Uuid;

const EPS: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn line(id: &str, category: Category, quantity: u32, unit_price: f64, weight: f64) -> OrderLineItem {
    OrderLineItem {
        product_id: id.to_string(),
        title: format!("Item {}", id),
        quantity,
        unit_price,
        weight: Some(weight),
        category,
        product_type: None,
        importations_count: None,
    }
}

/// Values and weights that fit inside every category's ceilings.
fn fitting_inputs() -> Vec<(f64, f64)> {
    let values = [0.01, 1.0, 49.99, 123.45, 399.99, 400.0];
    let weights = [0.01, 0.34, 1.0, 2.5, 3.99, 4.0];
    values
        .iter()
        .flat_map(|&v| weights.iter().map(move |&w| (v, w)))
        .collect()
}

#[test]
fn repeated_calls_are_bit_identical() {
    let options = TariffOptions::default().with_product_type("footwear");

    for category in Category::ALL {
        for (value, weight) in fitting_inputs() {
            let first = calculate_tariff(category, value, weight, &options).unwrap();
            let second = calculate_tariff(category, value, weight, &options).unwrap();
            assert_eq!(first, second);

            let (a, b) = (first.breakdown().unwrap(), second.breakdown().unwrap());
            assert_eq!(a.total_taxes.to_bits(), b.total_taxes.to_bits());
            assert_eq!(a.total_cost.to_bits(), b.total_cost.to_bits());
        }
    }
}

#[test]
fn category_b_is_flat_and_tax_free() {
    for (value, weight) in fitting_inputs() {
        let outcome = calculate_tariff(Category::B, value, weight, &TariffOptions::default()).unwrap();
        let b = outcome.breakdown().unwrap();

        assert_eq!(b.tariff, Some(42.0));
        assert_eq!(b.iva, 0.0);
        assert_eq!(b.fodinfa, 0.0);
        assert_eq!(b.adv, 0.0);
        assert_eq!(b.total_cost, value + 42.0);
        assert_eq!(b.free_of_tributes, Some(true));
    }
}

#[test]
fn iva_and_fodinfa_follow_their_bases() {
    let cases = [
        (Category::C, TariffOptions::default()),
        (Category::D, TariffOptions::default()),
        (Category::D, TariffOptions::default().with_product_type("calzado")),
    ];

    for (category, options) in cases {
        for (value, weight) in fitting_inputs() {
            let outcome = calculate_tariff(category, value, weight, &options).unwrap();
            let b = outcome.breakdown().unwrap();

            assert!(approx_eq(b.iva, (value + b.tariff_component()) * 0.12));
            assert!(approx_eq(b.fodinfa, value * 0.005));
            assert!(approx_eq(b.total_cost, b.base_value + b.total_taxes));
        }
    }
}

#[test]
fn no_result_carries_both_tariff_keys() {
    let product_types = ["textiles", "footwear", "general", "Clothing"];

    for category in Category::ALL {
        for product_type in product_types {
            let options = TariffOptions::default().with_product_type(product_type);
            for (value, weight) in fitting_inputs() {
                let outcome = calculate_tariff(category, value, weight, &options).unwrap();
                let b = outcome.breakdown().unwrap();

                assert!(
                    b.tariff.is_some() != b.total_tariff.is_some(),
                    "{} carries tariff={:?} total_tariff={:?}",
                    category,
                    b.tariff,
                    b.total_tariff
                );
            }
        }
    }
}

#[test]
fn classifier_fallback_leads_to_engine_error() {
    let category = determine_category(5000.0, 1.0, "");
    assert_eq!(category, Category::C);
    assert_eq!(fitting_category(5000.0, 1.0, ""), None);

    let outcome = calculate_tariff(category, 5000.0, 1.0, &TariffOptions::default()).unwrap();
    match outcome {
        TariffOutcome::Failed(failure) => {
            assert_eq!(failure.category, "C");
            assert_eq!(failure.base_value, 5000.0);
            assert_eq!(failure.weight, 1.0);
            assert!(failure.error.contains("C"));
        }
        TariffOutcome::Calculated(_) => panic!("expected a limit failure"),
    }
}

#[test]
fn category_b_annual_limit() {
    let allowed = TariffOptions::default().with_importations(12);
    let outcome = calculate_tariff(Category::B, 100.0, 1.0, &allowed).unwrap();
    assert!(!outcome.is_error());

    let over = TariffOptions::default().with_importations(13);
    let outcome = calculate_tariff(Category::B, 100.0, 1.0, &over).unwrap();
    assert!(outcome.error().unwrap().contains("annual limit"));
}

#[test]
fn mixed_order_totals_skip_failed_items() {
    let items = vec![
        line("LAPTOP", Category::C, 1, 1000.0, 10.0),
        line("BIKE", Category::C, 1, 3000.0, 12.0),
        line("SHIRT", Category::D, 1, 300.0, 5.0),
    ];

    let summary = aggregate_order(&items).unwrap();

    assert_eq!(summary.processed_items.len(), 3);
    assert_eq!(summary.failed_items, 1);
    assert!(summary.processed_items[1].tariff_calculation.is_error());

    let totals = summary.totals;
    assert_eq!(totals.total_value, 1300.0);
    assert_eq!(totals.total_weight, 15.0);
    assert_eq!(totals.taxes.total_tariff, 157.5);
    assert_eq!(totals.taxes.total_iva, 174.9);
    assert_eq!(totals.taxes.total_fodinfa, 6.5);
    assert_eq!(totals.taxes.total_adv, 30.0);
    assert_eq!(totals.taxes.total_taxes, 368.9);
}

#[test]
fn parallel_aggregation_matches_sequential() {
    let items: Vec<OrderLineItem> = (1..=40)
        .map(|i| {
            let category = Category::ALL[i % 3];
            line(&format!("SKU-{}", i), category, (i % 4 + 1) as u32, 12.5 * i as f64, 0.3 * i as f64)
        })
        .collect();

    let expected = aggregate_order(&items).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| aggregate_order(&items).unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn json_shape_per_category() {
    let options = TariffOptions::default();

    let b = serde_json::to_value(calculate_tariff(Category::B, 49.99, 0.34, &options).unwrap()).unwrap();
    assert_eq!(b["category"], "B");
    assert_eq!(b["tariff"], 42.0);
    assert_eq!(b["free_of_tributes"], true);
    assert_eq!(b["importations_count"], 1);
    assert!(b.get("total_tariff").is_none());

    let c = serde_json::to_value(calculate_tariff(Category::C, 1000.0, 10.0, &options).unwrap()).unwrap();
    assert_eq!(c["requires_control_document"], true);
    assert_eq!(c["adv"], 0.0);
    assert!(c.get("tariff").is_some());
    assert!(c.get("specific_tariff").is_none());

    let d = serde_json::to_value(calculate_tariff(Category::D, 300.0, 5.0, &options).unwrap()).unwrap();
    assert_eq!(d["product_type"], "textiles");
    assert_eq!(d["requires_inen"], false);
    assert_eq!(d["inen_exemption_limit"], 500.0);
    assert!(d.get("tariff").is_none());
    assert!(d.get("total_tariff").is_some());

    let failed = serde_json::to_value(calculate_tariff(Category::B, 500.0, 1.0, &options).unwrap()).unwrap();
    assert!(failed["error"].is_string());
    assert_eq!(failed["category"], "B");
    assert_eq!(failed["base_value"], 500.0);
    assert!(failed.get("total_taxes").is_none());
}

#[test]
fn outcomes_survive_a_json_round_trip() {
    let outcomes = [
        calculate_tariff(Category::D, 300.0, 5.0, &TariffOptions::default()).unwrap(),
        calculate_tariff(Category::B, 500.0, 1.0, &TariffOptions::default()).unwrap(),
    ];

    for outcome in outcomes {
        let json = serde_json::to_string(&outcome).unwrap();
        let back: TariffOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}

#[test]
fn product_quote_serializes_with_flat_tariff() {
    let quote = quote_product(150.0, Some(0.9), Some("Footwear")).unwrap();
    let json: Value = serde_json::to_value(&quote).unwrap();

    assert_eq!(json["category"], "D");
    assert_eq!(json["tariff_calculation"]["specific_tariff"], 6.0);
    assert_eq!(json["tariff_calculation"]["requires_inen"], false);
}

fn mixed_items() -> Vec<OrderLineItem> {
    vec![
        line("LAPTOP", Category::C, 1, 1000.0, 10.0),
        line("BIKE", Category::C, 1, 3000.0, 12.0),
        line("SHIRT", Category::D, 2, 150.0, 2.5),
    ]
}

#[test]
fn failed_item_stays_visible_in_order_json() {
    let summary = aggregate_order(&mixed_items()).unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    let failed = &json["processed_items"][1];
    assert_eq!(failed["product_id"], "BIKE");
    assert_eq!(failed["item_total_value"], 3000.0);
    assert!(failed["tariff_calculation"]["error"]
        .as_str()
        .unwrap()
        .contains("category C"));
    assert_eq!(failed["tariff_calculation"]["category"], "C");
    assert!(failed["tariff_calculation"].get("total_taxes").is_none());

    let ok = &json["processed_items"][0];
    assert!(ok["tariff_calculation"].get("error").is_none());
    assert_eq!(ok["tariff_calculation"]["tariff"], 100.0);

    assert_eq!(json["failed_items"], 1);
    assert_eq!(json["totals"]["total_value"], 1300.0);

    let back: OrderSummary = serde_json::from_value(json).unwrap();
    assert_eq!(back, summary);
    assert!(back.processed_items[1].tariff_calculation.is_error());
}

#[test]
fn order_draft_survives_a_json_round_trip() {
    let request = NewOrder {
        customer_name: "María Torres".to_string(),
        customer_email: "maria@example.ec".to_string(),
        customer_cedula: "0912345678".to_string(),
        items: mixed_items(),
        shipping_address: "Calle 10 de Agosto 45, Guayaquil".to_string(),
        notes: None,
    };
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
    let draft = draft_order(request, "IBT", now, Uuid::new_v4()).unwrap();

    let json = serde_json::to_string(&draft).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["status"], "draft");
    assert!(value["items"][1]["tariff_calculation"]["error"].is_string());
    assert!(value["items"][2]["tariff_calculation"]["total_tariff"].is_number());

    let back: OrderDraft = serde_json::from_str(&json).unwrap();
    assert_eq!(back, draft);
}
