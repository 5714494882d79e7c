//! # Product Quotes
//!
//! Prices a catalog product end to end: classify it, then run the tariff
//! engine on the category it landed in. This is what the storefront shows
//! next to a product before anything is ordered.

use crate::classifier::determine_category;
use crate::tariff::calculate_tariff;
use crate::types::{ProductQuote, TariffOptions, DEFAULT_UNIT_WEIGHT};
use crate::validation::{validate_amount, ValidationResult};

/// Product type used when the catalog has no category for the product.
pub const GENERAL_PRODUCT_TYPE: &str = "general";

/// Classifies a catalog product and calculates its tariff.
///
/// The catalog category doubles as classifier hint and as product type.
/// A missing weight counts as [`DEFAULT_UNIT_WEIGHT`].
///
/// ## Example
/// ```rust
/// use senae_core::quote::quote_product;
/// use senae_core::Category;
///
/// let quote = quote_product(49.99, Some(0.34), Some("Electronics")).unwrap();
/// assert_eq!(quote.category, Category::B);
/// assert_eq!(quote.tariff_calculation.breakdown().unwrap().total_taxes, 42.0);
///
/// let quote = quote_product(89.99, None, Some("Clothing")).unwrap();
/// assert_eq!(quote.category, Category::D);
/// assert_eq!(quote.weight_used, 1.0);
/// ```
pub fn quote_product(
    price: f64,
    weight: Option<f64>,
    catalog_category: Option<&str>,
) -> ValidationResult<ProductQuote> {
    validate_amount("price", price)?;

    let weight = weight.unwrap_or(DEFAULT_UNIT_WEIGHT);
    validate_amount("weight", weight)?;

    let hint = catalog_category.map(str::trim).unwrap_or_default();
    let product_type = if hint.is_empty() {
        GENERAL_PRODUCT_TYPE
    } else {
        hint
    };

    let category = determine_category(price, weight, hint);
    let options = TariffOptions::default().with_product_type(product_type);
    let tariff_calculation = calculate_tariff(category, price, weight, &options)?;

    Ok(ProductQuote {
        category,
        price_used: price,
        weight_used: weight,
        product_type: product_type.to_string(),
        tariff_calculation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::Category;

    #[test]
    fn test_quote_small_electronics() {
        let quote = quote_product(49.99, Some(0.34), Some("Electronics")).unwrap();
        assert_eq!(quote.category, Category::B);
        assert_eq!(quote.price_used, 49.99);
        assert_eq!(quote.weight_used, 0.34);
        assert_eq!(quote.product_type, "Electronics");
        assert!(!quote.tariff_calculation.is_error());
    }

    #[test]
    fn test_quote_footwear_uses_catalog_category() {
        let quote = quote_product(150.0, Some(0.9), Some("Footwear")).unwrap();
        assert_eq!(quote.category, Category::D);
        assert_eq!(quote.product_type, "Footwear");

        let breakdown = quote.tariff_calculation.breakdown().unwrap();
        // under one pair by weight still pays one pair
        assert_eq!(breakdown.specific_tariff, Some(6.0));
        assert_eq!(breakdown.requires_inen, Some(false));
    }

    #[test]
    fn test_quote_without_catalog_category() {
        let quote = quote_product(899.0, Some(2.1), None).unwrap();
        assert_eq!(quote.category, Category::C);
        assert_eq!(quote.product_type, GENERAL_PRODUCT_TYPE);

        let blank = quote_product(899.0, Some(2.1), Some("  ")).unwrap();
        assert_eq!(blank.product_type, GENERAL_PRODUCT_TYPE);
    }

    #[test]
    fn test_quote_over_every_ceiling_is_recovered() {
        let quote = quote_product(5000.0, Some(1.0), Some("Electronics")).unwrap();
        assert_eq!(quote.category, Category::C);
        assert!(quote.tariff_calculation.is_error());
    }

    #[test]
    fn test_quote_rejects_bad_input() {
        assert!(matches!(
            quote_product(0.0, None, None),
            Err(ValidationError::MustBePositive { field }) if field == "price"
        ));
        assert!(quote_product(10.0, Some(-1.0), None).is_err());
    }
}
