//! # Category Classifier
//!
//! Picks a courier category from a parcel's declared value, weight and a
//! free-text product hint (usually the catalog category).
//!
//! ## Priority Order (first match wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. hint mentions textiles/apparel/footwear                             │
//! │     AND weight ≤ 20 AND value ≤ 2000 ─────────────────────────► D      │
//! │  2. weight ≤ 4  AND value ≤ 400 ──────────────────────────────► B      │
//! │  3. weight ≤ 50 AND value ≤ 2000 ─────────────────────────────► C      │
//! │  4. nothing fits ─────────────────────────────────────────────► C      │
//! │                                                    (fallback)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 4 can hand out C for a parcel that is above C's own ceiling, in
//! which case the tariff calculation that follows reports a limit error.
//! Callers that want to detect that case up front use [`fitting_category`].

use tracing::debug;

use crate::types::Category;

/// Substrings (lowercase) that mark a hint as textiles, apparel or footwear.
pub const TEXTILE_KEYWORDS: &[&str] = &[
    "textile", "ropa", "vestir", "calzado", "zapato", "clothing", "apparel", "garment",
    "footwear", "shoe",
];

/// True when the hint mentions any of [`TEXTILE_KEYWORDS`].
pub fn is_textile_hint(hint: &str) -> bool {
    let hint = hint.to_lowercase();
    TEXTILE_KEYWORDS.iter().any(|keyword| hint.contains(keyword))
}

/// The category the parcel fits, or `None` if it exceeds every ceiling.
///
/// ## Example
/// ```rust
/// use senae_core::classifier::fitting_category;
/// use senae_core::Category;
///
/// assert_eq!(fitting_category(50.0, 1.0, "running shoes"), Some(Category::D));
/// assert_eq!(fitting_category(5000.0, 1.0, ""), None);
/// ```
pub fn fitting_category(value: f64, weight: f64, product_type_hint: &str) -> Option<Category> {
    if is_textile_hint(product_type_hint) && Category::D.limits().admits(value, weight) {
        return Some(Category::D);
    }

    [Category::B, Category::C]
        .into_iter()
        .find(|category| category.limits().admits(value, weight))
}

/// Determines the courier category for a parcel. Never fails.
///
/// Falls back to [`Category::C`] when no category fits.
///
/// ## Example
/// ```rust
/// use senae_core::classifier::determine_category;
/// use senae_core::Category;
///
/// assert_eq!(determine_category(49.99, 0.34, "Electronics"), Category::B);
/// assert_eq!(determine_category(899.0, 2.1, "Electronics"), Category::C);
/// assert_eq!(determine_category(5000.0, 1.0, ""), Category::C);
/// ```
pub fn determine_category(value: f64, weight: f64, product_type_hint: &str) -> Category {
    let category = fitting_category(value, weight, product_type_hint);

    if category.is_none() {
        debug!(value, weight, "no category fits, falling back to C");
    }

    category.unwrap_or(Category::C)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_picks_d() {
        assert_eq!(determine_category(50.0, 1.0, "running shoes"), Category::D);
        assert_eq!(determine_category(30.0, 0.5, "Clothing"), Category::D);
        assert_eq!(determine_category(30.0, 0.5, "Calzado deportivo"), Category::D);
        assert_eq!(determine_category(30.0, 0.5, "ROPA"), Category::D);
    }

    #[test]
    fn test_textile_over_d_ceiling_falls_through() {
        // Too heavy for D, light enough for C
        assert_eq!(determine_category(100.0, 25.0, "textiles"), Category::C);
        // Too expensive for D and C
        assert_eq!(determine_category(2500.0, 1.0, "textiles"), Category::C);
        assert_eq!(fitting_category(2500.0, 1.0, "textiles"), None);
    }

    #[test]
    fn test_small_parcel_is_b() {
        assert_eq!(determine_category(400.0, 4.0, ""), Category::B);
        assert_eq!(determine_category(49.99, 0.34, "Electronics"), Category::B);
    }

    #[test]
    fn test_general_parcel_is_c() {
        assert_eq!(determine_category(400.01, 1.0, ""), Category::C);
        assert_eq!(determine_category(10.0, 4.5, ""), Category::C);
        assert_eq!(determine_category(2000.0, 50.0, "Kitchen"), Category::C);
    }

    #[test]
    fn test_fallback_is_c() {
        assert_eq!(determine_category(5000.0, 1.0, ""), Category::C);
        assert_eq!(determine_category(100.0, 60.0, "Electronics"), Category::C);
        assert_eq!(fitting_category(100.0, 60.0, "Electronics"), None);
    }

    #[test]
    fn test_keyword_wins_over_b() {
        // Fits B too, but the hint takes priority
        assert_eq!(determine_category(20.0, 0.3, "T-shirt apparel"), Category::D);
        assert_eq!(determine_category(20.0, 0.3, "Books"), Category::B);
    }
}
