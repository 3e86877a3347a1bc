//! Individual ranking signals
//!
//! Every extractor is total: absent optional fields count as zero and no input
//! can make them fail or divide by zero.

use std::collections::BTreeSet;

use crate::models::Product;

use super::weights::ScoringWeights;

/// Weighted favorites plus weighted views; unbounded, grows with raw counts
pub fn engagement_score(product: &Product, weights: &ScoringWeights) -> f64 {
    product.favorite_count as f64 * weights.favorite + product.view_count as f64 * weights.view
}

/// Rewards prices near the population average, decaying linearly to zero
///
/// Returns 0 when the average is not positive, since relative distance is
/// undefined there.
pub fn price_proximity_score(product: &Product, average_price: f64) -> f64 {
    if average_price <= 0.0 || !average_price.is_finite() {
        return 0.0;
    }

    let distance = (product.price_or_zero() - average_price).abs() / average_price;
    (1.0 - distance).max(0.0)
}

/// Fixed bonus for listings whose brand is in the popular set
pub fn brand_popularity_bonus(
    product: &Product,
    popular_brands: &BTreeSet<String>,
    bonus: f64,
) -> f64 {
    match &product.brand {
        Some(brand) if popular_brands.contains(brand) => bonus,
        _ => 0.0,
    }
}

/// `1 + level * Wb` for boosted listings, `1` otherwise
pub fn boost_multiplier(product: &Product, weights: &ScoringWeights) -> f64 {
    if product.is_boosted {
        1.0 + product.effective_boost_level() as f64 * weights.boost_factor
    } else {
        1.0
    }
}
