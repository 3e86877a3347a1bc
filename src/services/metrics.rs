use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::Product;

/// Read-only summary of a product population
///
/// All averages are 0 for an empty population.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorpusMetrics {
    pub count: usize,
    pub average_price: f64,
    pub average_favorites: f64,
    pub average_views: f64,
    pub with_favorites: usize,
    pub with_views: usize,
    pub boosted_count: usize,
    /// Share of boosted listings, 0-100
    pub boosted_percentage: f64,
    /// Distinct non-empty brands divided by the product count
    pub brand_diversity: f64,
    pub price_distribution: Vec<PriceBucket>,
    pub brands: BTreeMap<String, usize>,
    pub categories: BTreeMap<String, usize>,
    pub conditions: BTreeMap<String, usize>,
    pub boost_impact: BoostImpact,
}

/// One histogram bucket; `lower` is exclusive and `upper` inclusive
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceBucket {
    pub label: String,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub count: usize,
}

/// Engagement of boosted listings compared with regular ones
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoostImpact {
    pub average_boost_level: f64,
    pub average_favorites_boosted: f64,
    pub average_favorites_regular: f64,
}

/// Mean price with missing prices counted as zero
pub fn average_price<'a, I>(products: I) -> f64
where
    I: IntoIterator<Item = &'a Product>,
{
    let (sum, count) = products
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), p| (sum + p.price_or_zero(), count + 1));
    ratio(sum, count)
}

/// Computes every metric in a single pass over the population
pub fn compute_metrics<'a, I>(products: I, bucket_bounds: &[f64]) -> CorpusMetrics
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut buckets = empty_buckets(bucket_bounds);
    let mut count = 0usize;
    let mut price_sum = 0.0;
    let mut favorite_sum = 0.0;
    let mut view_sum = 0.0;
    let mut with_favorites = 0usize;
    let mut with_views = 0usize;
    let mut boosted_count = 0usize;
    let mut boost_level_sum = 0.0;
    let mut boosted_favorites = 0.0;
    let mut regular_favorites = 0.0;
    let mut distinct_brands = BTreeSet::new();
    let mut brands = BTreeMap::new();
    let mut categories = BTreeMap::new();
    let mut conditions = BTreeMap::new();

    for product in products {
        count += 1;

        let price = product.price_or_zero();
        price_sum += price;
        let slot = bucket_bounds
            .iter()
            .position(|upper| price <= *upper)
            .unwrap_or(bucket_bounds.len());
        buckets[slot].count += 1;

        favorite_sum += product.favorite_count as f64;
        view_sum += product.view_count as f64;
        if product.favorite_count > 0 {
            with_favorites += 1;
        }
        if product.view_count > 0 {
            with_views += 1;
        }

        if product.is_boosted {
            boosted_count += 1;
            boost_level_sum += product.effective_boost_level() as f64;
            boosted_favorites += product.favorite_count as f64;
        } else {
            regular_favorites += product.favorite_count as f64;
        }

        if let Some(brand) = non_empty(&product.brand) {
            distinct_brands.insert(brand);
            *brands.entry(brand.to_string()).or_insert(0) += 1;
        }
        if let Some(category) = non_empty(&product.category) {
            *categories.entry(category.to_string()).or_insert(0) += 1;
        }
        if let Some(condition) = non_empty(&product.condition) {
            *conditions.entry(condition.to_string()).or_insert(0) += 1;
        }
    }

    let regular_count = count - boosted_count;

    CorpusMetrics {
        count,
        average_price: ratio(price_sum, count),
        average_favorites: ratio(favorite_sum, count),
        average_views: ratio(view_sum, count),
        with_favorites,
        with_views,
        boosted_count,
        boosted_percentage: ratio(boosted_count as f64, count) * 100.0,
        brand_diversity: ratio(distinct_brands.len() as f64, count),
        price_distribution: buckets,
        brands,
        categories,
        conditions,
        boost_impact: BoostImpact {
            average_boost_level: ratio(boost_level_sum, boosted_count),
            average_favorites_boosted: ratio(boosted_favorites, boosted_count),
            average_favorites_regular: ratio(regular_favorites, regular_count),
        },
    }
}

fn empty_buckets(bounds: &[f64]) -> Vec<PriceBucket> {
    let mut buckets = Vec::with_capacity(bounds.len() + 1);
    let mut lower: Option<f64> = None;

    for &upper in bounds {
        let from = lower.map_or_else(|| "0".to_string(), format_bound);
        buckets.push(PriceBucket {
            label: format!("{}-{}", from, format_bound(upper)),
            lower,
            upper: Some(upper),
            count: 0,
        });
        lower = Some(upper);
    }

    buckets.push(PriceBucket {
        label: format!("{}+", lower.map_or_else(|| "0".to_string(), format_bound)),
        lower,
        upper: None,
        count: 0,
    });

    buckets
}

fn format_bound(bound: f64) -> String {
    if bound.fract() == 0.0 {
        format!("{:.0}", bound)
    } else {
        format!("{}", bound)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Product> {
        vec![
            Product::new(1, "iPhone 13 Pro Max", 899.99)
                .with_brand("Apple")
                .with_category("electronics")
                .with_condition("excellent")
                .with_engagement(15, 120)
                .boosted(2),
            Product::new(2, "Nike Air Max 270", 89.99)
                .with_brand("Nike")
                .with_category("fashion")
                .with_condition("good")
                .with_engagement(8, 45),
            Product::new(3, "MacBook Pro M1", 1299.99)
                .with_brand("Apple")
                .with_category("electronics")
                .with_engagement(25, 200)
                .boosted(3),
            Product::new(4, "Levi's 501 Jeans", 49.99).with_brand(" "),
        ]
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_population_has_zero_averages() {
        let metrics = compute_metrics(&Vec::<Product>::new(), &[50.0, 100.0]);
        assert_eq!(metrics.count, 0);
        assert_eq!(metrics.average_price, 0.0);
        assert_eq!(metrics.average_favorites, 0.0);
        assert_eq!(metrics.average_views, 0.0);
        assert_eq!(metrics.boosted_percentage, 0.0);
        assert_eq!(metrics.brand_diversity, 0.0);
        assert!(!metrics.average_price.is_nan());
        assert_eq!(metrics.price_distribution.len(), 3);
    }

    #[test]
    fn test_averages_and_counts() {
        let products = sample();
        let metrics = compute_metrics(&products, &[50.0, 100.0, 500.0]);

        assert_eq!(metrics.count, 4);
        assert!(approx_eq(
            metrics.average_price,
            (899.99 + 89.99 + 1299.99 + 49.99) / 4.0
        ));
        assert!(approx_eq(metrics.average_favorites, 48.0 / 4.0));
        assert_eq!(metrics.with_favorites, 3);
        assert_eq!(metrics.with_views, 3);
        assert_eq!(metrics.boosted_count, 2);
        assert!(approx_eq(metrics.boosted_percentage, 50.0));
    }

    #[test]
    fn test_brand_diversity_ignores_blank_brands() {
        let products = sample();
        let metrics = compute_metrics(&products, &[]);
        // Apple and Nike over four listings
        assert!(approx_eq(metrics.brand_diversity, 0.5));
        assert_eq!(metrics.brands.get("Apple"), Some(&2));
        assert_eq!(metrics.conditions.len(), 2);
    }

    #[test]
    fn test_price_distribution() {
        let products = sample();
        let metrics = compute_metrics(&products, &[50.0, 100.0, 500.0]);
        let labels: Vec<&str> = metrics
            .price_distribution
            .iter()
            .map(|b| b.label.as_str())
            .collect();
        let counts: Vec<usize> = metrics.price_distribution.iter().map(|b| b.count).collect();

        assert_eq!(labels, vec!["0-50", "50-100", "100-500", "500+"]);
        assert_eq!(counts, vec![1, 1, 0, 2]);
    }

    #[test]
    fn test_bucket_upper_bound_is_inclusive() {
        let products = vec![Product::new(1, "x", 50.0), Product::new(2, "y", 50.01)];
        let metrics = compute_metrics(&products, &[50.0]);
        assert_eq!(metrics.price_distribution[0].count, 1);
        assert_eq!(metrics.price_distribution[1].count, 1);
    }

    #[test]
    fn test_boost_impact() {
        let products = sample();
        let metrics = compute_metrics(&products, &[]);
        assert!(approx_eq(metrics.boost_impact.average_boost_level, 2.5));
        assert!(approx_eq(metrics.boost_impact.average_favorites_boosted, 20.0));
        assert!(approx_eq(metrics.boost_impact.average_favorites_regular, 4.0));
    }

    #[test]
    fn test_average_price_counts_missing_as_zero() {
        let mut unpriced = Product::new(2, "y", 0.0);
        unpriced.price = None;
        let products = vec![Product::new(1, "x", 100.0), unpriced];
        assert!(approx_eq(average_price(&products), 50.0));
    }
}
