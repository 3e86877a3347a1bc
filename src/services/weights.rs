use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Slack allowed when checking that the base weights sum to at most 1
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Errors raised when a scoring configuration cannot produce meaningful scores
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("engagement, price and brand weights must sum to at most 1 (got {0})")]
    WeightSumExceeded(f64),
    #[error("price bucket bounds must be finite, positive and strictly ascending")]
    InvalidBuckets,
    #[error("default limit must be at least 1")]
    ZeroLimit,
}

/// Named weight presets observed for the same recommendation algorithm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmVariant {
    /// Engagement, price proximity, brand popularity and a double boost reward
    #[default]
    FiveFactor,
    /// Heavier engagement weights with price proximity and a brand bonus, no boost bonus
    Simple,
    /// Engagement plus boost multiplier only
    EngagementOnly,
}

/// Per-signal weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    /// Per-favorite contribution to engagement (`Wf`)
    pub favorite: f64,
    /// Per-view contribution to engagement (`Wv`)
    pub view: f64,
    /// Weight of the engagement score in the base score
    pub engagement: f64,
    /// Weight of the price-proximity score in the base score
    pub price: f64,
    /// Weight of the brand-popularity bonus in the base score
    pub brand: f64,
    /// Multiplier increment per boost level (`Wb`)
    pub boost_factor: f64,
}

impl ScoringWeights {
    /// Sum of the three base-score weights
    pub fn base_sum(&self) -> f64 {
        self.engagement + self.price + self.brand
    }
}

/// Everything a scoring call needs besides the corpus itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub variant: AlgorithmVariant,
    pub weights: ScoringWeights,
    /// Raw bonus granted to listings of a popular brand, before `weights.brand`
    pub brand_bonus: f64,
    /// Flat amount added to boosted listings after the multiplier
    pub boost_bonus: f64,
    pub popular_brands: BTreeSet<String>,
    /// Inclusive upper bounds of the price histogram; a final open bucket is implied
    pub price_buckets: Vec<f64>,
    pub default_limit: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::for_variant(AlgorithmVariant::default())
    }
}

impl ScoringConfig {
    /// Builds the preset configuration for a variant
    pub fn for_variant(variant: AlgorithmVariant) -> Self {
        match variant {
            AlgorithmVariant::FiveFactor => Self {
                variant,
                weights: ScoringWeights {
                    favorite: 0.3,
                    view: 0.2,
                    engagement: 0.7,
                    price: 0.2,
                    brand: 0.1,
                    boost_factor: 0.5,
                },
                brand_bonus: 1.0,
                boost_bonus: 0.2,
                popular_brands: brand_set(&["Apple", "Audi", "Samsung", "Nike", "Adidas", "Sony"]),
                price_buckets: vec![50.0, 100.0, 500.0],
                default_limit: 10,
            },
            AlgorithmVariant::Simple => Self {
                variant,
                weights: ScoringWeights {
                    favorite: 0.4,
                    view: 0.3,
                    engagement: 0.7,
                    price: 0.2,
                    brand: 0.1,
                    boost_factor: 0.3,
                },
                brand_bonus: 1.0,
                boost_bonus: 0.0,
                popular_brands: brand_set(&["Apple", "Audi", "Samsung", "Nike", "Adidas"]),
                price_buckets: vec![50.0, 100.0, 200.0, 500.0],
                default_limit: 5,
            },
            AlgorithmVariant::EngagementOnly => Self {
                variant,
                weights: ScoringWeights {
                    favorite: 0.4,
                    view: 0.3,
                    engagement: 1.0,
                    price: 0.0,
                    brand: 0.0,
                    boost_factor: 0.3,
                },
                brand_bonus: 0.0,
                boost_bonus: 0.0,
                popular_brands: brand_set(&["Apple", "Audi", "Samsung", "Nike", "Adidas"]),
                price_buckets: vec![50.0, 100.0, 200.0, 500.0],
                default_limit: 5,
            },
        }
    }

    /// Replaces the popular-brand set
    pub fn with_popular_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.popular_brands = brands.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the price histogram bounds
    pub fn with_price_buckets(mut self, bounds: Vec<f64>) -> Self {
        self.price_buckets = bounds;
        self
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Checks the configuration can produce comparable, monotonic scores
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        let named = [
            ("favorite weight", w.favorite),
            ("view weight", w.view),
            ("engagement weight", w.engagement),
            ("price weight", w.price),
            ("brand weight", w.brand),
            ("boost factor", w.boost_factor),
            ("brand bonus", self.brand_bonus),
            ("boost bonus", self.boost_bonus),
        ];

        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        let sum = w.base_sum();
        if sum > 1.0 + WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSumExceeded(sum));
        }

        let ascending = self.price_buckets.windows(2).all(|pair| pair[0] < pair[1]);
        let well_formed = self
            .price_buckets
            .iter()
            .all(|bound| bound.is_finite() && *bound > 0.0);
        if !ascending || !well_formed {
            return Err(ConfigError::InvalidBuckets);
        }

        if self.default_limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }

        Ok(())
    }
}

fn brand_set(brands: &[&str]) -> BTreeSet<String> {
    brands.iter().map(|b| b.to_string()).collect()
}
