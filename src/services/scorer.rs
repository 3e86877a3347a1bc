use std::collections::BTreeSet;

use crate::models::{Product, ScoredProduct};

use super::{
    features::{boost_multiplier, brand_popularity_bonus, engagement_score, price_proximity_score},
    metrics::average_price,
    weights::ScoringConfig,
};

/// Population-level inputs shared by every extractor in one scoring call
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringContext<'a> {
    /// Mean price of the population being scored (0 when empty)
    pub average_price: f64,
    pub popular_brands: &'a BTreeSet<String>,
}

impl<'a> ScoringContext<'a> {
    /// Derives the context from the exact population that will be scored
    pub fn from_population<'p, I>(population: I, config: &'a ScoringConfig) -> Self
    where
        I: IntoIterator<Item = &'p Product>,
    {
        Self {
            average_price: average_price(population),
            popular_brands: &config.popular_brands,
        }
    }
}

/// Combines the weighted signals into one recommendation score
///
/// Scores have no fixed range because engagement scales with raw counts. They
/// are only comparable within a single call over a single population and
/// configuration.
pub struct Scorer<'a> {
    config: &'a ScoringConfig,
    context: ScoringContext<'a>,
}

impl<'a> Scorer<'a> {
    pub fn new(config: &'a ScoringConfig, context: ScoringContext<'a>) -> Self {
        Self { config, context }
    }

    pub fn context(&self) -> &ScoringContext<'a> {
        &self.context
    }

    /// Weighted engagement, price proximity and brand bonus, before boosting
    pub fn base_score(&self, product: &Product) -> f64 {
        let weights = &self.config.weights;

        engagement_score(product, weights) * weights.engagement
            + price_proximity_score(product, self.context.average_price) * weights.price
            + brand_popularity_bonus(product, self.context.popular_brands, self.config.brand_bonus)
                * weights.brand
    }

    /// Produces the scored copy of a product
    ///
    /// Boosted listings are rewarded twice: the base score is multiplied by the
    /// boost multiplier and the flat boost bonus is then added on top.
    pub fn score(&self, product: &Product) -> ScoredProduct {
        let base = self.base_score(product);
        let multiplier = boost_multiplier(product, &self.config.weights);

        let recommendation_score = if product.is_boosted {
            base * multiplier + self.config.boost_bonus
        } else {
            base
        };

        ScoredProduct {
            product: product.clone(),
            recommendation_score,
            boost_multiplier: multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::weights::AlgorithmVariant;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_context_uses_population_average() {
        let config = ScoringConfig::default();
        let products = vec![Product::new(1, "a", 100.0), Product::new(2, "b", 300.0)];
        let context = ScoringContext::from_population(&products, &config);
        assert!(approx_eq(context.average_price, 200.0));
    }

    #[test]
    fn test_context_of_empty_population() {
        let config = ScoringConfig::default();
        let empty: Vec<Product> = Vec::new();
        let context = ScoringContext::from_population(&empty, &config);
        assert_eq!(context.average_price, 0.0);
    }

    #[test]
    fn test_unboosted_score_is_base() {
        let config = ScoringConfig::default();
        let product = Product::new(1, "Levi's 501 Jeans", 100.0)
            .with_brand("Levi's")
            .with_engagement(4, 22);
        let context = ScoringContext::from_population([&product], &config);
        let scored = Scorer::new(&config, context).score(&product);

        // engagement (4*0.3 + 22*0.2) * 0.7 + proximity 1.0 * 0.2, no brand bonus
        let expected = (4.0 * 0.3 + 22.0 * 0.2) * 0.7 + 0.2;
        assert!(approx_eq(scored.recommendation_score, expected));
        assert_eq!(scored.boost_multiplier, 1.0);
    }

    #[test]
    fn test_boosted_score_applies_multiplier_and_bonus() {
        let config = ScoringConfig::default();
        let product = Product::new(1, "MacBook Pro M1", 100.0)
            .with_brand("Apple")
            .with_engagement(25, 200)
            .boosted(3);
        let context = ScoringContext::from_population([&product], &config);
        let scorer = Scorer::new(&config, context);

        let base = (25.0 * 0.3 + 200.0 * 0.2) * 0.7 + 0.2 + 1.0 * 0.1;
        assert!(approx_eq(scorer.base_score(&product), base));

        let scored = scorer.score(&product);
        assert!(approx_eq(scored.boost_multiplier, 2.5));
        assert!(approx_eq(scored.recommendation_score, base * 2.5 + 0.2));
    }

    #[test]
    fn test_boosted_without_level_still_gets_bonus() {
        let config = ScoringConfig::default();
        let mut product = Product::new(1, "x", 50.0).with_engagement(2, 10).boosted(1);
        product.boost_level = None;
        let context = ScoringContext::from_population([&product], &config);
        let scorer = Scorer::new(&config, context);

        let scored = scorer.score(&product);
        assert_eq!(scored.boost_multiplier, 1.0);
        assert!(approx_eq(
            scored.recommendation_score,
            scorer.base_score(&product) + 0.2
        ));
    }

    #[test]
    fn test_engagement_only_variant_ignores_price_and_brand() {
        let config = ScoringConfig::for_variant(AlgorithmVariant::EngagementOnly);
        let product = Product::new(1, "Apple AirPods Pro", 299.99)
            .with_brand("Apple")
            .with_engagement(18, 95)
            .boosted(2);
        let context = ScoringContext::from_population([&product], &config);
        let scored = Scorer::new(&config, context).score(&product);

        let expected = (18.0 * 0.4 + 95.0 * 0.3) * 1.6;
        assert!(approx_eq(scored.recommendation_score, expected));
    }

    #[test]
    fn test_simple_variant_weighs_price_and_brand() {
        let config = ScoringConfig::for_variant(AlgorithmVariant::Simple);
        let product = Product::new(1, "Apple AirPods Pro", 299.99)
            .with_brand("Apple")
            .with_engagement(18, 95)
            .boosted(2);
        // A lone product sits exactly on the average price
        let context = ScoringContext::from_population([&product], &config);
        let scored = Scorer::new(&config, context).score(&product);

        let base = (18.0 * 0.4 + 95.0 * 0.3) * 0.7 + 1.0 * 0.2 + 1.0 * 0.1;
        assert!(approx_eq(scored.recommendation_score, base * 1.6));
    }

    #[test]
    fn test_score_does_not_mutate_input() {
        let config = ScoringConfig::default();
        let product = Product::new(1, "x", 10.0).boosted(2);
        let before = product.clone();
        let context = ScoringContext::from_population([&product], &config);
        let scored = Scorer::new(&config, context).score(&product);
        assert_eq!(product, before);
        assert_eq!(scored.product, before);
    }
}
