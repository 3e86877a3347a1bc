use std::sync::Arc;

use crate::services::weights::{AlgorithmVariant, ScoringConfig};

/// Shared, read-only application state
///
/// Nothing is stored between requests; every call scores the corpus it carries.
#[derive(Clone)]
pub struct AppState {
    pub scoring: Arc<ScoringConfig>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl AppState {
    pub fn new(scoring: ScoringConfig) -> Self {
        Self {
            scoring: Arc::new(scoring),
        }
    }

    /// Configuration for a request, swapping the weight preset when asked
    ///
    /// Asking for a different variant takes that preset's weights and bonuses
    /// as-is, so weight and bonus overrides from the environment are dropped.
    /// Asking for the server's own variant keeps them. Popular brands, price
    /// buckets and the default limit always stay those of the server.
    pub fn scoring_for(&self, variant: Option<AlgorithmVariant>) -> ScoringConfig {
        match variant {
            Some(variant) if variant != self.scoring.variant => {
                ScoringConfig::for_variant(variant)
                    .with_popular_brands(self.scoring.popular_brands.iter().cloned())
                    .with_price_buckets(self.scoring.price_buckets.clone())
                    .with_default_limit(self.scoring.default_limit)
            }
            _ => self.scoring.as_ref().clone(),
        }
    }
}
